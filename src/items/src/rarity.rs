//src/items/src/rarity.rs
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// 稀有度等级（影响价格与属性规模）
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize, Display, EnumIter,
)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// 商店定价的稀有度系数
    pub fn price_multiplier(self) -> i32 {
        match self {
            Rarity::Common => 10,
            Rarity::Uncommon => 25,
            Rarity::Rare => 75,
            Rarity::Epic => 200,
            Rarity::Legendary => 500,
        }
    }
}
