//src/shop.rs
//! 流浪商人：随机货架、买卖与花钱买经验

use character::{Character, CharacterError, Inventory};
use items::loot::random_loot;
use items::{GameRng, Item};
use thiserror::Error;

/// 一次购买固定给这么多经验
pub const XP_PER_PURCHASE: i32 = 50;

#[derive(Debug, Error)]
pub enum ShopError {
    #[error("item index out of range")]
    InvalidIndex,
    #[error("not enough gold")]
    NotEnoughGold,
}

/// 商人货架：卖空后自动补一小批货
pub struct Shop {
    stock: Vec<Item>,
}

impl Shop {
    /// 开张时上架3到5件随机货
    pub fn with_random_stock(rng: &mut GameRng) -> Self {
        let count = rng.random_range(3..=5);
        Self {
            stock: (0..count).map(|_| random_loot(rng)).collect(),
        }
    }

    pub fn stock(&self) -> &[Item] {
        &self.stock
    }

    /// 买下货架上的一件：扣钱、入包，卖空则补1到3件
    pub fn buy(
        &mut self,
        index: usize,
        player: &mut Character,
        inventory: &mut Inventory,
        rng: &mut GameRng,
    ) -> Result<Item, ShopError> {
        let price = self
            .stock
            .get(index)
            .map(Item::price)
            .ok_or(ShopError::InvalidIndex)?;

        player
            .spend_gold(price as i64)
            .map_err(|_| ShopError::NotEnoughGold)?;

        let item = self.stock.remove(index);
        inventory.add(item.clone());

        if self.stock.is_empty() {
            let refill = rng.random_range(1..=3);
            self.stock.extend((0..refill).map(|_| random_loot(rng)));
        }
        Ok(item)
    }

    /// 买经验的金币价：等级×10，下限1
    pub fn xp_price(player: &Character) -> i64 {
        (player.level as i64 * 10).max(1)
    }

    /// 花钱买经验，返回（获得经验，花掉金币）
    pub fn buy_xp(player: &mut Character) -> Result<(i32, i64), CharacterError> {
        let cost = Self::xp_price(player);
        player.spend_gold(cost)?;
        player.add_xp(XP_PER_PURCHASE);
        Ok((XP_PER_PURCHASE, cost))
    }
}
