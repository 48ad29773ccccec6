//src/items/src/potion.rs
use serde::{Deserialize, Serialize};

use crate::status::StatusEffect;

/// 药水：要么回血（固定值/百分比），要么附带一个状态效果
///
/// Consumed on use; the character crate owns the actual application since
/// healing and effect bookkeeping live on the character.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Potion {
    #[serde(default)]
    pub heal_amount: i32,
    #[serde(default)]
    pub heal_percent: i32,
    #[serde(default)]
    pub effect: Option<StatusEffect>,
}

impl Potion {
    /// 回复药水
    pub fn healing(heal_amount: i32) -> Self {
        Self {
            heal_amount,
            heal_percent: 0,
            effect: None,
        }
    }

    pub fn healing_percent(heal_percent: i32) -> Self {
        Self {
            heal_amount: 0,
            heal_percent,
            effect: None,
        }
    }

    /// 效果药水
    pub fn with_effect(effect: StatusEffect) -> Self {
        Self {
            heal_amount: 0,
            heal_percent: 0,
            effect: Some(effect),
        }
    }
}
