// src/items/src/lib.rs

pub mod armor;
pub mod loot;
pub mod potion;
pub mod rarity;
pub mod rng;
pub mod status;
pub mod weapon;

use serde::{Deserialize, Serialize};

pub use crate::armor::{ArmorPiece, ArmorSlot};
pub use crate::potion::Potion;
pub use crate::rarity::Rarity;
pub use crate::rng::GameRng;
pub use crate::status::StatusEffect;
pub use crate::weapon::Weapon;

/// 基础物品结构：共享字段 + 按种类区分的数据
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub rarity: Rarity,
    pub description: String,
    pub kind: ItemKind,
}

/// 物品种类枚举（存档用 `type` 字符串区分这些变体）
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon(Weapon),
    ArmorPiece(ArmorPiece),
    Potion(Potion),
    // Inert payloads, hook points only.
    Artifact,
    Material,
    QuestItem,
    Gold(i64),
}

/// 粗分类（战利品表按此掷骰）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemCategory {
    Weapon,
    Armor,
    Potion,
    Misc,
    Gold,
}

impl Item {
    pub fn weapon(name: &str, damage: i32, rarity: Rarity) -> Self {
        Self {
            name: name.to_string(),
            rarity,
            description: String::new(),
            kind: ItemKind::Weapon(Weapon::new(damage)),
        }
    }

    pub fn armor(name: &str, armor: i32, rarity: Rarity) -> Self {
        Self {
            name: name.to_string(),
            rarity,
            description: String::new(),
            kind: ItemKind::ArmorPiece(ArmorPiece::new(name, armor)),
        }
    }

    pub fn healing_potion(name: &str, heal_amount: i32) -> Self {
        Self {
            name: name.to_string(),
            rarity: Rarity::Common,
            description: String::new(),
            kind: ItemKind::Potion(Potion::healing(heal_amount)),
        }
    }

    pub fn effect_potion(name: &str, effect: StatusEffect) -> Self {
        Self {
            name: name.to_string(),
            rarity: Rarity::Common,
            description: String::new(),
            kind: ItemKind::Potion(Potion::with_effect(effect)),
        }
    }

    pub fn artifact(name: &str, rarity: Rarity, description: &str) -> Self {
        Self {
            name: name.to_string(),
            rarity,
            description: description.to_string(),
            kind: ItemKind::Artifact,
        }
    }

    pub fn material(name: &str, rarity: Rarity, description: &str) -> Self {
        Self {
            name: name.to_string(),
            rarity,
            description: description.to_string(),
            kind: ItemKind::Material,
        }
    }

    pub fn quest_item(name: &str, rarity: Rarity, description: &str) -> Self {
        Self {
            name: name.to_string(),
            rarity,
            description: description.to_string(),
            kind: ItemKind::QuestItem,
        }
    }

    /// 金币条目：不进入背包列表，拾取时直接入账
    pub fn gold(amount: i64) -> Self {
        Self {
            name: "Gold".to_string(),
            rarity: Rarity::Common,
            description: String::new(),
            kind: ItemKind::Gold(amount),
        }
    }

    pub fn category(&self) -> ItemCategory {
        match &self.kind {
            ItemKind::Weapon(_) => ItemCategory::Weapon,
            ItemKind::ArmorPiece(_) => ItemCategory::Armor,
            ItemKind::Potion(_) => ItemCategory::Potion,
            ItemKind::Artifact | ItemKind::Material | ItemKind::QuestItem => ItemCategory::Misc,
            ItemKind::Gold(_) => ItemCategory::Gold,
        }
    }

    pub fn is_gold(&self) -> bool {
        matches!(self.kind, ItemKind::Gold(_))
    }

    pub fn is_potion(&self) -> bool {
        matches!(self.kind, ItemKind::Potion(_))
    }

    /// 商店买入价
    pub fn price(&self) -> i32 {
        let mult = self.rarity.price_multiplier();
        match &self.kind {
            ItemKind::Weapon(w) => (w.damage * mult).max(1),
            ItemKind::ArmorPiece(a) => (a.armor * mult).max(1),
            ItemKind::Potion(p) => {
                if p.heal_amount > 0 {
                    (p.heal_amount / 2 + mult / 2).max(1)
                } else {
                    mult
                }
            }
            ItemKind::Gold(amount) => (*amount as i32).max(1),
            ItemKind::Artifact | ItemKind::Material | ItemKind::QuestItem => mult,
        }
    }

    /// 商店卖出价（半价）
    pub fn sell_price(&self) -> i32 {
        self.price() / 2
    }

    /// 存档里的 `type` 判别字符串（所有护甲子类归一为 "ArmorPiece"）
    pub fn type_label(&self) -> &'static str {
        match &self.kind {
            ItemKind::Weapon(_) => "Weapon",
            ItemKind::ArmorPiece(_) => "ArmorPiece",
            ItemKind::Potion(_) => "Potion",
            ItemKind::Artifact => "Artifact",
            ItemKind::Material => "Material",
            ItemKind::QuestItem => "QuestItem",
            ItemKind::Gold(_) => "Gold",
        }
    }
}
