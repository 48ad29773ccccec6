//src/character/src/class.rs
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// 职业：每个职业一张固定的初始属性表
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Class {
    Knight,
    Mage,
    Rogue,
    Berserker,
    /// Fallback stat table for anything that is not one of the four classes.
    #[default]
    Adventurer,
}

/// 职业初始属性
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BaseStats {
    pub max_hp: i32,
    pub strength: i32,
    pub speed: i32,
    pub dodge: i32,
    pub flexibility: i32,
    pub max_mana: i32,
}

impl Class {
    pub fn base_stats(self) -> BaseStats {
        match self {
            Class::Knight => BaseStats {
                max_hp: 140,
                strength: 12,
                speed: 8,
                dodge: 3,
                flexibility: 4,
                max_mana: 40,
            },
            Class::Mage => BaseStats {
                max_hp: 90,
                strength: 6,
                speed: 10,
                dodge: 5,
                flexibility: 8,
                max_mana: 120,
            },
            Class::Rogue => BaseStats {
                max_hp: 100,
                strength: 10,
                speed: 14,
                dodge: 12,
                flexibility: 10,
                max_mana: 60,
            },
            Class::Berserker => BaseStats {
                max_hp: 130,
                strength: 15,
                speed: 9,
                dodge: 4,
                flexibility: 5,
                max_mana: 30,
            },
            Class::Adventurer => BaseStats {
                max_hp: 100,
                strength: 10,
                speed: 10,
                dodge: 5,
                flexibility: 5,
                max_mana: 50,
            },
        }
    }

    /// 从玩家输入解析职业，未知名称落到默认表
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "knight" => Class::Knight,
            "mage" => Class::Mage,
            "rogue" => Class::Rogue,
            "berserker" => Class::Berserker,
            _ => Class::Adventurer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knight_stat_table() {
        let stats = Class::Knight.base_stats();
        assert_eq!(stats.max_hp, 140);
        assert_eq!(stats.strength, 12);
    }

    #[test]
    fn unknown_class_falls_back() {
        assert_eq!(Class::parse("necromancer"), Class::Adventurer);
        assert_eq!(Class::parse("  MAGE "), Class::Mage);
    }
}
