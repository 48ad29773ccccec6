//src/combat/src/loot.rs
//! 敌人掉落：按敌人类型偏置稀有度，再走公共的类别/挑选/等级缩放管线

use items::loot::{pick_by_rarity, scale_to_level, LootCategory};
use items::{GameRng, Item, Rarity};

use crate::enemy::EnemyType;

/// 稀有度累积阈值（Common/Uncommon/Rare/Epic 的上界，其余为 Legendary）
fn rarity_bands(enemy_type: EnemyType) -> [i32; 4] {
    match enemy_type {
        EnemyType::Normal => [60, 85, 95, 99],
        EnemyType::Elite => [40, 70, 90, 98],
        EnemyType::Boss => [20, 50, 80, 95],
    }
}

pub fn rarity_for_roll(enemy_type: EnemyType, roll: i32) -> Rarity {
    let [common, uncommon, rare, epic] = rarity_bands(enemy_type);
    if roll <= common {
        Rarity::Common
    } else if roll <= uncommon {
        Rarity::Uncommon
    } else if roll <= rare {
        Rarity::Rare
    } else if roll <= epic {
        Rarity::Epic
    } else {
        Rarity::Legendary
    }
}

/// 为一个敌人掷一件掉落物
pub fn loot_for_enemy(enemy_type: EnemyType, level: i32, rng: &mut GameRng) -> Item {
    let rarity = rarity_for_roll(enemy_type, rng.percent_roll());
    let category = LootCategory::from_roll(rng.percent_roll());

    let mut item = pick_by_rarity(category, rarity, rng);
    scale_to_level(&mut item, level);
    item
}

#[cfg(test)]
mod tests {
    use super::*;
    use items::ItemKind;

    #[test]
    fn rarity_band_boundaries() {
        assert_eq!(rarity_for_roll(EnemyType::Normal, 60), Rarity::Common);
        assert_eq!(rarity_for_roll(EnemyType::Normal, 61), Rarity::Uncommon);
        assert_eq!(rarity_for_roll(EnemyType::Normal, 99), Rarity::Epic);
        assert_eq!(rarity_for_roll(EnemyType::Normal, 100), Rarity::Legendary);

        assert_eq!(rarity_for_roll(EnemyType::Elite, 40), Rarity::Common);
        assert_eq!(rarity_for_roll(EnemyType::Elite, 41), Rarity::Uncommon);

        assert_eq!(rarity_for_roll(EnemyType::Boss, 20), Rarity::Common);
        assert_eq!(rarity_for_roll(EnemyType::Boss, 96), Rarity::Legendary);
    }

    #[test]
    fn bosses_skew_rarer_than_normals() {
        // same roll, better band
        for roll in [30, 60, 85, 96] {
            assert!(rarity_for_roll(EnemyType::Boss, roll) >= rarity_for_roll(EnemyType::Normal, roll));
        }
    }

    #[test]
    fn dropped_gear_is_level_scaled() {
        let mut rng = GameRng::new(17);
        for _ in 0..50 {
            let item = loot_for_enemy(EnemyType::Boss, 9, &mut rng);
            match &item.kind {
                // catalog floor is 1 damage / 1 armor, scaling adds level/2 and level/3
                ItemKind::Weapon(w) => assert!(w.damage >= 1 + 9 / 2),
                ItemKind::ArmorPiece(a) => assert!(a.armor >= 1 + 9 / 3),
                ItemKind::Potion(_) => {}
                other => panic!("unexpected drop kind: {other:?}"),
            }
        }
    }
}
