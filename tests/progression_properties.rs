// tests/progression_properties.rs
//! 成长与战斗数值的性质测试

mod helpers;

use character::Character;
use combat::loot::rarity_for_roll;
use combat::EnemyType;
use items::{GameRng, Item, Rarity};
use proptest::prelude::*;

#[test]
fn xp_thresholds_never_shrink() {
    let mut previous = 0;
    for level in 1..=40 {
        let threshold = Character::xp_for_level(level);
        assert!(threshold >= previous, "threshold dipped at level {level}");
        previous = threshold;
    }
}

proptest! {
    #[test]
    fn add_xp_always_leaves_xp_below_the_threshold(amount in 0i32..200_000) {
        let mut c = helpers::knight("Tess");
        c.add_xp(amount);

        prop_assert!(c.xp >= 0);
        prop_assert!(c.xp < c.xp_to_next_level);
        prop_assert!(c.level >= 1);
        prop_assert_eq!(c.xp_to_next_level, Character::xp_for_level(c.level));
    }

    #[test]
    fn leveling_restores_full_health(amount in 100i32..200_000) {
        let mut c = helpers::knight("Tess");
        c.current_hp = 1;
        let levels = c.add_xp(amount);

        if levels > 0 {
            prop_assert_eq!(c.current_hp, c.max_hp);
        }
    }

    #[test]
    fn armor_reduction_never_exceeds_the_cap(
        head in 0i32..100,
        chest in 0i32..100,
        legs in 0i32..100,
        feet in 0i32..100,
    ) {
        let mut c = helpers::knight("Tess");
        c.equip_item(Item::armor("Iron Helmet", head, Rarity::Common)).unwrap();
        c.equip_item(Item::armor("Chainmail", chest, Rarity::Common)).unwrap();
        c.equip_item(Item::armor("Titan Legplates", legs, Rarity::Common)).unwrap();
        c.equip_item(Item::armor("Old Boots", feet, Rarity::Common)).unwrap();

        let reduction = c.armor_reduction();
        prop_assert!((0.0..=0.75).contains(&reduction));
    }

    #[test]
    fn damage_always_lands_for_at_least_one_point(amount in 1i32..1000, seed in 0u64..64) {
        let mut c = helpers::knight("Tess");
        c.dodge = 0;
        let mut rng = GameRng::new(seed);

        let before = c.current_hp;
        c.take_damage(amount, &mut rng);
        prop_assert!(c.current_hp <= before - 1);
    }

    #[test]
    fn boss_loot_bands_never_roll_below_normal_ones(roll in 1i32..=100) {
        let normal = rarity_for_roll(EnemyType::Normal, roll);
        let elite = rarity_for_roll(EnemyType::Elite, roll);
        let boss = rarity_for_roll(EnemyType::Boss, roll);

        prop_assert!(elite >= normal);
        prop_assert!(boss >= elite);
    }

    #[test]
    fn fights_end_within_the_hit_bound(level in 1i32..10, seed in 0u64..32) {
        use character::Inventory;
        use combat::io::{NullSink, ScriptedInput};
        use combat::{CombatSession, Enemy, FightOutcome};

        let mut rng = GameRng::new(seed);
        let mut player = helpers::knight("Tess");
        player.current_hp = 1_000_000;
        player.max_hp = 1_000_000;

        let mut enemy = Enemy::new("Goblin", level, EnemyType::Normal, &mut rng);
        enemy.loot.retain(|i| i.is_gold());
        let mut inventory = Inventory::new();

        // 17 damage per swing, never less; the session cannot outlive this bound
        let bound = (enemy.max_hp as usize).div_ceil(17) + 1;
        let mut input = ScriptedInput::new(vec!["1"; bound]);
        let mut sink = NullSink;

        let outcome = CombatSession::new(&mut input, &mut sink)
            .resolve(&mut player, &mut enemy, &mut inventory, &mut rng);
        prop_assert_eq!(outcome, FightOutcome::Victory);
    }
}
