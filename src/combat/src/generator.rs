//src/combat/src/generator.rs
//! 随机敌人生成：等级窗口、类型掷骰与地下城强化

use items::GameRng;

use crate::enemy::{self, Enemy, EnemyType};

const NORMAL_NAMES: &[&str] = &["Goblin", "Wolf", "Skeleton", "Bandit", "Slime", "Zombie"];
const ELITE_NAMES: &[&str] = &["Orc Warrior", "Dire Wolf", "Ghoul", "Dark Knight"];
const BOSS_NAMES: &[&str] = &[
    "Ogre King",
    "Necromancer",
    "Ancient Dragonling",
    "Shadow Beast",
];

/// Dungeon bosses sit a fixed five levels above the player.
const BOSS_LEVEL_OFFSET: i32 = 5;

fn roll_type(is_dungeon: bool, rng: &mut GameRng) -> EnemyType {
    let roll = rng.percent_roll();
    if is_dungeon {
        // dungeons shift the odds toward elites and bosses
        match roll {
            ..=60 => EnemyType::Normal,
            ..=90 => EnemyType::Elite,
            _ => EnemyType::Boss,
        }
    } else {
        match roll {
            ..=70 => EnemyType::Normal,
            ..=95 => EnemyType::Elite,
            _ => EnemyType::Boss,
        }
    }
}

fn roll_level(player_level: i32, is_dungeon: bool, is_boss: bool, rng: &mut GameRng) -> i32 {
    if is_boss {
        player_level + BOSS_LEVEL_OFFSET
    } else if is_dungeon {
        rng.random_range(player_level + 1..=player_level + 3)
    } else {
        let low = (player_level - 1).max(1);
        rng.random_range(low..=player_level + 1)
    }
}

fn pick_name(enemy_type: EnemyType, rng: &mut GameRng) -> &'static str {
    let pool = match enemy_type {
        EnemyType::Normal => NORMAL_NAMES,
        EnemyType::Elite => ELITE_NAMES,
        EnemyType::Boss => BOSS_NAMES,
    };
    rng.choose(pool).copied().unwrap_or("Goblin")
}

/// 生成一个随机敌人
///
/// `is_boss` forces a boss-tier enemy (dungeon finale); otherwise the type
/// is rolled. Dungeon spawns get an extra stat pass on top of the
/// construction-time type multipliers.
pub fn generate_enemy(
    player_level: i32,
    is_dungeon: bool,
    is_boss: bool,
    rng: &mut GameRng,
) -> Enemy {
    let enemy_type = if is_boss {
        EnemyType::Boss
    } else {
        roll_type(is_dungeon, rng)
    };

    let level = roll_level(player_level, is_dungeon, is_boss, rng);
    let name = pick_name(enemy_type, rng);
    let mut enemy = Enemy::new(name, level, enemy_type, rng);

    // keyed on the call parameters, not on the rolled type
    if is_boss {
        enemy::scale_stats(&mut enemy, 1.50, 1.30);
    } else if is_dungeon {
        enemy::scale_stats(&mut enemy, 1.20, 1.10);
    }

    enemy
}

/// 精英伏击：比玩家高一级的精英敌人（野外事件用）
pub fn generate_elite(player_level: i32, rng: &mut GameRng) -> Enemy {
    let name = pick_name(EnemyType::Elite, rng);
    Enemy::new(name, player_level + 1, EnemyType::Elite, rng)
}
