//src/combat/src/enemy.rs
use items::{GameRng, Item, StatusEffect};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::loot;

/// 敌人类型：构造时直接放大基础数值
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
pub enum EnemyType {
    #[default]
    Normal,
    Elite,
    Boss,
}

impl EnemyType {
    pub fn hp_multiplier(self) -> f64 {
        match self {
            EnemyType::Normal => 1.0,
            EnemyType::Elite => 1.5,
            EnemyType::Boss => 2.5,
        }
    }

    pub fn damage_multiplier(self) -> f64 {
        match self {
            EnemyType::Normal => 1.0,
            EnemyType::Elite => 1.3,
            EnemyType::Boss => 1.8,
        }
    }

    pub fn xp_per_level(self) -> i32 {
        match self {
            EnemyType::Normal => 10,
            EnemyType::Elite => 20,
            EnemyType::Boss => 50,
        }
    }

    pub fn gold_per_level(self) -> i64 {
        match self {
            EnemyType::Normal => 5,
            EnemyType::Elite => 10,
            EnemyType::Boss => 20,
        }
    }
}

const DESCRIPTION_TRAITS: &[&str] = &[
    "looks aggressive",
    "seems hungry",
    "is covered in scars",
    "has glowing eyes",
    "moves unnaturally fast",
    "smells terrible",
    "growls at you",
    "is dripping with slime",
    "has cracked bones",
    "is foaming at the mouth",
];

/// 敌人：构造时一次性算好数值、奖励、描述、附加效果与掉落表
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub level: i32,
    pub enemy_type: EnemyType,
    pub description: String,

    pub max_hp: i32,
    pub current_hp: i32,
    pub damage: i32,

    pub xp_reward: i32,
    pub gold_reward: i64,

    /// 命中时可能附加的状态效果（构造时掷骰决定）
    pub effect: Option<StatusEffect>,
    /// 掉落表：永远含一份金币，再加类型决定数量的随机物品
    pub loot: Vec<Item>,
}

impl Enemy {
    pub fn new(name: &str, level: i32, enemy_type: EnemyType, rng: &mut GameRng) -> Self {
        let base_hp = 20 + level * 10;
        let base_damage = 3 + level * 2;

        // truncating on purpose, multipliers bake in at construction
        let max_hp = (base_hp as f64 * enemy_type.hp_multiplier()) as i32;
        let damage = (base_damage as f64 * enemy_type.damage_multiplier()) as i32;

        let description = {
            let trait_line = rng
                .choose(DESCRIPTION_TRAITS)
                .copied()
                .unwrap_or("stares at you");
            format!("{name} {trait_line}")
        };

        let effect = Self::roll_effect(enemy_type, rng);
        let gold_reward = level as i64 * enemy_type.gold_per_level();
        let loot = Self::roll_loot(enemy_type, level, gold_reward, rng);

        Self {
            name: name.to_string(),
            level,
            enemy_type,
            description,
            max_hp,
            current_hp: max_hp,
            damage,
            xp_reward: level * enemy_type.xp_per_level(),
            gold_reward,
            effect,
            loot,
        }
    }

    /// Normal <5 中毒，Elite <15 流血，Boss <25 眩晕
    fn roll_effect(enemy_type: EnemyType, rng: &mut GameRng) -> Option<StatusEffect> {
        let roll = rng.percent_roll();
        match enemy_type {
            EnemyType::Normal if roll < 5 => Some(StatusEffect::Poison),
            EnemyType::Elite if roll < 15 => Some(StatusEffect::Bleed),
            EnemyType::Boss if roll < 25 => Some(StatusEffect::Stun),
            _ => None,
        }
    }

    fn roll_loot(
        enemy_type: EnemyType,
        level: i32,
        gold_reward: i64,
        rng: &mut GameRng,
    ) -> Vec<Item> {
        let mut table = vec![Item::gold(gold_reward)];

        let drops = match enemy_type {
            EnemyType::Boss => rng.random_range(2..=4),
            EnemyType::Elite => rng.random_range(1..=2),
            EnemyType::Normal => rng.random_range(0..=1),
        };
        for _ in 0..drops {
            table.push(loot::loot_for_enemy(enemy_type, level, rng));
        }
        table
    }

    /// 敌人没有闪避和护甲，伤害直接入账
    pub fn take_damage(&mut self, amount: i32) {
        self.current_hp -= amount;
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }
}

/// 放大已构造敌人的数值（地下城强化通道）
pub fn scale_stats(enemy: &mut Enemy, hp_factor: f64, damage_factor: f64) {
    enemy.max_hp = (enemy.max_hp as f64 * hp_factor) as i32;
    enemy.current_hp = enemy.max_hp;
    enemy.damage = (enemy.damage as f64 * damage_factor) as i32;
}
