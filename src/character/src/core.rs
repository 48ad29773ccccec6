// src/character/src/core.rs
use items::{ArmorSlot, GameRng, Item, ItemKind, Potion, StatusEffect};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::class::Class;
use crate::effects::EffectSet;

/// XP curve: each level requires 60% more XP than the previous one.
const BASE_XP_FOR_LEVEL: f64 = 100.0;
const XP_LEVEL_GROWTH: f64 = 1.60;
const MIN_XP_THRESHOLD: i32 = 10;

const UNARMED_DAMAGE: i32 = 5;
const CRIT_MULTIPLIER: f64 = 1.5;
/// Total armor reduction cap across all four slots.
const ARMOR_REDUCTION_CAP: f64 = 0.75;
const DODGE_CAP: i32 = 50;

#[derive(Debug, Error)]
pub enum CharacterError {
    #[error("item cannot be equipped")]
    NotEquippable,
    #[error("not enough gold")]
    NotEnoughGold,
}

/// 一次受击的结算结果（消息由调用方渲染）
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DamageOutcome {
    Dodged,
    Hit { reduction: f64, taken: i32 },
}

/// 一次攻击掷骰
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackRoll {
    pub damage: i32,
    pub crit: bool,
}

/// 玩家角色：属性、装备槽、状态效果与成长
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub class: Class,
    pub level: i32,
    pub xp: i32,
    pub xp_to_next_level: i32,
    pub gold: i64,

    pub max_hp: i32,
    pub current_hp: i32,
    pub max_mana: i32,
    pub current_mana: i32,
    pub max_energy: i32,
    pub current_energy: i32,

    pub strength: i32,
    pub speed: i32,
    pub dodge: i32,
    pub flexibility: i32,

    // 5 equipment slots: weapon + four armor slots, one item each
    pub equipped_weapon: Option<Item>,
    pub equipped_helmet: Option<Item>,
    pub equipped_chestplate: Option<Item>,
    pub equipped_pants: Option<Item>,
    pub equipped_boots: Option<Item>,

    #[serde(default)]
    pub effects: EffectSet,
    #[serde(default)]
    pub force_escape: bool,
    #[serde(default)]
    pub stunned: bool,
}

impl Character {
    pub fn new(name: &str, class: Class) -> Self {
        let stats = class.base_stats();
        Self {
            name: name.to_string(),
            class,
            level: 1,
            xp: 0,
            xp_to_next_level: Self::xp_for_level(1),
            gold: 0,
            max_hp: stats.max_hp,
            current_hp: stats.max_hp,
            max_mana: stats.max_mana,
            current_mana: stats.max_mana,
            max_energy: 10,
            current_energy: 10,
            strength: stats.strength,
            speed: stats.speed,
            dodge: stats.dodge,
            flexibility: stats.flexibility,
            equipped_weapon: None,
            equipped_helmet: None,
            equipped_chestplate: None,
            equipped_pants: None,
            equipped_boots: None,
            effects: EffectSet::new(),
            force_escape: false,
            stunned: false,
        }
    }

    // ---------------------------------------------------------
    // XP & 升级
    // ---------------------------------------------------------

    /// 当前等级的升级阈值：round(100 × 1.60^(level-1))，下限10
    pub fn xp_for_level(level: i32) -> i32 {
        let xp = BASE_XP_FOR_LEVEL * XP_LEVEL_GROWTH.powi((level - 1).max(0));
        (xp.round() as i32).max(MIN_XP_THRESHOLD)
    }

    /// 累积经验并循环升级，返回本次升级次数
    ///
    /// Supports several level-ups from a single large grant; each level-up
    /// re-derives the next threshold before the loop re-checks.
    pub fn add_xp(&mut self, amount: i32) -> u32 {
        if amount <= 0 {
            return 0;
        }

        self.xp += amount;

        let mut levels = 0;
        while self.xp >= self.xp_to_next_level {
            self.xp -= self.xp_to_next_level;
            self.level_up();
            levels += 1;
        }
        levels
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.max_hp += 10;
        self.strength += 2;
        self.speed += 1;
        self.dodge += 1;
        // level-up always fully restores HP
        self.current_hp = self.max_hp;
        self.xp_to_next_level = Self::xp_for_level(self.level);
    }

    // ---------------------------------------------------------
    // 战斗计算
    // ---------------------------------------------------------

    /// 暴击率（百分比，不设上限）
    pub fn crit_chance(&self) -> i32 {
        self.flexibility + self.speed / 2
    }

    fn weapon_damage(&self) -> i32 {
        match &self.equipped_weapon {
            Some(item) => match &item.kind {
                ItemKind::Weapon(w) => w.damage,
                _ => UNARMED_DAMAGE,
            },
            None => UNARMED_DAMAGE,
        }
    }

    /// 本回合攻击伤害；暴击判定每次调用独立掷骰
    pub fn attack_damage(&self, rng: &mut GameRng) -> AttackRoll {
        let base = self.strength + self.weapon_damage();
        let crit = rng.random_range(0..100) < self.crit_chance();

        let damage = if crit {
            (base as f64 * CRIT_MULTIPLIER) as i32
        } else {
            base
        };
        AttackRoll { damage, crit }
    }

    /// 四个护甲槽减伤之和，总上限75%
    pub fn armor_reduction(&self) -> f64 {
        let slot_reduction = |slot: &Option<Item>| match slot {
            Some(item) => match &item.kind {
                ItemKind::ArmorPiece(a) => a.damage_reduction,
                _ => 0.0,
            },
            None => 0.0,
        };

        let total = slot_reduction(&self.equipped_helmet)
            + slot_reduction(&self.equipped_chestplate)
            + slot_reduction(&self.equipped_pants)
            + slot_reduction(&self.equipped_boots);

        total.min(ARMOR_REDUCTION_CAP)
    }

    /// 受击结算：先掷闪避（dodge夹在[0,50]），未闪避则按护甲减伤，至少掉1点HP
    ///
    /// HP may go negative; combat treats `current_hp <= 0` as defeated.
    pub fn take_damage(&mut self, amount: i32, rng: &mut GameRng) -> DamageOutcome {
        let effective_dodge = self.dodge.clamp(0, DODGE_CAP);
        if rng.random_range(0..100) < effective_dodge {
            return DamageOutcome::Dodged;
        }

        let reduction = self.armor_reduction();
        let taken = ((amount as f64 * (1.0 - reduction)).round() as i32).max(1);
        self.current_hp -= taken;

        DamageOutcome::Hit { reduction, taken }
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn heal(&mut self, amount: i32) {
        self.current_hp = (self.current_hp + amount).min(self.max_hp);
    }

    // ---------------------------------------------------------
    // 装备
    // ---------------------------------------------------------

    /// 装备武器或护甲，返回被替换下来的物品
    ///
    /// The displaced item is handed back to the caller; the inventory-level
    /// equip re-adds it to the pool.
    pub fn equip_item(&mut self, item: Item) -> Result<Option<Item>, CharacterError> {
        let slot = match &item.kind {
            ItemKind::Weapon(_) => &mut self.equipped_weapon,
            ItemKind::ArmorPiece(a) => match a.slot {
                ArmorSlot::Head => &mut self.equipped_helmet,
                ArmorSlot::Chest => &mut self.equipped_chestplate,
                ArmorSlot::Legs => &mut self.equipped_pants,
                ArmorSlot::Feet => &mut self.equipped_boots,
            },
            _ => return Err(CharacterError::NotEquippable),
        };

        Ok(slot.replace(item))
    }

    // ---------------------------------------------------------
    // 药水与状态效果
    // ---------------------------------------------------------

    /// 应用药水效果（回血、增益、解毒/止血、烟雾弹）
    pub fn apply_potion(&mut self, potion: &Potion) {
        if potion.heal_amount > 0 {
            self.heal(potion.heal_amount);
        }
        if potion.heal_percent > 0 {
            let heal = (self.max_hp as f64 * potion.heal_percent as f64 / 100.0) as i32;
            self.heal(heal);
        }

        match potion.effect {
            Some(StatusEffect::CurePoison) => self.effects.remove(StatusEffect::Poison),
            Some(StatusEffect::CureBleed) => self.effects.remove(StatusEffect::Bleed),
            Some(StatusEffect::Escape) => self.force_escape = true,
            Some(effect) if effect.is_lingering() => self.effects.apply(effect),
            _ => {}
        }
    }

    // ---------------------------------------------------------
    // 金币与能量
    // ---------------------------------------------------------

    pub fn add_gold(&mut self, amount: i64) {
        self.gold += amount;
    }

    pub fn spend_gold(&mut self, amount: i64) -> Result<(), CharacterError> {
        if self.gold >= amount {
            self.gold -= amount;
            Ok(())
        } else {
            Err(CharacterError::NotEnoughGold)
        }
    }

    /// 回合开始时回满能量
    pub fn start_turn(&mut self) {
        self.current_energy = self.max_energy;
    }

    pub fn can_perform_action(&self, energy_cost: i32) -> bool {
        self.current_energy >= energy_cost
    }

    pub fn consume_energy(&mut self, amount: i32) {
        self.current_energy = (self.current_energy - amount).max(0);
    }
}
