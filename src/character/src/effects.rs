//src/character/src/effects.rs
use items::StatusEffect;
use serde::{Deserialize, Serialize};

/// 角色身上的状态效果集合（无重复条目，增删幂等）
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectSet {
    effects: Vec<StatusEffect>,
}

impl EffectSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 幂等添加：已存在则不变
    pub fn apply(&mut self, effect: StatusEffect) {
        if !self.effects.contains(&effect) {
            self.effects.push(effect);
        }
    }

    /// 幂等移除：不存在则无事发生
    pub fn remove(&mut self, effect: StatusEffect) {
        self.effects.retain(|&e| e != effect);
    }

    pub fn has(&self, effect: StatusEffect) -> bool {
        self.effects.contains(&effect)
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_is_idempotent() {
        let mut set = EffectSet::new();
        set.apply(StatusEffect::Poison);
        set.apply(StatusEffect::Poison);
        assert_eq!(set.len(), 1);
        assert!(set.has(StatusEffect::Poison));
    }

    #[test]
    fn remove_missing_effect_is_noop() {
        let mut set = EffectSet::new();
        set.remove(StatusEffect::Bleed);
        assert!(set.is_empty());

        set.apply(StatusEffect::Regeneration);
        set.remove(StatusEffect::Regeneration);
        assert!(!set.has(StatusEffect::Regeneration));
    }
}
