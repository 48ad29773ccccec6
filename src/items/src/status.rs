//src/items/src/status.rs
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// 状态效果（幂等地附加到角色上；无重复条目）
///
/// Debuffs (Poison/Bleed/Stun) come from enemies, the rest from potions.
/// CurePoison/CureBleed/Escape are one-shot potion behaviors rather than
/// lingering conditions, but they share the vocabulary because the save
/// format stores them on potion records.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize, Display, EnumIter,
)]
pub enum StatusEffect {
    Poison,
    Bleed,
    Stun,
    Regeneration,
    Strength,
    Speed,
    CritBoost,
    BlockBoost,
    Focus,
    StoneSkin,
    CurePoison,
    CureBleed,
    Escape,
}

impl StatusEffect {
    /// 该效果是否为直接附加的增益/减益（而不是一次性行为）
    pub fn is_lingering(self) -> bool {
        !matches!(
            self,
            StatusEffect::CurePoison | StatusEffect::CureBleed | StatusEffect::Escape
        )
    }
}
