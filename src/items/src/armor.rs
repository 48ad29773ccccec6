//src/items/src/armor.rs
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// 装备槽位（从名称关键字推断）
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum ArmorSlot {
    Head,
    Chest,
    Legs,
    Feet,
}

/// 单件护甲：armor点数决定减伤，单件上限25%
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArmorPiece {
    pub slot: ArmorSlot,
    pub armor: i32,
    /// Fraction of incoming damage this piece absorbs (0.05 per armor point).
    pub damage_reduction: f64,
    // Reserved stat bonuses, always zero under current rules.
    pub strength: i32,
    pub agility: i32,
    pub vitality: i32,
}

impl ArmorPiece {
    pub fn new(name: &str, armor: i32) -> Self {
        Self {
            slot: Self::infer_slot(name),
            armor,
            damage_reduction: (armor as f64 * 0.05).min(0.25),
            strength: 0,
            agility: 0,
            vitality: 0,
        }
    }

    /// 根据名称关键字推断槽位，默认胸甲
    pub fn infer_slot(name: &str) -> ArmorSlot {
        let lower = name.to_lowercase();
        let has = |kw: &str| lower.contains(kw);

        if has("helmet") || has("helm") || has("cap") || has("hood") {
            ArmorSlot::Head
        } else if has("boot") {
            ArmorSlot::Feet
        } else if has("pants") || has("greaves") || has("legs") || has("legguards") || has("legplates")
        {
            ArmorSlot::Legs
        } else {
            ArmorSlot::Chest
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_inference_from_name_keywords() {
        assert_eq!(ArmorPiece::new("Iron Helmet", 3).slot, ArmorSlot::Head);
        assert_eq!(ArmorPiece::new("Helm of the Eternal Watch", 14).slot, ArmorSlot::Head);
        assert_eq!(ArmorPiece::new("Old Boots", 1).slot, ArmorSlot::Feet);
        assert_eq!(ArmorPiece::new("Steel Greaves", 4).slot, ArmorSlot::Legs);
        assert_eq!(ArmorPiece::new("Chainmail", 4).slot, ArmorSlot::Chest);
        // unknown names land in the chest slot
        assert_eq!(ArmorPiece::new("Cloth Robe", 1).slot, ArmorSlot::Chest);
    }

    #[test]
    fn per_piece_reduction_caps_at_25_percent() {
        assert_eq!(ArmorPiece::new("Chainmail", 2).damage_reduction, 0.10);
        assert_eq!(ArmorPiece::new("Plate Armor", 7).damage_reduction, 0.25);
        assert_eq!(ArmorPiece::new("Armor of the Immortal", 15).damage_reduction, 0.25);
    }

    #[test]
    fn reserved_stats_are_zero() {
        let piece = ArmorPiece::new("Titan Gloves", 9);
        assert_eq!((piece.strength, piece.agility, piece.vitality), (0, 0, 0));
    }
}
