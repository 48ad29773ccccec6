//src/items/src/weapon.rs
use serde::{Deserialize, Serialize};

/// 近战/远程武器的战斗数据
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub damage: i32,
    pub crit_chance: f64,
}

impl Weapon {
    pub fn new(damage: i32) -> Self {
        Self {
            damage,
            crit_chance: 0.05,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_weapon_has_base_crit() {
        let w = Weapon::new(8);
        assert_eq!(w.damage, 8);
        assert_eq!(w.crit_chance, 0.05);
    }
}
