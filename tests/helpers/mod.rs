// tests/helpers/mod.rs
#![allow(dead_code)]

use character::{Character, Class, Inventory};
use items::{Item, Rarity, StatusEffect};

pub fn knight(name: &str) -> Character {
    Character::new(name, Class::Knight)
}

pub fn stocked_inventory() -> Inventory {
    let mut inv = Inventory::new();
    inv.add(Item::weapon("Iron Longsword", 4, Rarity::Uncommon));
    inv.add(Item::armor("Iron Helmet", 3, Rarity::Uncommon));
    inv.add(Item::healing_potion("Small Health Potion", 20));
    inv.add(Item::effect_potion("Antidote", StatusEffect::CurePoison));
    inv
}
