// src/character/src/lib.rs

mod core;
mod effects;
mod inventory;

pub mod class;

pub use self::{
    class::Class,
    core::{AttackRoll, Character, CharacterError, DamageOutcome},
    effects::EffectSet,
    inventory::{Inventory, InventoryError},
};
