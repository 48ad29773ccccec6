// src/combat/src/lib.rs

mod enemy;
mod generator;
mod session;

pub mod io;
pub mod loot;

pub use self::{
    enemy::{scale_stats, Enemy, EnemyType},
    generator::{generate_elite, generate_enemy},
    session::{CombatSession, FightOutcome, RunResult},
};
