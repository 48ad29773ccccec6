// src/lib.rs

pub mod game_loop;
pub mod shop;

pub use game_loop::GameEngine;
pub use shop::{Shop, ShopError};
