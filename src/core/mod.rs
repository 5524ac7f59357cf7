//! Core primitives shared by the game components.

pub mod rng;

pub use rng::{DiceRng, DIE_FACES};
