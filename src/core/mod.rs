//! Core engine types: players, elimination state, RNG, configuration.
//!
//! These building blocks are independent of any particular game's rules.
//! Games compose them rather than extending them.

pub mod config;
pub mod player;
pub mod rng;
pub mod standing;

pub use config::WarConfig;
pub use player::{Player, PlayerId};
pub use rng::GameRng;
pub use standing::{Contender, Standing};
