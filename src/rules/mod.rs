//! Game rules interface.
//!
//! Games implement `CardGame` to define:
//! - How players are seated and cards dealt
//! - What happens in a round
//! - When the game is over
//!
//! The default `play_rounds` loop only relies on these methods.

pub mod engine;

pub use engine::{CardGame, GameResult};
