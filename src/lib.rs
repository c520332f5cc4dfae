//! # war-engine
//!
//! A rules engine for the card game War, for any number of players and
//! one or more packs of cards.
//!
//! ## Design Principles
//!
//! 1. **N-Player First**: Seats, dealing and war steps work for any table
//!    size. Nothing assumes two players.
//!
//! 2. **Deterministic**: All randomness flows through a seeded `GameRng`,
//!    and every per-player loop runs in `PlayerId` order. The same seed
//!    replays the same game.
//!
//! 3. **Persistent Data Structures**: Hands and decks are `im::Vector`
//!    backed, so cloning a game is cheap.
//!
//! ## Modules
//!
//! - `core`: Player ids, players, elimination state, RNG, configuration
//! - `cards`: Cards, piles, the multi-pack deck, draw errors
//! - `rules`: `CardGame` trait for game implementations
//! - `games`: War itself
//!
//! ## Example
//!
//! ```
//! use war_engine::{CardGame, GameResult, WarBuilder};
//!
//! let mut game = WarBuilder::new().seed(11).max_rounds(5_000).player("ada").player("bo").build().unwrap();
//! let result = game.start_game().unwrap();
//! assert!(matches!(result, GameResult::Winner(_) | GameResult::Draw | GameResult::Stalled { .. }));
//! assert_eq!(game.total_cards(), 52);
//! ```

pub mod cards;
pub mod core;
pub mod games;
pub mod rules;

// Re-export commonly used types
pub use crate::cards::{Card, Deck, DeckError, Pile, Rank, Suit, PACK_SIZE};

pub use crate::core::{Contender, GameRng, Player, PlayerId, Standing, WarConfig};

pub use crate::rules::{CardGame, GameResult};

pub use crate::games::war::{Resolution, RoundOutcome, War, WarBuilder, WarError};
