//! Card system: cards, piles, and the shared deck.
//!
//! ## Key Types
//!
//! - `Card`: Immutable suit + rank value, compared by rank with Ace high
//! - `Pile`: Ordered card sequence with sequential and random draws
//! - `Deck`: 0-10 concatenated packs built in canonical order
//! - `DeckError`: Empty, negative, and partial draws
//!
//! ## Partial Draws
//!
//! Multi-card draws never roll back. When too few cards remain, the caller
//! receives every remaining card inside `DeckError::InsufficientCards`.

pub mod card;
pub mod deck;
pub mod error;
pub mod pile;

pub use card::{Card, ParseRankError, Rank, Suit};
pub use deck::{Deck, MAX_PACKS, MIN_PACKS, PACK_SIZE};
pub use error::DeckError;
pub use pile::{highest_rank, Pile};
