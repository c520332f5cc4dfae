//! War: every player turns over their top card and the highest rank takes
//! the lot.
//!
//! ## Flow
//!
//! - `War::new` builds (and shuffles) the shared deck
//! - `deal_cards` deals it out round-robin over the active players
//! - `play_round` plays one round, `start_game` plays until at most one
//!   player is left standing
//!
//! Ties go to war (see [`round`] for the exact steps). A player who runs out
//! of cards is eliminated; winning a limited war can bring them back.

pub mod error;
pub mod game;
pub mod outcome;
pub mod round;

pub use error::WarError;
pub use game::{War, WarBuilder, CARDS_NEEDED_FOR_WAR};
pub use outcome::{Resolution, RoundOutcome};
pub use round::Contributions;
