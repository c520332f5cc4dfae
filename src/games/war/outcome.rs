//! What a round reports back to the caller.

use serde::{Deserialize, Serialize};

use crate::core::player::PlayerId;

/// How a round was decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// One player placed the highest-ranked card.
    HighCard,
    /// Tied high cards went to war; `tiers` is the number of war steps.
    War { tiers: u32 },
    /// The war drew and the suit of the last played cards decided it.
    SuitTiebreak,
    /// Even the suits tied: the contested cards were dealt back out.
    Redealt,
    /// Nobody had a card to place.
    Uncontested,
}

/// Result of a single round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// Who took the round's cards. `None` after a redeal or when nobody played.
    pub winner: Option<PlayerId>,

    /// Players eliminated during this round, in id order.
    pub eliminated: Vec<PlayerId>,

    /// Whether the game ended with this round.
    pub is_game_over: bool,

    pub resolution: Resolution,
}

impl RoundOutcome {
    /// Did this round escalate into a war?
    #[must_use]
    pub fn went_to_war(&self) -> bool {
        !matches!(self.resolution, Resolution::HighCard | Resolution::Uncontested)
    }
}
