//! Round-level signals and failures.

use std::fmt;

use crate::core::player::PlayerId;

/// Errors and control signals raised by a game of War.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WarError {
    /// A war ended with none of the tied players able to put another card
    /// into play. Consumed by the round, which falls back to the suit
    /// tiebreak; only escapes when `War::war` is called directly.
    Draw { players: Vec<PlayerId> },

    /// Internal state that should be impossible. The game is aborted.
    InvariantViolation { message: String },

    /// Too few players are seated for the requested operation.
    NotEnoughPlayers { found: usize, required: usize },

    /// The game has already ended (or was aborted).
    GameOver,
}

impl WarError {
    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        WarError::InvariantViolation {
            message: message.into(),
        }
    }
}

impl fmt::Display for WarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarError::Draw { players } => write!(f, "war ended in a draw between {players:?}"),
            WarError::InvariantViolation { message } => write!(f, "Invariant violation: {message}"),
            WarError::NotEnoughPlayers { found, required } => {
                write!(f, "need at least {required} players, found {found}")
            }
            WarError::GameOver => write!(f, "the game is over"),
        }
    }
}

impl std::error::Error for WarError {}
