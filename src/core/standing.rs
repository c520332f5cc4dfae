//! Elimination state layered on top of a `Player`.
//!
//! A `Contender` is a player seated in an elimination game. Eliminated
//! contenders keep their seat (and whatever cards they still hold) so they
//! can be reported, and reinstated if they turn out to have won the round.

use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerId};

/// Whether a contender is still in the game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Standing {
    #[default]
    Active,
    Eliminated,
}

/// A player plus their elimination flag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contender {
    pub player: Player,
    pub standing: Standing,
}

impl Contender {
    /// Seat a player as active.
    #[must_use]
    pub fn new(player: Player) -> Self {
        Self {
            player,
            standing: Standing::Active,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.player.id()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.standing == Standing::Active
    }

    #[must_use]
    pub fn is_eliminated(&self) -> bool {
        self.standing == Standing::Eliminated
    }

    /// Flip the elimination flag. Never touches the hand.
    pub fn set_eliminated(&mut self, eliminated: bool) {
        self.standing = if eliminated {
            Standing::Eliminated
        } else {
            Standing::Active
        };
    }

    pub fn eliminate(&mut self) {
        self.set_eliminated(true);
    }

    pub fn reinstate(&mut self) {
        self.set_eliminated(false);
    }
}

impl From<Player> for Contender {
    fn from(player: Player) -> Self {
        Self::new(player)
    }
}
