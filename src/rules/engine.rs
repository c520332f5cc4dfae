//! The card game trait and game results.
//!
//! A `CardGame` owns its deck and players and advances one round at a time.
//! Between rounds the state is quiescent, so a caller may stop calling
//! `play_round` at any point. `play_rounds` is the default game loop.

use serde::{Deserialize, Serialize};

use crate::core::player::{Player, PlayerId};

/// Result of a finished (or abandoned) game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Every player was eliminated.
    Draw,
    /// The round limit was hit before the game ended.
    Stalled { rounds: u32 },
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    /// The winner, if there is one.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner(p) => Some(*p),
            GameResult::Draw | GameResult::Stalled { .. } => None,
        }
    }
}

/// A round-based card game.
///
/// ## Implementation Notes
///
/// - `deal_cards`: Distribute the game's deck according to its rules
/// - `play_round`: Advance exactly one round; must be deterministic for a
///   given RNG state
/// - `is_terminal`: Return `None` while the game continues
pub trait CardGame {
    /// What a single round reports.
    type Outcome;

    /// Unrecoverable failures.
    type Error;

    /// Seat a player.
    fn add_player(&mut self, player: Player);

    /// Seat several players, in order.
    fn add_players(&mut self, players: impl IntoIterator<Item = Player>) {
        for player in players {
            self.add_player(player);
        }
    }

    /// Number of seated players.
    fn num_players(&self) -> usize;

    /// Distribute the deck.
    fn deal_cards(&mut self) -> Result<(), Self::Error>;

    /// Play one round.
    fn play_round(&mut self) -> Result<Self::Outcome, Self::Error>;

    /// Check if the game is over.
    fn is_terminal(&self) -> Option<GameResult>;

    /// Deal and play the whole game.
    fn start_game(&mut self) -> Result<GameResult, Self::Error>;

    /// Play rounds until the game is over or `limit` rounds have been played.
    fn play_rounds(&mut self, limit: Option<u32>) -> Result<GameResult, Self::Error> {
        let mut rounds = 0u32;
        loop {
            if let Some(result) = self.is_terminal() {
                return Ok(result);
            }
            if limit.is_some_and(|max| rounds >= max) {
                return Ok(GameResult::Stalled { rounds });
            }
            self.play_round()?;
            rounds += 1;
        }
    }
}
