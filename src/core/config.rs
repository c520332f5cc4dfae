//! Game configuration.
//!
//! `WarConfig` carries everything needed to set up a table before any
//! player joins: how many packs go into the deck, how randomness is seeded,
//! whether the deck is shuffled, and an optional cap on the number of rounds
//! the game loop will play.

use serde::{Deserialize, Serialize};

use super::rng::GameRng;

/// Configuration for a game of War.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarConfig {
    /// Packs in the shared deck. Clamped to 0..=10 when the deck is built.
    pub packs: i32,

    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,

    /// Shuffle the deck before dealing.
    pub shuffle: bool,

    /// Stop the game loop after this many rounds. `None` for no limit.
    pub max_rounds: Option<u32>,
}

impl Default for WarConfig {
    fn default() -> Self {
        Self {
            packs: 1,
            seed: None,
            shuffle: true,
            max_rounds: None,
        }
    }
}

impl WarConfig {
    /// Single pack, shuffled, entropy-seeded, no round cap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_packs(mut self, packs: i32) -> Self {
        self.packs = packs;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Keep the deck in canonical order.
    #[must_use]
    pub fn unshuffled(mut self) -> Self {
        self.shuffle = false;
        self
    }

    #[must_use]
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = Some(rounds);
        self
    }

    /// The RNG this configuration describes.
    #[must_use]
    pub fn rng(&self) -> GameRng {
        match self.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WarConfig::new();
        assert_eq!(config.packs, 1);
        assert_eq!(config.seed, None);
        assert!(config.shuffle);
        assert_eq!(config.max_rounds, None);
    }

    #[test]
    fn test_builder_chain() {
        let config = WarConfig::new().with_packs(3).with_seed(9).unshuffled().with_max_rounds(500);
        assert_eq!(config.packs, 3);
        assert_eq!(config.seed, Some(9));
        assert!(!config.shuffle);
        assert_eq!(config.max_rounds, Some(500));
        assert_eq!(config.rng().seed(), 9);
    }

    #[test]
    fn test_config_serialization() {
        let config = WarConfig::new().with_packs(2).with_seed(1);
        let json = serde_json::to_string(&config).unwrap();
        let back: WarConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
