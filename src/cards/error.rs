//! Draw failures shared by decks and hands.

use std::fmt;

use super::card::Card;

/// Why a draw could not be fully satisfied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeckError {
    /// A single card was requested from an empty pile.
    EmptyDeck,

    /// A negative number of cards was requested. Nothing was drawn.
    NegativeDraw { requested: isize },

    /// More cards were requested than remained.
    ///
    /// The draw is not rolled back: `drawn` holds every card that was
    /// removed, and the pile is now empty.
    InsufficientCards { requested: usize, drawn: Vec<Card> },
}

impl DeckError {
    /// Consume the error and recover whatever was drawn before it failed.
    #[must_use]
    pub fn into_drawn(self) -> Vec<Card> {
        match self {
            DeckError::InsufficientCards { drawn, .. } => drawn,
            DeckError::EmptyDeck | DeckError::NegativeDraw { .. } => Vec::new(),
        }
    }
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::EmptyDeck => write!(f, "cannot draw from an empty deck"),
            DeckError::NegativeDraw { requested } => {
                write!(f, "cannot draw a negative number of cards ({requested})")
            }
            DeckError::InsufficientCards { requested, drawn } => write!(
                f,
                "requested {requested} cards but only {} remained",
                drawn.len()
            ),
        }
    }
}

impl std::error::Error for DeckError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn test_into_drawn() {
        let card = Card::new(Suit::Hearts, Rank::Four);
        let err = DeckError::InsufficientCards {
            requested: 3,
            drawn: vec![card],
        };
        assert_eq!(err.into_drawn(), vec![card]);
        assert!(DeckError::EmptyDeck.into_drawn().is_empty());
    }

    #[test]
    fn test_display() {
        let err = DeckError::InsufficientCards {
            requested: 5,
            drawn: Vec::new(),
        };
        assert_eq!(err.to_string(), "requested 5 cards but only 0 remained");
        assert_eq!(
            DeckError::NegativeDraw { requested: -2 }.to_string(),
            "cannot draw a negative number of cards (-2)"
        );
    }
}
