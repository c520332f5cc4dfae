//! Ordered card sequences and the draw primitives shared by decks and hands.
//!
//! Index 0 is the top of the pile: sequential draws take from the front and
//! new cards are added at the back. Random draws remove a single position
//! and leave the relative order of the remaining cards untouched.
//!
//! Backed by `im::Vector` so hands can be cloned in O(1) when a caller wants
//! a snapshot to compare against later.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::card::{Card, Rank};
use super::error::DeckError;
use crate::core::rng::GameRng;

/// An ordered sequence of cards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pile {
    cards: Vector<Card>,
}

impl Pile {
    /// Create an empty pile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cards in the pile.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The next card to be drawn, if any.
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.front()
    }

    /// Card at `index` (0 = top).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Iterate from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter()
    }

    /// Copy the cards out, top first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Card> {
        self.cards.iter().copied().collect()
    }

    /// Add a card at the bottom.
    pub fn push(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Add cards at the bottom, keeping their order.
    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    /// Remove every card, top first.
    pub fn take_all(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards).into_iter().collect()
    }

    /// Remove and return the top card.
    pub fn draw_one(&mut self) -> Result<Card, DeckError> {
        self.cards.pop_front().ok_or(DeckError::EmptyDeck)
    }

    /// Remove and return the top `count` cards in their current order.
    ///
    /// If fewer than `count` remain, every remaining card is removed and
    /// handed back inside `DeckError::InsufficientCards`.
    pub fn draw_many(&mut self, count: isize) -> Result<Vec<Card>, DeckError> {
        let requested = checked_count(count)?;

        if requested > self.cards.len() {
            return Err(DeckError::InsufficientCards {
                requested,
                drawn: self.take_all(),
            });
        }

        let rest = self.cards.split_off(requested);
        let drawn = std::mem::replace(&mut self.cards, rest);
        Ok(drawn.into_iter().collect())
    }

    /// Remove and return a uniformly chosen card.
    pub fn draw_random_one(&mut self, rng: &mut GameRng) -> Result<Card, DeckError> {
        if self.cards.is_empty() {
            return Err(DeckError::EmptyDeck);
        }
        let index = rng.gen_index(self.cards.len());
        Ok(self.cards.remove(index))
    }

    /// Remove and return `count` uniformly chosen cards, in the order chosen.
    ///
    /// Same partial-draw behavior as [`Pile::draw_many`].
    pub fn draw_random_many(&mut self, count: isize, rng: &mut GameRng) -> Result<Vec<Card>, DeckError> {
        let requested = checked_count(count)?;

        let available = requested.min(self.cards.len());
        let mut drawn = Vec::with_capacity(available);
        for _ in 0..available {
            let index = rng.gen_index(self.cards.len());
            drawn.push(self.cards.remove(index));
        }

        if drawn.len() < requested {
            return Err(DeckError::InsufficientCards { requested, drawn });
        }
        Ok(drawn)
    }

    /// Reorder the cards so that the result always differs from the input.
    ///
    /// Piles with fewer than two cards, or whose cards are all identical,
    /// have no other order and are left as they are.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let Some(first) = self.cards.front().copied() else {
            return;
        };
        if self.cards.iter().all(|card| *card == first) {
            return;
        }

        let mut buffer = self.to_vec();
        loop {
            rng.shuffle(&mut buffer);
            if !buffer.iter().eq(self.cards.iter()) {
                break;
            }
        }
        self.cards = Vector::from(buffer);
    }
}

impl FromIterator<Card> for Pile {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Card>> for Pile {
    fn from(cards: Vec<Card>) -> Self {
        Self {
            cards: Vector::from(cards),
        }
    }
}

/// Highest rank among `cards`, Ace high. `None` when there are no cards.
pub fn highest_rank<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Option<Rank> {
    cards.into_iter().map(|card| card.rank).max()
}

fn checked_count(count: isize) -> Result<usize, DeckError> {
    usize::try_from(count).map_err(|_| DeckError::NegativeDraw { requested: count })
}
