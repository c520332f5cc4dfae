//! The shared multi-pack deck.
//!
//! A `Deck` holds 0 to 10 concatenated 52-card packs. Pack counts outside
//! that range are clamped, never rejected. Every draw variant removes cards;
//! the only way back in is `restock`, which takes cards returned from play.
//! Those need not have come out of this deck, so a restocked deck can hold
//! more cards than it was built with.
//!
//! Two decks are equal when their remaining cards match element for element.

use serde::{Deserialize, Serialize};

use super::card::{Card, Rank, Suit};
use super::error::DeckError;
use super::pile::{self, Pile};
use crate::core::rng::GameRng;

/// Number of cards in a single pack.
pub const PACK_SIZE: usize = 52;

/// Fewest packs a deck can be built from.
pub const MIN_PACKS: i32 = 0;

/// Most packs a deck can be built from.
pub const MAX_PACKS: i32 = 10;

/// An ordered deck of one or more packs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Pile,
}

impl Deck {
    /// Build `packs` packs in canonical order (suit-major, Two to Ace within
    /// each suit). `packs` is clamped to `MIN_PACKS..=MAX_PACKS`.
    ///
    /// ```
    /// use war_engine::cards::{Deck, PACK_SIZE};
    ///
    /// assert_eq!(Deck::new(2).len(), 2 * PACK_SIZE);
    /// assert_eq!(Deck::new(-4).len(), 0);
    /// assert_eq!(Deck::new(99).len(), 10 * PACK_SIZE);
    /// ```
    #[must_use]
    pub fn new(packs: i32) -> Self {
        let packs = clamp_packs(packs);
        let cards = (0..packs)
            .flat_map(|_| Suit::ALL)
            .flat_map(|suit| Rank::ALL.map(|rank| Card::new(suit, rank)))
            .collect();
        Self { cards }
    }

    /// Build a deck from an explicit card sequence, top first.
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// Number of cards remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The remaining cards, top first.
    #[must_use]
    pub fn cards(&self) -> &Pile {
        &self.cards
    }

    /// Shuffle so that the new order always differs from the old one.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        self.cards.shuffle(rng);
    }

    /// Draw the top card.
    pub fn draw_one(&mut self) -> Result<Card, DeckError> {
        self.cards.draw_one()
    }

    /// Draw the top `count` cards. See [`Pile::draw_many`] for partial draws.
    pub fn draw_many(&mut self, count: isize) -> Result<Vec<Card>, DeckError> {
        self.cards.draw_many(count)
    }

    /// Draw a uniformly chosen card.
    pub fn draw_random_one(&mut self, rng: &mut GameRng) -> Result<Card, DeckError> {
        self.cards.draw_random_one(rng)
    }

    /// Draw `count` uniformly chosen cards.
    pub fn draw_random_many(&mut self, count: isize, rng: &mut GameRng) -> Result<Vec<Card>, DeckError> {
        self.cards.draw_random_many(count, rng)
    }

    /// Put cards returned from play underneath the deck.
    pub fn restock(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    /// Highest rank among `cards`, Ace high. `None` for an empty input.
    pub fn highest_rank<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Option<Rank> {
        pile::highest_rank(cards)
    }
}

fn clamp_packs(packs: i32) -> usize {
    // Clamped into 0..=10, so the cast cannot wrap
    packs.clamp(MIN_PACKS, MAX_PACKS) as usize
}
