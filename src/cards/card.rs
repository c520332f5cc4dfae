//! Playing cards: suits, ranks, and the two notions of card equality.
//!
//! ## Ordering
//!
//! Gameplay compares cards by rank only, with Ace high:
//! `Two < Three < ... < Ten < Jack < Queen < King < Ace`.
//! Suits never break a rank tie except in the last-resort tiebreak after a
//! drawn war, which uses [`Card::cmp_suit`].
//!
//! ## Equality
//!
//! `Card` implements `Eq` as *identity* (same suit and same rank). Rank-only
//! equality is a separate question, answered by [`Card::same_rank`]. For that
//! reason `Card` deliberately has no `Ord` impl.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Card suit. Declaration order is the suit order used by the draw tiebreak.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    /// All suits, lowest first.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Full name ("Clubs", "Diamonds", ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Suit::Clubs => "Clubs",
            Suit::Diamonds => "Diamonds",
            Suit::Hearts => "Hearts",
            Suit::Spades => "Spades",
        }
    }

    /// Single-character symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Card rank, Ace high.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

impl Rank {
    /// All ranks, lowest first.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Numeric value: 2..=10 for pip cards, then Jack 11 through Ace 14.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Full lower-case name ("two", ..., "ace").
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Rank::Two => "two",
            Rank::Three => "three",
            Rank::Four => "four",
            Rank::Five => "five",
            Rank::Six => "six",
            Rank::Seven => "seven",
            Rank::Eight => "eight",
            Rank::Nine => "nine",
            Rank::Ten => "ten",
            Rank::Jack => "jack",
            Rank::Queen => "queen",
            Rank::King => "king",
            Rank::Ace => "ace",
        }
    }

    /// Short symbol ("2", ..., "10", "J", "Q", "K", "A").
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Error returned when a string names no rank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseRankError(pub String);

impl fmt::Display for ParseRankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown card rank: {:?}", self.0)
    }
}

impl std::error::Error for ParseRankError {}

/// Accepts both the long names ("queen") and the short symbols ("Q").
impl FromStr for Rank {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rank::ALL
            .into_iter()
            .find(|r| r.name() == s || r.symbol() == s)
            .ok_or_else(|| ParseRankError(s.to_string()))
    }
}

/// An immutable playing card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    /// Create a card.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Gameplay ordering: rank only, Ace high.
    ///
    /// ```
    /// use std::cmp::Ordering;
    /// use war_engine::cards::{Card, Rank, Suit};
    ///
    /// let king = Card::new(Suit::Spades, Rank::King);
    /// let ace = Card::new(Suit::Clubs, Rank::Ace);
    /// assert_eq!(king.cmp_rank(&ace), Ordering::Less);
    /// ```
    #[must_use]
    pub fn cmp_rank(&self, other: &Card) -> Ordering {
        self.rank.cmp(&other.rank)
    }

    /// Rank-only equality, ignoring suit.
    #[must_use]
    pub fn same_rank(&self, other: &Card) -> bool {
        self.rank == other.rank
    }

    /// Suit ordering, used only by the tiebreak after a drawn war.
    #[must_use]
    pub fn cmp_suit(&self, other: &Card) -> Ordering {
        self.suit.cmp(&other.suit)
    }

    /// Long form, e.g. "Ace of Spades".
    #[must_use]
    pub fn name(&self) -> String {
        let rank = self.rank.name();
        let mut chars = rank.chars();
        let capitalized: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        format!("{} of {}", capitalized, self.suit.name())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
