//! Player identification and hands.
//!
//! ## PlayerId
//!
//! Type-safe player identifier supporting up to 256 players. Ids order the
//! table: every per-player loop in the engine runs in ascending id order.
//!
//! ## Player
//!
//! A stable identity (id + display name) plus the cards the player holds.
//! Index 0 of the hand is the next card to play; won cards go to the back.
//!
//! ## Comparing players
//!
//! - `==` is the shallow check: same id and same name.
//! - [`Player::deep_eq`] additionally requires the exact same hand order.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::cards::{Card, DeckError, Pile};

/// Player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over the first `player_count` ids.
    ///
    /// ```
    /// use war_engine::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count.min(256)).map(|i| PlayerId(i as u8))
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A participant and the cards they hold.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    hand: Pile,
    last_played: Option<Card>,
}

impl Player {
    /// Create a player with an empty hand.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Pile::new(),
            last_played: None,
        }
    }

    /// Replace the hand, top card first.
    #[must_use]
    pub fn with_cards(mut self, cards: impl IntoIterator<Item = Card>) -> Self {
        self.hand = cards.into_iter().collect();
        self
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The player's hand, next card to play first.
    #[must_use]
    pub fn hand(&self) -> &Pile {
        &self.hand
    }

    /// Number of cards held.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.hand.len()
    }

    /// The card most recently put into play, if any.
    #[must_use]
    pub fn last_played(&self) -> Option<Card> {
        self.last_played
    }

    pub fn set_last_played(&mut self, card: Option<Card>) {
        self.last_played = card;
    }

    /// Add a card to the bottom of the hand.
    pub fn add_card(&mut self, card: Card) {
        self.hand.push(card);
    }

    /// Add cards to the bottom of the hand, keeping their order.
    pub fn add_cards(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.hand.extend(cards);
    }

    /// Take the top card of the hand.
    pub fn draw_card(&mut self) -> Result<Card, DeckError> {
        self.hand.draw_one()
    }

    /// Take the top `count` cards. Partial draws behave like [`Pile::draw_many`].
    pub fn draw_cards(&mut self, count: isize) -> Result<Vec<Card>, DeckError> {
        self.hand.draw_many(count)
    }

    /// Give up every card in hand.
    pub fn surrender_cards(&mut self) -> Vec<Card> {
        self.hand.take_all()
    }

    /// Shallow identity plus an identical hand, card for card.
    #[must_use]
    pub fn deep_eq(&self, other: &Player) -> bool {
        self == other && self.hand == other.hand
    }
}

/// Shallow identity: same id and same name. Hands are ignored.
impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name
    }
}

impl Eq for Player {}

impl Hash for Player {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Player {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Players order by id, then by name.
impl Ord for Player {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id).then_with(|| self.name.cmp(&other.name))
    }
}
