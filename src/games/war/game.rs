//! Table state, dealing, and the game loop.

use std::collections::BTreeMap;

use log::{info, warn};

use super::error::WarError;
use super::outcome::RoundOutcome;
use crate::cards::{Deck, Pile};
use crate::core::{Contender, Player, PlayerId, WarConfig};
use crate::rules::{CardGame, GameResult};

/// Cards a tied player must hold to take part in a full war step: one face
/// down, one face up.
pub const CARDS_NEEDED_FOR_WAR: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
    Playing,
    Finished,
    Aborted,
}

/// A game of War.
///
/// Owns the shared deck and every seat. Seats are kept in a map ordered by
/// `PlayerId`; dealing, placing cards, and war steps all visit players in
/// that order, so a seeded game is fully reproducible.
#[derive(Clone, Debug)]
pub struct War {
    config: WarConfig,
    pub(super) deck: Deck,
    pub(super) table: BTreeMap<PlayerId, Contender>,
    status: Status,
    pub(super) round_winner: Option<PlayerId>,
    pub(super) rounds_played: u32,
    dealt: bool,
}

impl War {
    /// Build the deck described by `config`, shuffled unless disabled.
    /// No players are seated and nothing is dealt.
    #[must_use]
    pub fn new(config: WarConfig) -> Self {
        let mut rng = config.rng();
        let mut deck = Deck::new(config.packs);
        if config.shuffle {
            deck.shuffle(&mut rng);
        }

        Self {
            config,
            deck,
            table: BTreeMap::new(),
            status: Status::Playing,
            round_winner: None,
            rounds_played: 0,
            dealt: false,
        }
    }

    /// Seat `players` and deal the whole deck to them.
    pub fn deal_game(config: WarConfig, players: impl IntoIterator<Item = Player>) -> Result<Self, WarError> {
        let mut game = Self::new(config);
        game.add_players(players);
        game.deal_cards()?;
        Ok(game)
    }

    /// Deal one card at a time to each active player, in id order, until
    /// the deck runs out.
    pub(super) fn deal_round_robin(&mut self) -> Result<(), WarError> {
        if self.table.is_empty() {
            return Err(WarError::NotEnoughPlayers { found: 0, required: 1 });
        }

        let active = self.active_players();
        if active.is_empty() {
            return Ok(());
        }

        'deal: loop {
            for id in &active {
                let Ok(card) = self.deck.draw_one() else {
                    break 'deal;
                };
                self.seat_mut(*id)?.player.add_card(card);
            }
        }

        self.dealt = true;
        Ok(())
    }

    pub(super) fn seat(&self, id: PlayerId) -> Result<&Contender, WarError> {
        self.table
            .get(&id)
            .ok_or_else(|| WarError::invariant(format!("{id} is not seated at the table")))
    }

    pub(super) fn seat_mut(&mut self, id: PlayerId) -> Result<&mut Contender, WarError> {
        self.table
            .get_mut(&id)
            .ok_or_else(|| WarError::invariant(format!("{id} is not seated at the table")))
    }

    /// After a round: the game ends once at most one player is active.
    pub fn update_game_status(&mut self) {
        if self.status != Status::Playing {
            return;
        }

        let active = self.active_players();
        match active.as_slice() {
            [] => {
                self.status = Status::Finished;
                info!("game over after {} rounds: every player is out", self.rounds_played);
            }
            [winner] => {
                self.status = Status::Finished;
                info!("game over after {} rounds: {} wins", self.rounds_played, self.display_name(*winner));
            }
            _ => {}
        }
    }

    pub(super) fn abort(&mut self, err: &WarError) {
        warn!("aborting game after {} rounds: {}", self.rounds_played, err);
        self.status = Status::Aborted;
    }

    pub(super) fn display_name(&self, id: PlayerId) -> String {
        self.table
            .get(&id)
            .map_or_else(|| id.to_string(), |seat| seat.player.name().to_string())
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &WarConfig {
        &self.config
    }

    /// The shared deck.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Cards left in the shared deck.
    #[must_use]
    pub fn remaining_deck_size(&self) -> usize {
        self.deck.len()
    }

    /// The hand of a seated player.
    #[must_use]
    pub fn current_hand(&self, id: PlayerId) -> Option<&Pile> {
        self.table.get(&id).map(|seat| seat.player.hand())
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Contender> {
        self.table.get(&id)
    }

    /// Every seat, in id order.
    pub fn players(&self) -> impl Iterator<Item = &Contender> + '_ {
        self.table.values()
    }

    /// Active players, in id order.
    #[must_use]
    pub fn active_players(&self) -> Vec<PlayerId> {
        self.table.values().filter(|s| s.is_active()).map(Contender::id).collect()
    }

    /// Eliminated players, in id order.
    #[must_use]
    pub fn eliminated_players(&self) -> Vec<PlayerId> {
        self.table.values().filter(|s| s.is_eliminated()).map(Contender::id).collect()
    }

    /// Winner of the most recent round.
    #[must_use]
    pub fn round_winner(&self) -> Option<PlayerId> {
        self.round_winner
    }

    #[must_use]
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Cards in the deck plus every hand. Constant over a game.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.deck.len() + self.table.values().map(|s| s.player.card_count()).sum::<usize>()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status != Status::Playing
    }
}

impl CardGame for War {
    type Outcome = RoundOutcome;
    type Error = WarError;

    /// Seat a player as active. A player with an id that is already seated
    /// replaces the previous seat.
    fn add_player(&mut self, player: Player) {
        self.table.insert(player.id(), Contender::new(player));
    }

    fn num_players(&self) -> usize {
        self.table.len()
    }

    fn deal_cards(&mut self) -> Result<(), WarError> {
        self.deal_round_robin()
    }

    /// Play one round. An invariant violation aborts the game; any later
    /// call reports `GameOver`.
    fn play_round(&mut self) -> Result<RoundOutcome, WarError> {
        if self.is_over() {
            return Err(WarError::GameOver);
        }

        match self.start_round() {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                self.abort(&err);
                Err(err)
            }
        }
    }

    fn is_terminal(&self) -> Option<GameResult> {
        match self.status {
            Status::Playing => None,
            Status::Aborted => Some(GameResult::Draw),
            Status::Finished => match self.active_players().as_slice() {
                [winner] => Some(GameResult::Winner(*winner)),
                _ => Some(GameResult::Draw),
            },
        }
    }

    fn start_game(&mut self) -> Result<GameResult, WarError> {
        let found = self.num_players();
        if found < 2 {
            return Err(WarError::NotEnoughPlayers { found, required: 2 });
        }
        if !self.dealt {
            self.deal_cards()?;
        }

        info!("starting war with {} players and {} cards", found, self.total_cards());
        let result = self.play_rounds(self.config.max_rounds)?;
        match &result {
            GameResult::Winner(id) => info!("the winner is {}", self.display_name(*id)),
            GameResult::Draw => info!("the game is over but there is no winner"),
            GameResult::Stalled { rounds } => info!("stopped after {rounds} rounds without a winner"),
        }
        Ok(result)
    }
}

/// Builder for a dealt game of War.
///
/// ```
/// use war_engine::games::war::WarBuilder;
///
/// let game = WarBuilder::new().seed(7).player("ada").player("bo").build().unwrap();
/// assert_eq!(game.remaining_deck_size(), 0);
/// assert_eq!(game.total_cards(), 52);
/// ```
#[derive(Clone, Debug, Default)]
pub struct WarBuilder {
    config: WarConfig,
    players: Vec<Player>,
}

impl WarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: WarConfig) -> Self {
        self.config = config;
        self
    }

    pub fn packs(mut self, packs: i32) -> Self {
        self.config.packs = packs;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn unshuffled(mut self) -> Self {
        self.config.shuffle = false;
        self
    }

    pub fn max_rounds(mut self, rounds: u32) -> Self {
        self.config.max_rounds = Some(rounds);
        self
    }

    /// Seat a new player named `name` with the next id after the highest
    /// id added so far.
    pub fn player(mut self, name: impl Into<String>) -> Self {
        let next = self.players.iter().map(|p| p.id().index() + 1).max().unwrap_or(0);
        assert!(next < 256, "At most 256 players supported");
        self.players.push(Player::new(PlayerId::new(next as u8), name));
        self
    }

    /// Seat an existing player, hand included. A player whose id is
    /// already taken replaces the earlier one.
    pub fn with_player(mut self, player: Player) -> Self {
        self.players.push(player);
        self
    }

    /// Build the deck, seat the players, and deal.
    pub fn build(self) -> Result<War, WarError> {
        War::deal_game(self.config, self.players)
    }
}
