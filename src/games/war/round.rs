//! Round resolution: placing cards, finding the high card, and going to war.
//!
//! ## A round
//!
//! 1. Every active player places the top card of their hand. A player with
//!    nothing to place is eliminated.
//! 2. The player with the highest-ranked card takes every placed card.
//! 3. Tied high cards go to war. Each war step either produces a single
//!    winner, narrows the tie, or draws.
//! 4. A drawn war is settled by the suit of each tied player's last played
//!    card. If even the suits tie, the contested cards go back into the deck
//!    and are dealt out again.
//!
//! ## War steps
//!
//! - *Full war*: at least one tied player holds `CARDS_NEEDED_FOR_WAR`
//!   cards. Those players put one card face down and one face up. Any tied
//!   player who cannot is eliminated and their remaining cards join the
//!   prize pile.
//! - *Limited war*: nobody can manage a full step. Every tied player puts in
//!   all they have left; the last card is their face-up card. Players with
//!   nothing left are eliminated.
//!
//! Steps run in a loop, not recursively: every step consumes cards, so the
//! loop is bounded by the cards in play.

use log::{debug, info, trace};
use rustc_hash::FxHashMap;
use smallvec::{smallvec, SmallVec};

use super::error::WarError;
use super::game::{War, CARDS_NEEDED_FOR_WAR};
use super::outcome::{Resolution, RoundOutcome};
use crate::cards::{Card, Deck};
use crate::core::PlayerId;

/// Cards each player put into play in one step, in the order played.
/// The last card is the one that counts.
pub type Contributions = FxHashMap<PlayerId, SmallVec<[Card; 2]>>;

impl War {
    /// Every active player places their top card.
    ///
    /// Returns each contributing player's card and the flat list of placed
    /// cards in id order. Players with empty hands are eliminated and left
    /// out of both.
    pub fn place_cards(&mut self) -> (Contributions, Vec<Card>) {
        let mut contributions = Contributions::default();
        let mut cards = Vec::new();

        for seat in self.table.values_mut().filter(|s| s.is_active()) {
            match seat.player.draw_card() {
                Ok(card) => {
                    debug!("{} played {}", seat.player.name(), card);
                    seat.player.set_last_played(Some(card));
                    contributions.insert(seat.id(), smallvec![card]);
                    cards.push(card);
                }
                Err(_) => {
                    info!("{} is out of cards and eliminated", seat.player.name());
                    seat.eliminate();
                }
            }
        }

        (contributions, cards)
    }

    /// Ids of the players holding the high card, in id order.
    ///
    /// Normally compares the rank of each active player's last contributed
    /// card; more than one id means a tie. With `from_draw` set, compares the
    /// suit of each contender's first card instead and returns every
    /// contender whose suit no other contender beats. That mode is only for
    /// settling a drawn war.
    pub fn determine_high_card_holders(
        &self,
        contributions: &Contributions,
        from_draw: bool,
    ) -> Result<Vec<PlayerId>, WarError> {
        let mut ids: Vec<PlayerId> = contributions.keys().copied().collect();
        ids.sort_unstable();

        if from_draw {
            let mut cards = Vec::with_capacity(ids.len());
            for id in ids {
                self.seat(id)?;
                let card = contributions[&id]
                    .first()
                    .copied()
                    .ok_or_else(|| WarError::invariant(format!("{id} has no card for the suit tiebreak")))?;
                cards.push((id, card));
            }

            return Ok(cards
                .iter()
                .filter(|(_, card)| cards.iter().all(|(_, other)| card.suit >= other.suit))
                .map(|(id, _)| *id)
                .collect());
        }

        let mut played = Vec::with_capacity(ids.len());
        for id in ids {
            if !self.seat(id)?.is_active() {
                continue;
            }
            let card = contributions[&id]
                .last()
                .copied()
                .ok_or_else(|| WarError::invariant(format!("{id} contributed an empty set of cards")))?;
            played.push((id, card));
        }

        let Some(highest) = Deck::highest_rank(played.iter().map(|(_, card)| card)) else {
            return Ok(Vec::new());
        };

        Ok(played
            .into_iter()
            .filter(|(_, card)| card.rank == highest)
            .map(|(id, _)| id)
            .collect())
    }

    /// Resolve a tie between `high_card_holders`.
    ///
    /// Every card put into play is appended to `prize`. On a win, the winner
    /// takes the whole prize pile and `prize` is left empty. A war in which
    /// no tied player can put in another card fails with `WarError::Draw`,
    /// leaving `prize` intact for the caller.
    pub fn war(&mut self, high_card_holders: &[PlayerId], prize: &mut Vec<Card>) -> Result<PlayerId, WarError> {
        let mut tiers = 0;
        self.escalate(high_card_holders, prize, &mut tiers)
    }

    fn escalate(
        &mut self,
        high_card_holders: &[PlayerId],
        prize: &mut Vec<Card>,
        tiers: &mut u32,
    ) -> Result<PlayerId, WarError> {
        let mut tied = high_card_holders.to_vec();

        loop {
            *tiers += 1;

            let mut full_war = false;
            for id in &tied {
                if self.seat(*id)?.player.card_count() >= CARDS_NEEDED_FOR_WAR {
                    full_war = true;
                    break;
                }
            }
            trace!(
                "war step {} ({}) between {:?}, {} cards at stake",
                tiers,
                if full_war { "full" } else { "limited" },
                tied,
                prize.len()
            );

            let face_up = if full_war {
                self.full_war(&tied, prize)?
            } else {
                self.limited_war(&tied, prize)?
            };

            if face_up.is_empty() {
                debug!("war between {:?} is a draw", tied);
                return Err(WarError::Draw { players: tied });
            }

            let leaders = self.determine_high_card_holders(&face_up, false)?;
            match leaders.len() {
                0 => return Err(WarError::invariant("a war step put cards in play but nobody leads")),
                1 => {
                    let winner = leaders[0];
                    let seat = self.seat_mut(winner)?;
                    seat.player.add_cards(prize.drain(..));
                    if !full_war {
                        seat.reinstate();
                    }
                    debug!("{} wins the war", seat.player.name());
                    return Ok(winner);
                }
                _ => tied = leaders,
            }
        }
    }

    fn full_war(&mut self, tied: &[PlayerId], prize: &mut Vec<Card>) -> Result<Contributions, WarError> {
        let mut face_up = Contributions::default();

        for &id in tied {
            let seat = self.seat_mut(id)?;
            match seat.player.draw_cards(CARDS_NEEDED_FOR_WAR as isize) {
                Ok(cards) => {
                    seat.player.set_last_played(cards.last().copied());
                    prize.extend_from_slice(&cards);
                    face_up.insert(id, SmallVec::from_vec(cards));
                }
                Err(err) => {
                    let remaining = err.into_drawn();
                    if let Some(&last) = remaining.last() {
                        seat.player.set_last_played(Some(last));
                    }
                    info!("{} cannot afford the war and is eliminated", seat.player.name());
                    seat.eliminate();
                    prize.extend(remaining);
                }
            }
        }

        Ok(face_up)
    }

    fn limited_war(&mut self, tied: &[PlayerId], prize: &mut Vec<Card>) -> Result<Contributions, WarError> {
        let mut face_up = Contributions::default();

        for &id in tied {
            let seat = self.seat_mut(id)?;
            if !seat.is_active() {
                continue;
            }

            let remaining = seat.player.surrender_cards();
            match remaining.last() {
                Some(&last) => {
                    seat.player.set_last_played(Some(last));
                    prize.extend_from_slice(&remaining);
                    face_up.insert(id, SmallVec::from_vec(remaining));
                }
                None => {
                    info!("{} has nothing left for the war and is eliminated", seat.player.name());
                    seat.eliminate();
                }
            }
        }

        Ok(face_up)
    }

    /// Play one round and update the game status.
    pub fn start_round(&mut self) -> Result<RoundOutcome, WarError> {
        let active_before = self.active_players();
        self.round_winner = None;

        let (contributions, mut prize) = self.place_cards();

        let resolution = if contributions.is_empty() {
            Resolution::Uncontested
        } else {
            let holders = self.determine_high_card_holders(&contributions, false)?;
            match holders.as_slice() {
                [] => return Err(WarError::invariant("cards were placed but nobody holds the high card")),
                [winner] => {
                    self.seat_mut(*winner)?.player.add_cards(prize.drain(..));
                    self.round_winner = Some(*winner);
                    Resolution::HighCard
                }
                _ => {
                    let mut tiers = 0;
                    match self.escalate(&holders, &mut prize, &mut tiers) {
                        Ok(winner) => {
                            self.round_winner = Some(winner);
                            Resolution::War { tiers }
                        }
                        Err(WarError::Draw { players }) => self.settle_draw(&players, &mut prize)?,
                        Err(err) => return Err(err),
                    }
                }
            }
        };

        self.rounds_played += 1;
        if let Some(winner) = self.round_winner {
            debug!("round {} goes to {}", self.rounds_played, self.display_name(winner));
        }
        self.update_game_status();

        let eliminated = active_before
            .into_iter()
            .filter(|id| self.table.get(id).is_some_and(|seat| seat.is_eliminated()))
            .collect();

        Ok(RoundOutcome {
            winner: self.round_winner,
            eliminated,
            is_game_over: self.is_over(),
            resolution,
        })
    }

    /// Last resort after a drawn war: the best suit among the tied players'
    /// last played cards takes the prize. A further tie sends the prize back
    /// into the deck to be dealt out again.
    fn settle_draw(&mut self, players: &[PlayerId], prize: &mut Vec<Card>) -> Result<Resolution, WarError> {
        let mut last_played = Contributions::default();
        for &id in players {
            if let Some(card) = self.seat(id)?.player.last_played() {
                last_played.insert(id, smallvec![card]);
            }
        }

        let leaders = self.determine_high_card_holders(&last_played, true)?;
        if let [winner] = leaders.as_slice() {
            let seat = self.seat_mut(*winner)?;
            seat.reinstate();
            seat.player.add_cards(prize.drain(..));
            debug!("{} wins the drawn war on suit", seat.player.name());
            self.round_winner = Some(*winner);
            return Ok(Resolution::SuitTiebreak);
        }

        debug!("suits tied between {:?}, redealing {} cards", leaders, prize.len());
        self.round_winner = None;
        self.deck.restock(prize.drain(..));
        self.deal_round_robin()?;
        Ok(Resolution::Redealt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};
    use crate::core::{Player, WarConfig};
    use crate::rules::{CardGame, GameResult};

    fn card(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank)
    }

    fn clubs(rank: Rank) -> Card {
        card(Suit::Clubs, rank)
    }

    /// A game with an empty deck and the given hands seated as players 0, 1, ...
    fn table(hands: Vec<Vec<Card>>) -> War {
        let mut game = War::new(WarConfig::new().with_packs(0).with_seed(0));
        for (i, hand) in hands.into_iter().enumerate() {
            game.add_player(Player::new(PlayerId::new(i as u8), format!("p{i}")).with_cards(hand));
        }
        game
    }

    fn hand(game: &War, id: u8) -> Vec<Card> {
        game.current_hand(PlayerId::new(id)).unwrap().to_vec()
    }

    fn is_active(game: &War, id: u8) -> bool {
        game.player(PlayerId::new(id)).unwrap().is_active()
    }

    const A: PlayerId = PlayerId::new(0);
    const B: PlayerId = PlayerId::new(1);
    const C: PlayerId = PlayerId::new(2);

    #[test]
    fn test_place_cards_takes_top_card() {
        let mut game = table(vec![
            vec![clubs(Rank::Five), clubs(Rank::Six)],
            vec![clubs(Rank::King)],
        ]);

        let (contributions, cards) = game.place_cards();

        assert_eq!(contributions[&A].as_slice(), &[clubs(Rank::Five)]);
        assert_eq!(contributions[&B].as_slice(), &[clubs(Rank::King)]);
        assert_eq!(cards, vec![clubs(Rank::Five), clubs(Rank::King)]);
        assert_eq!(hand(&game, 0), vec![clubs(Rank::Six)]);
        assert_eq!(game.player(A).unwrap().player.last_played(), Some(clubs(Rank::Five)));
    }

    #[test]
    fn test_place_cards_eliminates_empty_hands() {
        let mut game = table(vec![vec![], vec![clubs(Rank::Two), clubs(Rank::Three)]]);

        let (contributions, cards) = game.place_cards();
        assert!(!contributions.contains_key(&A));
        assert!(!is_active(&game, 0));
        assert_eq!(cards.len(), 1);

        // Eliminated players are skipped from then on
        let (contributions, _) = game.place_cards();
        assert_eq!(contributions.len(), 1);
        assert!(hand(&game, 1).is_empty());
    }

    #[test]
    fn test_high_card_single_holder() {
        let game = table(vec![vec![], vec![], vec![]]);
        let mut contributions = Contributions::default();
        contributions.insert(A, smallvec![clubs(Rank::Ten)]);
        contributions.insert(B, smallvec![card(Suit::Hearts, Rank::Ace)]);
        contributions.insert(C, smallvec![clubs(Rank::King)]);

        assert_eq!(game.determine_high_card_holders(&contributions, false), Ok(vec![B]));
    }

    #[test]
    fn test_high_card_tie_uses_last_card() {
        let game = table(vec![vec![], vec![], vec![]]);
        let mut contributions = Contributions::default();
        contributions.insert(A, smallvec![clubs(Rank::Ace), clubs(Rank::Four)]);
        contributions.insert(B, smallvec![clubs(Rank::Two), card(Suit::Spades, Rank::Nine)]);
        contributions.insert(C, smallvec![clubs(Rank::Three), card(Suit::Hearts, Rank::Nine)]);

        assert_eq!(game.determine_high_card_holders(&contributions, false), Ok(vec![B, C]));
    }

    #[test]
    fn test_high_card_ignores_eliminated() {
        let mut game = table(vec![vec![], vec![]]);
        game.seat_mut(A).unwrap().eliminate();

        let mut contributions = Contributions::default();
        contributions.insert(A, smallvec![clubs(Rank::Ace)]);
        contributions.insert(B, smallvec![clubs(Rank::Two)]);

        assert_eq!(game.determine_high_card_holders(&contributions, false), Ok(vec![B]));
    }

    #[test]
    fn test_high_card_unknown_player() {
        let game = table(vec![vec![]]);
        let mut contributions = Contributions::default();
        contributions.insert(PlayerId::new(7), smallvec![clubs(Rank::Ace)]);

        assert!(matches!(
            game.determine_high_card_holders(&contributions, false),
            Err(WarError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_high_card_empty_contribution() {
        let game = table(vec![vec![]]);
        let mut contributions = Contributions::default();
        contributions.insert(A, SmallVec::new());

        assert!(matches!(
            game.determine_high_card_holders(&contributions, false),
            Err(WarError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_suit_tiebreak() {
        let game = table(vec![vec![], vec![]]);
        let mut contributions = Contributions::default();
        contributions.insert(A, smallvec![clubs(Rank::Two)]);
        contributions.insert(B, smallvec![card(Suit::Diamonds, Rank::Two)]);

        assert_eq!(game.determine_high_card_holders(&contributions, true), Ok(vec![B]));
    }

    #[test]
    fn test_suit_tiebreak_full_tie() {
        let game = table(vec![vec![], vec![], vec![]]);
        let mut contributions = Contributions::default();
        contributions.insert(A, smallvec![card(Suit::Spades, Rank::Two)]);
        contributions.insert(B, smallvec![card(Suit::Spades, Rank::Two)]);
        contributions.insert(C, smallvec![card(Suit::Hearts, Rank::Two)]);

        assert_eq!(game.determine_high_card_holders(&contributions, true), Ok(vec![A, B]));
    }

    #[test]
    fn test_full_war_ace_beats_king() {
        let mut game = table(vec![
            vec![clubs(Rank::Ten), clubs(Rank::Ace)],
            vec![clubs(Rank::Seven), clubs(Rank::King)],
        ]);
        let mut prize = Vec::new();

        assert_eq!(game.war(&[A, B], &mut prize), Ok(A));
        assert!(prize.is_empty());
        assert_eq!(hand(&game, 0).len(), 4);
        assert!(hand(&game, 1).is_empty());
        assert_eq!(game.player(A).unwrap().player.last_played(), Some(clubs(Rank::Ace)));
        assert_eq!(game.player(B).unwrap().player.last_played(), Some(clubs(Rank::King)));
    }

    #[test]
    fn test_war_prize_includes_round_cards() {
        let mut game = table(vec![
            vec![clubs(Rank::Ten), clubs(Rank::Ace)],
            vec![clubs(Rank::Seven), clubs(Rank::King)],
        ]);
        let mut prize = vec![clubs(Rank::Queen), card(Suit::Hearts, Rank::Queen)];

        assert_eq!(game.war(&[A, B], &mut prize), Ok(A));
        assert_eq!(
            hand(&game, 0),
            vec![
                clubs(Rank::Queen),
                card(Suit::Hearts, Rank::Queen),
                clubs(Rank::Ten),
                clubs(Rank::Ace),
                clubs(Rank::Seven),
                clubs(Rank::King),
            ]
        );
    }

    #[test]
    fn test_full_war_eliminates_short_player() {
        let mut game = table(vec![
            vec![clubs(Rank::Two), clubs(Rank::Three)],
            vec![clubs(Rank::Ace)],
        ]);
        let mut prize = Vec::new();

        assert_eq!(game.war(&[A, B], &mut prize), Ok(A));
        assert!(!is_active(&game, 1));
        // B's single card went into the prize even though it was an Ace
        assert_eq!(hand(&game, 0), vec![clubs(Rank::Two), clubs(Rank::Three), clubs(Rank::Ace)]);
    }

    #[test]
    fn test_war_escalates_over_several_steps() {
        let mut game = table(vec![
            vec![clubs(Rank::Two), clubs(Rank::Nine), clubs(Rank::Three), clubs(Rank::Four)],
            vec![
                card(Suit::Hearts, Rank::Two),
                card(Suit::Hearts, Rank::Nine),
                card(Suit::Hearts, Rank::Three),
                card(Suit::Hearts, Rank::Five),
            ],
        ]);
        let mut prize = Vec::new();
        let mut tiers = 0;

        assert_eq!(game.escalate(&[A, B], &mut prize, &mut tiers), Ok(B));
        assert_eq!(tiers, 2);
        assert_eq!(hand(&game, 1).len(), 8);
    }

    #[test]
    fn test_limited_war_winner() {
        let mut game = table(vec![vec![clubs(Rank::Ace)], vec![clubs(Rank::Three)]]);
        let mut prize = vec![clubs(Rank::Jack), card(Suit::Spades, Rank::Jack)];

        assert_eq!(game.war(&[A, B], &mut prize), Ok(A));
        assert!(is_active(&game, 0));
        assert_eq!(hand(&game, 0).len(), 4);
        assert!(hand(&game, 1).is_empty());
    }

    #[test]
    fn test_limited_war_one_player_empty() {
        let mut game = table(vec![vec![], vec![clubs(Rank::Three)]]);
        let mut prize = Vec::new();

        assert_eq!(game.war(&[A, B], &mut prize), Ok(B));
        assert!(!is_active(&game, 0));
        assert!(is_active(&game, 1));
        assert_eq!(hand(&game, 1), vec![clubs(Rank::Three)]);
    }

    #[test]
    fn test_war_draw_when_nobody_has_cards() {
        let mut game = table(vec![vec![clubs(Rank::Two)], vec![card(Suit::Diamonds, Rank::Two)]]);
        let mut prize = Vec::new();

        let result = game.war(&[A, B], &mut prize);

        assert_eq!(result, Err(WarError::Draw { players: vec![A, B] }));
        assert!(!is_active(&game, 0));
        assert!(!is_active(&game, 1));
        assert!(hand(&game, 0).is_empty());
        assert!(hand(&game, 1).is_empty());
        // The contested cards stay with the caller
        assert_eq!(prize.len(), 2);
    }

    #[test]
    fn test_round_high_card() {
        let mut game = table(vec![
            vec![clubs(Rank::Four), clubs(Rank::Two)],
            vec![clubs(Rank::Nine), clubs(Rank::Three)],
        ]);

        let outcome = game.start_round().unwrap();

        assert_eq!(outcome.winner, Some(B));
        assert_eq!(outcome.resolution, Resolution::HighCard);
        assert!(!outcome.is_game_over);
        assert_eq!(hand(&game, 1), vec![clubs(Rank::Three), clubs(Rank::Four), clubs(Rank::Nine)]);
        assert_eq!(game.round_winner(), Some(B));
        assert_eq!(game.rounds_played(), 1);
    }

    #[test]
    fn test_round_war() {
        let mut game = table(vec![
            vec![clubs(Rank::Eight), clubs(Rank::Two), clubs(Rank::King), clubs(Rank::Five)],
            vec![card(Suit::Hearts, Rank::Eight), clubs(Rank::Three), clubs(Rank::Queen), clubs(Rank::Six)],
        ]);

        let outcome = game.start_round().unwrap();

        assert_eq!(outcome.winner, Some(A));
        assert_eq!(outcome.resolution, Resolution::War { tiers: 1 });
        assert_eq!(hand(&game, 0).len(), 7);
        assert_eq!(hand(&game, 1), vec![clubs(Rank::Six)]);
    }

    #[test]
    fn test_round_draw_settled_by_suit() {
        let mut game = table(vec![vec![clubs(Rank::Two)], vec![card(Suit::Diamonds, Rank::Two)]]);

        let outcome = game.start_round().unwrap();

        assert_eq!(outcome.winner, Some(B));
        assert_eq!(outcome.resolution, Resolution::SuitTiebreak);
        assert_eq!(outcome.eliminated, vec![A]);
        assert!(outcome.is_game_over);
        assert!(is_active(&game, 1));
        assert_eq!(hand(&game, 1).len(), 2);
        assert_eq!(game.is_terminal(), Some(GameResult::Winner(B)));
    }

    #[test]
    fn test_round_identical_cards_redeal() {
        // Two packs make identical cards possible: the suit tiebreak ties too
        let twin = card(Suit::Spades, Rank::Queen);
        let mut game = table(vec![vec![twin], vec![twin], vec![clubs(Rank::Two), clubs(Rank::Three)]]);

        let outcome = game.start_round().unwrap();

        assert_eq!(outcome.winner, None);
        assert_eq!(outcome.resolution, Resolution::Redealt);
        assert_eq!(outcome.eliminated, vec![A, B]);
        // Only C is still active, so C receives all the contested cards
        assert_eq!(hand(&game, 2), vec![clubs(Rank::Three), twin, twin, clubs(Rank::Two)]);
        assert_eq!(game.remaining_deck_size(), 0);
        assert!(outcome.is_game_over);
        assert_eq!(game.round_winner(), None);
    }

    #[test]
    fn test_round_redeal_with_nobody_left() {
        let twin = card(Suit::Hearts, Rank::Seven);
        let mut game = table(vec![vec![twin], vec![twin]]);

        let outcome = game.start_round().unwrap();

        assert_eq!(outcome.resolution, Resolution::Redealt);
        assert!(outcome.is_game_over);
        assert_eq!(game.remaining_deck_size(), 2);
        assert_eq!(game.total_cards(), 2);
        assert_eq!(game.is_terminal(), Some(GameResult::Draw));
    }

    #[test]
    fn test_round_with_no_cards() {
        let mut game = table(vec![vec![], vec![]]);

        let outcome = game.start_round().unwrap();

        assert_eq!(outcome.resolution, Resolution::Uncontested);
        assert_eq!(outcome.winner, None);
        assert_eq!(outcome.eliminated, vec![A, B]);
        assert!(outcome.is_game_over);
    }

    #[test]
    fn test_play_round_after_game_over() {
        let mut game = table(vec![vec![clubs(Rank::Ace)], vec![]]);

        let outcome = game.play_round().unwrap();
        assert!(outcome.is_game_over);
        assert_eq!(game.play_round(), Err(WarError::GameOver));
    }
}
