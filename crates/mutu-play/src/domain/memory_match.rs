//! Date/moment memory-match game.
//!
//! Each pair has two faces: the moment's display date and its title. Cards
//! only store which pair and which face they are; labels are resolved from
//! the content document when the board is rendered.

use chrono::{DateTime, Utc};
use mutu_core::clock::{Clock, elapsed_ms};
use mutu_core::error::DomainError;
use mutu_core::rng::{DeterministicRng, shuffle};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::events::{
    CardFlipped, MatchStarted, MatchWon, PairMatched, PairMismatched, PlayEvent, PlayEventKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardFace {
    Date,
    Moment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Timeline item id shared by both cards of a pair.
    pub pair_id: String,
    pub face: CardFace,
}

/// The persisted `mutu.match.session` record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchSession {
    pub cards: Vec<Card>,
    /// Indices of unmatched cards currently face up, at most two.
    pub face_up: Vec<usize>,
    /// Pair ids locked open.
    pub matched: Vec<String>,
    pub moves: u32,
    /// Set while a mismatched pair waits to flip back.
    pub mismatch_at: Option<DateTime<Utc>>,
}

impl MatchSession {
    #[must_use]
    pub fn started(&self) -> bool {
        !self.cards.is_empty()
    }

    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.cards.len() / 2
    }

    #[must_use]
    pub fn won(&self) -> bool {
        self.started() && self.matched.len() == self.total_pairs()
    }

    #[must_use]
    pub fn is_matched(&self, index: usize) -> bool {
        self.cards
            .get(index)
            .is_some_and(|card| self.matched.contains(&card.pair_id))
    }

    /// Flips a waiting mismatch back once `flip_back_ms` has passed.
    /// Returns whether anything changed.
    pub fn settle(&mut self, now: DateTime<Utc>, flip_back_ms: u64) -> bool {
        let Some(since) = self.mismatch_at else {
            return false;
        };
        let wait = i64::try_from(flip_back_ms).unwrap_or(i64::MAX);
        if elapsed_ms(since, now) < wait {
            return false;
        }
        self.face_up.clear();
        self.mismatch_at = None;
        true
    }
}

/// Deals a shuffled board: a date card and a moment card per pair id.
#[must_use]
pub fn deal(pair_ids: &[String], rng: &mut dyn DeterministicRng) -> Vec<Card> {
    let mut cards: Vec<Card> = pair_ids
        .iter()
        .flat_map(|id| {
            [CardFace::Date, CardFace::Moment].map(|face| Card {
                pair_id: id.clone(),
                face,
            })
        })
        .collect();
    shuffle(&mut cards, rng);
    cards
}

/// A memory-match board plus the events produced against it.
#[derive(Debug)]
pub struct MatchGame {
    session: MatchSession,
    uncommitted_events: Vec<PlayEvent>,
}

impl MatchGame {
    /// Rehydrates, dropping face-up indices that are off the board. Two
    /// face-up cards with no pending flip-back can never resolve, so they are
    /// turned back down.
    #[must_use]
    pub fn rehydrate(mut session: MatchSession) -> Self {
        let len = session.cards.len();
        session.face_up.retain(|&i| i < len);
        session.face_up.truncate(2);
        if session.face_up.len() == 2 && session.mismatch_at.is_none() {
            session.face_up.clear();
        }
        Self {
            session,
            uncommitted_events: Vec::new(),
        }
    }

    #[must_use]
    pub fn session(&self) -> &MatchSession {
        &self.session
    }

    /// Events produced since rehydration.
    #[must_use]
    pub fn uncommitted_events(&self) -> &[PlayEvent] {
        &self.uncommitted_events
    }

    fn push(&mut self, kind: PlayEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        self.uncommitted_events
            .push(PlayEvent::new(kind, correlation_id, clock));
    }

    /// Flips a waiting mismatch back if its delay has run out.
    pub fn settle(&mut self, flip_back_ms: u64, correlation_id: Uuid, clock: &dyn Clock) {
        if self.session.settle(clock.now(), flip_back_ms) {
            self.push(PlayEventKind::CardsFlippedBack, correlation_id, clock);
        }
    }

    /// Replaces the board with a freshly shuffled one.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` when there are no pairs to deal.
    pub fn start(
        &mut self,
        pair_ids: &[String],
        rng: &mut dyn DeterministicRng,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if pair_ids.is_empty() {
            return Err(DomainError::Rejected(
                "no visible memories to build pairs from".to_owned(),
            ));
        }
        self.session = MatchSession {
            cards: deal(pair_ids, rng),
            ..MatchSession::default()
        };
        self.push(
            PlayEventKind::MatchStarted(MatchStarted {
                pairs: pair_ids.len(),
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Turns a card face up. The second card of a turn counts a move and
    /// either locks the pair or starts the flip-back delay.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` if no game is running, the game is
    /// won, the card is already up or matched, or two cards are already face
    /// up. Returns `DomainError::Validation` for an index off the board. The
    /// board is unchanged in every error case.
    pub fn flip(
        &mut self,
        card_index: usize,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if !self.session.started() {
            return Err(DomainError::Rejected("no game in progress".to_owned()));
        }
        if self.session.won() {
            return Err(DomainError::Rejected("game already won".to_owned()));
        }
        if card_index >= self.session.cards.len() {
            return Err(DomainError::Validation(format!(
                "card {card_index} is not on the board"
            )));
        }
        if self.session.face_up.len() >= 2 {
            return Err(DomainError::Rejected(
                "two cards are already face up".to_owned(),
            ));
        }
        if self.session.is_matched(card_index) || self.session.face_up.contains(&card_index) {
            return Err(DomainError::Rejected(format!(
                "card {card_index} is already face up"
            )));
        }

        self.session.face_up.push(card_index);
        self.push(
            PlayEventKind::CardFlipped(CardFlipped { card_index }),
            correlation_id,
            clock,
        );
        if let &[first, second] = self.session.face_up.as_slice() {
            self.resolve_turn(first, second, correlation_id, clock);
        }
        Ok(())
    }

    fn resolve_turn(&mut self, first: usize, second: usize, correlation_id: Uuid, clock: &dyn Clock) {
        self.session.moves = self.session.moves.saturating_add(1);
        let a = &self.session.cards[first];
        let b = &self.session.cards[second];
        if a.pair_id == b.pair_id {
            let pair_id = a.pair_id.clone();
            self.session.matched.push(pair_id.clone());
            self.session.face_up.clear();
            let moves = self.session.moves;
            self.push(
                PlayEventKind::PairMatched(PairMatched { pair_id, moves }),
                correlation_id,
                clock,
            );
            if self.session.won() {
                self.push(
                    PlayEventKind::MatchWon(MatchWon { moves }),
                    correlation_id,
                    clock,
                );
            }
        } else {
            self.session.mismatch_at = Some(clock.now());
            self.push(
                PlayEventKind::PairMismatched(PairMismatched {
                    card_indices: vec![first, second],
                }),
                correlation_id,
                clock,
            );
        }
    }
}
