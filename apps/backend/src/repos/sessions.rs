//! Session store contract for the domain layer.
//!
//! A store holds the authoritative `GameSession` per id, applies guarded
//! merge patches and pushes every committed snapshot to subscribers.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::domain::state::{
    GameSession, Player, PlayerId, RoundStatus, RoundSummary, Seat, SessionId,
};
use crate::domain::Card;
use crate::errors::domain::{ConflictKind, DomainError};

/// Precondition a write must satisfy against the stored session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WriteGuard {
    /// The stored version must still be this one.
    Version(u64),
    /// The hand at `seat` must still be exactly `cards`.
    HandUnchanged { seat: Seat, cards: Vec<Card> },
}

impl WriteGuard {
    pub fn check(&self, current: &GameSession) -> Result<(), DomainError> {
        match self {
            WriteGuard::Version(expected) => {
                if current.version != *expected {
                    return Err(DomainError::conflict(
                        ConflictKind::StaleSnapshot,
                        format!(
                            "Session version mismatch: expected {expected}, but session has version {}",
                            current.version
                        ),
                    ));
                }
            }
            WriteGuard::HandUnchanged { seat, cards } => {
                if current.hands.get(*seat) != Some(cards) {
                    return Err(DomainError::conflict(
                        ConflictKind::HandChanged,
                        format!("Hand at seat {seat} changed since it was read"),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Merge patch carrying only the fields that changed, plus its guard.
///
/// `None` means "unchanged". Nullable fields use a double option so a patch
/// can also clear them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPatch {
    pub guard: WriteGuard,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub players: Option<Vec<Player>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck: Option<Vec<Card>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discard_pile: Option<Vec<Card>>,
    /// Replaced hands keyed by seat.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub hands: BTreeMap<Seat, Vec<Card>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_round: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_status: Option<RoundStatus>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub dealer_index: Option<Option<Seat>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub current_turn: Option<Option<PlayerId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_drawn_this_turn: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub last_round: Option<Option<RoundSummary>>,
}

fn changed<T: PartialEq + Clone>(before: &T, after: &T) -> Option<T> {
    (before != after).then(|| after.clone())
}

impl SessionPatch {
    /// Smallest patch turning `before` into `after`.
    pub fn between(before: &GameSession, after: &GameSession, guard: WriteGuard) -> Self {
        let hands = after
            .hands
            .iter()
            .enumerate()
            .filter(|(seat, hand)| before.hands.get(*seat) != Some(*hand))
            .map(|(seat, hand)| (seat, hand.clone()))
            .collect();
        Self {
            guard,
            players: changed(&before.players, &after.players),
            deck: changed(&before.deck, &after.deck),
            discard_pile: changed(&before.discard_pile, &after.discard_pile),
            hands,
            current_round: changed(&before.current_round, &after.current_round),
            round_status: changed(&before.round_status, &after.round_status),
            dealer_index: changed(&before.dealer_index, &after.dealer_index),
            current_turn: changed(&before.current_turn, &after.current_turn),
            has_drawn_this_turn: changed(&before.has_drawn_this_turn, &after.has_drawn_this_turn),
            last_round: changed(&before.last_round, &after.last_round),
        }
    }

    /// True when applying the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.players.is_none()
            && self.deck.is_none()
            && self.discard_pile.is_none()
            && self.hands.is_empty()
            && self.current_round.is_none()
            && self.round_status.is_none()
            && self.dealer_index.is_none()
            && self.current_turn.is_none()
            && self.has_drawn_this_turn.is_none()
            && self.last_round.is_none()
    }

    /// Merge the changed fields into `session`. The guard is not checked here.
    pub fn apply_to(&self, session: &mut GameSession) {
        if let Some(players) = &self.players {
            session.players = players.clone();
        }
        if let Some(deck) = &self.deck {
            session.deck = deck.clone();
        }
        if let Some(discard) = &self.discard_pile {
            session.discard_pile = discard.clone();
        }
        for (seat, hand) in &self.hands {
            if let Some(slot) = session.hands.get_mut(*seat) {
                *slot = hand.clone();
            }
        }
        if let Some(round) = self.current_round {
            session.current_round = round;
        }
        if let Some(status) = self.round_status {
            session.round_status = status;
        }
        if let Some(dealer) = self.dealer_index {
            session.dealer_index = dealer;
        }
        if let Some(turn) = &self.current_turn {
            session.current_turn = turn.clone();
        }
        if let Some(drawn) = self.has_drawn_this_turn {
            session.has_drawn_this_turn = drawn;
        }
        if let Some(last) = &self.last_round {
            session.last_round = last.clone();
        }
    }
}

/// Shared, subscribable session storage.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Register a new session. Fails with `SessionExists` if the id is taken.
    async fn create(&self, session: GameSession) -> Result<GameSession, DomainError>;

    async fn read(&self, id: SessionId) -> Result<GameSession, DomainError>;

    /// Receive every snapshot committed after this call.
    async fn subscribe(
        &self,
        id: SessionId,
    ) -> Result<broadcast::Receiver<Arc<GameSession>>, DomainError>;

    /// Check the guard, merge the patch, bump the version and publish.
    async fn write(&self, id: SessionId, patch: SessionPatch) -> Result<GameSession, DomainError>;

    async fn delete(&self, id: SessionId) -> Result<(), DomainError>;
}
