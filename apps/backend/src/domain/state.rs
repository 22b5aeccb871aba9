use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::rules::{self, DECK_SIZE};
use crate::domain::Card;
use crate::errors::domain::{DomainError, ValidationKind};

/// Position at the table, 0-based in seating order.
pub type Seat = usize;

/// Opaque player identifier, unique within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Opaque avatar reference, passed through untouched.
    pub avatar: String,
    /// Cumulative penalty points; lower is better.
    pub score: u32,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            id: PlayerId::new(id),
            name: name.into(),
            avatar: avatar.into(),
            score: 0,
        }
    }
}

/// Overall session progression.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundStatus {
    /// Seated, no round dealt yet.
    Waiting,
    /// A round is in play; exactly one player holds the turn.
    Started,
    /// Round scored; waiting for the host to deal the next one.
    RoundEnded,
    /// Round 11 scored (or the round limit was hit).
    GameOver,
}

/// Where the turn holder is within their turn.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TurnPhase {
    AwaitingDraw,
    AwaitingDiscardOrRump,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundEndReason {
    /// The last deck card was drawn and the turn ended with a discard.
    DeckExhausted,
    /// A player went out with a fully grouped hand.
    Rump { declarer: PlayerId },
}

/// Outcome of the most recently scored round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round_no: u8,
    pub reason: RoundEndReason,
    /// Penalty added per seat this round.
    pub hand_scores: Vec<u32>,
    /// Cumulative scores per seat after this round.
    pub totals_after: Vec<u32>,
}

/// The authoritative shared aggregate for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub id: SessionId,
    /// Bumped by the store on every committed write.
    pub version: u64,
    pub host: PlayerId,
    /// Seating order.
    pub players: Vec<Player>,
    /// Draw pile; the top card is the last element.
    pub deck: Vec<Card>,
    /// The top card is the last element.
    pub discard_pile: Vec<Card>,
    /// One ordered hand per seat.
    pub hands: Vec<Vec<Card>>,
    /// 0 before the first deal, then 1..=11.
    pub current_round: u8,
    pub round_status: RoundStatus,
    /// None until the first round is dealt.
    pub dealer_index: Option<Seat>,
    /// Some(player) iff `round_status == Started`.
    pub current_turn: Option<PlayerId>,
    pub has_drawn_this_turn: bool,
    pub rng_seed: u64,
    pub last_round: Option<RoundSummary>,
}

impl GameSession {
    /// Seat a roster of 2-4 distinct players. The host must be one of them.
    pub fn new(host: PlayerId, roster: Vec<Player>, rng_seed: u64) -> Result<Self, DomainError> {
        if !rules::player_range().contains(&roster.len()) {
            return Err(DomainError::validation(
                ValidationKind::InvalidPlayerCount,
                format!("A session needs 2..=4 players, got {}", roster.len()),
            ));
        }
        let mut seen = HashSet::with_capacity(roster.len());
        for p in &roster {
            if !seen.insert(&p.id) {
                return Err(DomainError::validation(
                    ValidationKind::DuplicatePlayer,
                    format!("Player {} is seated twice", p.id),
                ));
            }
        }
        if !seen.contains(&host) {
            return Err(DomainError::validation(
                ValidationKind::UnknownPlayer,
                format!("Host {host} is not seated"),
            ));
        }

        let seats = roster.len();
        Ok(Self {
            id: SessionId::new(),
            version: 0,
            host,
            players: roster,
            deck: Vec::new(),
            discard_pile: Vec::new(),
            hands: vec![Vec::new(); seats],
            current_round: 0,
            round_status: RoundStatus::Waiting,
            dealer_index: None,
            current_turn: None,
            has_drawn_this_turn: false,
            rng_seed,
            last_round: None,
        })
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn seat_of(&self, player: &PlayerId) -> Option<Seat> {
        self.players.iter().position(|p| &p.id == player)
    }

    /// Seat of `player`, rejecting ids that are not at the table.
    pub fn require_seat(&self, player: &PlayerId) -> Result<Seat, DomainError> {
        self.seat_of(player).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::UnknownPlayer,
                format!("Player {player} is not seated in this session"),
            )
        })
    }

    pub fn hand_of(&self, player: &PlayerId) -> Option<&[Card]> {
        self.seat_of(player)
            .and_then(|seat| self.hands.get(seat))
            .map(Vec::as_slice)
    }

    pub fn is_host(&self, player: &PlayerId) -> bool {
        &self.host == player
    }

    /// None whenever no round is being played.
    pub fn turn_phase(&self) -> Option<TurnPhase> {
        if self.round_status != RoundStatus::Started || self.current_turn.is_none() {
            return None;
        }
        Some(if self.has_drawn_this_turn {
            TurnPhase::AwaitingDiscardOrRump
        } else {
            TurnPhase::AwaitingDraw
        })
    }

    /// Cards across deck, discard pile and every hand.
    pub fn card_count(&self) -> usize {
        self.deck.len() + self.discard_pile.len() + self.hands.iter().map(Vec::len).sum::<usize>()
    }

    /// Every card is accounted for once a round has been dealt.
    pub fn cards_conserved(&self) -> bool {
        self.current_round == 0 || self.card_count() == DECK_SIZE
    }

    pub fn scores(&self) -> Vec<u32> {
        self.players.iter().map(|p| p.score).collect()
    }
}

/// Seat / turn math helpers for a table of `players` seats.
///
/// Seating order is the rotation direction.
#[inline]
pub fn seat_offset(seat: Seat, delta: isize, players: usize) -> Seat {
    let n = players as isize;
    (seat as isize + delta).rem_euclid(n) as Seat
}

/// Next seat in rotation, wrapping the last seat back to 0.
#[inline]
pub fn next_seat(seat: Seat, players: usize) -> Seat {
    seat_offset(seat, 1, players)
}

/// First actor of a round: the seat after the dealer.
#[inline]
pub fn round_start_seat(dealer: Seat, players: usize) -> Seat {
    next_seat(dealer, players)
}

/// Dealer position for a 1-based round number; round 1 is dealt by seat 0.
#[inline]
pub fn dealer_for_round(round_no: u8, players: usize) -> Seat {
    debug_assert!(round_no >= 1, "round_no is 1-based and must be >= 1");
    seat_offset(0, isize::from(round_no.saturating_sub(1)), players)
}
