//! Player view of a session - what information is visible to one player.
//!
//! This module provides [`VisibleGameState`], everything a player can see at
//! a decision point: their own ordered hand, the size of everyone else's hand,
//! the pile sizes, the discard top, whose turn it is and the scores.

use serde::{Deserialize, Serialize};

use crate::domain::melds::{compute_hand_score, optimal_grouping, rump_discards, Grouping};
use crate::domain::rules::HAND_CAP;
use crate::domain::state::{GameSession, PlayerId, RoundStatus, Seat, TurnPhase};
use crate::domain::turns::DrawSource;
use crate::domain::Card;
use crate::errors::domain::DomainError;

/// Public information about one seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatInfo {
    pub id: PlayerId,
    pub name: String,
    pub avatar: String,
    pub score: u32,
    pub hand_size: usize,
}

/// Information visible to a player at a decision point.
///
/// This is the primary interface between the engine and AI players. It is
/// built from a full [`GameSession`] and leaves out every card the player is
/// not allowed to see.
///
/// # For AI Developers
///
/// When implementing [`crate::ai::AiPlayer`], you receive this struct in every
/// decision method.
///
/// ## Helper Methods
///
/// **Always use these** instead of re-implementing the rules:
///
/// - [`legal_draws()`](Self::legal_draws) - piles you may draw from right now
/// - [`rump_discards()`](Self::rump_discards) - discards that would win the round
/// - [`hand_score()`](Self::hand_score) - penalty if the round ended now
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleGameState {
    /// The viewing player.
    pub player: PlayerId,

    /// Your seat, which fixes your place in turn order.
    pub seat: Seat,

    pub round_status: RoundStatus,

    /// 0 before the first deal, then 1..=11.
    pub current_round: u8,

    pub dealer_index: Option<Seat>,

    /// Your hand in its current order. Melds only count among neighbours.
    pub hand: Vec<Card>,

    /// Every seat, in seating order, including your own.
    pub seats: Vec<SeatInfo>,

    /// Cards left in the draw pile. Their identities are hidden.
    pub deck_count: usize,

    /// Only the top of the discard pile is visible.
    pub discard_top: Option<Card>,

    pub current_turn: Option<PlayerId>,

    /// Your phase if you hold the turn, otherwise None.
    pub turn_phase: Option<TurnPhase>,
}

impl VisibleGameState {
    pub fn for_player(session: &GameSession, player: &PlayerId) -> Result<Self, DomainError> {
        let seat = session.require_seat(player)?;
        let seats = session
            .players
            .iter()
            .zip(&session.hands)
            .map(|(p, h)| SeatInfo {
                id: p.id.clone(),
                name: p.name.clone(),
                avatar: p.avatar.clone(),
                score: p.score,
                hand_size: h.len(),
            })
            .collect();
        let turn_phase = if session.current_turn.as_ref() == Some(player) {
            session.turn_phase()
        } else {
            None
        };

        Ok(Self {
            player: player.clone(),
            seat,
            round_status: session.round_status,
            current_round: session.current_round,
            dealer_index: session.dealer_index,
            hand: session.hands[seat].clone(),
            seats,
            deck_count: session.deck.len(),
            discard_top: session.discard_pile.last().copied(),
            current_turn: session.current_turn.clone(),
            turn_phase,
        })
    }

    pub fn is_my_turn(&self) -> bool {
        self.turn_phase.is_some()
    }

    /// Piles you may draw from right now; empty unless you are awaiting a draw.
    pub fn legal_draws(&self) -> Vec<DrawSource> {
        if self.turn_phase != Some(TurnPhase::AwaitingDraw) || self.hand.len() >= HAND_CAP {
            return Vec::new();
        }
        let mut sources = Vec::with_capacity(2);
        if self.deck_count > 0 {
            sources.push(DrawSource::Deck);
        }
        if self.discard_top.is_some() {
            sources.push(DrawSource::Discard);
        }
        sources
    }

    /// Hand indices whose discard completes a Rump.
    pub fn rump_discards(&self) -> Vec<usize> {
        rump_discards(&self.hand)
    }

    pub fn grouping(&self) -> Grouping {
        optimal_grouping(&self.hand)
    }

    /// Your penalty if the round ended now.
    pub fn hand_score(&self) -> u32 {
        compute_hand_score(&self.hand)
    }
}
