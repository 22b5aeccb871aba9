//! Round setup and teardown: dealing, dealer rotation, round end, game end.

use crate::domain::dealing::deal_round;
use crate::domain::rules::TOTAL_ROUNDS;
use crate::domain::scoring::apply_round_scoring;
use crate::domain::seed_derivation::derive_dealing_seed;
use crate::domain::state::{
    next_seat, round_start_seat, GameSession, PlayerId, RoundEndReason, RoundStatus,
    RoundSummary, Seat,
};
use crate::errors::domain::{DomainError, ValidationKind};

/// Result of a successful `initialize_round`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundInit {
    Dealt {
        round_no: u8,
        dealer: Seat,
        first_to_act: PlayerId,
    },
    /// The round limit was already reached; the session is now over.
    GameOver,
}

/// Deal the next round. Only the host may do this, between rounds.
pub fn initialize_round(session: &mut GameSession, by: &PlayerId) -> Result<RoundInit, DomainError> {
    session.require_seat(by)?;
    if !session.is_host(by) {
        return Err(DomainError::validation(
            ValidationKind::NotHost,
            format!("Only the host may start a round, not {by}"),
        ));
    }
    match session.round_status {
        RoundStatus::GameOver => {
            return Err(DomainError::validation(
                ValidationKind::GameOver,
                "The game is over",
            ))
        }
        RoundStatus::Started => {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                format!("Round {} is still in play", session.current_round),
            ))
        }
        RoundStatus::Waiting | RoundStatus::RoundEnded => {}
    }

    if session.current_round >= TOTAL_ROUNDS {
        session.round_status = RoundStatus::GameOver;
        session.current_turn = None;
        session.has_drawn_this_turn = false;
        return Ok(RoundInit::GameOver);
    }

    let round_no = session.current_round + 1;
    let players = session.player_count();
    let dealt = deal_round(players, derive_dealing_seed(session.rng_seed, round_no))?;
    let dealer = match session.dealer_index {
        None => 0,
        Some(prev) => next_seat(prev, players),
    };
    let first_to_act = session.players[round_start_seat(dealer, players)].id.clone();

    session.hands = dealt.hands;
    session.deck = dealt.deck;
    session.discard_pile.clear();
    session.dealer_index = Some(dealer);
    session.current_turn = Some(first_to_act.clone());
    session.has_drawn_this_turn = false;
    session.round_status = RoundStatus::Started;
    session.current_round = round_no;

    Ok(RoundInit::Dealt {
        round_no,
        dealer,
        first_to_act,
    })
}

/// Score every hand and close the round; the final round ends the game.
///
/// Hands stay on the table until the next deal so players can inspect them.
pub fn end_round(session: &mut GameSession, reason: RoundEndReason) -> RoundSummary {
    let summary = apply_round_scoring(session, reason);
    session.round_status = if session.current_round >= TOTAL_ROUNDS {
        RoundStatus::GameOver
    } else {
        RoundStatus::RoundEnded
    };
    session.current_turn = None;
    session.has_drawn_this_turn = false;
    session.last_round = Some(summary.clone());
    summary
}
