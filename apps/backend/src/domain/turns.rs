//! Per-turn actions: draw, discard, declare Rump, reorder.
//!
//! Every action validates first and mutates only once all checks pass, so a
//! rejected action leaves the session untouched.

use serde::{Deserialize, Serialize};

use crate::domain::melds::can_declare_with;
use crate::domain::round_lifecycle::end_round;
use crate::domain::rules::HAND_CAP;
use crate::domain::state::{
    next_seat, GameSession, PlayerId, RoundEndReason, RoundStatus, RoundSummary, Seat,
};
use crate::domain::Card;
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DrawSource {
    Deck,
    Discard,
}

/// What a turn-ending action changed beyond the acting hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnEnd {
    /// Play continues with this player.
    Passed { next: PlayerId },
    /// The round was scored.
    RoundEnded(RoundSummary),
}

/// Seat of `player` if they may act right now.
fn require_turn_holder(session: &GameSession, player: &PlayerId) -> Result<Seat, DomainError> {
    let seat = session.require_seat(player)?;
    if session.round_status != RoundStatus::Started {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("No round in play (status {:?})", session.round_status),
        ));
    }
    if session.current_turn.as_ref() != Some(player) {
        return Err(DomainError::validation(
            ValidationKind::NotYourTurn,
            format!("It is not {player}'s turn"),
        ));
    }
    Ok(seat)
}

fn require_index(hand: &[Card], index: usize) -> Result<(), DomainError> {
    if index >= hand.len() {
        return Err(DomainError::validation(
            ValidationKind::InvalidIndex,
            format!("Index {index} out of range for hand of {}", hand.len()),
        ));
    }
    Ok(())
}

fn require_drawn(session: &GameSession) -> Result<(), DomainError> {
    if !session.has_drawn_this_turn {
        return Err(DomainError::validation(
            ValidationKind::MustDrawFirst,
            "Draw a card before ending the turn",
        ));
    }
    Ok(())
}

/// Move the top card of `source` to the end of the turn holder's hand.
pub fn draw(
    session: &mut GameSession,
    player: &PlayerId,
    source: DrawSource,
) -> Result<Card, DomainError> {
    let seat = require_turn_holder(session, player)?;
    if session.has_drawn_this_turn {
        return Err(DomainError::validation(
            ValidationKind::AlreadyDrawn,
            "Already drew this turn",
        ));
    }
    let pile = match source {
        DrawSource::Deck => &session.deck,
        DrawSource::Discard => &session.discard_pile,
    };
    if pile.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::SourceEmpty,
            format!("{source:?} pile is empty"),
        ));
    }
    if session.hands[seat].len() >= HAND_CAP {
        return Err(DomainError::validation(
            ValidationKind::HandFull,
            format!("Hand already holds {HAND_CAP} cards"),
        ));
    }

    let pile = match source {
        DrawSource::Deck => &mut session.deck,
        DrawSource::Discard => &mut session.discard_pile,
    };
    let card = pile.pop().ok_or_else(|| {
        DomainError::validation(ValidationKind::SourceEmpty, "pile emptied during draw")
    })?;
    session.hands[seat].push(card);
    session.has_drawn_this_turn = true;
    Ok(card)
}

pub fn draw_from_deck(session: &mut GameSession, player: &PlayerId) -> Result<Card, DomainError> {
    draw(session, player, DrawSource::Deck)
}

pub fn draw_from_discard(
    session: &mut GameSession,
    player: &PlayerId,
) -> Result<Card, DomainError> {
    draw(session, player, DrawSource::Discard)
}

/// Discard `hand[index]` and pass the turn. An empty deck ends the round.
pub fn discard_card(
    session: &mut GameSession,
    player: &PlayerId,
    index: usize,
) -> Result<TurnEnd, DomainError> {
    let seat = require_turn_holder(session, player)?;
    require_drawn(session)?;
    require_index(&session.hands[seat], index)?;

    let card = session.hands[seat].remove(index);
    session.discard_pile.push(card);
    session.has_drawn_this_turn = false;

    if session.deck.is_empty() {
        return Ok(TurnEnd::RoundEnded(end_round(
            session,
            RoundEndReason::DeckExhausted,
        )));
    }

    let next = session.players[next_seat(seat, session.player_count())]
        .id
        .clone();
    session.current_turn = Some(next.clone());
    Ok(TurnEnd::Passed { next })
}

/// Go out: discard `hand[discard_index]` and end the round if the rest is fully grouped.
pub fn declare_rump(
    session: &mut GameSession,
    player: &PlayerId,
    discard_index: usize,
) -> Result<RoundSummary, DomainError> {
    let seat = require_turn_holder(session, player)?;
    require_drawn(session)?;
    let hand = &session.hands[seat];
    require_index(hand, discard_index)?;
    if !can_declare_with(hand, discard_index) {
        return Err(DomainError::validation(
            ValidationKind::InvalidRumpAttempt,
            format!("Discarding index {discard_index} leaves ungrouped cards"),
        ));
    }

    let card = session.hands[seat].remove(discard_index);
    session.discard_pile.push(card);
    session.has_drawn_this_turn = false;
    Ok(end_round(
        session,
        RoundEndReason::Rump {
            declarer: player.clone(),
        },
    ))
}

/// Move `hand[from]` so that it ends up at `hand[to]`.
///
/// Not a turn action: the owner may rearrange whenever they hold cards.
pub fn reorder_hand(
    session: &mut GameSession,
    player: &PlayerId,
    from: usize,
    to: usize,
) -> Result<(), DomainError> {
    let seat = session.require_seat(player)?;
    let hand = &mut session.hands[seat];
    require_index(hand, from)?;
    require_index(hand, to)?;
    let card = hand.remove(from);
    hand.insert(to, card);
    Ok(())
}
