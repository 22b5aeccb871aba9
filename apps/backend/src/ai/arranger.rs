//! Meld-seeking AI.
//!
//! Tries a handful of candidate orderings (suit runs with the Ace low or high,
//! rank sets, and mixes of both), keeps the one with the lowest hand score and
//! emits the reorders that get there. Takes the discard pile's top card only
//! when keeping it (and shedding something else) strictly lowers the hand
//! score, so a round without deck draws cannot go on forever. Discards
//! whatever hurts least to keep.

use super::trait_def::{AiError, AiPlayer, HandMove, TurnEndChoice};
use crate::domain::melds::{compute_hand_score, optimal_grouping, rump_discards};
use crate::domain::player_view::VisibleGameState;
use crate::domain::state::TurnPhase;
use crate::domain::turns::DrawSource;
use crate::domain::Card;

fn high_value(card: &Card) -> u8 {
    card.meld_values().iter().copied().max().unwrap_or(0)
}

/// Melds first (in their current order), then the leftovers.
fn melds_then_rest(order: &[Card], rest_key: fn(&Card) -> (u8, u8)) -> Vec<Card> {
    let grouping = optimal_grouping(order);
    let mut out: Vec<Card> = grouping
        .melds
        .iter()
        .flat_map(|m| order[m.start..m.end].iter().copied())
        .collect();
    let mut rest: Vec<Card> = grouping.leftover.iter().map(|&i| order[i]).collect();
    rest.sort_by_key(rest_key);
    out.extend(rest);
    out
}

fn by_suit_low(c: &Card) -> (u8, u8) {
    (c.suit as u8, c.rank as u8)
}

fn by_suit_high(c: &Card) -> (u8, u8) {
    (c.suit as u8, high_value(c))
}

fn by_rank(c: &Card) -> (u8, u8) {
    (c.rank as u8, c.suit as u8)
}

/// Lowest-scoring ordering among the candidates; the current order wins ties.
pub fn best_arrangement(hand: &[Card]) -> Vec<Card> {
    let sorted = |key: fn(&Card) -> (u8, u8)| {
        let mut v = hand.to_vec();
        v.sort_by_key(key);
        v
    };
    let suit_low = sorted(by_suit_low);
    let suit_high = sorted(by_suit_high);
    let rank = sorted(by_rank);

    let candidates = [
        melds_then_rest(&suit_low, by_rank),
        melds_then_rest(&suit_high, by_rank),
        melds_then_rest(&rank, by_suit_low),
        melds_then_rest(&rank, by_suit_high),
        suit_low,
        suit_high,
        rank,
    ];

    let mut best = hand.to_vec();
    let mut best_score = compute_hand_score(hand);
    for candidate in candidates {
        let score = compute_hand_score(&candidate);
        if score < best_score {
            best_score = score;
            best = candidate;
        }
    }
    best
}

/// Reorders turning `current` into `target` (same cards, different order).
pub fn moves_towards(current: &[Card], target: &[Card]) -> Vec<HandMove> {
    let mut working = current.to_vec();
    let mut moves = Vec::new();
    for (to, card) in target.iter().enumerate() {
        let Some(from) = working.iter().skip(to).position(|c| c == card).map(|p| p + to) else {
            continue;
        };
        if from != to {
            let moved = working.remove(from);
            working.insert(to, moved);
            moves.push(HandMove { from, to });
        }
    }
    moves
}

/// AI that arranges its hand into melds and sheds its costliest loose cards.
#[derive(Debug, Default)]
pub struct ArrangerPlayer;

impl ArrangerPlayer {
    pub const NAME: &'static str = "arranger";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new() -> Self {
        Self
    }
}

impl AiPlayer for ArrangerPlayer {
    fn choose_draw(&self, state: &VisibleGameState) -> Result<DrawSource, AiError> {
        let legal = state.legal_draws();
        let (Some(top), true) = (state.discard_top, legal.contains(&DrawSource::Discard)) else {
            return legal
                .first()
                .copied()
                .ok_or_else(|| AiError::InvalidMove("No legal draws available".into()));
        };
        if !legal.contains(&DrawSource::Deck) {
            return Ok(DrawSource::Discard);
        }

        // Replay the rest of the turn with the top card in hand.
        let mut with_top = state.hand.clone();
        with_top.push(top);
        let arranged = best_arrangement(&with_top);
        if !rump_discards(&arranged).is_empty() {
            return Ok(DrawSource::Discard);
        }
        let take = cheapest_discard(&arranged).is_some_and(|(index, kept_score)| {
            arranged[index] != top && kept_score < compute_hand_score(&state.hand)
        });

        Ok(if take {
            DrawSource::Discard
        } else {
            DrawSource::Deck
        })
    }

    fn arrange_hand(&self, state: &VisibleGameState) -> Result<Vec<HandMove>, AiError> {
        Ok(moves_towards(&state.hand, &best_arrangement(&state.hand)))
    }

    fn choose_turn_end(&self, state: &VisibleGameState) -> Result<TurnEndChoice, AiError> {
        if state.turn_phase != Some(TurnPhase::AwaitingDiscardOrRump) || state.hand.is_empty() {
            return Err(AiError::InvalidMove("Nothing to discard yet".into()));
        }
        if let Some(&index) = state.rump_discards().first() {
            return Ok(TurnEndChoice::DeclareRump(index));
        }

        cheapest_discard(&state.hand)
            .map(|(index, _)| TurnEndChoice::Discard(index))
            .ok_or_else(|| AiError::Internal("No discard candidate".into()))
    }
}

/// Index whose removal leaves the lowest score, with that score. Among
/// equals the highest-valued card goes.
fn cheapest_discard(hand: &[Card]) -> Option<(usize, u32)> {
    let mut best: Option<(u32, u32, usize)> = None;
    for (index, card) in hand.iter().enumerate() {
        let mut rest = hand.to_vec();
        rest.remove(index);
        let candidate = (compute_hand_score(&rest), u32::MAX - card.score_value(), index);
        match best {
            Some(current) if current <= candidate => {}
            _ => best = Some(candidate),
        }
    }
    best.map(|(score, _, index)| (index, score))
}
