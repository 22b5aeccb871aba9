//! Meld detection and optimal grouping of an ordered hand.
//!
//! Melds are only recognised among contiguous cards, so the order a player
//! arranges their hand in matters. All functions here are pure; hands hold at
//! most `HAND_CAP` cards, so the cubic grouping search is cheap.

use serde::{Deserialize, Serialize};

use super::cards_logic::sum_score;
use super::cards_types::Card;
use super::rules::{HAND_CAP, MIN_MELD_LEN};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeldKind {
    /// Equal ranks.
    Set,
    /// Same suit, ascending consecutive values.
    Run,
}

/// A meld occupying `hand[start..end]`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meld {
    pub start: usize,
    pub end: usize,
    pub kind: MeldKind,
}

impl Meld {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Disjoint melds plus the indices left ungrouped, both in hand order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Grouping {
    pub melds: Vec<Meld>,
    pub leftover: Vec<usize>,
    /// Total score value cleared by `melds`.
    pub cleared: u32,
}

fn is_set(cards: &[Card]) -> bool {
    match cards.first() {
        Some(first) => cards.iter().all(|c| c.rank == first.rank),
        None => false,
    }
}

/// Ascending same-suit run where every card keeps one value throughout.
///
/// `possible` holds the values the current card can take given everything
/// before it; an Ace drops whichever of its values no longer fits.
fn is_run(cards: &[Card]) -> bool {
    let Some(first) = cards.first() else {
        return false;
    };
    if !cards.iter().all(|c| c.suit == first.suit) {
        return false;
    }
    let mut possible: Vec<u8> = first.meld_values().to_vec();
    for card in &cards[1..] {
        possible = card
            .meld_values()
            .iter()
            .copied()
            .filter(|v| possible.iter().any(|p| p + 1 == *v))
            .collect();
        if possible.is_empty() {
            return false;
        }
    }
    true
}

/// Classify `cards` as a meld, if it is one.
pub fn meld_kind(cards: &[Card]) -> Option<MeldKind> {
    if cards.len() < MIN_MELD_LEN {
        return None;
    }
    if is_set(cards) {
        Some(MeldKind::Set)
    } else if is_run(cards) {
        Some(MeldKind::Run)
    } else {
        None
    }
}

pub fn is_valid_meld(cards: &[Card]) -> bool {
    meld_kind(cards).is_some()
}

#[derive(Debug, Clone, Copy)]
enum Choice {
    Skip,
    Meld(usize, MeldKind),
}

/// Best grouping of `hand` by dynamic programming over suffixes.
///
/// `best[i]` is the most score value that can be cleared from `hand[i..]`.
/// At each index the longest meld starting there wins ties, then shorter
/// melds, then leaving the card ungrouped.
pub fn optimal_grouping(hand: &[Card]) -> Grouping {
    let n = hand.len();
    let mut best = vec![0u32; n + 1];
    let mut choice = vec![Choice::Skip; n];

    for i in (0..n).rev() {
        let mut top: Option<(u32, Choice)> = None;
        for j in (i + MIN_MELD_LEN..=n).rev() {
            let Some(kind) = meld_kind(&hand[i..j]) else {
                continue;
            };
            let value = sum_score(&hand[i..j]) + best[j];
            match top {
                Some((v, _)) if v >= value => {}
                _ => top = Some((value, Choice::Meld(j, kind))),
            }
        }
        let skip = best[i + 1];
        let (value, picked) = match top {
            Some((v, c)) if v >= skip => (v, c),
            _ => (skip, Choice::Skip),
        };
        best[i] = value;
        choice[i] = picked;
    }

    let mut grouping = Grouping {
        cleared: best[0],
        ..Grouping::default()
    };
    let mut i = 0;
    while i < n {
        match choice[i] {
            Choice::Skip => {
                grouping.leftover.push(i);
                i += 1;
            }
            Choice::Meld(end, kind) => {
                grouping.melds.push(Meld {
                    start: i,
                    end,
                    kind,
                });
                i = end;
            }
        }
    }
    grouping
}

/// Penalty the hand scores if the round ended now: the ungrouped value.
pub fn compute_hand_score(hand: &[Card]) -> u32 {
    sum_score(hand) - optimal_grouping(hand).cleared
}

/// Would discarding `hand[discard_index]` leave a fully grouped remainder?
pub fn can_declare_with(hand: &[Card], discard_index: usize) -> bool {
    if discard_index >= hand.len() {
        return false;
    }
    let mut rest = hand.to_vec();
    rest.remove(discard_index);
    compute_hand_score(&rest) == 0
}

/// Every index whose discard completes a Rump, ascending.
pub fn rump_discards(hand: &[Card]) -> Vec<usize> {
    if hand.len() != HAND_CAP {
        return Vec::new();
    }
    (0..hand.len())
        .filter(|&k| can_declare_with(hand, k))
        .collect()
}

/// A full hand in which some single discard leaves only melds.
pub fn is_rump_feasible(hand: &[Card]) -> bool {
    hand.len() == HAND_CAP && (0..hand.len()).any(|k| can_declare_with(hand, k))
}
