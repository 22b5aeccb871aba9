//! Deterministic deck construction, shuffling and dealing.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::domain::rules::{self, DEAL_SIZE, DECK_SIZE};
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

/// Generate a full 52-card deck in standard order (C, D, H, S × A..K).
pub fn build_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// Fisher-Yates shuffle driven by a ChaCha20 stream seeded from `seed`.
///
/// The resulting permutation is a pure function of `seed`.
pub fn shuffle(deck: &mut [Card], seed: u64) {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    for i in (1..deck.len()).rev() {
        let j = rng.random_range(0..=i);
        deck.swap(i, j);
    }
}

/// Piles produced by dealing one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealtRound {
    /// One hand per seat, in seating order.
    pub hands: Vec<Vec<Card>>,
    /// Undealt cards; the top of the deck is the last element.
    pub deck: Vec<Card>,
}

/// Shuffle a fresh deck and deal `DEAL_SIZE` cards to each seat.
///
/// Cards come off the top of the deck one at a time in seating order. Nothing
/// is turned onto the discard pile; the first discard of the round starts it.
pub fn deal_round(player_count: usize, seed: u64) -> Result<DealtRound, DomainError> {
    if !rules::player_range().contains(&player_count) {
        return Err(DomainError::validation(
            ValidationKind::InvalidPlayerCount,
            format!("Player count must be 2..=4, got {player_count}"),
        ));
    }

    let mut deck = build_deck();
    shuffle(&mut deck, seed);

    let mut hands: Vec<Vec<Card>> = vec![Vec::with_capacity(DEAL_SIZE + 1); player_count];
    for _ in 0..DEAL_SIZE {
        for hand in hands.iter_mut() {
            let card = deck.pop().ok_or_else(|| {
                DomainError::validation_other("Deck ran out while dealing")
            })?;
            hand.push(card);
        }
    }

    Ok(DealtRound { hands, deck })
}
