// Proptest generators for domain types.
// These generators ensure unique cards so hands look like real deals.

use proptest::prelude::*;

use crate::domain::dealing::build_deck;
use crate::domain::{Card, Rank, Suit};

/// Generate a random Suit
pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Clubs),
        Just(Suit::Diamonds),
        Just(Suit::Hearts),
        Just(Suit::Spades),
    ]
}

/// Generate a random Rank
pub fn rank() -> impl Strategy<Value = Rank> {
    proptest::sample::select(Rank::ALL.to_vec())
}

/// Generate a vector of N unique cards efficiently
pub fn unique_cards(count: usize) -> impl Strategy<Value = Vec<Card>> {
    // Generate by creating a shuffled subset of all possible cards
    Just(()).prop_perturb(move |_, mut rng| {
        let mut all_cards = build_deck();
        for i in 0..count.min(all_cards.len()) {
            let j = rng.random_range(i..all_cards.len());
            all_cards.swap(i, j);
        }
        all_cards.truncate(count);
        all_cards
    })
}

/// Generate a hand of 0 to `max_count` unique cards
pub fn hand_up_to(max_count: usize) -> impl Strategy<Value = Vec<Card>> {
    (0..=max_count).prop_flat_map(unique_cards)
}

/// A run of `len` same-suit cards built from consecutive ranks starting at `start`.
///
/// Only Two..=Ten are used, so every generated sequence is a valid run.
pub fn run(len: usize) -> impl Strategy<Value = Vec<Card>> {
    (suit(), 1usize..=(10 - len.min(9))).prop_map(move |(suit, start)| {
        (start..start + len)
            .map(|i| Card::new(suit, Rank::ALL[i]))
            .collect()
    })
}

/// Three or four cards of one rank in random suit order.
pub fn set() -> impl Strategy<Value = Vec<Card>> {
    (rank(), 3usize..=4).prop_perturb(|(rank, len), mut rng| {
        let mut suits = Suit::ALL.to_vec();
        for i in 0..suits.len() {
            let j = rng.random_range(i..suits.len());
            suits.swap(i, j);
        }
        suits
            .into_iter()
            .take(len)
            .map(|suit| Card::new(suit, rank))
            .collect()
    })
}
