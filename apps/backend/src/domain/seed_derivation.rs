//! RNG seed derivation utilities for deterministic game behavior.
//!
//! Derives unique-but-deterministic seeds for different contexts (dealing,
//! AI seats) from a session's base seed.

/// Derive a seed for dealing cards in a round.
///
/// # Arguments
///
/// * `game_seed` - Base RNG seed of the session
/// * `round_no` - Round number being dealt (1-11)
///
/// # Returns
///
/// Derived seed that is unique per (game, round) combination.
pub fn derive_dealing_seed(game_seed: u64, round_no: u8) -> u64 {
    game_seed
        .wrapping_add(u64::from(round_no).wrapping_mul(1_000_000))
        .wrapping_add(2) // Offset to distinguish from AI seeds
}

/// Derive a seed for an AI player in a given seat.
pub fn derive_ai_seed(game_seed: u64, seat: usize) -> u64 {
    game_seed
        .wrapping_add((seat as u64).wrapping_mul(100))
        .wrapping_add(1)
}
