//! Table constants for Rump.

use std::ops::RangeInclusive;

pub const DECK_SIZE: usize = 52;
pub const HAND_CAP: usize = 10;
pub const DEAL_SIZE: usize = 9;
pub const MIN_MELD_LEN: usize = 3;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;
pub const TOTAL_ROUNDS: u8 = 11;

/// Supported table sizes.
pub fn player_range() -> RangeInclusive<usize> {
    MIN_PLAYERS..=MAX_PLAYERS
}

/// Cards left in the deck right after dealing, or `None` for an unsupported table.
pub fn deck_after_deal(players: usize) -> Option<usize> {
    if !player_range().contains(&players) {
        return None;
    }
    Some(DECK_SIZE - players * DEAL_SIZE)
}
