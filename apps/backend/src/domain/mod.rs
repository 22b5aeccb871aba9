//! Domain layer: pure game logic types and helpers.

pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod commands;
pub mod dealing;
pub mod melds;
pub mod player_view;
pub mod round_lifecycle;
pub mod turns;

pub mod game_transition;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod state;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;

// Re-exports for ergonomics
pub use cards_types::{Card, Rank, Suit};
pub use commands::{apply_command, Command};
pub use dealing::{build_deck, deal_round, shuffle};
pub use melds::{
    can_declare_with, compute_hand_score, is_rump_feasible, is_valid_meld, optimal_grouping,
    rump_discards, Grouping, Meld, MeldKind,
};
pub use player_view::VisibleGameState;
pub use seed_derivation::{derive_ai_seed, derive_dealing_seed};
pub use state::{
    GameSession, Player, PlayerId, RoundEndReason, RoundStatus, RoundSummary, Seat, SessionId,
    TurnPhase,
};
