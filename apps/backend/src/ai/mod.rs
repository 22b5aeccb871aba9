//! AI players - automated decisions made from a player's visible state.
//!
//! - [`AiPlayer`]: the decision trait
//! - [`RandomPlayer`]: uniformly random legal moves (seedable for tests)
//! - [`ArrangerPlayer`]: arranges melds and sheds costly cards
//! - [`registry`]: lookup by name for simulators and seat configs

mod arranger;
pub mod config;
mod random;
pub mod registry;
mod trait_def;

pub use arranger::{best_arrangement, moves_towards, ArrangerPlayer};
pub use config::AiConfig;
pub use random::RandomPlayer;
use serde_json::Value as JsonValue;
pub use trait_def::{AiError, AiPlayer, HandMove, TurnEndChoice};

/// Create an AI player from its registered name and optional seat config.
///
/// Returns None if `ai_type` is unrecognized.
pub fn create_ai(ai_type: &str, config: Option<&JsonValue>) -> Option<Box<dyn AiPlayer>> {
    let config = AiConfig::from_json(config);
    registry::by_name(ai_type).map(|factory| (factory.make)(config.seed()))
}
