//! Shared types for the simulator.

use clap::ValueEnum;
use rump_backend::ai::{ArrangerPlayer, RandomPlayer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Detailed per-game JSON lines plus a CSV summary.
    Jsonl,
    /// CSV summary only.
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AiType {
    Arranger,
    Random,
}

impl AiType {
    /// Name in the backend's AI registry.
    pub fn name(self) -> &'static str {
        match self {
            AiType::Arranger => ArrangerPlayer::NAME,
            AiType::Random => RandomPlayer::NAME,
        }
    }
}
