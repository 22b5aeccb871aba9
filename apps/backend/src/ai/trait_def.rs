//! AI player trait definition.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::commands::Command;
use crate::domain::player_view::VisibleGameState;
use crate::domain::state::PlayerId;
use crate::domain::turns::DrawSource;
use crate::error::AppError;

/// Errors that can occur during AI decision-making.
#[derive(Debug)]
pub enum AiError {
    /// AI encountered an internal error
    Internal(String),
    /// AI was asked for a decision it has no legal option for
    InvalidMove(String),
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiError::Internal(msg) => write!(f, "AI internal error: {msg}"),
            AiError::InvalidMove(msg) => write!(f, "AI invalid move: {msg}"),
        }
    }
}

impl std::error::Error for AiError {}

impl From<AiError> for AppError {
    fn from(err: AiError) -> Self {
        AppError::internal(format!("AI error: {err}"))
    }
}

/// One card moved within the player's own hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandMove {
    pub from: usize,
    pub to: usize,
}

impl HandMove {
    pub fn into_command(self, player: PlayerId) -> Command {
        Command::ReorderHand {
            player,
            from: self.from,
            to: self.to,
        }
    }
}

/// How the AI finishes its turn once it has drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEndChoice {
    Discard(usize),
    DeclareRump(usize),
}

impl TurnEndChoice {
    pub fn into_command(self, player: PlayerId) -> Command {
        match self {
            TurnEndChoice::Discard(index) => Command::Discard { player, index },
            TurnEndChoice::DeclareRump(discard_index) => Command::DeclareRump {
                player,
                discard_index,
            },
        }
    }
}

/// Trait for AI players.
///
/// Implementations receive the state visible to one player and must choose a
/// legal action. A turn is: `choose_draw`, then `arrange_hand` (applied as
/// reorders), then `choose_turn_end` on the re-read view.
pub trait AiPlayer: Send + Sync {
    /// Pick a pile. The AI should query `state.legal_draws()`.
    fn choose_draw(&self, state: &VisibleGameState) -> Result<DrawSource, AiError>;

    /// Reorder moves to apply, in sequence, before ending the turn.
    fn arrange_hand(&self, _state: &VisibleGameState) -> Result<Vec<HandMove>, AiError> {
        Ok(Vec::new())
    }

    /// Discard a card or go out. `state.rump_discards()` lists the winning discards.
    fn choose_turn_end(&self, state: &VisibleGameState) -> Result<TurnEndChoice, AiError>;
}
