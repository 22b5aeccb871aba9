//! Command reducer: the single entry point for mutating a session.

use serde::{Deserialize, Serialize};

use crate::domain::round_lifecycle::initialize_round;
use crate::domain::state::{GameSession, PlayerId};
use crate::domain::turns::{declare_rump, discard_card, draw, reorder_hand, DrawSource};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    InitializeRound { by: PlayerId },
    DrawFromDeck { player: PlayerId },
    DrawFromDiscard { player: PlayerId },
    Discard { player: PlayerId, index: usize },
    DeclareRump { player: PlayerId, discard_index: usize },
    ReorderHand { player: PlayerId, from: usize, to: usize },
}

impl Command {
    /// The player issuing the command.
    pub fn actor(&self) -> &PlayerId {
        match self {
            Command::InitializeRound { by } => by,
            Command::DrawFromDeck { player }
            | Command::DrawFromDiscard { player }
            | Command::Discard { player, .. }
            | Command::DeclareRump { player, .. }
            | Command::ReorderHand { player, .. } => player,
        }
    }

    /// Exclusive commands must be applied against the latest session version.
    ///
    /// Reordering touches only the actor's own hand and may interleave with
    /// other players' commands.
    pub fn is_exclusive(&self) -> bool {
        !matches!(self, Command::ReorderHand { .. })
    }

    /// Carries positions in the actor's hand, which only mean something
    /// against the hand the actor last saw.
    pub fn indexes_hand(&self) -> bool {
        matches!(
            self,
            Command::Discard { .. } | Command::DeclareRump { .. } | Command::ReorderHand { .. }
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::InitializeRound { .. } => "initialize_round",
            Command::DrawFromDeck { .. } => "draw_from_deck",
            Command::DrawFromDiscard { .. } => "draw_from_discard",
            Command::Discard { .. } => "discard",
            Command::DeclareRump { .. } => "declare_rump",
            Command::ReorderHand { .. } => "reorder_hand",
        }
    }
}

/// Apply `command` to a copy of `session`.
///
/// The input is never touched, so a rejected command is a no-op.
pub fn apply_command(session: &GameSession, command: &Command) -> Result<GameSession, DomainError> {
    let mut next = session.clone();
    match command {
        Command::InitializeRound { by } => {
            initialize_round(&mut next, by)?;
        }
        Command::DrawFromDeck { player } => {
            draw(&mut next, player, DrawSource::Deck)?;
        }
        Command::DrawFromDiscard { player } => {
            draw(&mut next, player, DrawSource::Discard)?;
        }
        Command::Discard { player, index } => {
            discard_card(&mut next, player, *index)?;
        }
        Command::DeclareRump {
            player,
            discard_index,
        } => {
            declare_rump(&mut next, player, *discard_index)?;
        }
        Command::ReorderHand { player, from, to } => {
            reorder_hand(&mut next, player, *from, *to)?;
        }
    }
    Ok(next)
}
