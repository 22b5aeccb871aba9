// apps/backend/src/domain/game_transition.rs

use crate::domain::scoring::winner;
use crate::domain::state::{GameSession, PlayerId, RoundStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameTransition {
    /// Edge-triggered: a new round was dealt.
    RoundStarted { round_no: u8 },

    /// Edge-triggered: the turn became a specific player.
    TurnBecame { player: PlayerId },

    /// Edge-triggered: a round was scored.
    RoundEnded { round_no: u8 },

    /// Edge-triggered: the session moved to GameOver.
    GameEnded { winner: Option<PlayerId> },
}

/// Derive transitions from before/after snapshots of a session.
pub fn derive_game_transitions(before: &GameSession, after: &GameSession) -> Vec<GameTransition> {
    let mut transitions = Vec::new();

    // 1. Round start (new round number with play under way)
    if after.round_status == RoundStatus::Started && after.current_round != before.current_round {
        transitions.push(GameTransition::RoundStarted {
            round_no: after.current_round,
        });
    }

    // 2. Turn change
    if let Some(player) = &after.current_turn {
        if before.current_turn.as_ref() != Some(player) {
            transitions.push(GameTransition::TurnBecame {
                player: player.clone(),
            });
        }
    }

    // 3. Round end (Started -> RoundEnded/GameOver)
    if before.round_status == RoundStatus::Started && after.round_status != RoundStatus::Started {
        transitions.push(GameTransition::RoundEnded {
            round_no: after.current_round,
        });
    }

    // 4. Game end (!GameOver -> GameOver)
    if before.round_status != RoundStatus::GameOver && after.round_status == RoundStatus::GameOver {
        transitions.push(GameTransition::GameEnded {
            winner: winner(after).map(|p| p.id.clone()),
        });
    }

    transitions
}
