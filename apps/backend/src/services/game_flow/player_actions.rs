use tracing::info;

use super::{GameFlowMutationResult, GameFlowService};
use crate::domain::commands::Command;
use crate::domain::game_transition::GameTransition;
use crate::domain::state::{PlayerId, SessionId};
use crate::error::AppError;

impl GameFlowService {
    pub async fn draw_from_deck(
        &self,
        session_id: SessionId,
        player: &PlayerId,
    ) -> Result<GameFlowMutationResult, AppError> {
        self.submit(
            session_id,
            Command::DrawFromDeck {
                player: player.clone(),
            },
        )
        .await
    }

    pub async fn draw_from_discard(
        &self,
        session_id: SessionId,
        player: &PlayerId,
    ) -> Result<GameFlowMutationResult, AppError> {
        self.submit(
            session_id,
            Command::DrawFromDiscard {
                player: player.clone(),
            },
        )
        .await
    }

    /// Discard the card at `index`, ending the turn (or the round, if the
    /// deck ran dry).
    pub async fn discard(
        &self,
        session_id: SessionId,
        player: &PlayerId,
        index: usize,
    ) -> Result<GameFlowMutationResult, AppError> {
        let result = self
            .submit(
                session_id,
                Command::Discard {
                    player: player.clone(),
                    index,
                },
            )
            .await?;
        log_round_end(session_id, &result);
        Ok(result)
    }

    pub async fn declare_rump(
        &self,
        session_id: SessionId,
        player: &PlayerId,
        discard_index: usize,
    ) -> Result<GameFlowMutationResult, AppError> {
        let result = self
            .submit(
                session_id,
                Command::DeclareRump {
                    player: player.clone(),
                    discard_index,
                },
            )
            .await?;
        info!(session_id = %session_id, player = %player, "Rump declared");
        log_round_end(session_id, &result);
        Ok(result)
    }

    /// Move one card within the player's own hand. Allowed at any time while
    /// the player is seated; never conflicts with other players' moves.
    pub async fn reorder_hand(
        &self,
        session_id: SessionId,
        player: &PlayerId,
        from: usize,
        to: usize,
    ) -> Result<GameFlowMutationResult, AppError> {
        self.submit(
            session_id,
            Command::ReorderHand {
                player: player.clone(),
                from,
                to,
            },
        )
        .await
    }
}

fn log_round_end(session_id: SessionId, result: &GameFlowMutationResult) {
    for transition in &result.transitions {
        match transition {
            GameTransition::RoundEnded { round_no } => {
                let totals = result.final_session.scores();
                info!(session_id = %session_id, round_no, ?totals, "Round ended");
            }
            GameTransition::GameEnded { winner } => {
                info!(session_id = %session_id, winner = ?winner, "Game over");
            }
            _ => {}
        }
    }
}
