use tracing::{debug, info};

use super::{GameFlowMutationResult, GameFlowService};
use crate::domain::commands::Command;
use crate::domain::game_transition::GameTransition;
use crate::domain::state::{GameSession, Player, PlayerId, RoundStatus, SessionId};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};

impl GameFlowService {
    /// Seat `roster` in a fresh session hosted by `host`.
    ///
    /// Without an explicit seed the game seed is drawn from entropy; every
    /// deal of the game is derived from it.
    pub async fn create_session(
        &self,
        host: PlayerId,
        roster: Vec<Player>,
        rng_seed: Option<u64>,
    ) -> Result<GameSession, AppError> {
        let seed = rng_seed.unwrap_or_else(rand::random);
        let session = GameSession::new(host, roster, seed)?;
        Ok(self.store.create(session).await?)
    }

    /// Deal the next round; the host only. Past the last round this moves the
    /// session to GameOver instead.
    pub async fn initialize_round(
        &self,
        session_id: SessionId,
        by: &PlayerId,
    ) -> Result<GameFlowMutationResult, AppError> {
        let result = self
            .submit(session_id, Command::InitializeRound { by: by.clone() })
            .await?;

        for transition in &result.transitions {
            match transition {
                GameTransition::RoundStarted { round_no } => info!(
                    session_id = %session_id,
                    round_no,
                    dealer = ?result.final_session.dealer_index,
                    "Round started"
                ),
                GameTransition::GameEnded { winner } => {
                    info!(session_id = %session_id, winner = ?winner, "Game over")
                }
                _ => {}
            }
        }
        Ok(result)
    }

    /// Close a finished game and drop it from the store.
    ///
    /// Any seated player may end it, but only once it is over. Returns the
    /// final snapshot.
    pub async fn end_session(
        &self,
        session_id: SessionId,
        by: &PlayerId,
    ) -> Result<GameSession, AppError> {
        let session = self.store.read(session_id).await?;
        session.require_seat(by)?;
        if session.round_status != RoundStatus::GameOver {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Session can only be ended once the game is over",
            )
            .into());
        }
        self.store.delete(session_id).await?;
        info!(session_id = %session_id, by = %by, "Session ended");
        Ok(session)
    }

    /// Tear down a session at any point; the host only.
    pub async fn abandon_session(
        &self,
        session_id: SessionId,
        by: &PlayerId,
    ) -> Result<(), AppError> {
        let session = self.store.read(session_id).await?;
        session.require_seat(by)?;
        if !session.is_host(by) {
            return Err(DomainError::validation(
                ValidationKind::NotHost,
                format!("Only the host may abandon session {session_id}"),
            )
            .into());
        }
        debug!(
            session_id = %session_id,
            round = session.current_round,
            status = ?session.round_status,
            "Abandoning session"
        );
        self.store.delete(session_id).await?;
        info!(session_id = %session_id, by = %by, "Session abandoned");
        Ok(())
    }
}
