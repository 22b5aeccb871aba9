use tracing::{debug, warn};

use crate::domain::commands::{apply_command, Command};
use crate::domain::game_transition::{derive_game_transitions, GameTransition};
use crate::domain::state::{GameSession, SessionId};
use crate::domain::Card;
use crate::errors::ErrorCode;
use crate::repos::sessions::{SessionPatch, WriteGuard};
use crate::services::game_flow::GameFlowService;
use crate::AppError;

#[derive(Debug)]
pub struct GameFlowMutationResult {
    pub final_session: GameSession,
    pub old_version: u64,
    pub transitions: Vec<GameTransition>,
}

impl GameFlowMutationResult {
    pub fn final_version(&self) -> u64 {
        self.final_session.version
    }
}

/// Reordering only needs its own hand to be as it was read.
fn guard_for(before: &GameSession, command: &Command) -> WriteGuard {
    match command {
        Command::ReorderHand { player, .. } => match before.seat_of(player) {
            Some(seat) => WriteGuard::HandUnchanged {
                seat,
                cards: before.hands[seat].clone(),
            },
            None => WriteGuard::Version(before.version),
        },
        _ => WriteGuard::Version(before.version),
    }
}

impl GameFlowService {
    /// Apply `command` against the snapshot the caller last saw.
    ///
    /// Exclusive commands fail with `STALE_SNAPSHOT` if the session has moved
    /// past `expected_version`; nothing is retried.
    pub async fn execute(
        &self,
        session_id: SessionId,
        expected_version: u64,
        command: Command,
    ) -> Result<GameFlowMutationResult, AppError> {
        let before = self.store.read(session_id).await?;

        if command.is_exclusive() && before.version != expected_version {
            return Err(AppError::conflict(
                ErrorCode::StaleSnapshot,
                format!(
                    "Session version mismatch: expected {}, but session has version {}",
                    expected_version, before.version
                ),
            ));
        }

        self.run_mutation(session_id, before, &command).await
    }

    /// Apply `command` against the latest snapshot, re-reading and re-applying
    /// on retryable conflicts up to `commit_retries` extra times.
    ///
    /// Commands that name hand positions are pinned to the actor's hand as
    /// first read: if a retry finds that hand changed, the positions no longer
    /// point at the cards the caller chose and `HAND_CHANGED` is returned.
    pub async fn submit(
        &self,
        session_id: SessionId,
        command: Command,
    ) -> Result<GameFlowMutationResult, AppError> {
        let mut pinned_hand: Option<Vec<Card>> = None;
        let mut attempt = 0;
        loop {
            let before = self.store.read(session_id).await?;
            if command.indexes_hand() {
                if let Some(seat) = before.seat_of(command.actor()) {
                    let hand = &before.hands[seat];
                    match &pinned_hand {
                        None => pinned_hand = Some(hand.clone()),
                        Some(seen) if seen != hand => {
                            return Err(AppError::conflict(
                                ErrorCode::HandChanged,
                                format!(
                                    "Hand of {} changed before {} could be applied",
                                    command.actor(),
                                    command.name()
                                ),
                            ));
                        }
                        Some(_) => {}
                    }
                }
            }

            match self.run_mutation(session_id, before, &command).await {
                Err(err) if err.is_retryable() && attempt < self.config.commit_retries => {
                    attempt += 1;
                    warn!(
                        session_id = %session_id,
                        command = command.name(),
                        attempt,
                        error = %err,
                        "Commit conflict, retrying"
                    );
                    tokio::task::yield_now().await;
                }
                other => return other,
            }
        }
    }

    async fn run_mutation(
        &self,
        session_id: SessionId,
        before: GameSession,
        command: &Command,
    ) -> Result<GameFlowMutationResult, AppError> {
        let old_version = before.version;
        debug!(
            session_id = %session_id,
            version = old_version,
            command = command.name(),
            actor = %command.actor(),
            "Applying command"
        );

        let after = apply_command(&before, command)?;
        let patch = SessionPatch::between(&before, &after, guard_for(&before, command));

        // Accepted but changed nothing (e.g. a reorder onto the same index).
        if patch.is_empty() {
            return Ok(GameFlowMutationResult {
                final_session: before,
                old_version,
                transitions: Vec::new(),
            });
        }

        let final_session = self.store.write(session_id, patch).await?;
        let transitions = derive_game_transitions(&before, &after);

        Ok(GameFlowMutationResult {
            final_session,
            old_version,
            transitions,
        })
    }
}
