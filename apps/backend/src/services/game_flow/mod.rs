//! Game flow orchestration service - bridges the pure reducer with the session store.
//!
//! Every mutation is read → reduce → guarded write. Fine-grained wrappers for
//! each player action live in `player_actions`, session and round lifecycle
//! in `round_lifecycle`.

mod mutation;
mod player_actions;
mod round_lifecycle;

use std::sync::Arc;

use futures_util::{Stream, StreamExt};
use tokio_stream::wrappers::BroadcastStream;
use tracing::warn;

use crate::config::EngineConfig;
use crate::domain::player_view::VisibleGameState;
use crate::domain::state::{GameSession, PlayerId, SessionId};
use crate::error::AppError;
use crate::repos::sessions::SessionStore;

pub use mutation::GameFlowMutationResult;

/// Game flow service - cheap to clone, shares one store.
#[derive(Clone)]
pub struct GameFlowService {
    store: Arc<dyn SessionStore>,
    config: EngineConfig,
}

impl GameFlowService {
    pub fn new(store: Arc<dyn SessionStore>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub async fn session(&self, id: SessionId) -> Result<GameSession, AppError> {
        Ok(self.store.read(id).await?)
    }

    /// What `player` may see of the current session.
    pub async fn player_view(
        &self,
        id: SessionId,
        player: &PlayerId,
    ) -> Result<VisibleGameState, AppError> {
        let session = self.store.read(id).await?;
        Ok(VisibleGameState::for_player(&session, player)?)
    }

    /// Stream of committed snapshots. Lagged receivers skip ahead to the
    /// newest snapshot; the stream ends when the session is deleted.
    pub async fn watch(
        &self,
        id: SessionId,
    ) -> Result<impl Stream<Item = Arc<GameSession>> + Send + 'static, AppError> {
        let rx = self.store.subscribe(id).await?;
        Ok(BroadcastStream::new(rx).filter_map(move |item| async move {
            match item {
                Ok(snapshot) => Some(snapshot),
                Err(err) => {
                    warn!(session_id = %id, error = %err, "Watcher lagged behind");
                    None
                }
            }
        }))
    }
}
