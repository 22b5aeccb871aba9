//! In-process `SessionStore` backed by a concurrent map.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::domain::state::{GameSession, SessionId};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::sessions::{SessionPatch, SessionStore};

struct StoredSession {
    session: GameSession,
    publisher: broadcast::Sender<Arc<GameSession>>,
}

/// Sessions live for the lifetime of the process.
///
/// Each entry owns its broadcast sender, so deleting a session closes every
/// subscriber's receiver.
pub struct InMemorySessionStore {
    sessions: DashMap<SessionId, StoredSession>,
    broadcast_capacity: usize,
}

impl InMemorySessionStore {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            sessions: DashMap::new(),
            broadcast_capacity: config.broadcast_capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

fn session_not_found(id: SessionId) -> DomainError {
    DomainError::not_found(NotFoundKind::Session, format!("Session {id} not found"))
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, session: GameSession) -> Result<GameSession, DomainError> {
        let id = session.id;
        match self.sessions.entry(id) {
            Entry::Occupied(_) => Err(DomainError::conflict(
                ConflictKind::SessionExists,
                format!("Session {id} already exists"),
            )),
            Entry::Vacant(slot) => {
                let (publisher, _) = broadcast::channel(self.broadcast_capacity);
                slot.insert(StoredSession {
                    session: session.clone(),
                    publisher,
                });
                info!(session_id = %id, players = session.player_count(), "Session created");
                Ok(session)
            }
        }
    }

    async fn read(&self, id: SessionId) -> Result<GameSession, DomainError> {
        self.sessions
            .get(&id)
            .map(|stored| stored.session.clone())
            .ok_or_else(|| session_not_found(id))
    }

    async fn subscribe(
        &self,
        id: SessionId,
    ) -> Result<broadcast::Receiver<Arc<GameSession>>, DomainError> {
        self.sessions
            .get(&id)
            .map(|stored| stored.publisher.subscribe())
            .ok_or_else(|| session_not_found(id))
    }

    async fn write(&self, id: SessionId, patch: SessionPatch) -> Result<GameSession, DomainError> {
        let mut stored = self.sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;

        if let Err(err) = patch.guard.check(&stored.session) {
            warn!(session_id = %id, version = stored.session.version, error = %err, "Write rejected");
            return Err(err);
        }

        patch.apply_to(&mut stored.session);
        stored.session.version += 1;
        let committed = stored.session.clone();

        // No receivers is not an error; the commit stands either way.
        let receivers = stored.publisher.send(Arc::new(committed.clone())).unwrap_or(0);
        debug!(
            session_id = %id,
            version = committed.version,
            receivers,
            "Session write committed"
        );
        Ok(committed)
    }

    async fn delete(&self, id: SessionId) -> Result<(), DomainError> {
        self.sessions
            .remove(&id)
            .map(|_| info!(session_id = %id, "Session deleted"))
            .ok_or_else(|| session_not_found(id))
    }
}
