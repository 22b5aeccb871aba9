use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use rump_backend::domain::state::{GameSession, PlayerId, SessionId};
use rump_backend::errors::{DomainError, ErrorCode};
use rump_backend::{
    EngineConfig, GameFlowService, InMemorySessionStore, SessionPatch, SessionStore, WriteGuard,
};
use tokio::sync::broadcast;

use crate::common::turn_holder;
use crate::support::{roster, started_game};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_draws_resolve_to_one_success() {
    let game = started_game(3, 31).await;
    let holder = turn_holder(&game.session().await);

    let a = {
        let svc = game.service.clone();
        let (id, p) = (game.id, holder.clone());
        tokio::spawn(async move { svc.draw_from_deck(id, &p).await })
    };
    let b = {
        let svc = game.service.clone();
        let (id, p) = (game.id, holder.clone());
        tokio::spawn(async move { svc.draw_from_deck(id, &p).await })
    };

    let results = [a.await.unwrap(), b.await.unwrap()];
    let ok = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(ok, 1);
    let err = results.into_iter().find_map(Result::err).unwrap();
    assert_eq!(err.code(), ErrorCode::AlreadyDrawn);

    let s = game.session().await;
    assert_eq!(s.version, 2);
    assert_eq!(s.hands[1].len(), 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn reorders_interleave_with_the_turn_holder() {
    let game = started_game(4, 32).await;
    let before = game.session().await;
    let holder = turn_holder(&before);

    let mut tasks = Vec::new();
    for seat in [0usize, 2, 3] {
        let svc = game.service.clone();
        let id = game.id;
        let player = PlayerId::new(format!("p{seat}"));
        tasks.push(tokio::spawn(async move {
            svc.reorder_hand(id, &player, 0, 8).await.map(|_| ())
        }));
    }
    let svc = game.service.clone();
    let id = game.id;
    let p = holder.clone();
    tasks.push(tokio::spawn(async move { svc.draw_from_deck(id, &p).await.map(|_| ()) }));

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let s = game.session().await;
    assert_eq!(s.version, before.version + 4);
    assert!(s.has_drawn_this_turn);
    for seat in [0usize, 2, 3] {
        assert_eq!(s.hands[seat][8], before.hands[seat][0]);
    }
}

/// Commits `edit` as its own write right before each of the next `pending` writes.
struct InterferingStore {
    inner: InMemorySessionStore,
    pending: AtomicU32,
    edit: fn(&mut GameSession),
}

impl InterferingStore {
    fn new(edit: fn(&mut GameSession)) -> Self {
        Self {
            inner: InMemorySessionStore::default(),
            pending: AtomicU32::new(0),
            edit,
        }
    }

    fn interfere_with_next(&self, writes: u32) {
        self.pending.store(writes, Ordering::SeqCst);
    }
}

#[async_trait]
impl SessionStore for InterferingStore {
    async fn create(&self, session: GameSession) -> Result<GameSession, DomainError> {
        self.inner.create(session).await
    }

    async fn read(&self, id: SessionId) -> Result<GameSession, DomainError> {
        self.inner.read(id).await
    }

    async fn subscribe(
        &self,
        id: SessionId,
    ) -> Result<broadcast::Receiver<Arc<GameSession>>, DomainError> {
        self.inner.subscribe(id).await
    }

    async fn write(&self, id: SessionId, patch: SessionPatch) -> Result<GameSession, DomainError> {
        let interfere = self
            .pending
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if interfere {
            let current = self.inner.read(id).await?;
            let mut edited = current.clone();
            (self.edit)(&mut edited);
            let guard = WriteGuard::Version(current.version);
            self.inner
                .write(id, SessionPatch::between(&current, &edited, guard))
                .await?;
        }
        self.inner.write(id, patch).await
    }

    async fn delete(&self, id: SessionId) -> Result<(), DomainError> {
        self.inner.delete(id).await
    }
}

fn rename_host(s: &mut GameSession) {
    s.players[0].name.push('*');
}

/// The turn holder moves their first card to the end of their hand.
fn holder_rotates_hand(s: &mut GameSession) {
    let seat = s
        .current_turn
        .as_ref()
        .and_then(|p| s.seat_of(p))
        .expect("turn holder");
    let first = s.hands[seat].remove(0);
    s.hands[seat].push(first);
}

struct InterferedGame {
    store: Arc<InterferingStore>,
    service: GameFlowService,
    id: SessionId,
    holder: PlayerId,
}

impl InterferedGame {
    async fn session(&self) -> GameSession {
        self.store.read(self.id).await.unwrap()
    }
}

/// Two seats, round 1 dealt, no interference armed yet.
async fn interfered_game(edit: fn(&mut GameSession), commit_retries: u32) -> InterferedGame {
    let store = Arc::new(InterferingStore::new(edit));
    let service = GameFlowService::new(
        store.clone(),
        EngineConfig {
            commit_retries,
            ..EngineConfig::default()
        },
    );
    let host = PlayerId::new("p0");
    let s = service
        .create_session(host.clone(), roster(2), Some(33))
        .await
        .unwrap();
    let dealt = service.initialize_round(s.id, &host).await.unwrap();
    InterferedGame {
        holder: turn_holder(&dealt.final_session),
        store,
        service,
        id: s.id,
    }
}

#[tokio::test]
async fn zero_retries_surface_the_conflict() {
    let game = interfered_game(rename_host, 0).await;
    let before = game.session().await;
    game.store.interfere_with_next(1);

    let err = game.service.draw_from_deck(game.id, &game.holder).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::StaleSnapshot);
    assert!(err.is_retryable());

    let after = game.session().await;
    assert!(!after.has_drawn_this_turn);
    assert_eq!(after.version, before.version + 1);
}

#[tokio::test]
async fn retries_outlast_interleaved_writers() {
    let game = interfered_game(rename_host, 3).await;
    let before = game.session().await;
    game.store.interfere_with_next(2);

    let result = game.service.draw_from_deck(game.id, &game.holder).await.unwrap();
    assert_eq!(result.old_version, before.version + 2);
    assert_eq!(result.final_version(), before.version + 3);
    assert!(result.final_session.has_drawn_this_turn);
}

#[tokio::test]
async fn retries_are_bounded() {
    let game = interfered_game(rename_host, 3).await;
    let before = game.session().await;
    game.store.interfere_with_next(5);

    let err = game.service.draw_from_deck(game.id, &game.holder).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::StaleSnapshot);
    // One first attempt plus three retries, each beaten by an interfering commit.
    assert_eq!(game.session().await.version, before.version + 4);
}

#[tokio::test]
async fn discard_retries_keep_the_chosen_card_when_the_hand_is_untouched() {
    let game = interfered_game(rename_host, 3).await;
    game.service.draw_from_deck(game.id, &game.holder).await.unwrap();
    let seat = game.session().await.seat_of(&game.holder).unwrap();
    let chosen = game.session().await.hands[seat][0];
    game.store.interfere_with_next(1);

    let result = game.service.discard(game.id, &game.holder, 0).await.unwrap();
    assert_eq!(result.final_session.discard_pile.last(), Some(&chosen));
}

#[tokio::test]
async fn discard_is_not_replayed_onto_a_rearranged_hand() {
    let game = interfered_game(holder_rotates_hand, 3).await;
    game.service.draw_from_deck(game.id, &game.holder).await.unwrap();
    game.store.interfere_with_next(1);

    let err = game.service.discard(game.id, &game.holder, 0).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::HandChanged);

    let after = game.session().await;
    let seat = after.seat_of(&game.holder).unwrap();
    assert_eq!(after.hands[seat].len(), 10);
    assert!(after.discard_pile.is_empty());
    assert!(after.has_drawn_this_turn);
}

#[tokio::test]
async fn reorder_is_not_replayed_onto_a_rearranged_hand() {
    let game = interfered_game(holder_rotates_hand, 3).await;
    let dealt = game.session().await;
    let seat = dealt.seat_of(&game.holder).unwrap();
    game.store.interfere_with_next(1);

    let err = game
        .service
        .reorder_hand(game.id, &game.holder, 0, 1)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::HandChanged);

    // Only the rotation landed.
    let mut rotated = dealt.hands[seat].clone();
    rotated.rotate_left(1);
    assert_eq!(game.session().await.hands[seat], rotated);
}
