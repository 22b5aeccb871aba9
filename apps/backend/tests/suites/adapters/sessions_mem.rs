use std::sync::Arc;

use rump_backend::domain::round_lifecycle::initialize_round;
use rump_backend::domain::state::{GameSession, PlayerId};
use rump_backend::domain::turns::{draw_from_deck, reorder_hand};
use rump_backend::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use rump_backend::{EngineConfig, InMemorySessionStore, SessionPatch, SessionStore, WriteGuard};

use crate::support::roster;

fn dealt_session() -> GameSession {
    let host = PlayerId::new("p0");
    let mut session = GameSession::new(host.clone(), roster(3), 21).expect("valid roster");
    initialize_round(&mut session, &host).expect("deal");
    session
}

#[tokio::test]
async fn versions_increase_by_one_per_commit() {
    let store = InMemorySessionStore::default();
    let mut current = store.create(dealt_session()).await.unwrap();
    let id = current.id;

    for expected in 1..=5u64 {
        let mut next = current.clone();
        next.players[0].score += 1;
        let patch = SessionPatch::between(&current, &next, WriteGuard::Version(current.version));
        current = store.write(id, patch).await.unwrap();
        assert_eq!(current.version, expected);
    }
    assert_eq!(store.read(id).await.unwrap().players[0].score, 5);
}

#[tokio::test]
async fn subscribers_see_every_commit_in_order() {
    let store = InMemorySessionStore::default();
    let base = store.create(dealt_session()).await.unwrap();
    let mut early = store.subscribe(base.id).await.unwrap();

    let mut current = base.clone();
    for _ in 0..3 {
        let mut next = current.clone();
        next.players[1].score += 2;
        current = store
            .write(base.id, SessionPatch::between(&current, &next, WriteGuard::Version(current.version)))
            .await
            .unwrap();
    }

    let versions: Vec<u64> = vec![
        early.recv().await.unwrap().version,
        early.recv().await.unwrap().version,
        early.recv().await.unwrap().version,
    ];
    assert_eq!(versions, vec![1, 2, 3]);
}

#[tokio::test]
async fn lagging_subscriber_is_told_it_lagged() {
    let store = InMemorySessionStore::new(&EngineConfig {
        broadcast_capacity: 1,
        ..EngineConfig::default()
    });
    let base = store.create(dealt_session()).await.unwrap();
    let mut rx = store.subscribe(base.id).await.unwrap();

    let mut current = base.clone();
    for _ in 0..3 {
        let mut next = current.clone();
        next.players[2].score += 1;
        current = store
            .write(base.id, SessionPatch::between(&current, &next, WriteGuard::Version(current.version)))
            .await
            .unwrap();
    }

    assert!(matches!(
        rx.recv().await,
        Err(tokio::sync::broadcast::error::RecvError::Lagged(_))
    ));
    assert_eq!(rx.recv().await.unwrap().version, 3);
}

#[tokio::test]
async fn hand_guard_ignores_other_seats_but_not_its_own() {
    let store = Arc::new(InMemorySessionStore::default());
    let base = store.create(dealt_session()).await.unwrap();
    let id = base.id;
    let mover = PlayerId::new("p2");

    // Seat 1 draws first and commits.
    let mut drawn = base.clone();
    let p1 = drawn.current_turn.clone().unwrap();
    draw_from_deck(&mut drawn, &p1).unwrap();
    store
        .write(id, SessionPatch::between(&base, &drawn, WriteGuard::Version(base.version)))
        .await
        .unwrap();

    // Seat 2 reorders against the stale snapshot; its own hand is unchanged.
    let mut reordered = base.clone();
    reorder_hand(&mut reordered, &mover, 0, 8).unwrap();
    let guard = WriteGuard::HandUnchanged {
        seat: 2,
        cards: base.hands[2].clone(),
    };
    let committed = store
        .write(id, SessionPatch::between(&base, &reordered, guard.clone()))
        .await
        .unwrap();
    assert_eq!(committed.version, 2);
    assert_eq!(committed.hands[2], reordered.hands[2]);
    assert_eq!(committed.hands[1], drawn.hands[1]);
    assert!(committed.has_drawn_this_turn);

    // Replaying the same reorder now conflicts: the hand moved on.
    let err = store
        .write(id, SessionPatch::between(&base, &reordered, guard))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(ConflictKind::HandChanged, _)));
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let store = InMemorySessionStore::default();
    let ghost = dealt_session();
    let patch = SessionPatch::between(&ghost, &ghost, WriteGuard::Version(0));
    for err in [
        store.read(ghost.id).await.unwrap_err(),
        store.write(ghost.id, patch).await.unwrap_err(),
        store.subscribe(ghost.id).await.unwrap_err(),
        store.delete(ghost.id).await.unwrap_err(),
    ] {
        assert!(matches!(err, DomainError::NotFound(NotFoundKind::Session, _)));
    }
}

#[tokio::test]
async fn concurrent_version_guarded_writers_commit_exactly_once() {
    let store = Arc::new(InMemorySessionStore::default());
    let base = store.create(dealt_session()).await.unwrap();

    let mut handles = Vec::new();
    for seat in 0..3 {
        let store = store.clone();
        let base = base.clone();
        handles.push(tokio::spawn(async move {
            let mut next = base.clone();
            next.players[seat].score = 100;
            store
                .write(base.id, SessionPatch::between(&base, &next, WriteGuard::Version(0)))
                .await
        }));
    }

    let mut ok = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => ok += 1,
            Err(err) => assert!(err.is_retryable()),
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(store.read(base.id).await.unwrap().version, 1);
}
