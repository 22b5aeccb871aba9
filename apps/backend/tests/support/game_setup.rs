//! Builders for sessions backed by a fresh in-memory store.

use std::sync::Arc;

use rump_backend::ai::{AiPlayer, TurnEndChoice};
use rump_backend::domain::state::{GameSession, Player, PlayerId, SessionId};
use rump_backend::domain::turns::DrawSource;
use rump_backend::domain::Card;
use rump_backend::{
    AppError, EngineConfig, GameFlowMutationResult, GameFlowService, InMemorySessionStore,
    SessionStore,
};

pub struct TestGame {
    pub service: GameFlowService,
    pub store: Arc<InMemorySessionStore>,
    pub id: SessionId,
    pub host: PlayerId,
}

impl TestGame {
    pub async fn session(&self) -> GameSession {
        self.service.session(self.id).await.expect("session exists")
    }
}

/// Players `p0..p{n-1}`; `p0` hosts.
pub fn roster(n: usize) -> Vec<Player> {
    (0..n)
        .map(|i| Player::new(format!("p{i}"), format!("Player {i}"), format!("avatar-{i}")))
        .collect()
}

pub async fn seated_game(players: usize, seed: u64) -> TestGame {
    let store = Arc::new(InMemorySessionStore::default());
    let service = GameFlowService::new(store.clone(), EngineConfig::default());
    let host = PlayerId::new("p0");
    let session = service
        .create_session(host.clone(), roster(players), Some(seed))
        .await
        .expect("create session");
    TestGame {
        service,
        store,
        id: session.id,
        host,
    }
}

/// Seated and round 1 dealt.
pub async fn started_game(players: usize, seed: u64) -> TestGame {
    let game = seated_game(players, seed).await;
    game.service
        .initialize_round(game.id, &game.host)
        .await
        .expect("deal round 1");
    game
}

/// Play one full turn for the current turn holder with `ai`.
pub async fn play_ai_turn(
    game: &TestGame,
    ai: &dyn AiPlayer,
) -> Result<GameFlowMutationResult, AppError> {
    let session = game.service.session(game.id).await?;
    let player = session
        .current_turn
        .clone()
        .ok_or_else(|| AppError::internal("no turn holder"))?;

    let view = game.service.player_view(game.id, &player).await?;
    match ai.choose_draw(&view)? {
        DrawSource::Deck => game.service.draw_from_deck(game.id, &player).await?,
        DrawSource::Discard => game.service.draw_from_discard(game.id, &player).await?,
    };

    let view = game.service.player_view(game.id, &player).await?;
    for mv in ai.arrange_hand(&view)? {
        game.service
            .reorder_hand(game.id, &player, mv.from, mv.to)
            .await?;
    }

    let view = game.service.player_view(game.id, &player).await?;
    match ai.choose_turn_end(&view)? {
        TurnEndChoice::Discard(i) => game.service.discard(game.id, &player, i).await,
        TurnEndChoice::DeclareRump(i) => game.service.declare_rump(game.id, &player, i).await,
    }
}

pub fn cards(tokens: &[&str]) -> Vec<Card> {
    tokens.iter().map(|t| t.parse().expect("card token")).collect()
}

/// Store a hand-edited copy of a session under a fresh id on the same store.
pub async fn install(game: &TestGame, session: GameSession) -> SessionId {
    game.store
        .create(GameSession {
            id: SessionId::new(),
            ..session
        })
        .await
        .expect("install rigged session")
        .id
}
