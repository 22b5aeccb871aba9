use futures_util::StreamExt;
use rump_backend::ai::ArrangerPlayer;
use rump_backend::domain::game_transition::GameTransition;
use rump_backend::domain::rules::{DECK_SIZE, TOTAL_ROUNDS};
use rump_backend::domain::state::{GameSession, PlayerId, RoundEndReason, RoundStatus, TurnPhase};
use rump_backend::errors::ErrorCode;

use crate::common::{assert_code, turn_holder};
use crate::support::{cards, install, play_ai_turn, seated_game, started_game};

#[tokio::test]
async fn first_round_deal_and_turn_order() {
    let game = seated_game(3, 5).await;
    let result = game.service.initialize_round(game.id, &game.host).await.unwrap();

    assert_eq!(result.old_version, 0);
    assert_eq!(result.final_version(), 1);
    assert!(result
        .transitions
        .contains(&GameTransition::RoundStarted { round_no: 1 }));
    assert!(result.transitions.contains(&GameTransition::TurnBecame {
        player: PlayerId::new("p1")
    }));

    let s = result.final_session;
    assert_eq!(s.round_status, RoundStatus::Started);
    assert_eq!(s.dealer_index, Some(0));
    assert!(s.hands.iter().all(|h| h.len() == 9));
    assert_eq!(s.deck.len(), 25);
    assert!(s.discard_pile.is_empty());
    assert_eq!(s.card_count(), DECK_SIZE);
}

#[tokio::test]
async fn draw_then_discard_passes_the_turn() {
    let game = started_game(2, 8).await;
    let before = game.session().await;
    let p1 = turn_holder(&before);

    let drawn = game.service.draw_from_deck(game.id, &p1).await.unwrap();
    let s = &drawn.final_session;
    assert_eq!(s.hands[1].len(), 10);
    assert_eq!(s.deck.len(), before.deck.len() - 1);
    assert_eq!(s.turn_phase(), Some(TurnPhase::AwaitingDiscardOrRump));
    assert!(drawn.transitions.is_empty());

    let top = s.hands[1][3];
    let passed = game.service.discard(game.id, &p1, 3).await.unwrap();
    let s = passed.final_session;
    assert_eq!(s.discard_pile.last(), Some(&top));
    assert_eq!(s.current_turn, Some(PlayerId::new("p0")));
    assert!(!s.has_drawn_this_turn);
    assert_eq!(s.version, 3);
    assert_eq!(s.card_count(), DECK_SIZE);
}

#[tokio::test]
async fn reorder_is_allowed_out_of_turn() {
    let game = started_game(3, 13).await;
    let before = game.session().await;
    let idle = PlayerId::new("p0");
    assert_ne!(before.current_turn.as_ref(), Some(&idle));

    let result = game.service.reorder_hand(game.id, &idle, 8, 0).await.unwrap();
    let hand = &result.final_session.hands[0];
    assert_eq!(hand[0], before.hands[0][8]);
    assert_eq!(&hand[1..], &before.hands[0][..8]);
    assert_eq!(result.final_session.current_turn, before.current_turn);
}

#[tokio::test]
async fn rump_ends_round_and_scores_everyone_else() {
    let game = started_game(2, 3).await;
    let mut rigged: GameSession = game.session().await;

    // p1 holds three melds plus a spare after drawing.
    rigged.hands[1] = cards(&["3H", "4H", "5H", "9C", "9D", "9S", "JC", "QC", "KC"]);
    rigged.hands[0] = cards(&["2D", "KD", "7S", "8H", "AS", "4C", "6D", "TD", "5S"]);
    rigged.deck = cards(&["2C", "3C", "6H"]);
    rigged.discard_pile = cards(&["7C"]);
    let id = install(&game, rigged).await;
    let p1 = PlayerId::new("p1");

    game.service.draw_from_discard(id, &p1).await.unwrap();
    let result = game.service.declare_rump(id, &p1, 9).await.unwrap();
    let s = result.final_session;

    assert_eq!(s.round_status, RoundStatus::RoundEnded);
    assert_eq!(s.current_turn, None);
    assert_eq!(s.discard_pile.last(), Some(&"7C".parse().unwrap()));
    let summary = s.last_round.expect("round summary");
    assert_eq!(summary.reason, RoundEndReason::Rump { declarer: p1 });
    assert_eq!(summary.hand_scores[1], 0);
    assert_eq!(summary.hand_scores[0], 2 + 14 + 7 + 8 + 11 + 4 + 6 + 10 + 5);
    assert!(result
        .transitions
        .contains(&GameTransition::RoundEnded { round_no: 1 }));
}

#[tokio::test]
async fn full_game_with_arrangers_reaches_game_over() {
    let game = started_game(4, 99).await;
    let ai = ArrangerPlayer::new();
    let mut rounds_seen = 1;

    loop {
        let s = game.session().await;
        match s.round_status {
            RoundStatus::Started => {
                play_ai_turn(&game, &ai).await.unwrap();
            }
            RoundStatus::RoundEnded => {
                assert_eq!(s.card_count(), DECK_SIZE);
                game.service.initialize_round(game.id, &game.host).await.unwrap();
                rounds_seen += 1;
            }
            RoundStatus::GameOver => break,
            RoundStatus::Waiting => unreachable!("game already started"),
        }
    }

    let s = game.session().await;
    assert_eq!(rounds_seen, TOTAL_ROUNDS);
    assert_eq!(s.current_round, TOTAL_ROUNDS);
    let totals = s.last_round.as_ref().unwrap().totals_after.clone();
    assert_eq!(totals, s.scores());

    let ended = game.service.end_session(game.id, &PlayerId::new("p2")).await.unwrap();
    assert_eq!(ended.round_status, RoundStatus::GameOver);
    assert_code(game.service.session(game.id).await, ErrorCode::SessionNotFound);
}

#[tokio::test]
async fn initialize_after_final_round_is_game_over() {
    let game = started_game(2, 4).await;
    let mut s = game.session().await;
    s.current_round = TOTAL_ROUNDS;
    s.round_status = RoundStatus::RoundEnded;
    s.current_turn = None;
    let id = install(&game, s).await;

    let result = game.service.initialize_round(id, &game.host).await.unwrap();
    assert_eq!(result.final_session.round_status, RoundStatus::GameOver);
    assert!(matches!(
        result.transitions.as_slice(),
        [GameTransition::GameEnded { .. }]
    ));
    assert_code(
        game.service.initialize_round(id, &game.host).await,
        ErrorCode::GameOver,
    );
}

#[tokio::test]
async fn watchers_receive_commits() {
    let game = started_game(2, 17).await;
    let mut stream = Box::pin(game.service.watch(game.id).await.unwrap());
    let p1 = PlayerId::new("p1");

    game.service.draw_from_deck(game.id, &p1).await.unwrap();
    game.service.discard(game.id, &p1, 0).await.unwrap();

    let first = stream.next().await.unwrap();
    let second = stream.next().await.unwrap();
    assert_eq!((first.version, second.version), (2, 3));
    assert_eq!(second.current_turn, Some(PlayerId::new("p0")));

    game.service.abandon_session(game.id, &game.host).await.unwrap();
    assert!(stream.next().await.is_none());
}
