use crate::domain::melds::compute_hand_score;
use crate::domain::state::{GameSession, Player, RoundEndReason, RoundStatus, RoundSummary};
use crate::domain::Card;

/// Penalty per hand, in seat order.
pub fn hand_penalties(hands: &[Vec<Card>]) -> Vec<u32> {
    hands.iter().map(|h| compute_hand_score(h)).collect()
}

/// Add each hand's penalty to its player's cumulative score.
pub fn apply_round_scoring(session: &mut GameSession, reason: RoundEndReason) -> RoundSummary {
    let hand_scores = hand_penalties(&session.hands);
    for (player, penalty) in session.players.iter_mut().zip(&hand_scores) {
        player.score = player.score.saturating_add(*penalty);
    }
    RoundSummary {
        round_no: session.current_round,
        reason,
        hand_scores,
        totals_after: session.scores(),
    }
}

/// Players ordered best first: lowest score, then earliest seat.
pub fn standings(session: &GameSession) -> Vec<&Player> {
    let mut ordered: Vec<(usize, &Player)> = session.players.iter().enumerate().collect();
    ordered.sort_by_key(|(seat, p)| (p.score, *seat));
    ordered.into_iter().map(|(_, p)| p).collect()
}

/// Lowest cumulative score wins; ties go to the earliest seat.
///
/// Only defined once the game is over.
pub fn winner(session: &GameSession) -> Option<&Player> {
    if session.round_status != RoundStatus::GameOver {
        return None;
    }
    standings(session).into_iter().next()
}
