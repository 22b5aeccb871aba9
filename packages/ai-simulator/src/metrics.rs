//! Metrics collection and output for simulation results.

use serde::Serialize;

use crate::simulator::{GameResult, RoundRecord};

/// Complete game metrics for output.
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_id: u32,
    pub seed: u64,
    pub timestamp: String,
    pub config: GameConfig,
    pub result: GameResultMetrics,
    pub rounds: Vec<RoundMetrics>,
    pub player_metrics: Vec<PlayerMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameConfig {
    pub ai_types: Vec<String>,
    pub players: usize,
    pub total_games: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResultMetrics {
    pub final_scores: Vec<u32>,
    pub winner: usize,
    pub rounds_played: usize,
    pub rump_rounds: usize,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundMetrics {
    pub round_no: u8,
    pub dealer: usize,
    /// `RUMP` or `DECK_EXHAUSTED`.
    pub ended_by: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declarer: Option<usize>,
    pub turns: u32,
    pub discard_draws: u32,
    pub hand_scores: Vec<u32>,
    pub totals_after: Vec<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerMetrics {
    pub seat: usize,
    pub ai_type: String,
    pub total_score: u32,
    pub rumps: u32,
    /// Rounds finished with nothing ungrouped.
    pub clean_rounds: u32,
    pub avg_round_score: f64,
}

impl From<&RoundRecord> for RoundMetrics {
    fn from(round: &RoundRecord) -> Self {
        Self {
            round_no: round.round_no,
            dealer: round.dealer,
            ended_by: if round.declarer.is_some() {
                "RUMP"
            } else {
                "DECK_EXHAUSTED"
            },
            declarer: round.declarer,
            turns: round.turns,
            discard_draws: round.discard_draws,
            hand_scores: round.hand_scores.clone(),
            totals_after: round.totals_after.clone(),
        }
    }
}

fn build_player_metrics(seat: usize, ai_type: &str, result: &GameResult) -> PlayerMetrics {
    let rounds = &result.rounds;
    let rumps = rounds.iter().filter(|r| r.declarer == Some(seat)).count() as u32;
    let clean_rounds = rounds
        .iter()
        .filter(|r| r.hand_scores.get(seat) == Some(&0))
        .count() as u32;
    let round_total: u32 = rounds.iter().filter_map(|r| r.hand_scores.get(seat)).sum();
    let avg_round_score = if rounds.is_empty() {
        0.0
    } else {
        f64::from(round_total) / rounds.len() as f64
    };

    PlayerMetrics {
        seat,
        ai_type: ai_type.to_string(),
        total_score: result.final_scores.get(seat).copied().unwrap_or(0),
        rumps,
        clean_rounds,
        avg_round_score,
    }
}

/// Build metrics from a finished game.
pub fn build_game_metrics(
    game_id: u32,
    seed: u64,
    ai_types: Vec<String>,
    total_games: u32,
    result: &GameResult,
    duration_ms: f64,
) -> GameMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    let player_metrics = ai_types
        .iter()
        .enumerate()
        .map(|(seat, ai)| build_player_metrics(seat, ai, result))
        .collect();

    GameMetrics {
        game_id,
        seed,
        timestamp,
        config: GameConfig {
            players: ai_types.len(),
            ai_types,
            total_games,
        },
        result: GameResultMetrics {
            final_scores: result.final_scores.clone(),
            winner: result.winner,
            rounds_played: result.rounds.len(),
            rump_rounds: result.rump_rounds(),
            duration_ms,
        },
        rounds: result.rounds.iter().map(RoundMetrics::from).collect(),
        player_metrics,
    }
}

/// CSV summary row for quick analysis. Per-seat columns are `;`-joined.
#[derive(Debug, Clone, Serialize)]
pub struct CsvSummaryRow {
    pub game_id: u32,
    pub seed: u64,
    pub players: usize,
    pub winner: usize,
    pub scores: String,
    pub ai_types: String,
    pub rounds: usize,
    pub rump_rounds: usize,
    pub duration_ms: f64,
}

fn join<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(";")
}

impl From<&GameMetrics> for CsvSummaryRow {
    fn from(metrics: &GameMetrics) -> Self {
        Self {
            game_id: metrics.game_id,
            seed: metrics.seed,
            players: metrics.config.players,
            winner: metrics.result.winner,
            scores: join(&metrics.result.final_scores),
            ai_types: metrics.config.ai_types.join(";"),
            rounds: metrics.result.rounds_played,
            rump_rounds: metrics.result.rump_rounds,
            duration_ms: metrics.result.duration_ms,
        }
    }
}
