//! AI Simulator CLI - plays complete Rump games in memory to compare AIs.
//!
//! Every move goes through the backend's command reducer; no store or
//! service layer is involved.

mod metrics;
mod output;
mod simulator;
mod types;

use std::time::{Duration, Instant};

use clap::Parser;
use metrics::build_game_metrics;
use output::OutputWriter;
use rump_backend::domain::rules::{MAX_PLAYERS, MIN_PLAYERS};
use simulator::{GameResult, Simulator};
use tracing::{info, warn};
use types::{AiType, OutputFormat};

#[derive(Parser)]
#[command(name = "ai-simulator")]
#[command(about = "In-memory Rump simulator for comparing AI players")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Players per game
    #[arg(short, long, default_value = "4", value_parser = clap::value_parser!(u8).range(MIN_PLAYERS as i64..=MAX_PLAYERS as i64))]
    players: u8,

    /// AI type for every seat
    #[arg(long, conflicts_with = "seat")]
    seats: Option<AiType>,

    /// AI type per seat, in seating order (repeat the flag); missing seats use the arranger
    #[arg(long)]
    seat: Vec<AiType>,

    /// Base seed; game N uses seed + N - 1. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log as JSON lines instead of plain text
    #[arg(long)]
    log_json: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: String,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Gzip output files
    #[arg(long)]
    compress: bool,
}

impl Args {
    fn seat_types(&self) -> Vec<AiType> {
        let players = usize::from(self.players);
        match self.seats {
            Some(ai) => vec![ai; players],
            None => (0..players)
                .map(|seat| self.seat.get(seat).copied().unwrap_or(AiType::Arranger))
                .collect(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    rump_backend::telemetry::init_tracing(filter, args.log_json);

    let seat_types = args.seat_types();
    if args.seat.len() > seat_types.len() {
        warn!(
            given = args.seat.len(),
            players = seat_types.len(),
            "Extra --seat values ignored"
        );
    }
    let ai_types: Vec<String> = seat_types.iter().map(|t| t.name().to_string()).collect();
    info!(games = args.games, ?ai_types, "Starting AI simulator");

    let mut output_writer = OutputWriter::new(&args.output_dir, args.output_format, args.compress)?;

    let base_seed = args.seed.unwrap_or_else(rand::random);
    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0;

    for game_num in 1..=args.games {
        let game_start = Instant::now();
        let game_seed = base_seed.wrapping_add(u64::from(game_num - 1));

        match Simulator::new(game_seed, seat_types.clone()).simulate_game() {
            Ok(result) => {
                let duration_ms = game_start.elapsed().as_secs_f64() * 1000.0;
                let metrics = build_game_metrics(
                    game_num,
                    game_seed,
                    ai_types.clone(),
                    args.games,
                    &result,
                    duration_ms,
                );
                if let Err(e) = output_writer.write_game(&metrics) {
                    warn!("Failed to write metrics for game {}: {}", game_num, e);
                }
                info!(game = game_num, scores = ?result.final_scores, "Game completed");
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!("Game {} (seed {}) failed: {}", game_num, game_seed, e);
            }
        }
    }

    let elapsed = start.elapsed();
    let (jsonl_path, csv_path) = output_writer.output_paths();
    let jsonl_path = jsonl_path.cloned();
    let csv_path = csv_path.clone();
    output_writer.finish()?;

    if let Some(path) = jsonl_path {
        println!("Detailed results: {}", path.display());
    }
    println!("Summary CSV: {}", csv_path.display());
    print_summary(&results, &ai_types, errors, elapsed, args.games);

    Ok(())
}

fn print_summary(
    results: &[GameResult],
    ai_types: &[String],
    errors: u32,
    elapsed: Duration,
    total: u32,
) {
    println!("\n=== Simulation Summary ===");
    println!("Games completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {errors}");
    }
    println!("Total time: {elapsed:?}");
    if results.is_empty() {
        return;
    }
    println!("Average time per game: {:?}", elapsed / results.len() as u32);

    let rounds: usize = results.iter().map(|r| r.rounds.len()).sum();
    let rumps: usize = results.iter().map(GameResult::rump_rounds).sum();
    if rounds > 0 {
        println!(
            "Rump rate: {:.1}% of {} rounds",
            rumps as f64 * 100.0 / rounds as f64,
            rounds
        );
    }

    println!("\n=== Results by Seat ===");
    let games = results.len() as f64;
    for (seat, ai) in ai_types.iter().enumerate() {
        let wins = results.iter().filter(|r| r.winner == seat).count();
        let scores = results.iter().filter_map(|r| r.final_scores.get(seat).copied());
        let (sum, min, max) = scores.fold((0u64, u32::MAX, 0u32), |(sum, min, max), s| {
            (sum + u64::from(s), min.min(s), max.max(s))
        });
        println!(
            "Seat {seat} ({ai}): avg={:.1}, min={min}, max={max}, wins={wins} ({:.1}%)",
            sum as f64 / games,
            wins as f64 * 100.0 / games
        );
    }
}
