//! In-memory game simulator for AI evaluation.
//!
//! Drives complete games through the backend's command reducer, so every
//! move an AI makes is validated exactly as it would be in a live session.

use std::fmt;

use rump_backend::ai::{registry, AiError, AiPlayer};
use rump_backend::domain::commands::{apply_command, Command};
use rump_backend::domain::scoring::winner;
use rump_backend::domain::seed_derivation::derive_ai_seed;
use rump_backend::domain::state::{GameSession, Player, RoundEndReason, RoundStatus};
use rump_backend::domain::turns::DrawSource;
use rump_backend::domain::VisibleGameState;
use rump_backend::errors::DomainError;
use tracing::{debug, trace};

use crate::types::AiType;

/// Turns after which a round stops consulting the AIs about draws and takes
/// from the deck, which guarantees the round ends.
const FORCED_DRAW_AFTER: u32 = 400;

#[derive(Debug)]
pub enum SimError {
    UnknownAi(&'static str),
    Ai { seat: usize, source: AiError },
    Rejected { seat: usize, source: DomainError },
    /// The game stopped without a winner.
    Unfinished,
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::UnknownAi(name) => write!(f, "unknown AI type {name}"),
            SimError::Ai { seat, source } => write!(f, "seat {seat}: {source}"),
            SimError::Rejected { seat, source } => write!(f, "seat {seat} move rejected: {source}"),
            SimError::Unfinished => write!(f, "game ended without a winner"),
        }
    }
}

impl std::error::Error for SimError {}

/// One scored round.
#[derive(Debug, Clone)]
pub struct RoundRecord {
    pub round_no: u8,
    pub dealer: usize,
    pub declarer: Option<usize>,
    pub turns: u32,
    pub discard_draws: u32,
    pub hand_scores: Vec<u32>,
    pub totals_after: Vec<u32>,
}

/// Result of simulating a complete game.
#[derive(Debug, Clone)]
pub struct GameResult {
    pub final_scores: Vec<u32>,
    /// Lowest total; ties go to the earliest seat.
    pub winner: usize,
    pub rounds: Vec<RoundRecord>,
}

impl GameResult {
    pub fn rump_rounds(&self) -> usize {
        self.rounds.iter().filter(|r| r.declarer.is_some()).count()
    }
}

pub struct Simulator {
    seed: u64,
    seats: Vec<AiType>,
}

impl Simulator {
    pub fn new(seed: u64, seats: Vec<AiType>) -> Self {
        Self { seed, seats }
    }

    fn build_players(&self) -> Result<Vec<Box<dyn AiPlayer>>, SimError> {
        self.seats
            .iter()
            .enumerate()
            .map(|(seat, ai)| {
                let factory = registry::by_name(ai.name()).ok_or(SimError::UnknownAi(ai.name()))?;
                Ok((factory.make)(Some(derive_ai_seed(self.seed, seat))))
            })
            .collect()
    }

    pub fn simulate_game(&self) -> Result<GameResult, SimError> {
        let ais = self.build_players()?;
        let roster: Vec<Player> = self
            .seats
            .iter()
            .enumerate()
            .map(|(seat, ai)| Player::new(format!("seat{seat}"), format!("{}-{seat}", ai.name()), ""))
            .collect();
        let host = roster[0].id.clone();
        let mut session = GameSession::new(host.clone(), roster, self.seed)
            .map_err(|source| SimError::Rejected { seat: 0, source })?;

        let mut rounds = Vec::new();
        loop {
            session = step(&session, 0, Command::InitializeRound { by: host.clone() })?;
            if session.round_status == RoundStatus::GameOver {
                break;
            }
            let record = self.play_round(&mut session, &ais)?;
            debug!(round = record.round_no, turns = record.turns, totals = ?record.totals_after, "Round finished");
            rounds.push(record);
            if session.round_status == RoundStatus::GameOver {
                break;
            }
        }

        let winner = winner(&session)
            .and_then(|p| session.seat_of(&p.id))
            .ok_or(SimError::Unfinished)?;
        let final_scores = session.scores();

        Ok(GameResult {
            final_scores,
            winner,
            rounds,
        })
    }

    fn play_round(
        &self,
        session: &mut GameSession,
        ais: &[Box<dyn AiPlayer>],
    ) -> Result<RoundRecord, SimError> {
        let round_no = session.current_round;
        let dealer = session.dealer_index.unwrap_or(0);
        let mut turns = 0;
        let mut discard_draws = 0;

        while session.round_status == RoundStatus::Started {
            let Some(player) = session.current_turn.clone() else {
                break;
            };
            let seat = session.seat_of(&player).unwrap_or(0);
            let ai = &ais[seat];
            turns += 1;

            let view = visible(session, seat)?;
            let source = if turns > FORCED_DRAW_AFTER && view.deck_count > 0 {
                DrawSource::Deck
            } else {
                ai.choose_draw(&view).map_err(|source| SimError::Ai { seat, source })?
            };
            if source == DrawSource::Discard {
                discard_draws += 1;
            }
            let draw = match source {
                DrawSource::Deck => Command::DrawFromDeck { player: player.clone() },
                DrawSource::Discard => Command::DrawFromDiscard { player: player.clone() },
            };
            *session = step(session, seat, draw)?;

            let view = visible(session, seat)?;
            for mv in ai.arrange_hand(&view).map_err(|source| SimError::Ai { seat, source })? {
                *session = step(session, seat, mv.into_command(player.clone()))?;
            }

            let view = visible(session, seat)?;
            let end = ai
                .choose_turn_end(&view)
                .map_err(|source| SimError::Ai { seat, source })?;
            trace!(seat, ?source, ?end, "Turn");
            *session = step(session, seat, end.into_command(player))?;
        }

        let summary = session.last_round.clone().ok_or(SimError::Rejected {
            seat: 0,
            source: DomainError::validation_other("round ended without a summary"),
        })?;
        let declarer = match &summary.reason {
            RoundEndReason::Rump { declarer } => session.seat_of(declarer),
            RoundEndReason::DeckExhausted => None,
        };

        Ok(RoundRecord {
            round_no,
            dealer,
            declarer,
            turns,
            discard_draws,
            hand_scores: summary.hand_scores,
            totals_after: summary.totals_after,
        })
    }
}

fn visible(session: &GameSession, seat: usize) -> Result<VisibleGameState, SimError> {
    VisibleGameState::for_player(session, &session.players[seat].id)
        .map_err(|source| SimError::Rejected { seat, source })
}

fn step(session: &GameSession, seat: usize, command: Command) -> Result<GameSession, SimError> {
    apply_command(session, &command).map_err(|source| SimError::Rejected { seat, source })
}
