//! Random AI player - makes random legal moves.
//!
//! [`RandomPlayer`] is the baseline [`AiPlayer`](super::AiPlayer): it never
//! arranges its hand and picks uniformly among the legal options.

use parking_lot::Mutex;
use rand::prelude::*;

use super::trait_def::{AiError, AiPlayer, TurnEndChoice};
use crate::domain::player_view::VisibleGameState;
use crate::domain::state::TurnPhase;
use crate::domain::turns::DrawSource;

/// AI that makes random legal moves.
///
/// ```rust,ignore
/// // Non-deterministic (uses system entropy)
/// let random_ai = RandomPlayer::new(None);
///
/// // Deterministic (uses seed for reproducible behavior)
/// let seeded_ai = RandomPlayer::new(Some(12345));
/// ```
pub struct RandomPlayer {
    /// `AiPlayer` methods take `&self`; the RNG needs `&mut`.
    rng: Mutex<StdRng>,
}

impl RandomPlayer {
    pub const NAME: &'static str = "random";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl AiPlayer for RandomPlayer {
    fn choose_draw(&self, state: &VisibleGameState) -> Result<DrawSource, AiError> {
        let legal = state.legal_draws();
        if legal.is_empty() {
            return Err(AiError::InvalidMove("No legal draws available".into()));
        }
        let mut rng = self.rng.lock();
        legal
            .choose(&mut *rng)
            .copied()
            .ok_or_else(|| AiError::Internal("Failed to choose random draw".into()))
    }

    fn choose_turn_end(&self, state: &VisibleGameState) -> Result<TurnEndChoice, AiError> {
        if state.turn_phase != Some(TurnPhase::AwaitingDiscardOrRump) || state.hand.is_empty() {
            return Err(AiError::InvalidMove("Nothing to discard yet".into()));
        }

        let mut options: Vec<TurnEndChoice> =
            (0..state.hand.len()).map(TurnEndChoice::Discard).collect();
        options.extend(state.rump_discards().into_iter().map(TurnEndChoice::DeclareRump));

        let mut rng = self.rng.lock();
        options
            .choose(&mut *rng)
            .copied()
            .ok_or_else(|| AiError::Internal("Failed to choose random turn end".into()))
    }
}
