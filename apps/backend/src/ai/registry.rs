//! Registered AI implementations, looked up by stable name.
//!
//! To add one: implement `AiPlayer`, then append an `AiFactory` entry below.
//! Keep the order stable and constructors free of side effects.

use crate::ai::{AiPlayer, ArrangerPlayer, RandomPlayer};

/// Factory definition for constructing AI implementations.
pub struct AiFactory {
    pub name: &'static str,
    pub version: &'static str,
    pub make: fn(seed: Option<u64>) -> Box<dyn AiPlayer>,
}

static AI_FACTORIES: &[AiFactory] = &[
    AiFactory {
        name: ArrangerPlayer::NAME,
        version: ArrangerPlayer::VERSION,
        make: make_arranger,
    },
    AiFactory {
        name: RandomPlayer::NAME,
        version: RandomPlayer::VERSION,
        make: make_random_player,
    },
];

pub fn registered_ais() -> &'static [AiFactory] {
    AI_FACTORIES
}

pub fn by_name(name: &str) -> Option<&'static AiFactory> {
    registered_ais().iter().find(|factory| factory.name == name)
}

fn make_random_player(seed: Option<u64>) -> Box<dyn AiPlayer> {
    Box::new(RandomPlayer::new(seed))
}

fn make_arranger(_seed: Option<u64>) -> Box<dyn AiPlayer> {
    Box::new(ArrangerPlayer::new())
}
