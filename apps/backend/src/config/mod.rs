//! Configuration read from the environment.

pub mod engine;

pub use engine::EngineConfig;
