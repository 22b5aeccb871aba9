#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod ai;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod repos;
pub mod services;
pub mod telemetry;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use adapters::InMemorySessionStore;
pub use config::EngineConfig;
pub use error::AppError;
pub use errors::ErrorCode;
pub use repos::{SessionPatch, SessionStore, WriteGuard};
pub use services::{GameFlowMutationResult, GameFlowService};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
