#![allow(dead_code)]

// tests/common/mod.rs
use rump_backend::domain::state::{GameSession, PlayerId};
use rump_backend::errors::ErrorCode;
use rump_backend::AppError;

// Logging is auto-installed for every test binary that mounts `common`
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Assert an error carries `code`, with a readable failure message.
pub fn assert_code<T: std::fmt::Debug>(result: Result<T, AppError>, code: ErrorCode) -> AppError {
    match result {
        Ok(value) => panic!("expected {code}, got Ok({value:?})"),
        Err(err) => {
            assert_eq!(err.code(), code, "unexpected error: {err}");
            err
        }
    }
}

/// The player whose turn it is; panics outside a started round.
pub fn turn_holder(session: &GameSession) -> PlayerId {
    session
        .current_turn
        .clone()
        .expect("a round should be in play")
}
