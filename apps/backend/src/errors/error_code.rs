//! Error codes for the Rump engine.
//!
//! This module defines all error codes surfaced to callers of the engine.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings a
//! transport layer would put on the wire.

use core::fmt;

/// Centralized error codes for the Rump engine.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Turn validation
    /// Command issued by a player who does not hold the turn
    NotYourTurn,
    /// Second draw attempted within the same turn
    AlreadyDrawn,
    /// Discard or Rump attempted before drawing
    MustDrawFirst,
    /// Chosen draw pile is empty
    SourceEmpty,
    /// Hand already holds the maximum number of cards
    HandFull,
    /// Hand index out of range
    InvalidIndex,
    /// Rump declared with a hand that does not group fully
    InvalidRumpAttempt,

    // Lifecycle validation
    /// Command not allowed in the current round status
    PhaseMismatch,
    /// Game already finished
    GameOver,
    /// Only the host may perform this operation
    NotHost,
    /// Player id is not seated in the session
    UnknownPlayer,
    /// Roster size outside the supported range
    InvalidPlayerCount,
    /// Same player id seated twice
    DuplicatePlayer,
    /// Parse card error
    ParseCard,
    /// General validation error
    ValidationError,

    // Concurrency
    /// Session changed since it was read (retry)
    StaleSnapshot,
    /// Hand changed since it was read (retry)
    HandChanged,
    /// Session id already registered in the store
    SessionExists,

    // Resource Not Found
    /// Session not found
    SessionNotFound,

    // System Errors
    /// Internal error
    InternalError,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::AlreadyDrawn => "ALREADY_DRAWN",
            Self::MustDrawFirst => "MUST_DRAW_FIRST",
            Self::SourceEmpty => "SOURCE_EMPTY",
            Self::HandFull => "HAND_FULL",
            Self::InvalidIndex => "INVALID_INDEX",
            Self::InvalidRumpAttempt => "INVALID_RUMP_ATTEMPT",

            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::GameOver => "GAME_OVER",
            Self::NotHost => "NOT_HOST",
            Self::UnknownPlayer => "UNKNOWN_PLAYER",
            Self::InvalidPlayerCount => "INVALID_PLAYER_COUNT",
            Self::DuplicatePlayer => "DUPLICATE_PLAYER",
            Self::ParseCard => "PARSE_CARD",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::StaleSnapshot => "STALE_SNAPSHOT",
            Self::HandChanged => "HAND_CHANGED",
            Self::SessionExists => "SESSION_EXISTS",

            Self::SessionNotFound => "SESSION_NOT_FOUND",

            Self::InternalError => "INTERNAL_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
