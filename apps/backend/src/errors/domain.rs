//! Domain-level error type used across the engine, services and adapters.
//!
//! This error type is transport- and storage-agnostic. Services return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Validation failures: the command is rejected and state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    NotYourTurn,
    AlreadyDrawn,
    MustDrawFirst,
    SourceEmpty,
    HandFull,
    InvalidIndex,
    InvalidRumpAttempt,
    PhaseMismatch,
    GameOver,
    NotHost,
    UnknownPlayer,
    InvalidPlayerCount,
    DuplicatePlayer,
    ParseCard,
    Other(String),
}

/// Domain-level conflict kinds. All of them are retryable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// The session version moved on since the snapshot was read.
    StaleSnapshot,
    /// The acting player's hand changed since it was read.
    HandChanged,
    /// A session with the same id is already stored.
    SessionExists,
}

/// Domain-level not found entities.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Session,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Rule violation; the command was a no-op
    Validation(ValidationKind, String),
    /// Optimistic-concurrency conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }

    /// The validation kind, if this is a validation failure.
    pub fn validation_kind(&self) -> Option<&ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(kind),
            _ => None,
        }
    }

    /// Conflicts mean "re-read and resubmit".
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::Conflict(..))
    }
}
