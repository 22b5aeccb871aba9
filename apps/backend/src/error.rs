use thiserror::Error;

use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::errors::ErrorCode;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Stable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Internal { .. } => ErrorCode::InternalError,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            AppError::Validation { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Internal { detail }
            | AppError::Config { detail } => detail,
        }
    }

    /// Re-reading the session and resubmitting may succeed.
    ///
    /// A taken session id stays taken, so `SESSION_EXISTS` is not retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Conflict { code, .. } => *code != ErrorCode::SessionExists,
            _ => false,
        }
    }

    /// The client's view of the session is gone for good.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AppError::NotFound {
                code: ErrorCode::SessionNotFound,
                ..
            }
        )
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}

impl From<ValidationKind> for ErrorCode {
    fn from(kind: ValidationKind) -> Self {
        match kind {
            ValidationKind::NotYourTurn => ErrorCode::NotYourTurn,
            ValidationKind::AlreadyDrawn => ErrorCode::AlreadyDrawn,
            ValidationKind::MustDrawFirst => ErrorCode::MustDrawFirst,
            ValidationKind::SourceEmpty => ErrorCode::SourceEmpty,
            ValidationKind::HandFull => ErrorCode::HandFull,
            ValidationKind::InvalidIndex => ErrorCode::InvalidIndex,
            ValidationKind::InvalidRumpAttempt => ErrorCode::InvalidRumpAttempt,
            ValidationKind::PhaseMismatch => ErrorCode::PhaseMismatch,
            ValidationKind::GameOver => ErrorCode::GameOver,
            ValidationKind::NotHost => ErrorCode::NotHost,
            ValidationKind::UnknownPlayer => ErrorCode::UnknownPlayer,
            ValidationKind::InvalidPlayerCount => ErrorCode::InvalidPlayerCount,
            ValidationKind::DuplicatePlayer => ErrorCode::DuplicatePlayer,
            ValidationKind::ParseCard => ErrorCode::ParseCard,
            ValidationKind::Other(_) => ErrorCode::ValidationError,
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => AppError::invalid(kind.into(), detail),
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::StaleSnapshot => ErrorCode::StaleSnapshot,
                    ConflictKind::HandChanged => ErrorCode::HandChanged,
                    ConflictKind::SessionExists => ErrorCode::SessionExists,
                };
                AppError::conflict(code, detail)
            }
            DomainError::NotFound(kind, detail) => match kind {
                NotFoundKind::Session => AppError::not_found(ErrorCode::SessionNotFound, detail),
                NotFoundKind::Other(what) => {
                    AppError::internal(format!("missing {what}: {detail}"))
                }
            },
        }
    }
}
