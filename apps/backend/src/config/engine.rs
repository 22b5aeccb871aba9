use std::env;

use crate::error::AppError;

pub const DEFAULT_COMMIT_RETRIES: u32 = 3;
pub const DEFAULT_BROADCAST_CAPACITY: usize = 64;

/// Runtime knobs for the game-flow service and the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Extra attempts `GameFlowService::submit` makes after a retryable conflict.
    pub commit_retries: u32,
    /// Per-session buffer of committed snapshots kept for slow subscribers.
    pub broadcast_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            commit_retries: DEFAULT_COMMIT_RETRIES,
            broadcast_capacity: DEFAULT_BROADCAST_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Read `RUMP_COMMIT_RETRIES` and `RUMP_BROADCAST_CAPACITY`, falling back to defaults.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let commit_retries = parse_var(&lookup, "RUMP_COMMIT_RETRIES", DEFAULT_COMMIT_RETRIES)?;
        let broadcast_capacity =
            parse_var(&lookup, "RUMP_BROADCAST_CAPACITY", DEFAULT_BROADCAST_CAPACITY)?;
        if broadcast_capacity == 0 {
            return Err(AppError::config(
                "RUMP_BROADCAST_CAPACITY must be greater than zero",
            ));
        }
        Ok(Self {
            commit_retries,
            broadcast_capacity,
        })
    }
}

/// Parse an optional variable; unset means `default`, garbage is a config error.
fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|_| {
            AppError::config(format!(
                "Environment variable '{name}' has invalid value '{raw}'"
            ))
        }),
    }
}
