//! Repository traits for domain layer.

pub mod sessions;

pub use sessions::{SessionPatch, SessionStore, WriteGuard};
