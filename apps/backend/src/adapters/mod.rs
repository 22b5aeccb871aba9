//! Adapters for external dependencies.

pub mod sessions_mem;

pub use sessions_mem::InMemorySessionStore;
