//! Services: orchestration on top of the domain reducer and the session store.

pub mod game_flow;

pub use game_flow::{GameFlowMutationResult, GameFlowService};
