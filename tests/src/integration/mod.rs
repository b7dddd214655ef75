//! Cross-crate integration properties.

pub mod bet_invariant;
pub mod commit_atomicity;
pub mod event_replay;
pub mod game_cycle_flow;
pub mod store_contract;
pub mod transition_guards;
