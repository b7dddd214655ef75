//! # Domain Layer
//!
//! - `state` - game-cycle states, operations and the transition graph
//! - `meters` - meter set and the bet invariant
//! - `events` - `FoundationEvent`
//! - `fields` - fixed addresses of Foundation-owned data
//! - `history` - history ring and outcome types
//! - `config` - `FoundationConfig`
//! - `errors` - `FoundationError`, `RestoreError`

pub mod config;
pub mod errors;
pub mod events;
pub mod fields;
pub mod history;
pub mod meters;
pub mod state;
