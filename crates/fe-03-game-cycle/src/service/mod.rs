//! # Foundation Service
//!
//! `Foundation` is the context object the game holds: one per simulated
//! installation, no process-wide state.
//!
//! - `foundation` - construction, transactions, queries, transition plumbing
//! - `cycle` - game-cycle operations
//! - `money` - bets, credits, cashout
//! - `context` - theme context activation
//! - `history` - archive and browsing
//! - `dispatch` - event processing
//! - `restore` - warm-start validation
//! - `ledger` - `MeterLedger`

mod context;
mod cycle;
mod dispatch;
mod foundation;
mod history;
mod ledger;
mod money;
mod restore;

pub use foundation::{CycleFlags, Foundation, ThemeContext};
pub use ledger::MeterLedger;
