//! # Transaction Coordinator Service
//!
//! ```text
//!            open_caller_transaction        open_system_transaction
//!   None ───────────────────────→ Caller    None ─────────────────→ System
//!    ▲                              │        ▲                        │
//!    └──── close_transaction ───────┘        └─ close_system_txn ─────┘
//!          (commit; on failure stays open)
//! ```
//!
//! Every store access goes through [`GuardedStore`], which re-checks that a
//! transaction is open on each call.

mod coordinator;
mod guarded;

pub use coordinator::TransactionCoordinator;
pub use guarded::GuardedStore;
