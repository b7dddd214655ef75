//! # Transaction Coordinator (fe-02)
//!
//! Gates every access to the critical data store behind a single open
//! transaction and commits the journal when that transaction closes.
//!
//! ## Rules
//!
//! | Rule | Description |
//! |------|-------------|
//! | Single owner | At most one of Caller or System holds the transaction |
//! | Drain first | A caller transaction may not open over pending transactional events |
//! | Guarded access | Every store operation fails with `NoOpenTransaction` when nothing is open |
//! | Commit on close | Closing commits the whole working store; a failed commit keeps the transaction open |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Ownership state and errors
//! - `ports/` - `CriticalStore` (inbound), `PendingEventProbe` (outbound)
//! - `service/` - `TransactionCoordinator`, `GuardedStore`
//!
//! ## Usage
//!
//! ```ignore
//! use fe_02_transaction_coordinator::{CriticalStore, NoPendingEvents, TransactionCoordinator};
//!
//! let mut coordinator = TransactionCoordinator::open(&config)?;
//! coordinator.open_caller_transaction(&NoPendingEvents)?;
//! coordinator.store()?.write(&address, bytes)?;
//! coordinator.close_transaction()?;
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::errors::TransactionError;
pub use domain::owner::{TransactionOwner, TransactionState};
pub use ports::inbound::CriticalStore;
pub use ports::outbound::{NoPendingEvents, PendingEventProbe};
pub use service::{GuardedStore, TransactionCoordinator};
