//! # Game Cycle (fe-03)
//!
//! The game-cycle state machine, the meter ledger and the `Foundation`
//! context object a game holds for one simulated installation.
//!
//! ## Architecture
//!
//! ```text
//! game ──open_transaction──→ Foundation ──begin(op)──→ transaction? mode? state? guard?
//!                               │
//!                               ├── MeterLedger ──write──→ GuardedStore ──→ AddressedStore
//!                               ├── transition(to) ──write state──→ GuardedStore
//!                               └── post(event) ──→ EventQueue
//! game ──close_transaction──→ persist PendingEvents ──→ DurableJournal::commit
//! game ──process_events────→ system transaction ──→ drain(pace) ──→ dispatch ──→ observer
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Guarded operations | Every operation needs an open transaction, Play mode and a legal state |
//! | 2 | Check then write | A rejected operation leaves state and meters unchanged |
//! | 3 | Store first | A meter or state change is written before memory is updated |
//! | 4 | Bet invariant | `requested ≤ available`, `accumulated ≤ max`, `accumulated = 0 ∨ ≥ min`, overflow-checked |
//! | 5 | Replay filter | Only events that survive a restart are persisted with the queue |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - States and transitions, meters, events, persisted fields, history, config, errors
//! - `ports/` - Bet limits, progressive sink, dispatch observer
//! - `service/` - `Foundation`, `MeterLedger`
//!
//! ## Usage
//!
//! ```ignore
//! use fe_03_game_cycle::{Foundation, FoundationConfig, GameOutcome};
//!
//! let mut foundation = Foundation::open(FoundationConfig::file_backed("/var/fe"))?;
//! foundation.transaction(|f| {
//!     f.commit_game_cycle()?;
//!     f.commit_bet(100, Denomination::UNIT)?;
//!     f.enroll_game_cycle()
//! })?;
//! foundation.process_all_events()?;
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod domain;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use domain::config::{FoundationConfig, GameContextMode};
pub use domain::errors::{FoundationError, RestoreError};
pub use domain::events::FoundationEvent;
pub use domain::fields::Field;
pub use domain::history::{GameOutcome, HistoryRecord, HistorySummary, WagerCategoryUsage};
pub use domain::meters::{check_bet, BetLimits, Meter, MeterSet, MeterViolation};
pub use domain::state::{GameCycleOperation, GameCycleState, PlayPhase};
pub use ports::outbound::{
    BetLimitProvider, EventObserver, NullProgressiveSink, ProgressiveSink, StaticBetLimits,
};
pub use service::{CycleFlags, Foundation, MeterLedger, ThemeContext};
