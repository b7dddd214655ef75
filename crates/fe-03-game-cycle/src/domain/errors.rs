//! # Domain Errors
//!
//! Every error surfaces synchronously to the caller of the violating
//! operation. An operation that fails leaves the game-cycle state and the
//! meters as they were.

use super::config::GameContextMode;
use super::meters::MeterViolation;
use super::state::{describe_states, GameCycleOperation, GameCycleState};
use fe_01_critical_store::StoreError;
use fe_02_transaction_coordinator::TransactionError;
use shared_bus::QueueError;
use shared_types::AddressError;
use thiserror::Error;

/// Errors from Foundation operations.
#[derive(Debug, Error)]
pub enum FoundationError {
    /// Transaction gate refused the call (includes `NoOpenTransaction`).
    #[error(transparent)]
    Transaction(#[from] TransactionError),

    /// The journal could not be opened.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Operation not valid in the current game-cycle state.
    #[error(
        "{operation} is illegal in state {current}; legal in {}",
        describe_states(.legal)
    )]
    IllegalStateTransition {
        operation: GameCycleOperation,
        current: GameCycleState,
        legal: &'static [GameCycleState],
    },

    /// Legal state, but a guard on the operation failed.
    #[error("{operation} rejected: requires {guard}")]
    GuardRejected {
        operation: GameCycleOperation,
        guard: &'static str,
    },

    /// Operation needs `Play` mode.
    #[error("{operation} requires Play mode, context is {mode}")]
    ContextModeMismatch {
        operation: GameCycleOperation,
        mode: GameContextMode,
    },

    /// Commit refused by the enforced-failure test hook.
    #[error("CommitGameCycle refused by enforced failure")]
    CommitRefused,

    /// Bet or meter arithmetic would break an invariant; nothing was changed.
    #[error("Invariant violation: {0}")]
    InvariantViolation(#[from] MeterViolation),

    /// Warm-start validation failed.
    #[error("Restore failed at {field}: {source}")]
    RestoreFailed {
        field: &'static str,
        #[source]
        source: RestoreError,
    },

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Queue(#[from] QueueError),

    /// A history record could not be encoded or decoded.
    #[error("History record codec error: {0}")]
    History(#[from] bincode::Error),
}

impl FoundationError {
    pub(crate) fn restore(field: &'static str, source: RestoreError) -> Self {
        FoundationError::RestoreFailed { field, source }
    }
}

/// Why a persisted field failed warm-start validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestoreError {
    #[error("field is missing")]
    Missing,

    #[error("expected {expected} bytes, found {actual}")]
    Malformed { expected: usize, actual: usize },

    #[error("negative meter value {0}")]
    NegativeMeter(i64),

    #[error("bet value {0} below the unset marker -1")]
    BetBelowUnset(i64),

    #[error("invalid game-cycle state enumerant {0}")]
    InvalidState(u8),

    #[error("pending events could not be decoded: {0}")]
    Events(String),
}
