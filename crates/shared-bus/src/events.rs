//! # Queued Events
//!
//! The queue is generic over its payload. Payloads describe themselves
//! through [`QueuedEvent`], which is all the queue needs to log and to
//! filter the persisted copy.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use thiserror::Error;

/// Payload carried by an [`crate::EventQueue`].
pub trait QueuedEvent: Clone + Debug + Send + Serialize + DeserializeOwned + 'static {
    /// Short static name of the event kind, used in logs and metrics.
    fn kind(&self) -> &'static str;

    /// Whether this event is replayed after a restart.
    ///
    /// Events meaningful only within the current power cycle (context
    /// activation, display notifications) return `false` and are left out of
    /// the persisted copy of the queue.
    fn survives_restart(&self) -> bool;
}

/// Which of the two queues an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueKind {
    /// Drained only under an open transaction.
    Transactional,
    /// Drained independently of transaction state.
    NonTransactional,
}

impl QueueKind {
    /// Label used in logs and metrics.
    pub const fn label(self) -> &'static str {
        match self {
            QueueKind::Transactional => "transactional",
            QueueKind::NonTransactional => "non_transactional",
        }
    }
}

/// Errors from queue persistence.
#[derive(Debug, Error)]
pub enum QueueError {
    /// The persisted queue could not be encoded.
    #[error("Failed to encode event queue: {0}")]
    Encode(String),

    /// The persisted queue could not be decoded.
    #[error("Failed to decode event queue: {0}")]
    Decode(String),
}
