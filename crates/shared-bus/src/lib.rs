//! # Shared Bus - Foundation Event Queues
//!
//! Notifications from the Foundation to the game flow through two
//! independent FIFO queues:
//!
//! ```text
//!                post()                  drain(pace) [needs a transaction]
//! any thread ───────────→ transactional ───────────────────────────→ dispatcher
//!                                │
//!                                └── persisted_snapshot() ──→ critical store
//!                                     (only events that survive a restart)
//!
//!    post_non_transactional()            drain(pace) [no transaction needed]
//! any thread ───────────→ non-transactional ───────────────────────→ dispatcher
//! ```
//!
//! ## Rules
//!
//! - Posting is the only operation allowed from any thread while a
//!   transaction is open elsewhere; it appends under the queue lock and
//!   signals waiters.
//! - Draining pops at most `pace` events under the same lock, then dispatches
//!   them in FIFO order with the lock released so handlers may post again.
//! - Which events are replayed after a restart is decided per event by
//!   [`QueuedEvent::survives_restart`].

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod poster;
pub mod queue;

// Re-export main types
pub use events::{QueueError, QueueKind, QueuedEvent};
pub use poster::EventPoster;
pub use queue::EventQueue;

/// Events dispatched per processing pass unless configured otherwise.
pub const DEFAULT_EVENT_PACE: usize = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pace() {
        assert_eq!(DEFAULT_EVENT_PACE, 1);
    }
}
