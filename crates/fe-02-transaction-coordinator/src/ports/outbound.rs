//! # Outbound Ports (Driven Ports)

use shared_bus::{EventQueue, QueueKind, QueuedEvent};

/// Lets the gate refuse a caller transaction while transactional events
/// are waiting.
pub trait PendingEventProbe {
    fn pending_transactional(&self) -> usize;
}

impl<E: QueuedEvent> PendingEventProbe for EventQueue<E> {
    fn pending_transactional(&self) -> usize {
        self.pending(QueueKind::Transactional)
    }
}

/// Probe for callers without an event queue.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPendingEvents;

impl PendingEventProbe for NoPendingEvents {
    fn pending_transactional(&self) -> usize {
        0
    }
}
