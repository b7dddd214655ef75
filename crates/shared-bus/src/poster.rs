//! Cloneable posting handle.

use crate::events::QueuedEvent;
use crate::queue::EventQueue;
use std::sync::Arc;

/// Handle that may post events from any thread.
///
/// Posting never requires an open transaction; the poster only appends.
#[derive(Debug)]
pub struct EventPoster<E> {
    queue: Arc<EventQueue<E>>,
}

impl<E> Clone for EventPoster<E> {
    fn clone(&self) -> Self {
        Self {
            queue: Arc::clone(&self.queue),
        }
    }
}

impl<E: QueuedEvent> EventPoster<E> {
    pub fn new(queue: Arc<EventQueue<E>>) -> Self {
        Self { queue }
    }

    /// Post to the transactional queue.
    pub fn post(&self, event: E) {
        self.queue.post(event);
    }

    /// Post to the non-transactional queue.
    pub fn post_non_transactional(&self, event: E) {
        self.queue.post_non_transactional(event);
    }
}
