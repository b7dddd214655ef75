//! # Event Queue
//!
//! Two FIFO queues behind one lock and one condition variable.

use crate::events::{QueueError, QueueKind, QueuedEvent};
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

#[derive(Debug)]
struct Queues<E> {
    transactional: VecDeque<E>,
    non_transactional: VecDeque<E>,
}

impl<E> Queues<E> {
    fn get_mut(&mut self, kind: QueueKind) -> &mut VecDeque<E> {
        match kind {
            QueueKind::Transactional => &mut self.transactional,
            QueueKind::NonTransactional => &mut self.non_transactional,
        }
    }

    fn is_empty(&self) -> bool {
        self.transactional.is_empty() && self.non_transactional.is_empty()
    }
}

/// Transactional and non-transactional event queues.
///
/// Shared between the owning context and any number of
/// [`crate::EventPoster`] handles.
#[derive(Debug)]
pub struct EventQueue<E> {
    queues: Mutex<Queues<E>>,
    signal: Condvar,
    events_posted: AtomicU64,
    events_dispatched: AtomicU64,
}

impl<E: QueuedEvent> EventQueue<E> {
    /// Create an empty queue pair.
    #[must_use]
    pub fn new() -> Self {
        Self {
            queues: Mutex::new(Queues {
                transactional: VecDeque::new(),
                non_transactional: VecDeque::new(),
            }),
            signal: Condvar::new(),
            events_posted: AtomicU64::new(0),
            events_dispatched: AtomicU64::new(0),
        }
    }

    /// Append to the transactional queue and wake any waiter.
    pub fn post(&self, event: E) {
        self.push(QueueKind::Transactional, event);
    }

    /// Append to the non-transactional queue and wake any waiter.
    pub fn post_non_transactional(&self, event: E) {
        self.push(QueueKind::NonTransactional, event);
    }

    fn push(&self, kind: QueueKind, event: E) {
        let event_kind = event.kind();
        {
            let mut queues = self.queues.lock();
            queues.get_mut(kind).push_back(event);
        }
        self.events_posted.fetch_add(1, Ordering::Relaxed);
        self.signal.notify_all();
        trace!(queue = kind.label(), kind = event_kind, "Event posted");
    }

    /// Number of events waiting in a queue.
    pub fn pending(&self, kind: QueueKind) -> usize {
        self.queues.lock().get_mut(kind).len()
    }

    /// Whether the transactional queue holds undispatched events.
    pub fn has_pending_transactional(&self) -> bool {
        self.pending(QueueKind::Transactional) > 0
    }

    /// Total events ever posted to either queue.
    pub fn events_posted(&self) -> u64 {
        self.events_posted.load(Ordering::Relaxed)
    }

    /// Total events ever handed to a dispatcher.
    pub fn events_dispatched(&self) -> u64 {
        self.events_dispatched.load(Ordering::Relaxed)
    }

    /// Remove up to `pace` events in FIFO order and hand each to `dispatch`.
    ///
    /// The batch is taken under the lock; dispatch runs with the lock
    /// released. If `dispatch` fails, the failing event and the rest of the
    /// batch are put back at the front of the queue in their original order
    /// and the error is returned.
    pub fn drain<F, Err>(&self, kind: QueueKind, pace: usize, mut dispatch: F) -> Result<usize, Err>
    where
        F: FnMut(E) -> Result<(), Err>,
    {
        let mut batch: VecDeque<E> = {
            let mut queues = self.queues.lock();
            let queue = queues.get_mut(kind);
            let take = pace.min(queue.len());
            queue.drain(..take).collect()
        };

        let mut dispatched = 0;
        while let Some(event) = batch.pop_front() {
            let retry = event.clone();
            debug!(queue = kind.label(), kind = event.kind(), "Dispatching event");
            if let Err(e) = dispatch(event) {
                batch.push_front(retry);
                let mut queues = self.queues.lock();
                let queue = queues.get_mut(kind);
                while let Some(undelivered) = batch.pop_back() {
                    queue.push_front(undelivered);
                }
                self.events_dispatched
                    .fetch_add(dispatched as u64, Ordering::Relaxed);
                return Err(e);
            }
            dispatched += 1;
        }

        self.events_dispatched
            .fetch_add(dispatched as u64, Ordering::Relaxed);
        Ok(dispatched)
    }

    /// Copy of the transactional queue restricted to events that survive a
    /// restart.
    pub fn persisted_snapshot(&self) -> Vec<E> {
        self.queues
            .lock()
            .transactional
            .iter()
            .filter(|event| event.survives_restart())
            .cloned()
            .collect()
    }

    /// Encode [`Self::persisted_snapshot`] for the critical store.
    pub fn encode_persisted(&self) -> Result<Vec<u8>, QueueError> {
        bincode::serialize(&self.persisted_snapshot()).map_err(|e| QueueError::Encode(e.to_string()))
    }

    /// Replace the transactional queue with events restored after a restart.
    ///
    /// Returns the number of events restored.
    pub fn restore_from_bytes(&self, bytes: &[u8]) -> Result<usize, QueueError> {
        let events: Vec<E> =
            bincode::deserialize(bytes).map_err(|e| QueueError::Decode(e.to_string()))?;
        let restored = events.len();
        {
            let mut queues = self.queues.lock();
            queues.transactional = events.into_iter().collect();
        }
        if restored > 0 {
            self.signal.notify_all();
        }
        Ok(restored)
    }

    /// Block until either queue holds an event.
    ///
    /// Returns `true` if an event is pending, `false` if `timeout` elapsed
    /// first. `None` waits indefinitely.
    pub fn wait_for_event(&self, timeout: Option<Duration>) -> bool {
        let deadline = timeout.map(|t| Instant::now() + t);
        let mut queues = self.queues.lock();
        while queues.is_empty() {
            match deadline {
                Some(deadline) => {
                    if self.signal.wait_until(&mut queues, deadline).timed_out() {
                        return !queues.is_empty();
                    }
                }
                None => self.signal.wait(&mut queues),
            }
        }
        true
    }
}

impl<E: QueuedEvent> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    enum TestEvent {
        Durable(u32),
        PowerCycleOnly(u32),
    }

    impl QueuedEvent for TestEvent {
        fn kind(&self) -> &'static str {
            match self {
                TestEvent::Durable(_) => "Durable",
                TestEvent::PowerCycleOnly(_) => "PowerCycleOnly",
            }
        }

        fn survives_restart(&self) -> bool {
            matches!(self, TestEvent::Durable(_))
        }
    }

    fn collect(
        queue: &EventQueue<TestEvent>,
        kind: QueueKind,
        pace: usize,
    ) -> Vec<TestEvent> {
        let mut seen = Vec::new();
        queue
            .drain(kind, pace, |e| {
                seen.push(e);
                Ok::<(), ()>(())
            })
            .unwrap();
        seen
    }

    #[test]
    fn test_drain_respects_pace_and_order() {
        let queue = EventQueue::new();
        for i in 0..3 {
            queue.post(TestEvent::Durable(i));
        }

        assert_eq!(collect(&queue, QueueKind::Transactional, 1), vec![TestEvent::Durable(0)]);
        assert_eq!(
            collect(&queue, QueueKind::Transactional, 5),
            vec![TestEvent::Durable(1), TestEvent::Durable(2)]
        );
        assert!(!queue.has_pending_transactional());
        assert_eq!(queue.events_dispatched(), 3);
    }

    #[test]
    fn test_queues_are_independent() {
        let queue = EventQueue::new();
        queue.post(TestEvent::Durable(1));
        queue.post_non_transactional(TestEvent::PowerCycleOnly(2));

        assert_eq!(
            collect(&queue, QueueKind::NonTransactional, 10),
            vec![TestEvent::PowerCycleOnly(2)]
        );
        assert_eq!(queue.pending(QueueKind::Transactional), 1);
    }

    #[test]
    fn test_failed_dispatch_requeues_in_order() {
        let queue = EventQueue::new();
        for i in 0..3 {
            queue.post(TestEvent::Durable(i));
        }

        let result = queue.drain(QueueKind::Transactional, 3, |e| match e {
            TestEvent::Durable(1) => Err("boom"),
            _ => Ok(()),
        });
        assert_eq!(result, Err("boom"));
        assert_eq!(
            collect(&queue, QueueKind::Transactional, 10),
            vec![TestEvent::Durable(1), TestEvent::Durable(2)]
        );
    }

    #[test]
    fn test_persisted_snapshot_filters_power_cycle_events() {
        let queue = EventQueue::new();
        queue.post(TestEvent::PowerCycleOnly(1));
        queue.post(TestEvent::Durable(2));

        let bytes = queue.encode_persisted().unwrap();
        let restored: EventQueue<TestEvent> = EventQueue::new();
        assert_eq!(restored.restore_from_bytes(&bytes).unwrap(), 1);
        assert_eq!(
            collect(&restored, QueueKind::Transactional, 10),
            vec![TestEvent::Durable(2)]
        );
    }

    #[test]
    fn test_restore_rejects_garbage() {
        let queue: EventQueue<TestEvent> = EventQueue::new();
        assert!(matches!(
            queue.restore_from_bytes(&[0xFF; 3]),
            Err(QueueError::Decode(_))
        ));
    }

    #[test]
    fn test_wait_times_out_when_empty() {
        let queue: EventQueue<TestEvent> = EventQueue::new();
        assert!(!queue.wait_for_event(Some(Duration::from_millis(20))));
    }

    #[test]
    fn test_wait_wakes_on_post_from_other_thread() {
        let queue = Arc::new(EventQueue::new());
        let poster = Arc::clone(&queue);
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            poster.post(TestEvent::Durable(7));
        });

        assert!(queue.wait_for_event(Some(Duration::from_secs(5))));
        handle.join().unwrap();
        assert_eq!(queue.events_posted(), 1);
    }
}
