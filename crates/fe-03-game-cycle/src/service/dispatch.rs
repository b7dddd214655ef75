//! # Event Dispatch
//!
//! Each processing pass dispatches at most `event_pace` events in FIFO
//! order. Every event goes through one exhaustive `match`, then to the
//! registered observer.

use super::foundation::Foundation;
use crate::domain::errors::FoundationError;
use crate::domain::events::FoundationEvent;
use fe_telemetry::metrics;
use shared_bus::{QueueKind, QueuedEvent};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

impl Foundation {
    /// Dispatch up to `event_pace` transactional events under a system
    /// transaction, persist the replayable remainder and commit.
    ///
    /// Returns 0 without doing anything if a transaction is already open or
    /// nothing is pending.
    pub fn process_events(&mut self) -> Result<usize, FoundationError> {
        if !self.events.has_pending_transactional() {
            return Ok(0);
        }
        if !self.coordinator.open_system_transaction() {
            debug!(owner = %self.coordinator.owner(), "Event processing deferred");
            return Ok(0);
        }

        let events = Arc::clone(&self.events);
        let dispatched = events.drain(QueueKind::Transactional, self.config.event_pace, |event| {
            self.dispatch(event, QueueKind::Transactional)
        });
        let persisted = self.persist_pending_events();
        let committed = self.coordinator.close_system_transaction();

        let dispatched = dispatched?;
        persisted?;
        committed?;
        Ok(dispatched)
    }

    /// Run [`Self::process_events`] until the transactional queue is empty
    /// or processing is deferred.
    pub fn process_all_events(&mut self) -> Result<usize, FoundationError> {
        let mut total = 0;
        loop {
            match self.process_events()? {
                0 => return Ok(total),
                n => total += n,
            }
        }
    }

    /// Dispatch up to `event_pace` non-transactional events. Needs no
    /// transaction.
    pub fn process_non_transactional_events(&mut self) -> Result<usize, FoundationError> {
        let events = Arc::clone(&self.events);
        events.drain(
            QueueKind::NonTransactional,
            self.config.event_pace,
            |event| self.dispatch(event, QueueKind::NonTransactional),
        )
    }

    /// Block until either queue holds an event or `timeout` elapses.
    pub fn wait_for_event(&self, timeout: Option<Duration>) -> bool {
        self.events.wait_for_event(timeout)
    }

    fn dispatch(&mut self, event: FoundationEvent, queue: QueueKind) -> Result<(), FoundationError> {
        match &event {
            FoundationEvent::EnrollResponse {
                game_cycle,
                succeeded,
            } => {
                info!(game_cycle, succeeded, "[fe-03] Enrollment response delivered");
            }
            FoundationEvent::OutcomeAdjusted {
                state,
                accumulated_win,
                is_final,
            } => {
                debug!(state = %state, accumulated_win, is_final, "Outcome adjustment delivered");
            }
            FoundationEvent::FinalizeAwardResponse { game_cycle, win } => {
                info!(game_cycle, win, "[fe-03] Award finalized");
            }
            FoundationEvent::GameCycleEnded {
                game_cycle,
                history_record,
            } => {
                debug!(game_cycle, history_record, "Game cycle end delivered");
            }
            FoundationEvent::ThemeContextActivated { theme, payvar, mode } => {
                info!(theme = %theme, payvar = %payvar, mode = %mode, "[fe-03] Theme context activated");
            }
            FoundationEvent::ThemeContextInactivated => {
                info!("[fe-03] Theme context inactivated");
            }
            FoundationEvent::MoneyChanged {
                wagerable,
                bank,
                paid,
            } => {
                debug!(wagerable, bank, paid, "Money change delivered");
            }
            FoundationEvent::CashoutRequested { amount } => {
                info!(amount, "[fe-03] Cashout requested");
            }
        }

        metrics::record_event_dispatched(queue.label());
        debug!(
            kind = event.kind(),
            persisted = event.survives_restart(),
            "Event dispatched"
        );
        if let Some(observer) = self.observer.as_mut() {
            observer.on_dispatched(&event, queue);
        }
        Ok(())
    }
}
