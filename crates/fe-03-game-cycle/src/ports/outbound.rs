//! # Outbound Ports (Driven Ports)
//!
//! Collaborators the state machine calls synchronously. Their business
//! rules live elsewhere.

use crate::domain::events::FoundationEvent;
use crate::domain::meters::BetLimits;
use fe_02_transaction_coordinator::{CriticalStore, TransactionError};
use shared_bus::QueueKind;
use shared_types::BaseUnits;

/// Source of the active payvar's bet limits.
pub trait BetLimitProvider: Send {
    fn bet_limits(&self) -> BetLimits;
}

/// Fixed limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticBetLimits(pub BetLimits);

impl BetLimitProvider for StaticBetLimits {
    fn bet_limits(&self) -> BetLimits {
        self.0
    }
}

/// Progressive-jackpot contribution subsystem.
///
/// Both hooks run inside the caller's transaction and may use the store.
pub trait ProgressiveSink: Send {
    /// Called when play starts, with the starting bet.
    fn contribute(
        &mut self,
        store: &mut dyn CriticalStore,
        game_cycle: u64,
        starting_bet: BaseUnits,
    ) -> Result<(), TransactionError>;

    /// Called when the outcome is finalized, with the total win.
    fn finalize(
        &mut self,
        store: &mut dyn CriticalStore,
        game_cycle: u64,
        win: BaseUnits,
    ) -> Result<(), TransactionError>;
}

/// No linked progressives.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgressiveSink;

impl ProgressiveSink for NullProgressiveSink {
    fn contribute(
        &mut self,
        _store: &mut dyn CriticalStore,
        _game_cycle: u64,
        _starting_bet: BaseUnits,
    ) -> Result<(), TransactionError> {
        Ok(())
    }

    fn finalize(
        &mut self,
        _store: &mut dyn CriticalStore,
        _game_cycle: u64,
        _win: BaseUnits,
    ) -> Result<(), TransactionError> {
        Ok(())
    }
}

/// Receives every dispatched event, handled or not.
pub trait EventObserver: Send {
    fn on_dispatched(&mut self, event: &FoundationEvent, queue: QueueKind);
}
