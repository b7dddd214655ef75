//! # Meter Ledger
//!
//! In-memory mirror of the persisted meters. A setter writes the store first
//! and updates the mirror only after the write succeeded, so the store never
//! runs ahead of memory. Setting a meter to its current value writes nothing.

use crate::domain::errors::{FoundationError, RestoreError};
use crate::domain::fields::{decode_i64, encode_i64};
use crate::domain::meters::{balance_from_raw, bet_from_raw, bet_to_raw, to_raw, Meter, MeterSet};
use fe_01_critical_store::AddressedStore;
use fe_02_transaction_coordinator::CriticalStore;
use shared_types::{Address, BaseUnits};
use tracing::trace;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeterLedger {
    meters: MeterSet,
}

fn address(meter: Meter) -> Result<Address, FoundationError> {
    Ok(Address::new(Meter::SECTION, Meter::scope(), meter.path())?)
}

fn record<T: PartialEq>(
    store: &mut dyn CriticalStore,
    meter: Meter,
    slot: &mut T,
    value: T,
    raw: i64,
) -> Result<bool, FoundationError> {
    if *slot == value {
        return Ok(false);
    }
    store.write(&address(meter)?, encode_i64(raw))?;
    *slot = value;
    trace!(meter = meter.path(), raw, "Meter updated");
    Ok(true)
}

impl MeterLedger {
    pub fn meters(&self) -> &MeterSet {
        &self.meters
    }

    /// Write every meter unconditionally (cold start).
    pub fn initialize(&mut self, store: &mut dyn CriticalStore) -> Result<(), FoundationError> {
        let meters = MeterSet::default();
        for meter in Meter::ALL {
            store.write(&address(meter)?, encode_i64(meters.raw(meter)?))?;
        }
        self.meters = meters;
        Ok(())
    }

    /// Load and validate the persisted meters (warm start).
    pub fn restore(store: &AddressedStore) -> Result<Self, FoundationError> {
        let raw = |meter: Meter| -> Result<i64, FoundationError> {
            store
                .read(&address(meter)?)
                .ok_or(RestoreError::Missing)
                .and_then(decode_i64)
                .map_err(|e| FoundationError::restore(meter.path(), e))
        };
        let balance = |meter: Meter| -> Result<BaseUnits, FoundationError> {
            balance_from_raw(raw(meter)?).map_err(|e| FoundationError::restore(meter.path(), e))
        };
        let bet = |meter: Meter| -> Result<Option<BaseUnits>, FoundationError> {
            bet_from_raw(raw(meter)?).map_err(|e| FoundationError::restore(meter.path(), e))
        };

        Ok(Self {
            meters: MeterSet {
                wagerable: balance(Meter::Wagerable)?,
                bank: balance(Meter::Bank)?,
                paid: balance(Meter::Paid)?,
                committed_bet: bet(Meter::CommittedBet)?,
                starting_bet: bet(Meter::StartingBet)?,
                mid_game_bet: balance(Meter::MidGameBet)?,
            },
        })
    }

    pub fn set_wagerable(
        &mut self,
        store: &mut dyn CriticalStore,
        value: BaseUnits,
    ) -> Result<bool, FoundationError> {
        let raw = to_raw(Meter::Wagerable, value)?;
        record(store, Meter::Wagerable, &mut self.meters.wagerable, value, raw)
    }

    pub fn set_bank(
        &mut self,
        store: &mut dyn CriticalStore,
        value: BaseUnits,
    ) -> Result<bool, FoundationError> {
        let raw = to_raw(Meter::Bank, value)?;
        record(store, Meter::Bank, &mut self.meters.bank, value, raw)
    }

    pub fn set_paid(
        &mut self,
        store: &mut dyn CriticalStore,
        value: BaseUnits,
    ) -> Result<bool, FoundationError> {
        let raw = to_raw(Meter::Paid, value)?;
        record(store, Meter::Paid, &mut self.meters.paid, value, raw)
    }

    pub fn set_committed_bet(
        &mut self,
        store: &mut dyn CriticalStore,
        bet: Option<BaseUnits>,
    ) -> Result<bool, FoundationError> {
        let raw = bet_to_raw(Meter::CommittedBet, bet)?;
        record(store, Meter::CommittedBet, &mut self.meters.committed_bet, bet, raw)
    }

    pub fn set_starting_bet(
        &mut self,
        store: &mut dyn CriticalStore,
        bet: Option<BaseUnits>,
    ) -> Result<bool, FoundationError> {
        let raw = bet_to_raw(Meter::StartingBet, bet)?;
        record(store, Meter::StartingBet, &mut self.meters.starting_bet, bet, raw)
    }

    pub fn set_mid_game_bet(
        &mut self,
        store: &mut dyn CriticalStore,
        value: BaseUnits,
    ) -> Result<bool, FoundationError> {
        let raw = to_raw(Meter::MidGameBet, value)?;
        record(store, Meter::MidGameBet, &mut self.meters.mid_game_bet, value, raw)
    }

    /// Unset both bets and zero the mid-game accumulator.
    pub fn reset_bets(&mut self, store: &mut dyn CriticalStore) -> Result<(), FoundationError> {
        self.set_committed_bet(store, None)?;
        self.set_starting_bet(store, None)?;
        self.set_mid_game_bet(store, 0)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fe_01_critical_store::JournalConfig;
    use fe_02_transaction_coordinator::{NoPendingEvents, TransactionCoordinator};

    fn open() -> TransactionCoordinator {
        let mut coordinator = TransactionCoordinator::open(&JournalConfig::memory_only()).unwrap();
        coordinator.open_caller_transaction(&NoPendingEvents).unwrap();
        coordinator
    }

    #[test]
    fn test_noop_write_is_suppressed() {
        let mut coordinator = open();
        let mut ledger = MeterLedger::default();
        let mut store = coordinator.store().unwrap();

        assert!(!ledger.set_bank(&mut store, 0).unwrap());
        assert!(!store.contains(&address(Meter::Bank).unwrap()).unwrap());

        assert!(ledger.set_bank(&mut store, 1000).unwrap());
        assert!(!ledger.set_bank(&mut store, 1000).unwrap());
        assert_eq!(
            store.read(&address(Meter::Bank).unwrap()).unwrap(),
            Some(encode_i64(1000))
        );
    }

    #[test]
    fn test_out_of_range_value_rejected_before_write() {
        let mut coordinator = open();
        let mut ledger = MeterLedger::default();
        let mut store = coordinator.store().unwrap();

        assert!(matches!(
            ledger.set_wagerable(&mut store, u64::MAX),
            Err(FoundationError::InvariantViolation(_))
        ));
        assert_eq!(ledger.meters().wagerable, 0);
        assert!(!store.contains(&address(Meter::Wagerable).unwrap()).unwrap());
    }

    #[test]
    fn test_initialize_then_restore() {
        let mut coordinator = open();
        let mut ledger = MeterLedger::default();
        {
            let mut store = coordinator.store().unwrap();
            ledger.initialize(&mut store).unwrap();
            ledger.set_bank(&mut store, 250).unwrap();
            ledger.set_starting_bet(&mut store, Some(10)).unwrap();
        }

        let restored = MeterLedger::restore(coordinator.snapshot()).unwrap();
        assert_eq!(restored, ledger);
        assert_eq!(restored.meters().committed_bet, None);
    }

    #[test]
    fn test_restore_rejects_negative_balance() {
        let mut coordinator = open();
        {
            let mut store = coordinator.store().unwrap();
            MeterLedger::default().initialize(&mut store).unwrap();
            store
                .write(&address(Meter::Paid).unwrap(), encode_i64(-5))
                .unwrap();
        }

        let err = MeterLedger::restore(coordinator.snapshot()).unwrap_err();
        assert!(matches!(
            err,
            FoundationError::RestoreFailed {
                field: "Paid",
                source: RestoreError::NegativeMeter(-5)
            }
        ));
    }

    #[test]
    fn test_restore_reports_missing_meter() {
        let coordinator = open();
        assert!(matches!(
            MeterLedger::restore(coordinator.snapshot()),
            Err(FoundationError::RestoreFailed {
                field: "Wagerable",
                source: RestoreError::Missing
            })
        ));
    }
}
