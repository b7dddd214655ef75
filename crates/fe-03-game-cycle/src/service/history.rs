//! # History Archive and Browsing
//!
//! A consumer of the store contract like any other: it only copies,
//! writes, lists and reads scopes through the guarded store.

use super::foundation::Foundation;
use crate::domain::errors::FoundationError;
use crate::domain::fields::history_staging;
use crate::domain::history::{
    record_count, slot_for, slot_for_age, HistoryRecord, HistorySummary, SUMMARY_PATH,
};
use crate::domain::meters::MeterViolation;
use fe_02_transaction_coordinator::CriticalStore;
use shared_types::{Address, Scope, ScopeKey, Section};
use std::collections::BTreeMap;
use tracing::debug;

fn record_scope(slot: u32) -> ScopeKey {
    ScopeKey::new(Section::History, Scope::index(slot))
}

impl Foundation {
    /// Copy the staging scope into the next ring slot and write its summary.
    pub(super) fn archive_history(&mut self) -> Result<u32, FoundationError> {
        let head = self.history_head;
        let slot = slot_for(head, self.config.max_history_records);
        let meters = *self.ledger.meters();
        let summary = HistorySummary {
            game_cycle: self.game_cycle,
            starting_bet: meters.starting_bet.unwrap_or(0),
            mid_game_bet: meters.mid_game_bet,
            win: self.cycle.accumulated_outcome,
            denomination: self.config.denomination.value(),
        };
        let encoded = bincode::serialize(&summary)?;
        let summary_address = Address::new(Section::History, Scope::index(slot), SUMMARY_PATH)?;
        let next_head = head.checked_add(1).ok_or(MeterViolation::Overflow {
            operation: "history head",
        })?;

        {
            let mut store = self.coordinator.store()?;
            store.copy_scope(history_staging(), record_scope(slot))?;
            store.write(&summary_address, encoded)?;
        }
        self.set_history_head(next_head)?;
        debug!(slot, game_cycle = summary.game_cycle, "History record archived");
        Ok(slot)
    }

    /// Number of browsable history records.
    pub fn history_record_count(&self) -> Result<u32, FoundationError> {
        self.coordinator.require_open_transaction()?;
        Ok(record_count(
            self.history_head,
            self.config.max_history_records,
        ))
    }

    /// The record `age` cycles back, 0 being the most recent.
    pub fn read_history_record(&mut self, age: u32) -> Result<Option<HistoryRecord>, FoundationError> {
        let slot = slot_for_age(self.history_head, self.config.max_history_records, age);
        let store = self.coordinator.store()?;
        let Some(slot) = slot else {
            return Ok(None);
        };

        let mut summary = None;
        let mut entries = BTreeMap::new();
        for path in store.manifest(record_scope(slot))? {
            let address = Address::new(Section::History, Scope::index(slot), path.as_str())?;
            let Some(bytes) = store.read(&address)? else {
                continue;
            };
            if path == SUMMARY_PATH {
                summary = Some(bincode::deserialize::<HistorySummary>(&bytes)?);
            } else {
                entries.insert(path, bytes);
            }
        }

        Ok(summary.map(|summary| HistoryRecord {
            slot,
            summary,
            entries,
        }))
    }
}
