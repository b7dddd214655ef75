//! # Warm Start
//!
//! Runs before any transaction can exist, so it reads the working store
//! directly. The first field that fails validation aborts startup.

use super::foundation::{CycleFlags, Foundation};
use super::ledger::MeterLedger;
use crate::domain::errors::{FoundationError, RestoreError};
use crate::domain::fields::{decode_bool, decode_u64, Field};
use crate::domain::state::GameCycleState;
use fe_01_critical_store::AddressedStore;
use tracing::info;

fn required<'a>(store: &'a AddressedStore, field: Field) -> Result<&'a [u8], FoundationError> {
    store
        .read(&field.address()?)
        .ok_or_else(|| FoundationError::restore(field.path(), RestoreError::Missing))
}

fn optional<T>(
    store: &AddressedStore,
    field: Field,
    decode: impl FnOnce(&[u8]) -> Result<T, RestoreError>,
) -> Result<Option<T>, FoundationError> {
    store
        .read(&field.address()?)
        .map(decode)
        .transpose()
        .map_err(|e| FoundationError::restore(field.path(), e))
}

fn decode_state(bytes: &[u8]) -> Result<GameCycleState, RestoreError> {
    match bytes {
        [value] => GameCycleState::from_u8(*value).ok_or(RestoreError::InvalidState(*value)),
        _ => Err(RestoreError::Malformed {
            expected: 1,
            actual: bytes.len(),
        }),
    }
}

impl Foundation {
    pub(super) fn restore(&mut self) -> Result<(), FoundationError> {
        let store = self.coordinator.snapshot();

        let state_field = Field::GameCycleState;
        let state = decode_state(required(store, state_field)?)
            .map_err(|e| FoundationError::restore(state_field.path(), e))?;
        let ledger = MeterLedger::restore(store)?;
        let game_cycle = decode_u64(required(store, Field::GameCycleNumber)?)
            .map_err(|e| FoundationError::restore(Field::GameCycleNumber.path(), e))?;
        let history_head = decode_u64(required(store, Field::HistoryHead)?)
            .map_err(|e| FoundationError::restore(Field::HistoryHead.path(), e))?;

        let cycle = CycleFlags {
            accumulated_outcome: optional(store, Field::AccumulatedOutcome, decode_u64)?
                .unwrap_or_default(),
            cashout_offerable: optional(store, Field::CashoutOfferable, decode_bool)?
                .unwrap_or_default(),
            bank_transfer_eligible: optional(store, Field::BankTransferEligible, decode_bool)?
                .unwrap_or_default(),
        };

        let replayed = match store.read(&Field::PendingEvents.address()?) {
            Some(bytes) => self.events.restore_from_bytes(bytes).map_err(|e| {
                FoundationError::restore(
                    Field::PendingEvents.path(),
                    RestoreError::Events(e.to_string()),
                )
            })?,
            None => 0,
        };

        self.state = state;
        self.ledger = ledger;
        self.game_cycle = game_cycle;
        self.history_head = history_head;
        self.cycle = cycle;

        info!(
            state = %state,
            game_cycle,
            replayed_events = replayed,
            "[fe-03] Warm start: game cycle restored"
        );
        Ok(())
    }
}
