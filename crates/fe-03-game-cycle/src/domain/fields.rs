//! # Persisted Fields
//!
//! Fixed addresses of Foundation-owned data and their fixed-width encodings.

use super::errors::RestoreError;
use shared_types::{Address, AddressError, LifecycleScope, ScopeKey, Section};

/// Foundation-owned value at a fixed address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    GameCycleState,
    GameCycleNumber,
    HistoryHead,
    PendingEvents,
    AccumulatedOutcome,
    CashoutOfferable,
    BankTransferEligible,
}

impl Field {
    pub const fn path(self) -> &'static str {
        match self {
            Field::GameCycleState => "GameCycleState",
            Field::GameCycleNumber => "GameCycleNumber",
            Field::HistoryHead => "HistoryHead",
            Field::PendingEvents => "PendingEvents",
            Field::AccumulatedOutcome => "AccumulatedOutcome",
            Field::CashoutOfferable => "CashoutOfferable",
            Field::BankTransferEligible => "BankTransferEligible",
        }
    }

    /// Game-cycle fields vanish when the cycle returns to Idle.
    pub const fn lifecycle(self) -> LifecycleScope {
        match self {
            Field::AccumulatedOutcome | Field::CashoutOfferable | Field::BankTransferEligible => {
                LifecycleScope::GameCycle
            }
            _ => LifecycleScope::Persistent,
        }
    }

    pub fn scope_key(self) -> ScopeKey {
        ScopeKey::new(Section::FoundationData, self.lifecycle())
    }

    pub fn address(self) -> Result<Address, AddressError> {
        Address::new(Section::FoundationData, self.lifecycle(), self.path())
    }
}

/// Scopes cleared on entering Idle.
pub fn game_cycle_scopes() -> impl Iterator<Item = ScopeKey> {
    [
        Section::CriticalData,
        Section::Meters,
        Section::FoundationData,
        Section::ProgressiveData,
    ]
    .into_iter()
    .flat_map(|section| {
        [LifecycleScope::GameCycle, LifecycleScope::History]
            .into_iter()
            .map(move |lifecycle| ScopeKey::new(section, lifecycle))
    })
}

/// Staging scope for the current cycle's history.
pub fn history_staging() -> ScopeKey {
    ScopeKey::new(Section::CriticalData, LifecycleScope::History)
}

pub fn encode_u64(value: u64) -> Vec<u8> {
    value.to_le_bytes().to_vec()
}

pub fn encode_i64(value: i64) -> Vec<u8> {
    value.to_le_bytes().to_vec()
}

pub fn encode_bool(value: bool) -> Vec<u8> {
    vec![u8::from(value)]
}

pub fn decode_u64(bytes: &[u8]) -> Result<u64, RestoreError> {
    Ok(u64::from_le_bytes(fixed(bytes)?))
}

pub fn decode_i64(bytes: &[u8]) -> Result<i64, RestoreError> {
    Ok(i64::from_le_bytes(fixed(bytes)?))
}

pub fn decode_bool(bytes: &[u8]) -> Result<bool, RestoreError> {
    let [byte] = fixed::<1>(bytes)?;
    Ok(byte != 0)
}

fn fixed<const N: usize>(bytes: &[u8]) -> Result<[u8; N], RestoreError> {
    bytes.try_into().map_err(|_| RestoreError::Malformed {
        expected: N,
        actual: bytes.len(),
    })
}
