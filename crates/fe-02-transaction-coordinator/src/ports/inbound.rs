//! # Inbound Ports (Driving Ports)
//!
//! The contract exposed to every consumer of critical data: the game-cycle
//! state machine, history browsing, progressive contribution and registry
//! configuration writers.

use crate::domain::errors::TransactionError;
use shared_types::{Address, ScopeKey};
use std::collections::BTreeSet;

/// Transactional access to the critical data store.
///
/// Every method fails with [`TransactionError::NoOpenTransaction`] unless a
/// transaction is open. Missing data is never an error: reads return `None`,
/// removes return `false`, manifests are empty.
pub trait CriticalStore {
    fn read(&self, address: &Address) -> Result<Option<Vec<u8>>, TransactionError>;

    /// Returns `true` if the stored bytes changed.
    fn write(&mut self, address: &Address, value: Vec<u8>) -> Result<bool, TransactionError>;

    fn remove(&mut self, address: &Address) -> Result<bool, TransactionError>;

    fn contains(&self, address: &Address) -> Result<bool, TransactionError>;

    fn clear_scope(&mut self, scope: ScopeKey) -> Result<bool, TransactionError>;

    fn swap_scopes(&mut self, a: ScopeKey, b: ScopeKey) -> Result<(), TransactionError>;

    /// Deep copy; an absent source clears the destination.
    fn copy_scope(&mut self, src: ScopeKey, dst: ScopeKey) -> Result<(), TransactionError>;

    fn manifest(&self, scope: ScopeKey) -> Result<BTreeSet<String>, TransactionError>;

    fn usage(&self, scope: ScopeKey) -> Result<usize, TransactionError>;
}
