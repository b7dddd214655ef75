use super::coordinator::TransactionCoordinator;
use crate::domain::errors::TransactionError;
use crate::ports::inbound::CriticalStore;
use shared_types::{Address, ScopeKey};
use std::collections::BTreeSet;
use tracing::trace;

/// [`CriticalStore`] over a coordinator's working store.
///
/// Borrowing the coordinator mutably keeps the transaction from being
/// closed while the view exists; each call still checks.
pub struct GuardedStore<'a> {
    coordinator: &'a mut TransactionCoordinator,
}

impl<'a> GuardedStore<'a> {
    pub(crate) fn new(coordinator: &'a mut TransactionCoordinator) -> Self {
        Self { coordinator }
    }
}

impl CriticalStore for GuardedStore<'_> {
    fn read(&self, address: &Address) -> Result<Option<Vec<u8>>, TransactionError> {
        self.coordinator.require_open_transaction()?;
        Ok(self.coordinator.working_store().read(address).map(<[u8]>::to_vec))
    }

    fn write(&mut self, address: &Address, value: Vec<u8>) -> Result<bool, TransactionError> {
        self.coordinator.require_open_transaction()?;
        let len = value.len();
        let changed = self.coordinator.working_store_mut().write(address, value);
        if changed {
            trace!(%address, bytes = len, "Critical data written");
        }
        Ok(changed)
    }

    fn remove(&mut self, address: &Address) -> Result<bool, TransactionError> {
        self.coordinator.require_open_transaction()?;
        Ok(self.coordinator.working_store_mut().remove(address))
    }

    fn contains(&self, address: &Address) -> Result<bool, TransactionError> {
        self.coordinator.require_open_transaction()?;
        Ok(self.coordinator.working_store().contains(address))
    }

    fn clear_scope(&mut self, scope: ScopeKey) -> Result<bool, TransactionError> {
        self.coordinator.require_open_transaction()?;
        let cleared = self.coordinator.working_store_mut().clear_scope(scope);
        if cleared {
            trace!(%scope, "Scope cleared");
        }
        Ok(cleared)
    }

    fn swap_scopes(&mut self, a: ScopeKey, b: ScopeKey) -> Result<(), TransactionError> {
        self.coordinator.require_open_transaction()?;
        self.coordinator.working_store_mut().swap_scopes(a, b);
        Ok(())
    }

    fn copy_scope(&mut self, src: ScopeKey, dst: ScopeKey) -> Result<(), TransactionError> {
        self.coordinator.require_open_transaction()?;
        self.coordinator.working_store_mut().copy_scope(src, dst);
        Ok(())
    }

    fn manifest(&self, scope: ScopeKey) -> Result<BTreeSet<String>, TransactionError> {
        self.coordinator.require_open_transaction()?;
        Ok(self.coordinator.working_store().manifest(scope))
    }

    fn usage(&self, scope: ScopeKey) -> Result<usize, TransactionError> {
        self.coordinator.require_open_transaction()?;
        Ok(self.coordinator.working_store().usage(scope))
    }
}
