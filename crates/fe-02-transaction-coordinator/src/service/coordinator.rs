use super::guarded::GuardedStore;
use crate::domain::errors::TransactionError;
use crate::domain::owner::{TransactionOwner, TransactionState};
use crate::ports::outbound::PendingEventProbe;
use fe_01_critical_store::{AddressedStore, CommitReceipt, DurableJournal, JournalConfig, StoreError};
use fe_telemetry::{metrics, HistogramTimer};
use tracing::{debug, info, warn};

/// Single-owner gate over a [`DurableJournal`].
#[derive(Debug)]
pub struct TransactionCoordinator {
    journal: DurableJournal,
    state: TransactionState,
}

impl TransactionCoordinator {
    /// Open the journal and start with no transaction.
    pub fn open(config: &JournalConfig) -> Result<Self, StoreError> {
        Ok(Self::new(DurableJournal::open(config)?))
    }

    pub fn new(journal: DurableJournal) -> Self {
        let state = TransactionState::starting_at(journal.committed_sequence());
        Self { journal, state }
    }

    pub fn owner(&self) -> TransactionOwner {
        self.state.owner
    }

    pub fn is_open(&self) -> bool {
        self.state.owner.is_open()
    }

    /// Sequence number of the open (or most recently opened) transaction.
    pub fn sequence(&self) -> u64 {
        self.state.sequence
    }

    pub fn journal(&self) -> &DurableJournal {
        &self.journal
    }

    /// Read-only view of the working store, for queries that need no
    /// transaction. Not part of the collaborator contract.
    pub fn snapshot(&self) -> &AddressedStore {
        self.journal.store()
    }

    /// Open a transaction on behalf of the game.
    ///
    /// # Errors
    ///
    /// - `TransactionAlreadyOpen` if any transaction is open.
    /// - `EventsPendingAgainstOpen` if transactional events await processing.
    pub fn open_caller_transaction(
        &mut self,
        events: &dyn PendingEventProbe,
    ) -> Result<(), TransactionError> {
        if self.state.owner.is_open() {
            return Err(TransactionError::TransactionAlreadyOpen {
                owner: self.state.owner,
            });
        }
        let pending = events.pending_transactional();
        if pending > 0 {
            return Err(TransactionError::EventsPendingAgainstOpen { pending });
        }
        self.state.open(TransactionOwner::Caller);
        debug!(sequence = self.state.sequence, "Caller transaction opened");
        Ok(())
    }

    /// Open a transaction for event processing.
    ///
    /// Returns `false` without side effects if any transaction is already
    /// open.
    pub fn open_system_transaction(&mut self) -> bool {
        if self.state.owner.is_open() {
            return false;
        }
        self.state.open(TransactionOwner::System);
        debug!(sequence = self.state.sequence, "System transaction opened");
        true
    }

    /// Commit and release a caller transaction.
    pub fn close_transaction(&mut self) -> Result<CommitReceipt, TransactionError> {
        self.close(TransactionOwner::Caller)
    }

    /// Commit and release a system transaction.
    pub fn close_system_transaction(&mut self) -> Result<CommitReceipt, TransactionError> {
        self.close(TransactionOwner::System)
    }

    fn close(&mut self, expected: TransactionOwner) -> Result<CommitReceipt, TransactionError> {
        match self.state.owner {
            TransactionOwner::None => return Err(TransactionError::NothingOpen),
            actual if actual != expected => {
                return Err(TransactionError::NotOwner { expected, actual })
            }
            _ => {}
        }

        let receipt = {
            let _timer = HistogramTimer::commit();
            self.journal.commit(self.state.sequence)
        };
        let receipt = match receipt {
            Ok(receipt) => receipt,
            Err(e) => {
                warn!(
                    owner = %expected,
                    sequence = self.state.sequence,
                    error = %e,
                    "Commit failed; transaction stays open"
                );
                return Err(e.into());
            }
        };

        self.state.release();
        metrics::record_commit(receipt.bytes);
        info!(
            owner = %expected,
            sequence = receipt.sequence,
            bytes = receipt.bytes,
            compressed = receipt.compressed,
            "[fe-02] Transaction committed"
        );
        Ok(receipt)
    }

    /// Fail with `NoOpenTransaction` unless a transaction is open.
    pub fn require_open_transaction(&self) -> Result<TransactionOwner, TransactionError> {
        if self.state.owner.is_open() {
            Ok(self.state.owner)
        } else {
            Err(TransactionError::NoOpenTransaction)
        }
    }

    /// Transactional view of the store.
    pub fn store(&mut self) -> Result<GuardedStore<'_>, TransactionError> {
        self.require_open_transaction()?;
        Ok(GuardedStore::new(self))
    }

    pub(crate) fn working_store(&self) -> &AddressedStore {
        self.journal.store()
    }

    pub(crate) fn working_store_mut(&mut self) -> &mut AddressedStore {
        self.journal.store_mut()
    }
}
