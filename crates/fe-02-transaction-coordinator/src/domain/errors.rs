//! # Domain Errors

use super::owner::TransactionOwner;
use fe_01_critical_store::StoreError;
use thiserror::Error;

/// Errors from the transaction gate.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// A store access or state transition was attempted with no open
    /// transaction.
    #[error("No transaction is open")]
    NoOpenTransaction,

    /// A transaction is already open.
    #[error("Cannot open a transaction: {owner} transaction already open")]
    TransactionAlreadyOpen { owner: TransactionOwner },

    /// Transactional events must be processed before a caller transaction
    /// may open.
    #[error("Cannot open a transaction: {pending} transactional event(s) pending")]
    EventsPendingAgainstOpen { pending: usize },

    /// Close requested with nothing open.
    #[error("No transaction to close")]
    NothingOpen,

    /// Close requested by a party that does not own the open transaction.
    #[error("Transaction is owned by {actual}, not {expected}")]
    NotOwner {
        expected: TransactionOwner,
        actual: TransactionOwner,
    },

    /// The commit failed; the transaction stays open.
    #[error("Commit failed, transaction remains open: {0}")]
    CommitFailed(#[from] StoreError),
}
