//! # Transaction Ownership

use std::fmt;

/// Holder of the single open transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransactionOwner {
    /// No transaction is open.
    #[default]
    None,
    /// Opened by the game.
    Caller,
    /// Opened internally to process transactional events.
    System,
}

impl TransactionOwner {
    pub fn is_open(self) -> bool {
        self != TransactionOwner::None
    }

    pub const fn name(self) -> &'static str {
        match self {
            TransactionOwner::None => "none",
            TransactionOwner::Caller => "caller",
            TransactionOwner::System => "system",
        }
    }
}

impl fmt::Display for TransactionOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Owner plus the sequence number of the current (or last) transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransactionState {
    pub owner: TransactionOwner,
    /// Incremented on every open; a commit is tagged with it.
    pub sequence: u64,
}

impl TransactionState {
    pub fn starting_at(sequence: u64) -> Self {
        Self {
            owner: TransactionOwner::None,
            sequence,
        }
    }

    /// Take ownership, advancing the sequence.
    pub(crate) fn open(&mut self, owner: TransactionOwner) {
        self.owner = owner;
        self.sequence += 1;
    }

    pub(crate) fn release(&mut self) {
        self.owner = TransactionOwner::None;
    }
}
