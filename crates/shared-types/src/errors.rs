//! # Error Types
//!
//! Errors raised while building addresses or converting money.

use thiserror::Error;

/// Errors produced while constructing an [`crate::Address`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Path was empty.
    #[error("Critical data path must not be empty")]
    EmptyPath,

    /// Path exceeded the maximum length.
    #[error("Critical data path too long: {length} chars, max {max}")]
    PathTooLong { length: usize, max: usize },

    /// Path contained a character that is unsafe for the snapshot renderings.
    #[error("Critical data path {path:?} contains forbidden character {character:?}")]
    ForbiddenCharacter { path: String, character: char },

    /// Section name did not match any known section.
    #[error("Unknown section: {0}")]
    UnknownSection(String),
}

/// Errors produced by credit/denomination arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Denomination of zero is meaningless.
    #[error("Denomination must be positive")]
    ZeroDenomination,

    /// Arithmetic would overflow the base-unit range.
    #[error("Monetary overflow: {credits} credits x {denomination}")]
    Overflow { credits: u64, denomination: u64 },
}
