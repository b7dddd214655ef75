//! # Data Directory Locking
//!
//! Prevents two processes from committing into the same installation.
//!
//! ## Modules
//!
//! - `flock`: DataDirLock implementation using fs2
//! - `security`: stale-lock detection

mod error;
#[cfg(feature = "locking")]
mod flock;
#[cfg(feature = "locking")]
mod security;

pub use error::LockError;
#[cfg(feature = "locking")]
pub use flock::DataDirLock;
