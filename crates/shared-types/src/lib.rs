//! # Shared Types Crate
//!
//! This crate contains the addressing vocabulary used by every Foundation
//! Emulator crate.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Section`, `Scope` and `Address` are defined
//!   here and nowhere else.
//! - **Validated at the edge**: an `Address` can only be built through
//!   `Address::new`, which rejects paths that are unsafe for the snapshot
//!   renderings.
//! - **Money is integral**: all monetary values are base units (`u64`);
//!   conversions from denominated credits are overflow-checked.

pub mod entities;
pub mod errors;
pub mod money;
pub mod security;

pub use entities::*;
pub use errors::*;
pub use money::*;
pub use security::*;
