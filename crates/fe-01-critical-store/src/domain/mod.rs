//! # Domain Layer
//!
//! Pure domain logic for the critical data store.
//!
//! ## Modules
//!
//! - `store` - AddressedStore arena (Section → Scope → Path → bytes)
//! - `snapshot` - Image, frame header and codec for committed snapshots
//! - `compression` - Optional Zstd payload compression
//! - `config` - Journal configuration
//! - `errors` - Domain error types

pub mod compression;
pub mod config;
pub mod errors;
pub mod snapshot;
pub mod store;
