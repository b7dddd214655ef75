//! # Addressed Store
//!
//! Hierarchical in-memory map of critical data.
//!
//! ## Module Structure
//!
//! - `scope` - StorageScope and StorageSection
//! - `addressed` - AddressedStore arena and scope-level operations

mod addressed;
mod scope;


// Re-export public API
pub use addressed::AddressedStore;
pub use scope::{StorageScope, StorageSection};
