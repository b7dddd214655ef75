//! # Ports Layer
//!
//! - `outbound.rs` - Driven ports (snapshot media the journal writes through)

pub mod outbound;
