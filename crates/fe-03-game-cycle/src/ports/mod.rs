//! # Ports Layer
//!
//! - `outbound.rs` - bet limits, progressive sink, dispatch observer

pub mod outbound;
