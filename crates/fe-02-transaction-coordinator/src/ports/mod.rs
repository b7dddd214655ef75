//! # Ports Layer
//!
//! - `inbound.rs` - `CriticalStore`, the store contract handed to collaborators
//! - `outbound.rs` - `PendingEventProbe`, how the gate sees the event queue

pub mod inbound;
pub mod outbound;
