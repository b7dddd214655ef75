//! # Domain Layer
//!
//! - `owner` - who holds the open transaction
//! - `errors` - transaction errors

pub mod errors;
pub mod owner;
