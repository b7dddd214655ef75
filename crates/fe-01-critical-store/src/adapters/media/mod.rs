//! # Snapshot Media

mod file;
mod volatile;

pub use file::FileMedium;
pub use volatile::VolatileMedium;
