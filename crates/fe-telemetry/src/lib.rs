//! # Foundation Emulator Telemetry
//!
//! Structured logging and Prometheus metrics shared by every emulator crate.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fe_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     init_telemetry(&TelemetryConfig::from_env()).expect("telemetry");
//!     // tracing macros now reach the subscriber; metrics are recorded
//!     // through `fe_telemetry::metrics`.
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `FE_SERVICE_NAME` | `foundation-emulator` | Service name in the startup log |
//! | `FE_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter directives |
//! | `FE_JSON_LOGS` | `false` | JSON formatted logs |

mod config;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{gather_text, HistogramTimer};
pub use tracing_setup::init_tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    #[error("A global tracing subscriber is already installed")]
    AlreadyInitialized,

    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("Failed to encode metrics: {0}")]
    Encode(String),
}

/// Install logging and make sure metrics are registered.
///
/// Equivalent to [`init_tracing`]; metrics register lazily on first use, so
/// this also forces the registry so that an early scrape lists every metric.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    init_tracing(config)?;
    let _ = gather_text()?;
    Ok(())
}
