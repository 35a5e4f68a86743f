//! # Quantum Telemetry
//!
//! Structured logging for Quantum-Chain binaries. Library crates only emit
//! `tracing` events; binaries call [`init_logging`] once at startup.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quantum_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_logging(&TelemetryConfig::from_env())?;
//!     // ...
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `QC_SERVICE_NAME` | `quantum-chain` | Service name |
//! | `QC_LOG_LEVEL` | `info` | Log filter, falls back to `RUST_LOG` |
//! | `QC_JSON_LOGS` | `false` (`true` in containers) | JSON formatted output |
//! | `QC_CONSOLE_OUTPUT` | `true` | Write events to stdout |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Log filter directive did not parse
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber is already installed
    #[error("Failed to install subscriber: {0}")]
    AlreadyInitialized(String),
}

/// Convenience macro for creating a span with subsystem context.
///
/// # Example
///
/// ```rust,ignore
/// use quantum_telemetry::subsystem_span;
///
/// let _span = subsystem_span!("prepare_proposal", subsystem = 17, height = 12345).entered();
/// ```
#[macro_export]
macro_rules! subsystem_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}
