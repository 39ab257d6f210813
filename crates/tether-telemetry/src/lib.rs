//! Tether Telemetry - logging for the scope guard and its hosts.
//!
//! Wraps `tracing-subscriber` behind a small [`LogConfig`] builder so every
//! binary in the workspace initializes logging the same way.
//!
//! # Example
//!
//! ```rust,no_run
//! use tether_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), tether_telemetry::TelemetryError> {
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Json)
//!     .with_directive("tether_guard=trace");
//!
//! setup_logging(&config)?;
//! tracing::info!("guard host starting");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, LogTarget, setup_logging};
