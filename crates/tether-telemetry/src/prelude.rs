//! Prelude module - commonly used types for convenient import.
//!
//! Use `use tether_telemetry::prelude::*;` to import all essential types.

pub use crate::{LogConfig, LogFormat, LogTarget, TelemetryError, TelemetryResult};
pub use crate::setup_logging;
