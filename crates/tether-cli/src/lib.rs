//! Tether CLI - host process for the scope guard.
//!
//! The `tether` binary loads configuration, initializes logging, and serves
//! a guard session over stdin/stdout. The pieces live here so other hosts and
//! the integration tests can drive them directly.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config_bridge;
pub mod serve;

pub use serve::{Request, ServeHost};
