//! Core shared pieces for the Webex OAuth integration
//!
//! - [`config`]: the layered configuration loader contract and its error type
//! - [`logging`]: unified `tracing` initialization for binaries
//! - [`secret`]: a string wrapper that keeps credentials out of logs

pub mod config;
pub mod logging;
pub mod secret;

pub use config::{ConfigLoader, ConfigurationError};
pub use secret::Secret;
