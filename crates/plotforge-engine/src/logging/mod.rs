//! Logging utilities.
//!
//! Centralizes logger initialization so binaries and tests agree on one
//! setup path. Only the standard `log` facade is imposed on callers.

mod init;

pub use init::{init_logging, LoggingConfig};
