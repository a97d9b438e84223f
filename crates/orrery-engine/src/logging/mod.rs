//! Logging utilities.
//!
//! Centralizes logger initialization behind the standard `log` facade so the
//! viewer and the engine share one configuration path.

mod init;

pub use init::{init_logging, LoggingConfig};
