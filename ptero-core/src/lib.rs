//! ptero core - configuration, error handling and logging.
//!
//! This crate provides the shared foundation used by the other ptero crates:
//! - Panel configuration (URL, API key, timeouts) persisted as TOML
//! - A unified error type
//! - Structured logging with tracing and the injectable `LogSink`
//! - Platform directory lookup and common constants

pub mod config;
pub mod error;
pub mod logging;
pub mod platform;
pub mod constants;

// Re-export commonly used items at the crate root
pub use config::{AppConfig, PanelConfig};
pub use error::{PteroError, PteroResult};
pub use logging::{init_logging, LogLevel, LogSink, MemoryLog, TracingLog};
pub use platform::Platform;
