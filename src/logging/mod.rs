//! Logging and observability
//!
//! Structured logging built on the `tracing` crate:
//! - console output with span close events
//! - optional JSON file logging with rotation
//! - `EnvFilter`-based level control (`RUST_LOG` wins over configuration)
//!
//! # Example
//!
//! ```no_run
//! use medrecall::logging::init_logging;
//! use medrecall::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};
