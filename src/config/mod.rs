//! Configuration management
//!
//! TOML configuration with `${VAR}` environment substitution, `MEDRECALL_*`
//! environment overrides, and validation. Secrets are wrapped in
//! [`SecretString`] so they are zeroized on drop and never appear in Debug
//! output.
//!
//! Missing secrets are a hard startup failure by design: there is no
//! built-in fallback key, and production deployments additionally reject
//! placeholder values.
//!
//! # Example
//!
//! ```no_run
//! use medrecall::config::load_config;
//!
//! let config = load_config("medrecall.toml").expect("Failed to load config");
//! assert!(config.validate().is_ok());
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used items
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, Environment, LoggingConfig, MedRecallConfig, ProviderConfig, SecurityConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
