//! Configuration schema types
//!
//! This module defines the configuration structure for medrecall.

use crate::config::SecretString;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use url::Url;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!(
                "Invalid environment '{other}'. Must be one of: development, staging, production"
            )),
        }
    }
}

/// Main medrecall configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedRecallConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// Generative-text provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Secrets: encryption key and auth signing secret.
    ///
    /// Required. There is deliberately no default: a process without
    /// configured secrets must fail at startup rather than fall back to a
    /// well-known value.
    pub security: SecurityConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MedRecallConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.provider.validate()?;
        self.security.validate(&self.environment)?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Generative-text provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the provider's OpenAI-compatible API
    #[serde(default = "default_provider_base_url")]
    pub base_url: String,

    /// Model identifier requested for quiz generation
    #[serde(default = "default_provider_model")]
    pub model: String,

    /// API key for bearer authentication (optional for keyless local
    /// providers)
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Per-call timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Sampling temperature passed through to the provider
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_provider_base_url(),
            model: default_provider_model(),
            api_key: None,
            timeout_seconds: default_timeout_seconds(),
            temperature: default_temperature(),
        }
    }
}

impl ProviderConfig {
    fn validate(&self) -> Result<(), String> {
        Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid provider.base_url '{}': {e}", self.base_url))?;

        if self.model.trim().is_empty() {
            return Err("provider.model must not be empty".to_string());
        }
        if self.timeout_seconds == 0 {
            return Err("provider.timeout_seconds must be greater than zero".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "provider.temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }
        Ok(())
    }
}

/// Secrets supplied at process startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Symmetric key for the encryption vault.
    /// Stored securely in memory and automatically zeroized on drop.
    pub encryption_key: SecretString,

    /// Signing secret consumed by the surrounding authentication layer.
    /// Stored securely in memory and automatically zeroized on drop.
    pub signing_secret: SecretString,
}

impl SecurityConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        if self.encryption_key.expose_secret().is_empty() {
            return Err("security.encryption_key must not be empty".to_string());
        }
        if self.signing_secret.expose_secret().is_empty() {
            return Err("security.signing_secret must not be empty".to_string());
        }

        if *environment == Environment::Production {
            for (name, secret) in [
                ("security.encryption_key", &self.encryption_key),
                ("security.signing_secret", &self.signing_secret),
            ] {
                let value = secret.expose_secret();
                if value.contains("change-me")
                    || value.contains("change-in-production")
                    || value.contains("default")
                {
                    return Err(format!(
                        "{name} looks like a placeholder; set a real secret in production"
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging with rotation
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for rotated log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation interval ("daily" or "hourly")
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_provider_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_provider_model() -> String {
    "gpt-4-turbo-preview".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_temperature() -> f64 {
    0.7
}

fn default_log_path() -> String {
    "./logs".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}
