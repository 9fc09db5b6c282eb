//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::MedRecallConfig;
use crate::config::secret_string;
use crate::domain::errors::MedRecallError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Loads a `.env` file into the environment if one is present
/// 2. Reads the TOML file
/// 3. Performs environment variable substitution (${VAR} syntax)
/// 4. Parses the TOML into MedRecallConfig
/// 5. Applies environment variable overrides (MEDRECALL_* prefix)
/// 6. Validates the configuration
///
/// Missing secrets are a hard failure: a file without a `[security]`
/// section (or with an unset `${VAR}` reference) does not load.
///
/// # Errors
///
/// Returns an error if the file cannot be read, TOML parsing fails, a
/// referenced environment variable is not set, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use medrecall::config::load_config;
///
/// let config = load_config("medrecall.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<MedRecallConfig> {
    let path = path.as_ref();

    // Pick up a local .env before substitution so ${VAR} references resolve
    dotenvy::dotenv().ok();

    if !path.exists() {
        return Err(MedRecallError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        MedRecallError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: MedRecallConfig = toml::from_str(&contents)
        .map_err(|e| MedRecallError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        MedRecallError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. A referenced variable that is not set
/// is an error; secrets never silently default.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("substitution pattern is valid");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        // Skip comment lines - don't process env vars in comments
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(MedRecallError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the MEDRECALL_* prefix
///
/// Variables follow the pattern MEDRECALL_<SECTION>_<KEY>, for example
/// MEDRECALL_PROVIDER_BASE_URL or MEDRECALL_SECURITY_ENCRYPTION_KEY.
fn apply_env_overrides(config: &mut MedRecallConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("MEDRECALL_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("MEDRECALL_ENVIRONMENT") {
        if let Ok(environment) = FromStr::from_str(&val) {
            config.environment = environment;
        }
    }

    // Provider overrides
    if let Ok(val) = std::env::var("MEDRECALL_PROVIDER_BASE_URL") {
        config.provider.base_url = val;
    }
    if let Ok(val) = std::env::var("MEDRECALL_PROVIDER_MODEL") {
        config.provider.model = val;
    }
    if let Ok(val) = std::env::var("MEDRECALL_PROVIDER_API_KEY") {
        config.provider.api_key = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("MEDRECALL_PROVIDER_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.provider.timeout_seconds = timeout;
        }
    }
    if let Ok(val) = std::env::var("MEDRECALL_PROVIDER_TEMPERATURE") {
        if let Ok(temperature) = val.parse() {
            config.provider.temperature = temperature;
        }
    }

    // Security overrides
    if let Ok(val) = std::env::var("MEDRECALL_SECURITY_ENCRYPTION_KEY") {
        config.security.encryption_key = secret_string(val);
    }
    if let Ok(val) = std::env::var("MEDRECALL_SECURITY_SIGNING_SECRET") {
        config.security.signing_secret = secret_string(val);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("MEDRECALL_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("MEDRECALL_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("MEDRECALL_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}
