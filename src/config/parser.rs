use crate::config::types::{Config, TaskInput};
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use hn_scout::config::load_config;
///
/// let config = load_config(Path::new("scout.toml")).unwrap();
/// println!("Max results: {}", config.search.max_results);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Parses configuration from TOML text without validating it
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

/// Reads a configuration file and its hash without validating it
///
/// For callers that layer further overrides on top of the file and validate
/// the merged result once.
pub fn read_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    Ok((config, hex::encode(hasher.finalize())))
}

/// Loads a JSON task input file
///
/// Accepts either a bare object of run parameters or an orchestrator envelope
/// carrying them under `data` (or `input`).
pub fn load_task_input(path: &Path) -> Result<TaskInput, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_task_input(&content)
}

/// Parses task input from JSON text
pub fn parse_task_input(content: &str) -> Result<TaskInput, ConfigError> {
    let value: serde_json::Value = serde_json::from_str(content)?;

    let payload = ["data", "input"]
        .iter()
        .find_map(|key| value.get(*key).filter(|v| v.is_object()).cloned())
        .unwrap_or(value);

    Ok(serde_json::from_value(payload)?)
}
