//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! Whatever the source, the result is validated before it is returned.
//!
//! ## Environment Variables
//! - `JOBWIRE_TRANSPORT`: `rest` or `broker` (required)
//! - `JOBWIRE_BASE_URL`: REST base URL (required for `rest`)
//! - `JOBWIRE_TIMEOUT_SECS`: REST request timeout in seconds
//! - `JOBWIRE_MAX_ATTEMPTS`: HTTP attempts per request
//! - `JOBWIRE_USERNAME` / `JOBWIRE_PASSWORD`: basic credentials
//! - `JOBWIRE_TOKEN`: bearer token
//! - `JOBWIRE_BROKER_TIMEOUT_SECS`: broker reply timeout in seconds
//! - `JOBWIRE_BROKER_QUEUE_CAPACITY`: in-process broker queue size
//! - `JOBWIRE_MARSHALLING_FORMAT`: `json` (only supported format)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./jobwire.json` or `./jobwire.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names in the parent directory
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use jobwire_domain::{
    BrokerConfig, ClientConfig, JobWireError, MarshallingFormat, RestConfig, Result,
    TransportKind,
};

const CONFIG_FILE_NAMES: [&str; 4] = ["jobwire.json", "jobwire.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `JobWireError::Config` if configuration cannot be loaded from
/// either source or fails validation.
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!(transport = %config.transport, "Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `JobWireError::Config` if required variables are missing or
/// have invalid values.
pub fn load_from_env() -> Result<ClientConfig> {
    let transport: TransportKind = env_var("JOBWIRE_TRANSPORT")?.parse()?;

    let rest_defaults = RestConfig::default();
    let base_url = match transport {
        TransportKind::Rest => env_var("JOBWIRE_BASE_URL")?,
        TransportKind::Broker => {
            std::env::var("JOBWIRE_BASE_URL").unwrap_or(rest_defaults.base_url)
        }
    };

    let rest = RestConfig {
        base_url,
        timeout_secs: env_parse("JOBWIRE_TIMEOUT_SECS")?.unwrap_or(rest_defaults.timeout_secs),
        max_attempts: env_parse("JOBWIRE_MAX_ATTEMPTS")?.unwrap_or(rest_defaults.max_attempts),
        username: std::env::var("JOBWIRE_USERNAME").ok(),
        password: std::env::var("JOBWIRE_PASSWORD").ok(),
        token: std::env::var("JOBWIRE_TOKEN").ok(),
    };

    let broker_defaults = BrokerConfig::default();
    let broker = BrokerConfig {
        timeout_secs: env_parse("JOBWIRE_BROKER_TIMEOUT_SECS")?
            .unwrap_or(broker_defaults.timeout_secs),
        queue_capacity: env_parse("JOBWIRE_BROKER_QUEUE_CAPACITY")?
            .unwrap_or(broker_defaults.queue_capacity),
    };

    let marshalling: MarshallingFormat =
        env_parse("JOBWIRE_MARSHALLING_FORMAT")?.unwrap_or_default();

    let config = ClientConfig { transport, rest, broker, marshalling };
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `JobWireError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - The loaded configuration fails validation
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(JobWireError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            JobWireError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| JobWireError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content, format chosen by extension.
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| JobWireError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| JobWireError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(JobWireError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.clone());
        dirs.push(cwd.join(".."));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
            dirs.push(exe_dir.join(".."));
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| JobWireError::Config(format!("Missing required environment variable: {key}")))
}

/// Parse an optional environment variable; unset means `None`.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| JobWireError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(None),
    }
}
