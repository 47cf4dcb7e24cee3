//! Error types for configuration loading.
//!
//! This module defines all errors that can occur while reading
//! `.event-radar/config.toml` and applying environment overrides.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read a configuration file from disk.
    #[error("Failed to read config file at {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("Failed to parse TOML file at {path}: {source}")]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A `.env` file exists but could not be read or parsed.
    #[error("Failed to load environment file at {path}: {source}")]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },

    /// A value is out of range or an override could not be parsed.
    #[error("Invalid configuration in {origin}: {reason}")]
    InvalidConfig { origin: String, reason: String },
}

/// Type alias for Result with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;
