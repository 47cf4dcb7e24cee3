//! Configuration file loader for the `.event-radar/` directory.
//!
//! Loading happens in three steps:
//! - `config.toml` is parsed into a [`RadarConfig`] (defaults if absent)
//! - environment variables override individual settings
//! - relative paths are resolved against the project root

use er_protocol::RadarConfig;
use std::path::Path;
use tracing::debug;

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::models::{resolve, AppConfig};

pub const CONFIG_DIR: &str = ".event-radar";
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variables that override file settings.
pub const ENV_CRON_SCHEDULE: &str = "CRON_SCHEDULE";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_OUTPUT_DIR: &str = "OUTPUT_DIR";
pub const ENV_CALENDAR_NAME: &str = "CALENDAR_NAME";
pub const ENV_CALENDAR_DESCRIPTION: &str = "CALENDAR_DESCRIPTION";

/// Loads configuration for the project rooted at `root`.
///
/// A `.env` file in `root` is loaded into the process environment first, if
/// present. A missing `.event-radar/` directory or `config.toml` yields the
/// defaults rather than an error.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - `.env` exists but is malformed
/// - `config.toml` exists but cannot be read
/// - `config.toml` has invalid TOML syntax or field types
/// - a setting is out of range after overrides
pub async fn load_config(root: &Path) -> ConfigResult<AppConfig> {
    load_env_file(root)?;

    let radar = load_radar_config(root)?;
    let radar = apply_env_overrides(radar, |key| std::env::var(key).ok());
    finish(root, radar)
}

/// Loads `root/.env` into the process environment. Variables already set
/// are not overwritten.
fn load_env_file(root: &Path) -> ConfigResult<()> {
    let path = root.join(".env");
    if !path.exists() {
        return Ok(());
    }

    dotenvy::from_path(&path).map_err(|source| ConfigError::EnvFile {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), "Loaded environment file");
    Ok(())
}

/// Like [`load_config`], but overrides come from `lookup` instead of the
/// process environment.
pub fn load_config_with_env<F>(root: &Path, lookup: F) -> ConfigResult<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let radar = load_radar_config(root)?;
    let radar = apply_env_overrides(radar, lookup);
    finish(root, radar)
}

fn finish(root: &Path, mut radar: RadarConfig) -> ConfigResult<AppConfig> {
    validate(&radar)?;

    radar.database_path = resolve(root, &radar.database_path);
    radar.output_dir = resolve(root, &radar.output_dir);

    debug!(
        database = %radar.database_path.display(),
        output = %radar.output_dir.display(),
        schedule = %radar.schedule,
        "Configuration loaded"
    );

    Ok(AppConfig {
        root: root.to_path_buf(),
        radar,
    })
}

/// Parses `.event-radar/config.toml`.
fn load_radar_config(root: &Path) -> ConfigResult<RadarConfig> {
    let config_path = root.join(CONFIG_DIR).join(CONFIG_FILE);

    if !config_path.exists() {
        return Ok(RadarConfig::default());
    }

    let content =
        std::fs::read_to_string(&config_path).map_err(|source| ConfigError::FileRead {
            path: config_path.clone(),
            source,
        })?;

    toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: config_path,
        source,
    })
}

/// Empty values are ignored.
pub fn apply_env_overrides<F>(mut radar: RadarConfig, lookup: F) -> RadarConfig
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(schedule) = get(ENV_CRON_SCHEDULE) {
        radar.schedule = schedule;
    }
    if let Some(path) = get(ENV_DATABASE_URL) {
        radar.database_path = path.into();
    }
    if let Some(dir) = get(ENV_OUTPUT_DIR) {
        radar.output_dir = dir.into();
    }
    if let Some(name) = get(ENV_CALENDAR_NAME) {
        radar.calendar.name = name;
    }
    if let Some(description) = get(ENV_CALENDAR_DESCRIPTION) {
        radar.calendar.description = description;
    }

    radar
}

fn validate(radar: &RadarConfig) -> ConfigResult<()> {
    let invalid = |reason: &str| ConfigError::InvalidConfig {
        origin: format!("{CONFIG_DIR}/{CONFIG_FILE}"),
        reason: reason.to_string(),
    };

    if radar.schedule.trim().is_empty() {
        return Err(invalid("schedule must not be empty"));
    }
    if radar.upcoming_days < 0 {
        return Err(invalid("upcoming_days must not be negative"));
    }
    if radar.source_timeout_secs == 0 {
        return Err(invalid("source_timeout_secs must be greater than zero"));
    }

    Ok(())
}
