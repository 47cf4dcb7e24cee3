//! Configuration models for `.event-radar/config.toml`.
//!
//! Every field has a default, so an empty or missing file yields a working
//! configuration.

use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use ts_rs::TS;

/// Default cron cadence: every two hours, on the hour.
pub const DEFAULT_SCHEDULE: &str = "0 0 */2 * * *";

/// Default window used for the `upcoming.ics` export.
pub const DEFAULT_UPCOMING_DAYS: i64 = 30;

/// Default per-source timeout in seconds.
pub const DEFAULT_SOURCE_TIMEOUT_SECS: u64 = 30;

/// Represents the settings from `.event-radar/config.toml`.
///
/// # Example
///
/// ```toml
/// schedule = "0 0 */2 * * *"
/// database_path = "data/events.db"
/// output_dir = "public/calendars"
///
/// [calendar]
/// name = "AI Events Amsterdam"
///
/// [agents]
/// EventbriteAgent = false
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct RadarConfig {
    /// Cron expression driving recurring discovery runs.
    ///
    /// Six-field (with seconds) expressions are used as-is; five-field
    /// expressions get a leading `0` seconds field.
    #[serde(default = "default_schedule")]
    pub schedule: String,

    /// SQLite database location. Relative paths resolve against the root.
    #[serde(default = "default_database_path")]
    #[ts(type = "string")]
    pub database_path: PathBuf,

    /// Directory the export artifacts are written to.
    #[serde(default = "default_output_dir")]
    #[ts(type = "string")]
    pub output_dir: PathBuf,

    /// Window in days for the `upcoming.ics` artifact.
    #[serde(default = "default_upcoming_days")]
    pub upcoming_days: i64,

    /// Upper bound on a single source query.
    #[serde(default = "default_source_timeout_secs")]
    pub source_timeout_secs: u64,

    #[serde(default)]
    pub calendar: CalendarConfig,

    /// Enabled flag per agent name. Agents not listed stay enabled.
    #[serde(default)]
    pub agents: BTreeMap<String, bool>,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            schedule: default_schedule(),
            database_path: default_database_path(),
            output_dir: default_output_dir(),
            upcoming_days: default_upcoming_days(),
            source_timeout_secs: default_source_timeout_secs(),
            calendar: CalendarConfig::default(),
            agents: BTreeMap::new(),
        }
    }
}

/// Metadata stamped onto calendar and feed exports.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct CalendarConfig {
    #[serde(default = "default_calendar_name")]
    pub name: String,

    #[serde(default = "default_calendar_description")]
    pub description: String,

    #[serde(default)]
    pub url: Option<String>,

    /// IANA zone name advertised to calendar clients. Instants are always
    /// written in UTC.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            name: default_calendar_name(),
            description: default_calendar_description(),
            url: None,
            timezone: default_timezone(),
        }
    }
}

fn default_schedule() -> String {
    DEFAULT_SCHEDULE.to_string()
}

fn default_database_path() -> PathBuf {
    PathBuf::from("data/events.db")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("public/calendars")
}

fn default_upcoming_days() -> i64 {
    DEFAULT_UPCOMING_DAYS
}

fn default_source_timeout_secs() -> u64 {
    DEFAULT_SOURCE_TIMEOUT_SECS
}

fn default_calendar_name() -> String {
    "AI Events Amsterdam".to_string()
}

fn default_calendar_description() -> String {
    "AI-related events happening in Amsterdam".to_string()
}

fn default_timezone() -> String {
    "Europe/Amsterdam".to_string()
}
