//! Resolved application configuration.

use er_protocol::{CalendarConfig, RadarConfig};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration after file loading, environment overrides and path
/// resolution.
///
/// # Example
///
/// ```rust,no_run
/// use er_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Database at {}", config.database_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory containing `.event-radar/`.
    pub root: PathBuf,

    /// Settings with `database_path` and `output_dir` made absolute.
    pub radar: RadarConfig,
}

impl AppConfig {
    /// Defaults for `root`, with paths resolved against it.
    pub fn with_root(root: &Path) -> Self {
        let mut radar = RadarConfig::default();
        radar.database_path = resolve(root, &radar.database_path);
        radar.output_dir = resolve(root, &radar.output_dir);
        Self {
            root: root.to_path_buf(),
            radar,
        }
    }

    pub fn schedule(&self) -> &str {
        &self.radar.schedule
    }

    pub fn database_path(&self) -> &Path {
        &self.radar.database_path
    }

    pub fn output_dir(&self) -> &Path {
        &self.radar.output_dir
    }

    pub fn calendar(&self) -> &CalendarConfig {
        &self.radar.calendar
    }

    pub fn source_timeout(&self) -> Duration {
        Duration::from_secs(self.radar.source_timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::with_root(Path::new("."))
    }
}

pub(crate) fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
