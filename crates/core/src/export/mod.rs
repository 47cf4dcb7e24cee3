//! Export artifacts: iCalendar, CSV and JSON feed.
//!
//! The transforms in the submodules are pure functions over `&[Event]`;
//! [`ExportWriter`] writes the full artifact set to the output directory
//! after each discovery run.

pub mod csv_export;
pub mod feed;
pub mod filter;
pub mod ical;

use chrono::{DateTime, Utc};
use er_protocol::{CalendarConfig, Event};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

pub use csv_export::export_csv;
pub use feed::generate_json_feed;
pub use filter::{filter_by_tags, filter_upcoming};
pub use ical::generate_ical;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Unknown export format '{0}' (expected ical, csv or json)")]
    UnknownFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Ical,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Ical => "ics",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ical" | "ics" => Ok(Self::Ical),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Render `events` in one format.
pub fn render(
    format: ExportFormat,
    calendar: &CalendarConfig,
    events: &[Event],
    now: DateTime<Utc>,
) -> Result<String, ExportError> {
    match format {
        ExportFormat::Ical => Ok(generate_ical(calendar, events, now)),
        ExportFormat::Csv => export_csv(events),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(&generate_json_feed(
            calendar, events, now,
        ))?),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    pub total: usize,
    pub upcoming: usize,
}

/// Writes `events.ics`, `upcoming.ics`, `events.json` and `events.csv`.
#[derive(Debug, Clone)]
pub struct ExportWriter {
    pub output_dir: PathBuf,
    pub calendar: CalendarConfig,
    pub upcoming_days: i64,
}

impl ExportWriter {
    pub fn new(
        output_dir: impl Into<PathBuf>,
        calendar: CalendarConfig,
        upcoming_days: i64,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            calendar,
            upcoming_days,
        }
    }

    pub async fn write_all(
        &self,
        events: &[Event],
        now: DateTime<Utc>,
    ) -> Result<ExportSummary, ExportError> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| ExportError::Write {
                path: self.output_dir.clone(),
                source,
            })?;

        let upcoming = filter_upcoming(events, self.upcoming_days, now);

        for format in [ExportFormat::Ical, ExportFormat::Json, ExportFormat::Csv] {
            let contents = render(format, &self.calendar, events, now)?;
            self.write(&format!("events.{}", format.extension()), contents).await?;
        }
        let upcoming_file = format!("upcoming.{}", ExportFormat::Ical.extension());
        self.write(&upcoming_file, generate_ical(&self.calendar, &upcoming, now)).await?;

        info!(
            dir = %self.output_dir.display(),
            total = events.len(),
            upcoming = upcoming.len(),
            "Export artifacts written"
        );

        Ok(ExportSummary {
            total: events.len(),
            upcoming: upcoming.len(),
        })
    }

    pub fn path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    async fn write(&self, file_name: &str, contents: String) -> Result<(), ExportError> {
        let path = self.path(file_name);
        write_file(&path, contents).await
    }
}

async fn write_file(path: &Path, contents: String) -> Result<(), ExportError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })
}
