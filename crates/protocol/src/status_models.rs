//! Scheduler status models.
//!
//! These structures are what the trigger surface (CLI daemon, HTTP layer)
//! reports to callers when asked for the scheduler's state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Lifecycle state of the discovery scheduler.
///
/// A scheduler is `Idle` between runs and `Running` while exactly one
/// discovery run is in flight.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchedulerState {
    Idle,
    Running,
}

/// Point-in-time snapshot of the scheduler.
///
/// Serializes as:
///
/// ```json
/// { "isRunning": false, "cronActive": true, "lastRun": "2024-10-09T10:00:00Z" }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerStatus {
    /// Whether a discovery run is currently in flight.
    pub is_running: bool,

    /// Whether a recurring cron job is installed.
    pub cron_active: bool,

    /// Completion time of the most recent successful run.
    #[serde(default)]
    pub last_run: Option<DateTime<Utc>>,
}

impl SchedulerStatus {
    pub fn state(&self) -> SchedulerState {
        if self.is_running {
            SchedulerState::Running
        } else {
            SchedulerState::Idle
        }
    }
}
