//! Base Source trait and supporting types.

use async_trait::async_trait;
use er_protocol::Event;
use std::time::Duration;
use thiserror::Error;

/// Upper bound on a single source query unless the source overrides it.
pub const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("Source timed out after {0:?}")]
    TimedOut(Duration),
    #[error("Source failed: {0}")]
    Other(String),
}

/// One external origin of candidate events.
///
/// A source carries all of its configuration from construction (name, base
/// URL, query parameters) and takes no runtime input. It may perform network
/// or file I/O but must not touch state shared with other sources.
#[async_trait]
pub trait Source: Send + Sync {
    fn name(&self) -> &str;

    fn base_url(&self) -> &str;

    /// Bound applied by the owning agent to each `search_events` call.
    fn timeout(&self) -> Duration {
        DEFAULT_SOURCE_TIMEOUT
    }

    async fn search_events(&self) -> Result<Vec<Event>, SourceError>;
}
