//! Shared construction context for network-backed sources.

use std::time::Duration;

use crate::sources::base::{SourceError, DEFAULT_SOURCE_TIMEOUT};

/// Browser-like User-Agent; listing pages tend to reject obvious bots.
const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 ",
    "(KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
);

/// HTTP client and limits shared by every source an agent factory builds.
///
/// `reqwest::Client` is internally reference counted, so cloning the context
/// shares one connection pool across sources.
#[derive(Clone, Debug)]
pub struct SourceContext {
    pub client: reqwest::Client,
    pub timeout: Duration,
}

impl SourceContext {
    pub fn new(timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client, timeout })
    }

    pub fn with_default_timeout() -> Result<Self, SourceError> {
        Self::new(DEFAULT_SOURCE_TIMEOUT)
    }
}
