//! Mock source implementation for testing.

use async_trait::async_trait;
use er_protocol::Event;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

use crate::sources::base::{Source, SourceError, DEFAULT_SOURCE_TIMEOUT};

#[derive(Clone)]
enum Behavior {
    Return(Vec<Event>),
    Fail(String),
    Block(BlockHandle, Vec<Event>),
    Hang,
}

/// Lets a test observe when a blocking [`MockSource`] has been entered and
/// decide when it may return.
#[derive(Clone, Default)]
pub struct BlockHandle {
    started: Arc<Notify>,
    release: Arc<Notify>,
}

impl BlockHandle {
    /// Wait until the source's `search_events` has been called.
    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    /// Let the blocked call return. Safe to call before the call starts.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[derive(Clone)]
pub struct MockSource {
    name: String,
    behavior: Behavior,
    timeout: Duration,
    calls: Arc<AtomicUsize>,
}

impl MockSource {
    fn with_behavior(name: &str, behavior: Behavior) -> Self {
        Self {
            name: name.to_string(),
            behavior,
            timeout: DEFAULT_SOURCE_TIMEOUT,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn returning(name: &str, events: Vec<Event>) -> Self {
        Self::with_behavior(name, Behavior::Return(events))
    }

    pub fn failing(name: &str, message: &str) -> Self {
        Self::with_behavior(name, Behavior::Fail(message.to_string()))
    }

    /// A source that returns `events` only after [`BlockHandle::release`].
    pub fn blocking(name: &str, events: Vec<Event>) -> (Self, BlockHandle) {
        let handle = BlockHandle::default();
        let source = Self::with_behavior(name, Behavior::Block(handle.clone(), events));
        (source, handle)
    }

    /// A source that never returns; pair with [`MockSource::with_timeout`].
    pub fn hanging(name: &str) -> Self {
        Self::with_behavior(name, Behavior::Hang)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Number of `search_events` calls so far, shared across clones.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Source for MockSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn base_url(&self) -> &str {
        "mock://source"
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn search_events(&self) -> Result<Vec<Event>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            Behavior::Return(events) => Ok(events.clone()),
            Behavior::Fail(message) => Err(SourceError::Other(message.clone())),
            Behavior::Block(handle, events) => {
                handle.started.notify_one();
                handle.release.notified().await;
                Ok(events.clone())
            }
            Behavior::Hang => {
                std::future::pending::<()>().await;
                Ok(Vec::new())
            }
        }
    }
}
