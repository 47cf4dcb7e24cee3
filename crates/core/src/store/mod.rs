//! Durable, key-addressed event persistence.
//!
//! The discovery pipeline only needs upsert by id and ordered reads; both
//! the SQLite store and the in-memory store implement [`EventStore`].

pub mod error;
pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use er_protocol::Event;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryEventStore;
pub use sqlite::SqliteEventStore;

#[async_trait]
pub trait EventStore: Send + Sync {
    /// Create the schema if needed. Safe to call more than once.
    async fn initialize(&self) -> StoreResult<()>;

    /// Insert or fully replace the event with the same id.
    async fn upsert(&self, event: &Event) -> StoreResult<()>;

    /// Every stored event, ascending by start date.
    async fn get_all(&self) -> StoreResult<Vec<Event>>;

    /// Events starting within `[now, now + days]`, ascending by start date.
    async fn get_upcoming(&self, days: i64) -> StoreResult<Vec<Event>>;

    /// Deleting a missing id is not an error.
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

/// The `[now, now + days]` window used by `get_upcoming`.
pub fn upcoming_window(now: DateTime<Utc>, days: i64) -> (DateTime<Utc>, DateTime<Utc>) {
    (now, now + Duration::days(days))
}
