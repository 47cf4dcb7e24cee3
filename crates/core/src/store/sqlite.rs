//! SQLite-backed event store.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use er_protocol::Event;
use rusqlite::{params, params_from_iter, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use super::error::{StoreError, StoreResult};
use super::{upcoming_window, EventStore};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS events (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    startDate TEXT NOT NULL,
    endDate TEXT NOT NULL,
    location TEXT NOT NULL,
    url TEXT NOT NULL,
    source TEXT NOT NULL,
    tags TEXT NOT NULL,
    price TEXT,
    organizer TEXT,
    imageUrl TEXT,
    createdAt TEXT NOT NULL,
    updatedAt TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_events_start_date ON events(startDate);
CREATE INDEX IF NOT EXISTS idx_events_source ON events(source);
"#;

const SELECT_COLUMNS: &str = concat!(
    "SELECT id, title, description, startDate, endDate, location, url, source, tags, ",
    "price, organizer, imageUrl, createdAt, updatedAt FROM events"
);

const UPSERT: &str = r#"
INSERT OR REPLACE INTO events
(id, title, description, startDate, endDate, location, url, source, tags,
 price, organizer, imageUrl, createdAt, updatedAt)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
"#;

/// Event store over a single SQLite connection.
///
/// Instants are stored as RFC 3339 UTC strings with millisecond precision,
/// which sort lexically in chronological order. Every statement runs on the
/// blocking thread pool.
pub struct SqliteEventStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteEventStore {
    /// Open (or create) the database file, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        info!(path = %path.display(), "Opening event database");
        let conn = Connection::open(path)?;
        Ok(Self::from_connection(conn))
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Run `op` against the connection on the blocking pool.
    async fn run<T, F>(&self, op: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(|_| StoreError::Poisoned)?;
            op(&conn)
        })
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?
    }

    async fn query(&self, sql: String, params: Vec<String>) -> StoreResult<Vec<Event>> {
        self.run(move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(params.iter()), EventRow::from_row)?
                .collect::<Result<Vec<_>, _>>()?;

            rows.into_iter().map(EventRow::into_event).collect()
        })
        .await
    }
}

#[async_trait]
impl EventStore for SqliteEventStore {
    async fn initialize(&self) -> StoreResult<()> {
        self.run(|conn| Ok(conn.execute_batch(SCHEMA)?)).await?;
        debug!("Event schema ready");
        Ok(())
    }

    async fn upsert(&self, event: &Event) -> StoreResult<()> {
        let tags = serde_json::to_string(&event.tags)?;
        let event = event.clone();

        self.run(move |conn| {
            conn.execute(
                UPSERT,
                params![
                    event.id,
                    event.title,
                    event.description,
                    format_timestamp(&event.start_date),
                    format_timestamp(&event.end_date),
                    event.location,
                    event.url,
                    event.source,
                    tags,
                    event.price,
                    event.organizer,
                    event.image_url,
                    format_timestamp(&event.created_at),
                    format_timestamp(&event.updated_at),
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn get_all(&self) -> StoreResult<Vec<Event>> {
        self.query(
            format!("{SELECT_COLUMNS} ORDER BY startDate ASC, id ASC"),
            Vec::new(),
        )
        .await
    }

    async fn get_upcoming(&self, days: i64) -> StoreResult<Vec<Event>> {
        let (from, to) = upcoming_window(Utc::now(), days);

        self.query(
            format!(
                "{SELECT_COLUMNS} WHERE startDate >= ?1 AND startDate <= ?2 \
                 ORDER BY startDate ASC, id ASC"
            ),
            vec![format_timestamp(&from), format_timestamp(&to)],
        )
        .await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let key = id.to_string();
        let removed = self
            .run(move |conn| Ok(conn.execute("DELETE FROM events WHERE id = ?1", [key])?))
            .await?;
        debug!(id = %id, removed, "Deleted event");
        Ok(())
    }
}

fn format_timestamp(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(column: &'static str, value: String) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| StoreError::InvalidTimestamp { column, value })
}

/// Raw column values; conversion happens outside the rusqlite closure so
/// that bad data surfaces as a `StoreError`.
struct EventRow {
    id: String,
    title: String,
    description: String,
    start_date: String,
    end_date: String,
    location: String,
    url: String,
    source: String,
    tags: String,
    price: Option<String>,
    organizer: Option<String>,
    image_url: Option<String>,
    created_at: String,
    updated_at: String,
}

impl EventRow {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            start_date: row.get(3)?,
            end_date: row.get(4)?,
            location: row.get(5)?,
            url: row.get(6)?,
            source: row.get(7)?,
            tags: row.get(8)?,
            price: row.get(9)?,
            organizer: row.get(10)?,
            image_url: row.get(11)?,
            created_at: row.get(12)?,
            updated_at: row.get(13)?,
        })
    }

    fn into_event(self) -> StoreResult<Event> {
        Ok(Event {
            id: self.id,
            title: self.title,
            description: self.description,
            start_date: parse_timestamp("startDate", self.start_date)?,
            end_date: parse_timestamp("endDate", self.end_date)?,
            location: self.location,
            url: self.url,
            source: self.source,
            tags: serde_json::from_str(&self.tags)?,
            price: self.price,
            organizer: self.organizer,
            image_url: self.image_url,
            created_at: parse_timestamp("createdAt", self.created_at)?,
            updated_at: parse_timestamp("updatedAt", self.updated_at)?,
        })
    }
}
