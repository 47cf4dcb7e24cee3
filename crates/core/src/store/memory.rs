//! In-memory event store for tests and throwaway runs.

use async_trait::async_trait;
use chrono::Utc;
use er_protocol::Event;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::error::{StoreError, StoreResult};
use super::{upcoming_window, EventStore};

#[derive(Default)]
pub struct MemoryEventStore {
    events: Mutex<BTreeMap<String, Event>>,
    failing_ids: Mutex<HashSet<String>>,
    fail_get_all: AtomicBool,
    upserts: AtomicUsize,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `upsert` fail for the given event ids.
    pub fn fail_upserts_for<I, S>(&self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Ok(mut failing) = self.failing_ids.lock() {
            failing.extend(ids.into_iter().map(Into::into));
        }
    }

    /// Make every `get_all` call fail.
    pub fn fail_get_all(&self, fail: bool) {
        self.fail_get_all.store(fail, Ordering::SeqCst);
    }

    /// Successful upserts so far.
    pub fn upsert_count(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }

    fn events(&self) -> StoreResult<MutexGuard<'_, BTreeMap<String, Event>>> {
        self.events.lock().map_err(|_| StoreError::Poisoned)
    }

    fn sorted(events: impl Iterator<Item = Event>) -> Vec<Event> {
        let mut events: Vec<Event> = events.collect();
        events.sort_by(|a, b| a.start_date.cmp(&b.start_date).then_with(|| a.id.cmp(&b.id)));
        events
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn initialize(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn upsert(&self, event: &Event) -> StoreResult<()> {
        let rejected = self
            .failing_ids
            .lock()
            .map_err(|_| StoreError::Poisoned)?
            .contains(&event.id);
        if rejected {
            return Err(StoreError::Unavailable(format!("upsert rejected for {}", event.id)));
        }

        self.events()?.insert(event.id.clone(), event.clone());
        self.upserts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn get_all(&self) -> StoreResult<Vec<Event>> {
        if self.fail_get_all.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("get_all disabled".to_string()));
        }
        Ok(Self::sorted(self.events()?.values().cloned()))
    }

    async fn get_upcoming(&self, days: i64) -> StoreResult<Vec<Event>> {
        let (from, to) = upcoming_window(Utc::now(), days);
        let events = self.events()?;
        Ok(Self::sorted(
            events
                .values()
                .filter(|e| e.start_date >= from && e.start_date <= to)
                .cloned(),
        ))
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.events()?.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventDraft;
    use chrono::Duration;

    fn event(title: &str, days: i64) -> Event {
        EventDraft::new(title, Utc::now() + Duration::days(days), "Amsterdam")
            .source("test")
            .build(Utc::now())
            .unwrap()
    }

    #[tokio::test]
    async fn test_upsert_replaces_by_id() {
        let store = MemoryEventStore::new();
        let e = event("A", 1);
        store.upsert(&e).await.unwrap();
        store.upsert(&e).await.unwrap();

        assert_eq!(store.get_all().await.unwrap().len(), 1);
        assert_eq!(store.upsert_count(), 2);
    }

    #[tokio::test]
    async fn test_get_all_sorted_and_upcoming_filtered() {
        let store = MemoryEventStore::new();
        store.upsert(&event("Far", 60)).await.unwrap();
        store.upsert(&event("Soon", 2)).await.unwrap();
        store.upsert(&event("Past", -2)).await.unwrap();

        let all: Vec<String> = store
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(all, vec!["Past", "Soon", "Far"]);

        let upcoming: Vec<String> = store
            .get_upcoming(30)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(upcoming, vec!["Soon"]);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = MemoryEventStore::new();
        let bad = event("Bad", 1);
        let good = event("Good", 1);
        store.fail_upserts_for([bad.id.clone()]);

        assert!(matches!(store.upsert(&bad).await, Err(StoreError::Unavailable(_))));
        store.upsert(&good).await.unwrap();

        store.fail_get_all(true);
        assert!(store.get_all().await.is_err());
        store.fail_get_all(false);
        assert_eq!(store.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryEventStore::new();
        let e = event("A", 1);
        store.upsert(&e).await.unwrap();
        store.delete(&e.id).await.unwrap();
        assert!(store.get_all().await.unwrap().is_empty());
    }
}
