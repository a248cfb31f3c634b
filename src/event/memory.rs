//! In-memory event store

use super::{EventStore, MatchEvent, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory append-only event store
///
/// Events are kept in arrival order per match; reads sort by minute with a
/// stable sort, so arrival order breaks ties.
#[derive(Default)]
pub struct InMemoryEventStore {
    events: RwLock<HashMap<String, Vec<MatchEvent>>>,
}

impl InMemoryEventStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn append(&self, event: MatchEvent) -> Result<(), StoreError> {
        let mut events = self.events.write().await;
        events.entry(event.match_id.clone()).or_default().push(event);
        Ok(())
    }

    async fn events_for_match(&self, match_id: &str) -> Result<Vec<MatchEvent>, StoreError> {
        let events = self.events.read().await;
        let mut history = events.get(match_id).cloned().unwrap_or_default();
        history.sort_by_key(|e| e.minute);
        Ok(history)
    }
}
