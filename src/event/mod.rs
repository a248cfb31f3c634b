//! Match event model and storage
//!
//! Append-only record of discrete match events. Reads come back ordered by
//! `(minute, ingestion order)` regardless of arrival order.

mod memory;
mod types;

pub use memory::InMemoryEventStore;
pub use types::{EventId, EventType, MatchEvent, NewMatchEvent, Team};

use async_trait::async_trait;
use thiserror::Error;

/// Event storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backing store unavailable or failed mid-operation
    #[error("event store unavailable: {0}")]
    Unavailable(String),
}

/// Trait for event storage implementations
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Append an event to its match history
    async fn append(&self, event: MatchEvent) -> Result<(), StoreError>;
    /// Full event history for a match, ordered by `(minute, ingestion order)`
    async fn events_for_match(&self, match_id: &str) -> Result<Vec<MatchEvent>, StoreError>;
}
