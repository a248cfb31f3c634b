//! Live match ingestion orchestrator

use crate::channel::{MatchChannel, MessageKind, ViewerHandle, ViewerId};
use crate::event::{EventStore, EventType, MatchEvent, NewMatchEvent, StoreError, Team};
use crate::telemetry::{self, CounterMetric};
use crate::xg::{self, XgConfig, XgTimelineEntry};
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Default cap on event-history reads
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Wires event storage, xG aggregation, and room fan-out for live matches
///
/// Ingestion for one match is a single critical section across
/// append → recompute → publish, so two concurrent events for the same match
/// never interleave in the broadcast timeline. Different matches never
/// contend.
pub struct MatchOrchestrator {
    store: Arc<dyn EventStore>,
    channel: Arc<MatchChannel>,
    xg: XgConfig,
    match_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl MatchOrchestrator {
    /// Create an orchestrator over a store and a fan-out channel
    pub fn new(store: Arc<dyn EventStore>, channel: Arc<MatchChannel>, xg: XgConfig) -> Self {
        Self {
            store,
            channel,
            xg,
            match_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Ingest one match event and broadcast the refreshed timeline
    ///
    /// Not idempotent: a retried call appends a duplicate event. Publish
    /// failures never fail the ingestion.
    pub async fn ingest_event(&self, new: NewMatchEvent) -> Result<MatchEvent, StoreError> {
        let event = MatchEvent {
            id: Uuid::new_v4(),
            match_id: new.match_id,
            timestamp: new.timestamp.unwrap_or_else(Utc::now),
            minute: new.minute,
            event_type: EventType::from_label(&new.event_type),
            team: Team::from_label(&new.team),
            player_ids: new.player_ids,
            x: new.x,
            y: new.y,
            meta: new.meta,
        };

        let lock = self.match_lock(&event.match_id).await;
        let _guard = lock.lock().await;

        self.store.append(event.clone()).await?;
        telemetry::increment(CounterMetric::EventsIngested);
        tracing::debug!(
            match_id = %event.match_id,
            minute = event.minute,
            event_type = ?event.event_type,
            "Event ingested"
        );

        self.broadcast(&event.match_id, MessageKind::MatchEvent, &event)
            .await;

        let history = self.store.events_for_match(&event.match_id).await?;
        let entries = xg::compute_timeline(&history, &self.xg);
        self.broadcast(&event.match_id, MessageKind::MatchXg, &json!({ "entries": entries }))
            .await;

        Ok(event)
    }

    /// Ordered event history snapshot, capped at `limit` entries
    pub async fn events(
        &self,
        match_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<MatchEvent>, StoreError> {
        let mut history = self.store.events_for_match(match_id).await?;
        history.truncate(limit.unwrap_or(DEFAULT_HISTORY_LIMIT));
        Ok(history)
    }

    /// Freshly recomputed xG timeline for a match
    pub async fn xg_timeline(&self, match_id: &str) -> Result<Vec<XgTimelineEntry>, StoreError> {
        let history = self.store.events_for_match(match_id).await?;
        Ok(xg::compute_timeline(&history, &self.xg))
    }

    /// Add a viewer to a match room
    pub async fn join(&self, match_id: &str, viewer: ViewerHandle) {
        self.channel.subscribe(match_id, viewer).await;
    }

    /// Remove a viewer from a match room
    pub async fn leave(&self, match_id: &str, viewer_id: ViewerId) {
        self.channel.unsubscribe(match_id, viewer_id).await;
    }

    async fn match_lock(&self, match_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.match_locks.lock().await;
        locks
            .entry(match_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    async fn broadcast<T: serde::Serialize>(&self, match_id: &str, kind: MessageKind, payload: &T) {
        match serde_json::to_value(payload) {
            Ok(value) => {
                self.channel.publish(match_id, kind, value).await;
            }
            Err(e) => {
                tracing::warn!(error = %e, topic = kind.topic(), "Failed to encode broadcast payload")
            }
        }
    }
}
