//! Match room registry and fan-out

use super::{Envelope, MessageKind, ViewerHandle, ViewerId};
use crate::telemetry::{self, CounterMetric};
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::RwLock;

/// Fan-out hub for live match updates
///
/// Rooms are keyed by match id and hold the handles of currently connected
/// viewers. Publishing never blocks on a subscriber: a full buffer drops the
/// message for that subscriber only, a closed buffer gets the viewer pruned.
#[derive(Default)]
pub struct MatchChannel {
    rooms: RwLock<HashMap<String, HashMap<ViewerId, ViewerHandle>>>,
}

impl MatchChannel {
    /// Create a channel with no rooms
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a viewer to a match room
    pub async fn subscribe(&self, match_id: &str, viewer: ViewerHandle) {
        let mut rooms = self.rooms.write().await;
        rooms
            .entry(match_id.to_string())
            .or_default()
            .insert(viewer.id(), viewer);
    }

    /// Remove a viewer from a match room
    pub async fn unsubscribe(&self, match_id: &str, viewer_id: ViewerId) {
        let mut rooms = self.rooms.write().await;
        if let Some(room) = rooms.get_mut(match_id) {
            room.remove(&viewer_id);
            if room.is_empty() {
                rooms.remove(match_id);
            }
        }
    }

    /// Number of viewers currently in a match room
    pub async fn room_size(&self, match_id: &str) -> usize {
        let rooms = self.rooms.read().await;
        rooms.get(match_id).map_or(0, |room| room.len())
    }

    /// Publish a message to every viewer of a match
    ///
    /// Returns the number of subscribers the message was handed to. Failures
    /// are logged and counted, never surfaced to the caller.
    pub async fn publish(&self, match_id: &str, kind: MessageKind, payload: Value) -> usize {
        let handles: Vec<ViewerHandle> = {
            let rooms = self.rooms.read().await;
            match rooms.get(match_id) {
                Some(room) => room.values().cloned().collect(),
                None => return 0,
            }
        };

        let mut delivered = 0_usize;
        let mut closed: Vec<ViewerId> = Vec::new();

        for handle in &handles {
            let envelope = Envelope {
                match_id: match_id.to_string(),
                kind,
                payload: payload.clone(),
            };
            match handle.try_deliver(envelope) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    telemetry::increment(CounterMetric::MessagesDropped);
                    tracing::warn!(
                        match_id,
                        topic = kind.topic(),
                        viewer = %handle.id(),
                        "Subscriber buffer full, dropping message"
                    );
                }
                Err(TrySendError::Closed(_)) => closed.push(handle.id()),
            }
        }

        if !closed.is_empty() {
            let mut rooms = self.rooms.write().await;
            if let Some(room) = rooms.get_mut(match_id) {
                for id in &closed {
                    room.remove(id);
                }
                if room.is_empty() {
                    rooms.remove(match_id);
                }
            }
            tracing::debug!(match_id, count = closed.len(), "Pruned disconnected viewers");
        }

        telemetry::increment_by(CounterMetric::MessagesPublished, delivered as u64);
        delivered
    }
}
