//! Match channel message types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Viewer identifier
pub type ViewerId = Uuid;

/// Kind of message fanned out to a match room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    /// A raw ingested match event
    #[serde(rename = "match:event")]
    MatchEvent,
    /// The freshly recomputed xG timeline
    #[serde(rename = "match:xg")]
    MatchXg,
    /// A newly opened prediction
    #[serde(rename = "prediction:new")]
    PredictionNew,
    /// Updated per-choice submission counts
    #[serde(rename = "prediction:update")]
    PredictionUpdate,
    /// A resolved prediction with its winner list
    #[serde(rename = "prediction:resolved")]
    PredictionResolved,
}

impl MessageKind {
    /// Wire topic for this kind
    pub fn topic(&self) -> &'static str {
        match self {
            MessageKind::MatchEvent => "match:event",
            MessageKind::MatchXg => "match:xg",
            MessageKind::PredictionNew => "prediction:new",
            MessageKind::PredictionUpdate => "prediction:update",
            MessageKind::PredictionResolved => "prediction:resolved",
        }
    }
}

/// A message delivered to subscribers of one match
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Match room the message was published to
    pub match_id: String,
    /// Message kind
    pub kind: MessageKind,
    /// JSON payload, shape determined by `kind`
    pub payload: Value,
}

/// Handle to a connected viewer
///
/// The sending half lives in the match rooms; the transport collaborator
/// drains the receiving half. One handle may join any number of rooms.
#[derive(Debug, Clone)]
pub struct ViewerHandle {
    id: ViewerId,
    tx: mpsc::Sender<Envelope>,
}

impl ViewerHandle {
    /// Create a handle with a bounded delivery buffer
    pub fn connect(buffer: usize) -> (Self, mpsc::Receiver<Envelope>) {
        let (tx, rx) = mpsc::channel(buffer);
        (
            Self {
                id: Uuid::new_v4(),
                tx,
            },
            rx,
        )
    }

    /// Viewer identifier
    pub fn id(&self) -> ViewerId {
        self.id
    }

    pub(crate) fn try_deliver(
        &self,
        envelope: Envelope,
    ) -> Result<(), mpsc::error::TrySendError<Envelope>> {
        self.tx.try_send(envelope)
    }
}
