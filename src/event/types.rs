//! Match event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// Event identifier
pub type EventId = Uuid;

/// Kind of match event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Goal,
    BigChance,
    ShotOnTarget,
    Shot,
    ShotOffTarget,
    Other,
}

impl EventType {
    /// Parse an inbound label, case-insensitively
    ///
    /// Unknown labels fold to [`EventType::Other`] (zero xG contribution)
    /// rather than rejecting the event.
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "goal" => Self::Goal,
            "big_chance" => Self::BigChance,
            "shot_on_target" => Self::ShotOnTarget,
            "shot" => Self::Shot,
            "shot_off_target" => Self::ShotOffTarget,
            _ => Self::Other,
        }
    }
}

/// Side of the pitch an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Home,
    Away,
}

impl Team {
    /// Parse an inbound label, case-insensitively
    ///
    /// Anything that is not "home" counts as away; malformed labels are
    /// folded, not rejected.
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case("home") {
            Team::Home
        } else {
            Team::Away
        }
    }
}

/// An immutable match fact
///
/// Created once at ingestion, never mutated or deleted. Serialized with
/// camelCase field names to match the platform wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEvent {
    /// Unique event identifier, assigned at ingestion
    pub id: EventId,
    /// Match this event belongs to
    pub match_id: String,
    /// Moment the event happened (or was ingested, when not supplied)
    pub timestamp: DateTime<Utc>,
    /// Match minute
    pub minute: u32,
    /// Kind of event
    pub event_type: EventType,
    /// Side credited with the event
    pub team: Team,
    /// Players involved, in order of involvement
    pub player_ids: Vec<String>,
    /// Pitch x coordinate, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Pitch y coordinate, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Open key/value map; may carry an explicit `xg` override
    #[serde(default)]
    pub meta: HashMap<String, Value>,
}

impl MatchEvent {
    /// Explicit xG override carried in `meta`, when present and numeric
    pub fn xg_override(&self) -> Option<f64> {
        self.meta.get("xg").and_then(Value::as_f64)
    }
}

/// Ingestion input for a new match event
///
/// `event_type` and `team` arrive as raw labels and are folded into their
/// typed forms at ingestion; `timestamp` defaults to ingestion time.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMatchEvent {
    pub match_id: String,
    pub event_type: String,
    #[serde(default)]
    pub minute: u32,
    #[serde(default)]
    pub player_ids: Vec<String>,
    pub team: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
    #[serde(default)]
    pub meta: HashMap<String, Value>,
    pub timestamp: Option<DateTime<Utc>>,
}
