//! Expected-goals aggregation
//!
//! Pure recomputation over a match's full ordered event history. No
//! incremental state is kept between calls: the same input always produces
//! the same timeline, which keeps concurrent and out-of-order arrival from
//! desynchronizing the running totals.

use super::XgTimelineEntry;
use crate::event::{EventType, MatchEvent, Team};
use serde::Deserialize;

/// Aggregation parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct XgConfig {
    /// Steepness of the logistic win-probability link
    pub win_prob_steepness: f64,
}

impl Default for XgConfig {
    fn default() -> Self {
        Self {
            win_prob_steepness: 0.6,
        }
    }
}

/// Expected-goals contribution of a single event
///
/// An explicit numeric `meta.xg` wins over the heuristic table.
pub fn event_contribution(event: &MatchEvent) -> f64 {
    if let Some(xg) = event.xg_override() {
        return xg;
    }
    match event.event_type {
        EventType::Goal => 0.70,
        EventType::BigChance => 0.50,
        EventType::ShotOnTarget | EventType::Shot => 0.30,
        EventType::ShotOffTarget => 0.05,
        EventType::Other => 0.0,
    }
}

/// Probability the home side wins given cumulative xG totals
///
/// Logistic link on the xG differential, clamped into [0, 1].
pub fn win_probability(xg_home: f64, xg_away: f64, steepness: f64) -> f64 {
    let prob = 1.0 / (1.0 + (-steepness * (xg_home - xg_away)).exp());
    prob.clamp(0.0, 1.0)
}

/// Round to 4 decimal places for output determinism
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Compute the cumulative timeline for an ordered event sequence
///
/// One entry per event, in input order. Inputs are expected pre-sorted by
/// `(minute, ingestion order)`; the store provides that order. Running
/// totals accumulate unrounded, only the emitted entries are rounded.
pub fn compute_timeline(events: &[MatchEvent], config: &XgConfig) -> Vec<XgTimelineEntry> {
    let mut home = 0.0_f64;
    let mut away = 0.0_f64;
    let mut entries = Vec::with_capacity(events.len());

    for event in events {
        let xg = event_contribution(event);
        match event.team {
            Team::Home => home += xg,
            Team::Away => away += xg,
        }
        entries.push(XgTimelineEntry {
            minute: event.minute,
            timestamp: event.timestamp,
            xg_home: round4(home),
            xg_away: round4(away),
            win_prob_home: round4(win_probability(home, away, config.win_prob_steepness)),
        });
    }

    entries
}
