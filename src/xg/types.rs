//! Expected-goals timeline types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One point on a match's cumulative expected-goals timeline
///
/// Derived on demand from the event history, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XgTimelineEntry {
    /// Match minute of the underlying event
    pub minute: u32,
    /// Timestamp of the underlying event
    pub timestamp: DateTime<Utc>,
    /// Cumulative home expected goals, rounded to 4 decimals
    pub xg_home: f64,
    /// Cumulative away expected goals, rounded to 4 decimals
    pub xg_away: f64,
    /// Probability the home side wins, in [0, 1], rounded to 4 decimals
    pub win_prob_home: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_wire_shape() {
        let entry = XgTimelineEntry {
            minute: 23,
            timestamp: Utc::now(),
            xg_home: 0.6,
            xg_away: 0.05,
            win_prob_home: 0.5816,
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["minute"], 23);
        assert_eq!(value["xgHome"], 0.6);
        assert_eq!(value["xgAway"], 0.05);
        assert_eq!(value["winProbHome"], 0.5816);
    }
}
