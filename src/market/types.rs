//! Prediction market types

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

/// Prediction identifier
pub type PredictionId = Uuid;

/// Market errors surfaced to callers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketError {
    /// Malformed or missing required input
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Referenced prediction does not exist
    #[error("prediction not found")]
    NotFound,
    /// Choice is not one of the prediction's choices
    #[error("invalid choice")]
    InvalidChoice,
    /// Submission window has closed
    #[error("prediction has expired")]
    Expired,
    /// User already has a submission
    #[error("already submitted")]
    AlreadySubmitted,
    /// Resolution already happened; it is terminal, not idempotent
    #[error("already resolved")]
    AlreadyResolved,
    /// Requester is neither the creator nor an administrator
    #[error("forbidden")]
    Forbidden,
}

/// One user's submission
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub choice: String,
    pub submitted_at: DateTime<Utc>,
}

/// A time-boxed closed-choice question on a match
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub id: PredictionId,
    pub match_id: String,
    pub question: String,
    /// Immutable after creation
    pub choices: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_choice: Option<String>,
    pub creator_id: String,
    /// At most one entry per user
    pub submissions: BTreeMap<String, Submission>,
}

impl Prediction {
    /// Per-choice submission counts
    pub fn counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for submission in self.submissions.values() {
            *counts.entry(submission.choice.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Whether resolution has happened
    pub fn is_resolved(&self) -> bool {
        self.resolved_at.is_some()
    }
}

/// Parameters for opening a prediction
#[derive(Debug, Clone)]
pub struct NewPrediction {
    pub match_id: String,
    pub question: String,
    pub choices: Vec<String>,
    /// Open window in seconds; the market default applies when absent
    pub expires_in_secs: Option<u64>,
    pub creator_id: String,
}

/// A winning submission and the points it was credited
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Awarded {
    pub user: String,
    pub points: i64,
}

/// Outcome of a successful resolution
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub id: PredictionId,
    pub correct_choice: String,
    pub awarded: Vec<Awarded>,
}

/// Read-only prediction state with per-choice counts
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionSnapshot {
    pub prediction: Prediction,
    pub counts: BTreeMap<String, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_prediction() -> Prediction {
        Prediction {
            id: Uuid::new_v4(),
            match_id: "m1".to_string(),
            question: "Goal next 5?".to_string(),
            choices: vec!["yes".to_string(), "no".to_string()],
            created_at: Utc::now(),
            expires_at: Utc::now() + chrono::Duration::seconds(300),
            resolved_at: None,
            correct_choice: None,
            creator_id: "creator".to_string(),
            submissions: BTreeMap::new(),
        }
    }

    #[test]
    fn test_counts_empty() {
        assert!(open_prediction().counts().is_empty());
    }

    #[test]
    fn test_counts_per_choice() {
        let mut prediction = open_prediction();
        for (user, choice) in [("a", "yes"), ("b", "no"), ("c", "yes")] {
            prediction.submissions.insert(
                user.to_string(),
                Submission {
                    choice: choice.to_string(),
                    submitted_at: Utc::now(),
                },
            );
        }

        let counts = prediction.counts();
        assert_eq!(counts.get("yes"), Some(&2));
        assert_eq!(counts.get("no"), Some(&1));
    }

    #[test]
    fn test_resolved_flag() {
        let mut prediction = open_prediction();
        assert!(!prediction.is_resolved());
        prediction.resolved_at = Some(Utc::now());
        assert!(prediction.is_resolved());
    }

    #[test]
    fn test_prediction_wire_shape() {
        let prediction = open_prediction();
        let value = serde_json::to_value(&prediction).unwrap();

        assert_eq!(value["matchId"], "m1");
        assert_eq!(value["question"], "Goal next 5?");
        assert!(value.get("resolvedAt").is_none());
        assert!(value.get("correctChoice").is_none());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            MarketError::InvalidInput("question must not be empty".to_string()).to_string(),
            "invalid input: question must not be empty"
        );
        assert_eq!(MarketError::AlreadyResolved.to_string(), "already resolved");
        assert_eq!(MarketError::Forbidden.to_string(), "forbidden");
    }
}
