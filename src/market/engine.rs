//! Prediction market state machine

use super::{
    Awarded, MarketError, NewPrediction, Prediction, PredictionId, PredictionSnapshot, Resolution,
    Submission,
};
use crate::channel::{MatchChannel, MessageKind};
use crate::reward::RewardHook;
use crate::telemetry::{self, CounterMetric};
use chrono::{Duration, Utc};
use serde_json::json;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// Points credited to each correct submission
pub const WINNER_POINTS: i64 = 10;

/// Open window when the creator gives no explicit expiry
pub const DEFAULT_EXPIRY_SECS: u64 = 300;

/// Prediction market engine
///
/// Each prediction lives behind its own async mutex: submit's
/// check-then-insert and resolve's check-then-set run as single critical
/// sections per prediction, while unrelated predictions stay fully
/// concurrent.
pub struct PredictionMarket {
    channel: Arc<MatchChannel>,
    reward: Arc<dyn RewardHook>,
    predictions: RwLock<HashMap<PredictionId, Arc<Mutex<Prediction>>>>,
    default_expiry: Duration,
}

impl PredictionMarket {
    /// Create a market with the default expiry window
    pub fn new(channel: Arc<MatchChannel>, reward: Arc<dyn RewardHook>) -> Self {
        Self::with_default_expiry(channel, reward, DEFAULT_EXPIRY_SECS)
    }

    /// Create a market with an explicit default expiry window in seconds
    pub fn with_default_expiry(
        channel: Arc<MatchChannel>,
        reward: Arc<dyn RewardHook>,
        default_expiry_secs: u64,
    ) -> Self {
        Self {
            channel,
            reward,
            predictions: RwLock::new(HashMap::new()),
            default_expiry: Duration::seconds(default_expiry_secs as i64),
        }
    }

    /// Open a new prediction
    pub async fn create(&self, new: NewPrediction) -> Result<Prediction, MarketError> {
        if new.question.trim().is_empty() {
            return Err(MarketError::InvalidInput(
                "question must not be empty".to_string(),
            ));
        }
        let distinct: HashSet<&str> = new.choices.iter().map(String::as_str).collect();
        if distinct.len() < 2 {
            return Err(MarketError::InvalidInput(
                "at least 2 distinct choices required".to_string(),
            ));
        }

        let now = Utc::now();
        let window = new
            .expires_in_secs
            .map_or(self.default_expiry, |secs| Duration::seconds(secs as i64));
        let prediction = Prediction {
            id: Uuid::new_v4(),
            match_id: new.match_id,
            question: new.question,
            choices: new.choices,
            created_at: now,
            expires_at: now + window,
            resolved_at: None,
            correct_choice: None,
            creator_id: new.creator_id,
            submissions: BTreeMap::new(),
        };

        {
            let mut predictions = self.predictions.write().await;
            predictions.insert(prediction.id, Arc::new(Mutex::new(prediction.clone())));
        }

        telemetry::increment(CounterMetric::PredictionsCreated);
        tracing::info!(
            prediction = %prediction.id,
            match_id = %prediction.match_id,
            "Prediction opened"
        );
        self.publish(&prediction.match_id, MessageKind::PredictionNew, &prediction)
            .await;

        Ok(prediction)
    }

    /// Submit one user's choice
    ///
    /// The duplicate check and the insert are one critical section per
    /// prediction, so two racing submissions from the same user cannot both
    /// land. Returns the updated per-choice counts.
    pub async fn submit(
        &self,
        prediction_id: PredictionId,
        user_id: &str,
        choice: &str,
    ) -> Result<BTreeMap<String, usize>, MarketError> {
        let entry = self.entry(prediction_id).await?;
        let mut prediction = entry.lock().await;

        if choice.trim().is_empty() {
            return Err(MarketError::InvalidInput(
                "choice must not be empty".to_string(),
            ));
        }
        if Utc::now() > prediction.expires_at {
            return Err(MarketError::Expired);
        }
        if !prediction.choices.iter().any(|c| c == choice) {
            return Err(MarketError::InvalidChoice);
        }
        if prediction.submissions.contains_key(user_id) {
            return Err(MarketError::AlreadySubmitted);
        }

        prediction.submissions.insert(
            user_id.to_string(),
            Submission {
                choice: choice.to_string(),
                submitted_at: Utc::now(),
            },
        );

        let counts = prediction.counts();
        telemetry::increment(CounterMetric::SubmissionsAccepted);
        tracing::debug!(prediction = %prediction.id, user = user_id, choice, "Submission accepted");
        self.publish(
            &prediction.match_id,
            MessageKind::PredictionUpdate,
            &json!({ "id": prediction.id, "counts": counts }),
        )
        .await;

        Ok(counts)
    }

    /// Resolve a prediction exactly once and distribute rewards
    ///
    /// The resolved check and the state transition are one critical section
    /// per prediction; a second resolve call is an error, never a repeat of
    /// the reward distribution. One winner's failed credit is logged and
    /// does not block the remaining winners.
    pub async fn resolve(
        &self,
        prediction_id: PredictionId,
        correct_choice: &str,
        requester_id: &str,
        requester_is_admin: bool,
    ) -> Result<Resolution, MarketError> {
        let entry = self.entry(prediction_id).await?;
        let mut prediction = entry.lock().await;

        if !prediction.choices.iter().any(|c| c == correct_choice) {
            return Err(MarketError::InvalidChoice);
        }
        if prediction.is_resolved() {
            return Err(MarketError::AlreadyResolved);
        }
        if prediction.creator_id != requester_id && !requester_is_admin {
            return Err(MarketError::Forbidden);
        }

        prediction.correct_choice = Some(correct_choice.to_string());
        prediction.resolved_at = Some(Utc::now());

        let winners: Vec<String> = prediction
            .submissions
            .iter()
            .filter(|(_, submission)| submission.choice == correct_choice)
            .map(|(user, _)| user.clone())
            .collect();

        let mut awarded = Vec::with_capacity(winners.len());
        for user in winners {
            if let Err(e) = self.reward.credit(&user, WINNER_POINTS).await {
                telemetry::increment(CounterMetric::RewardFailures);
                tracing::warn!(error = %e, user = %user, "Reward credit failed");
            }
            awarded.push(Awarded {
                user,
                points: WINNER_POINTS,
            });
        }

        let resolution = Resolution {
            id: prediction.id,
            correct_choice: correct_choice.to_string(),
            awarded,
        };

        telemetry::increment(CounterMetric::PredictionsResolved);
        tracing::info!(
            prediction = %prediction.id,
            correct_choice,
            winners = resolution.awarded.len(),
            "Prediction resolved"
        );
        self.publish(
            &prediction.match_id,
            MessageKind::PredictionResolved,
            &resolution,
        )
        .await;

        Ok(resolution)
    }

    /// Read-only prediction state with per-choice counts
    pub async fn snapshot(
        &self,
        prediction_id: PredictionId,
    ) -> Result<PredictionSnapshot, MarketError> {
        let entry = self.entry(prediction_id).await?;
        let prediction = entry.lock().await;
        Ok(PredictionSnapshot {
            counts: prediction.counts(),
            prediction: prediction.clone(),
        })
    }

    async fn entry(&self, id: PredictionId) -> Result<Arc<Mutex<Prediction>>, MarketError> {
        let predictions = self.predictions.read().await;
        predictions.get(&id).cloned().ok_or(MarketError::NotFound)
    }

    async fn publish<T: serde::Serialize>(&self, match_id: &str, kind: MessageKind, payload: &T) {
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
