//! In-process reputation ledger

use super::RewardHook;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Badge tier derived from reputation, highest applicable only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTier {
    Rising,
    Popular,
    Star,
    Legend,
}

impl BadgeTier {
    /// Tier for a reputation score, if any
    pub fn for_reputation(reputation: i64) -> Option<Self> {
        match reputation {
            r if r >= 100 => Some(Self::Legend),
            r if r >= 50 => Some(Self::Star),
            r if r >= 20 => Some(Self::Popular),
            r if r >= 10 => Some(Self::Rising),
            _ => None,
        }
    }
}

/// Reputation counters keyed by user
///
/// Reference implementation of [`RewardHook`]; a deployment backed by the
/// platform's user storage satisfies the same contract.
#[derive(Default)]
pub struct ReputationLedger {
    scores: RwLock<HashMap<String, i64>>,
}

impl ReputationLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Current reputation for a user (0 when unknown)
    pub async fn reputation_of(&self, user_id: &str) -> i64 {
        let scores = self.scores.read().await;
        scores.get(user_id).copied().unwrap_or(0)
    }

    /// Current badge tier for a user
    pub async fn badge_of(&self, user_id: &str) -> Option<BadgeTier> {
        BadgeTier::for_reputation(self.reputation_of(user_id).await)
    }

    /// Top users by reputation, descending, ties broken by user id
    pub async fn leaderboard(&self, limit: usize) -> Vec<(String, i64)> {
        let scores = self.scores.read().await;
        let mut entries: Vec<(String, i64)> =
            scores.iter().map(|(user, score)| (user.clone(), *score)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(limit);
        entries
    }
}

#[async_trait]
impl RewardHook for ReputationLedger {
    async fn credit(&self, user_id: &str, points: i64) -> anyhow::Result<()> {
        let mut scores = self.scores.write().await;
        let score = scores.entry(user_id.to_string()).or_insert(0);
        *score += points;
        tracing::debug!(user = user_id, points, total = *score, "Reputation credited");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_thresholds() {
        assert_eq!(BadgeTier::for_reputation(0), None);
        assert_eq!(BadgeTier::for_reputation(9), None);
        assert_eq!(BadgeTier::for_reputation(10), Some(BadgeTier::Rising));
        assert_eq!(BadgeTier::for_reputation(19), Some(BadgeTier::Rising));
        assert_eq!(BadgeTier::for_reputation(20), Some(BadgeTier::Popular));
        assert_eq!(BadgeTier::for_reputation(50), Some(BadgeTier::Star));
        assert_eq!(BadgeTier::for_reputation(100), Some(BadgeTier::Legend));
        assert_eq!(BadgeTier::for_reputation(250), Some(BadgeTier::Legend));
    }

    #[tokio::test]
    async fn test_credit_accumulates() {
        let ledger = ReputationLedger::new();
        ledger.credit("alice", 10).await.unwrap();
        ledger.credit("alice", 10).await.unwrap();
        assert_eq!(ledger.reputation_of("alice").await, 20);
    }

    #[tokio::test]
    async fn test_unknown_user_has_zero_reputation() {
        let ledger = ReputationLedger::new();
        assert_eq!(ledger.reputation_of("nobody").await, 0);
        assert_eq!(ledger.badge_of("nobody").await, None);
    }

    #[tokio::test]
    async fn test_badge_follows_reputation() {
        let ledger = ReputationLedger::new();
        ledger.credit("bob", 10).await.unwrap();
        assert_eq!(ledger.badge_of("bob").await, Some(BadgeTier::Rising));

        ledger.credit("bob", 10).await.unwrap();
        assert_eq!(ledger.badge_of("bob").await, Some(BadgeTier::Popular));
    }

    #[tokio::test]
    async fn test_leaderboard_orders_and_truncates() {
        let ledger = ReputationLedger::new();
        ledger.credit("alice", 30).await.unwrap();
        ledger.credit("bob", 50).await.unwrap();
        ledger.credit("carol", 10).await.unwrap();

        let top = ledger.leaderboard(2).await;
        assert_eq!(top, vec![("bob".to_string(), 50), ("alice".to_string(), 30)]);
    }

    #[tokio::test]
    async fn test_leaderboard_tie_break_is_stable() {
        let ledger = ReputationLedger::new();
        ledger.credit("zed", 10).await.unwrap();
        ledger.credit("amy", 10).await.unwrap();

        let top = ledger.leaderboard(10).await;
        assert_eq!(top[0].0, "amy");
        assert_eq!(top[1].0, "zed");
    }
}
