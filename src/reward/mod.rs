//! Reward crediting
//!
//! The prediction market only sees the narrow credit capability; reputation
//! and badge bookkeeping live with the implementation. Like/follow call
//! sites elsewhere in the platform use the same hook with different point
//! values.

mod reputation;

pub use reputation::{BadgeTier, ReputationLedger};

use async_trait::async_trait;

/// Capability to credit points to a user
#[async_trait]
pub trait RewardHook: Send + Sync {
    /// Credit points to a user's reputation
    async fn credit(&self, user_id: &str, points: i64) -> anyhow::Result<()>;
}
