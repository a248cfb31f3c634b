//! Live match wiring
//!
//! Connects event storage, xG aggregation, and room fan-out: one ingestion
//! path and the read-only query surface viewers use to catch up.

mod orchestrator;

pub use orchestrator::{MatchOrchestrator, DEFAULT_HISTORY_LIMIT};
