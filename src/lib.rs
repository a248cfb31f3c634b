//! matchpulse: Live match analytics and prediction market engine
//!
//! This library provides the core components for:
//! - Append-only match event storage
//! - Expected-goals aggregation and live win probability
//! - Per-match fan-out of events and timelines to subscribed viewers
//! - Time-boxed prediction markets with one submission per user
//! - Fixed-point reward crediting through a narrow capability hook
//! - Configuration and observability stack

pub mod channel;
pub mod config;
pub mod event;
pub mod live;
pub mod market;
pub mod reward;
pub mod telemetry;
pub mod xg;
