//! Per-match publish/subscribe fan-out
//!
//! Viewers join and leave match rooms; aggregator output, raw events, and
//! prediction updates are pushed to every current subscriber. Delivery is
//! best-effort and at-most-once per connected subscriber; catch-up is a
//! pull-based query concern.

mod room;
mod types;

pub use room::MatchChannel;
pub use types::{Envelope, MessageKind, ViewerHandle, ViewerId};
