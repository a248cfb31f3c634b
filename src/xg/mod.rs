//! Expected-goals aggregation module
//!
//! Turns a match's ordered event history into a cumulative home/away
//! expected-goals and win-probability timeline.

mod aggregator;
mod types;

pub use aggregator::{compute_timeline, event_contribution, win_probability, XgConfig};
pub use types::XgTimelineEntry;
