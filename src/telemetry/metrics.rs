//! Engine metrics

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Match events accepted into the store
    EventsIngested,
    /// Messages handed to subscriber buffers
    MessagesPublished,
    /// Messages dropped on full subscriber buffers
    MessagesDropped,
    /// Predictions opened
    PredictionsCreated,
    /// Submissions accepted
    SubmissionsAccepted,
    /// Predictions resolved
    PredictionsResolved,
    /// Reward credits that failed
    RewardFailures,
}

impl CounterMetric {
    fn name(self) -> &'static str {
        match self {
            CounterMetric::EventsIngested => "matchpulse_events_ingested_total",
            CounterMetric::MessagesPublished => "matchpulse_messages_published_total",
            CounterMetric::MessagesDropped => "matchpulse_messages_dropped_total",
            CounterMetric::PredictionsCreated => "matchpulse_predictions_created_total",
            CounterMetric::SubmissionsAccepted => "matchpulse_submissions_accepted_total",
            CounterMetric::PredictionsResolved => "matchpulse_predictions_resolved_total",
            CounterMetric::RewardFailures => "matchpulse_reward_failures_total",
        }
    }
}

/// Increment a counter by one
pub fn increment(metric: CounterMetric) {
    counter!(metric.name()).increment(1);
}

/// Increment a counter by an arbitrary amount
pub fn increment_by(metric: CounterMetric, value: u64) {
    counter!(metric.name()).increment(value);
}

/// Install the Prometheus scrape endpoint on the given port
///
/// Requires a running tokio runtime.
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], port))
        .install()?;
    Ok(())
}
