//! Configuration types for matchpulse

use crate::xg::XgConfig;
use serde::Deserialize;

/// Root configuration structure
///
/// Every field is defaulted, so an empty document is a valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub xg: XgConfig,
    pub channel: ChannelConfig,
    pub market: MarketConfig,
    pub telemetry: TelemetryConfig,
}

/// Fan-out configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Bounded delivery buffer per subscriber
    pub subscriber_buffer: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            subscriber_buffer: 256,
        }
    }
}

/// Prediction market configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Open window when a creator gives no explicit expiry, in seconds
    pub default_expiry_secs: u64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            default_expiry_secs: 300,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub log_level: String,
    /// Prometheus scrape port; the exporter stays off when unset
    pub metrics_port: Option<u16>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
