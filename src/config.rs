use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;

use crate::core::{default_channels, ChannelCatalog, ChannelSpec, DEFAULT_STEP_QUANTUM, STROKE_VOLUME};

/// What happens to the window and clock when the transport reconnects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReconnectPolicy {
    /// Keep buffered rows and continue the clock.
    #[default]
    Keep,
    /// Drop all buffered rows and rewind the clock to its origin.
    ClearOnReconnect,
}

/// Per-session dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Maximum number of rows retained in the window.
    pub capacity: usize,

    /// Logical seconds added to the step clock per event.
    pub step_quantum: f64,

    /// Channel that prediction events write into.
    pub prediction_channel: String,

    /// Known channels, used for display only.
    pub channels: Vec<ChannelSpec>,

    pub reconnect_policy: ReconnectPolicy,

    /// Bound of the queue between the ingestion adapter and the handler.
    pub event_queue_capacity: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            capacity: 60,
            step_quantum: DEFAULT_STEP_QUANTUM,
            prediction_channel: STROKE_VOLUME.to_string(),
            channels: default_channels(),
            reconnect_policy: ReconnectPolicy::Keep,
            event_queue_capacity: 100,
        }
    }
}

impl DashboardConfig {
    /// Builds a validated config from JSON; missing fields take defaults.
    pub fn from_json(config: Value) -> Result<Self> {
        let config: Self =
            serde_json::from_value(config).context("Failed to parse dashboard config")?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a config file, writing a default one first if none exists.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .await
                    .context("Failed to create config directory")?;
            }
            let json = serde_json::to_string_pretty(&Self::default())?;
            fs::write(path, json)
                .await
                .context("Failed to write default config")?;
            log::info!("Wrote default dashboard config to {}", path.display());
        }

        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let value: Value = serde_json::from_str(&content).context("Failed to parse config JSON")?;
        Self::from_json(value)
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            bail!("Window capacity must be at least 1");
        }
        if !self.step_quantum.is_finite() || self.step_quantum <= 0.0 {
            bail!("Step quantum must be a positive number, got {}", self.step_quantum);
        }
        // Steps are rounded to one decimal after every advance.
        let tenths = self.step_quantum * 10.0;
        if tenths.round() < 1.0 || (tenths - tenths.round()).abs() > 1e-9 {
            bail!(
                "Step quantum must be a whole multiple of 0.1, got {}",
                self.step_quantum
            );
        }
        if self.event_queue_capacity == 0 {
            bail!("Event queue capacity must be at least 1");
        }
        if self.prediction_channel.is_empty() {
            bail!("Prediction channel must not be empty");
        }

        let mut seen = HashSet::new();
        for channel in &self.channels {
            if !seen.insert(channel.id.as_str()) {
                bail!("Duplicate channel id '{}'", channel.id);
            }
        }
        Ok(())
    }

    pub fn catalog(&self) -> ChannelCatalog {
        ChannelCatalog::new(self.channels.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_from_empty_object() {
        let config = DashboardConfig::from_json(json!({})).unwrap();

        assert_eq!(config.capacity, 60);
        assert_eq!(config.step_quantum, 0.5);
        assert_eq!(config.prediction_channel, "stroke_volume");
        assert_eq!(config.reconnect_policy, ReconnectPolicy::Keep);
        assert_eq!(config.channels.len(), 7);
    }

    #[test]
    fn test_reconnect_policy_kebab_case() {
        let config = DashboardConfig::from_json(json!({
            "capacity": 3,
            "reconnect_policy": "clear-on-reconnect"
        }))
        .unwrap();

        assert_eq!(config.capacity, 3);
        assert_eq!(config.reconnect_policy, ReconnectPolicy::ClearOnReconnect);
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let result = DashboardConfig::from_json(json!({"capacity": 0}));
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_non_positive_quantum() {
        assert!(DashboardConfig::from_json(json!({"step_quantum": 0.0})).is_err());
        assert!(DashboardConfig::from_json(json!({"step_quantum": -0.5})).is_err());
    }

    #[test]
    fn test_rejects_quantum_off_tenths_grid() {
        let err = DashboardConfig::from_json(json!({"step_quantum": 0.25})).unwrap_err();
        assert!(err.to_string().contains("whole multiple of 0.1"));

        assert!(DashboardConfig::from_json(json!({"step_quantum": 0.04})).is_err());
    }

    #[test]
    fn test_accepts_quantum_on_tenths_grid() {
        for quantum in [0.1, 0.2, 0.3, 0.5, 1.0, 2.5] {
            let config = DashboardConfig::from_json(json!({"step_quantum": quantum})).unwrap();
            assert_eq!(config.step_quantum, quantum);
        }
    }

    #[test]
    fn test_rejects_duplicate_channels() {
        let result = DashboardConfig::from_json(json!({
            "channels": [
                {"id": "hr", "name": "Heart Rate"},
                {"id": "hr", "name": "Heart Rate again"}
            ]
        }));

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Duplicate channel id"));
    }
}
