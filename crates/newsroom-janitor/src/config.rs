//! Configuration for the expiry sweep

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Janitor
///
/// # Examples
///
/// ```
/// use newsroom_janitor::JanitorConfig;
///
/// let config = JanitorConfig::default();
/// assert_eq!(config.sweep_interval_minutes, 60);
/// assert!(!config.dry_run);
///
/// let config = JanitorConfig::from_toml("sweep_interval_minutes = 5\ndry_run = true").unwrap();
/// assert_eq!(config.sweep_interval().as_secs(), 300);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JanitorConfig {
    /// How often the worker sweeps (in minutes)
    /// Default: every 60 minutes
    pub sweep_interval_minutes: u64,

    /// Dry-run mode: count expired records without deleting them
    /// Default: false
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for JanitorConfig {
    fn default() -> Self {
        Self {
            sweep_interval_minutes: 60,
            dry_run: false,
        }
    }
}

impl JanitorConfig {
    /// Dry-run variant of this configuration
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Get sweep interval as Duration
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_minutes * 60)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.sweep_interval_minutes == 0 {
            return Err("sweep_interval_minutes must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
