//! Configuration for ingest jobs

use serde::{Deserialize, Serialize};

/// Configuration for the Ingester
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Maximum size of a single wire document (bytes)
    pub max_document_bytes: usize,

    /// Maximum documents decoded and parsed concurrently
    pub parse_workers: usize,

    /// Format assumed when a document declares none; `None` sniffs the
    /// document shape instead
    #[serde(default)]
    pub default_format: Option<String>,

    /// Provider name recorded on every archived item
    pub provider: String,

    /// Expiry applied to items that arrive without one (minutes from ingest)
    #[serde(default)]
    pub content_expiry_minutes: Option<i64>,
}

impl IngestConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_document_bytes == 0 {
            return Err("max_document_bytes must be greater than 0".to_string());
        }
        if self.parse_workers == 0 {
            return Err("parse_workers must be greater than 0".to_string());
        }
        if self.provider.trim().is_empty() {
            return Err("provider must not be empty".to_string());
        }
        if let Some(minutes) = self.content_expiry_minutes {
            if minutes <= 0 {
                return Err("content_expiry_minutes must be greater than 0".to_string());
            }
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_document_bytes: 5 * 1024 * 1024,
            parse_workers: 4,
            default_format: None,
            provider: "file".to_string(),
            content_expiry_minutes: None,
        }
    }
}
