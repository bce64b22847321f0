//! Core Janitor implementation: the expiry sweep

use crate::{JanitorConfig, JanitorError, JanitorMetrics};
use chrono::{DateTime, Utc};
use newsroom_domain::time::{format_timestamp, utcnow};
use newsroom_domain::traits::ArchiveStore;
use newsroom_domain::ArchiveFilter;
use std::time::Instant;

/// Janitor service that removes expired items from the archive
///
/// A record is expired when its expiry is set and not later than the sweep
/// time. Records without an expiry are kept forever.
///
/// # Examples
///
/// ```no_run
/// use newsroom_janitor::{Janitor, JanitorConfig};
/// use newsroom_store::SqliteArchive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut store = SqliteArchive::new("newsroom.db")?;
/// let mut janitor = Janitor::new(JanitorConfig::default());
///
/// let metrics = janitor.sweep(&mut store)?;
/// println!("{}", metrics.summary());
/// # Ok(())
/// # }
/// ```
pub struct Janitor {
    config: JanitorConfig,
    metrics: JanitorMetrics,
}

impl Janitor {
    /// Create a new Janitor with the given configuration
    pub fn new(config: JanitorConfig) -> Self {
        Self {
            config,
            metrics: JanitorMetrics::new(),
        }
    }

    /// Create a Janitor with default configuration
    pub fn default_config() -> Self {
        Self::new(JanitorConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &JanitorConfig {
        &self.config
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &JanitorMetrics {
        &self.metrics
    }

    /// Reset metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Sweep records that have expired by now
    pub fn sweep<S: ArchiveStore>(&mut self, store: &mut S) -> Result<JanitorMetrics, JanitorError>
    where
        S::Error: std::fmt::Display,
    {
        self.sweep_at(store, utcnow())
    }

    /// Sweep records that have expired by `now`
    ///
    /// In dry-run mode the expired records are counted and left in place.
    /// Returns the updated metrics after the sweep.
    pub fn sweep_at<S: ArchiveStore>(
        &mut self,
        store: &mut S,
        now: DateTime<Utc>,
    ) -> Result<JanitorMetrics, JanitorError>
    where
        S::Error: std::fmt::Display,
    {
        let start = Instant::now();
        let cutoff = format_timestamp(&now);
        let filter = ArchiveFilter::expired(cutoff.as_str());

        let matched = store.count(&filter).map_err(JanitorError::store)?;

        let removed = if matched == 0 {
            0
        } else if self.config.dry_run {
            tracing::info!(
                "DRY RUN: Would remove {} items expired at or before {}",
                matched,
                cutoff
            );
            0
        } else {
            let removed = store.delete(&filter).map_err(JanitorError::store)?;
            tracing::info!("Removed {} items expired at or before {}", removed, cutoff);
            removed
        };

        self.metrics
            .record_sweep(matched, removed, self.config.dry_run);
        self.metrics.total_runtime_ms += start.elapsed().as_millis() as u64;

        Ok(self.metrics.clone())
    }
}
