//! Background worker that sweeps the archive on a schedule

use crate::{Janitor, JanitorConfig, JanitorError, JanitorMetrics};
use newsroom_domain::traits::ArchiveStore;
use tokio::time::{interval, Duration, MissedTickBehavior};

/// Background worker that runs the expiry sweep at a fixed interval
///
/// The first sweep runs immediately; later sweeps follow every
/// `sweep_interval_minutes`.
///
/// # Examples
///
/// ```no_run
/// use newsroom_janitor::{JanitorConfig, JanitorWorker};
/// use newsroom_store::SqliteArchive;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = SqliteArchive::new("newsroom.db")?;
///     let mut worker = JanitorWorker::new(JanitorConfig::default());
///
///     // Run until Ctrl+C
///     worker.run(store).await?;
///     Ok(())
/// }
/// ```
pub struct JanitorWorker {
    janitor: Janitor,
    interval: Duration,
}

impl JanitorWorker {
    /// Create a new background worker with the given configuration
    pub fn new(config: JanitorConfig) -> Self {
        let interval = config.sweep_interval();
        Self {
            janitor: Janitor::new(config),
            interval,
        }
    }

    /// Create a worker with default configuration
    pub fn default_config() -> Self {
        Self::new(JanitorConfig::default())
    }

    /// Override the sweep interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    fn ticker(&self) -> Result<tokio::time::Interval, JanitorError> {
        if self.interval.is_zero() {
            return Err(JanitorError::Config(
                "sweep interval must be greater than 0".to_string(),
            ));
        }
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Ok(ticker)
    }

    /// Run the worker until a shutdown signal (Ctrl+C) is received
    ///
    /// A failed sweep is logged and retried on the next tick.
    pub async fn run<S>(&mut self, mut store: S) -> Result<(), JanitorError>
    where
        S: ArchiveStore,
        S::Error: std::fmt::Display,
    {
        let mut ticker = self.ticker()?;

        tracing::info!("Expiry worker started (interval: {:?})", self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    tracing::debug!("Starting expiry sweep");

                    match self.janitor.sweep(&mut store) {
                        Ok(metrics) => {
                            tracing::info!(
                                "Sweep completed: {} expired, {} removed",
                                metrics.last_matched,
                                metrics.last_removed
                            );
                        }
                        Err(e) => {
                            tracing::error!("Sweep failed: {}", e);
                        }
                    }
                }
                signal = tokio::signal::ctrl_c() => {
                    if let Err(e) = signal {
                        return Err(JanitorError::Worker(format!("Signal handler failed: {}", e)));
                    }
                    tracing::info!("Shutdown signal received, stopping expiry worker");
                    break;
                }
            }
        }

        tracing::info!("Expiry worker stopped. Final metrics:\n{}", self.metrics().summary());

        Ok(())
    }

    /// Run for a specific number of sweeps, stopping at the first failure
    pub async fn run_cycles<S>(&mut self, store: &mut S, cycles: usize) -> Result<(), JanitorError>
    where
        S: ArchiveStore,
        S::Error: std::fmt::Display,
    {
        let mut ticker = self.ticker()?;

        tracing::info!(
            "Expiry worker started for {} cycles (interval: {:?})",
            cycles,
            self.interval
        );

        for cycle in 0..cycles {
            ticker.tick().await;

            tracing::debug!("Starting expiry sweep {}/{}", cycle + 1, cycles);

            match self.janitor.sweep(store) {
                Ok(metrics) => {
                    tracing::info!(
                        "Sweep {}/{} completed: {} expired, {} removed",
                        cycle + 1,
                        cycles,
                        metrics.last_matched,
                        metrics.last_removed
                    );
                }
                Err(e) => {
                    tracing::error!("Sweep {}/{} failed: {}", cycle + 1, cycles, e);
                    return Err(e);
                }
            }
        }

        tracing::info!(
            "Expiry worker finished {} cycles. Final metrics:\n{}",
            cycles,
            self.metrics().summary()
        );

        Ok(())
    }

    /// Get a reference to the janitor's current metrics
    pub fn metrics(&self) -> &JanitorMetrics {
        self.janitor.metrics()
    }

    /// Reset the janitor's metrics counters
    pub fn reset_metrics(&mut self) {
        self.janitor.reset_metrics();
    }
}
