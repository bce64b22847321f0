//! Metrics collection for expiry sweeps

/// Counters collected across sweeps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JanitorMetrics {
    /// Records deleted across all sweeps
    pub removed_total: usize,

    /// Expired records found by dry-run sweeps (nothing deleted)
    pub dry_run_matches: usize,

    /// Expired records found by the most recent sweep
    pub last_matched: usize,

    /// Records deleted by the most recent sweep
    pub last_removed: usize,

    /// Total sweep iterations completed
    pub sweep_count: usize,

    /// Total runtime in milliseconds
    pub total_runtime_ms: u64,
}

impl JanitorMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one sweep
    pub fn record_sweep(&mut self, matched: usize, removed: usize, dry_run: bool) {
        self.sweep_count += 1;
        self.last_matched = matched;
        self.last_removed = removed;
        self.removed_total += removed;
        if dry_run {
            self.dry_run_matches += matched;
        }
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Expiry Sweep Summary".to_string(),
            "====================".to_string(),
            format!("Sweep cycles: {}", self.sweep_count),
            format!("Total runtime: {}ms", self.total_runtime_ms),
            format!("Removed: {}", self.removed_total),
        ];

        if self.dry_run_matches > 0 {
            lines.push(format!("Dry-run matches: {}", self.dry_run_matches));
        }

        if self.sweep_count > 0 {
            lines.push(format!(
                "Last sweep: {} expired, {} removed",
                self.last_matched, self.last_removed
            ));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = JanitorMetrics::new();
        assert_eq!(metrics.removed_total, 0);
        assert_eq!(metrics.sweep_count, 0);
    }

    #[test]
    fn test_record_sweep() {
        let mut metrics = JanitorMetrics::new();
        metrics.record_sweep(3, 3, false);
        metrics.record_sweep(2, 2, false);

        assert_eq!(metrics.sweep_count, 2);
        assert_eq!(metrics.removed_total, 5);
        assert_eq!(metrics.last_matched, 2);
        assert_eq!(metrics.last_removed, 2);
        assert_eq!(metrics.dry_run_matches, 0);
    }

    #[test]
    fn test_record_dry_run() {
        let mut metrics = JanitorMetrics::new();
        metrics.record_sweep(4, 0, true);

        assert_eq!(metrics.removed_total, 0);
        assert_eq!(metrics.dry_run_matches, 4);
        assert_eq!(metrics.last_matched, 4);
    }

    #[test]
    fn test_reset() {
        let mut metrics = JanitorMetrics::new();
        metrics.record_sweep(1, 1, false);
        metrics.total_runtime_ms = 50;

        metrics.reset();
        assert_eq!(metrics, JanitorMetrics::default());
    }

    #[test]
    fn test_summary() {
        let mut metrics = JanitorMetrics::new();
        metrics.record_sweep(5, 0, true);
        metrics.record_sweep(2, 2, false);
        metrics.total_runtime_ms = 120;

        let summary = metrics.summary();
        assert!(summary.contains("Sweep cycles: 2"));
        assert!(summary.contains("Total runtime: 120ms"));
        assert!(summary.contains("Removed: 2"));
        assert!(summary.contains("Dry-run matches: 5"));
        assert!(summary.contains("Last sweep: 2 expired, 2 removed"));
    }
}
