//! Expire command implementation.

use crate::cli::ExpireArgs;
use crate::commands::open_archive;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use newsroom_janitor::{Janitor, JanitorMetrics, JanitorWorker};
use tracing::debug;

/// Execute the expire command.
pub async fn execute_expire(
    args: ExpireArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let dry_run = args.dry_run || config.janitor.dry_run;
    let metrics = run_expire(args, config).await?;
    println!("{}", formatter.format_sweep(&metrics, dry_run)?);
    Ok(())
}

/// Sweep the archive once, for a number of scheduled cycles, or until Ctrl+C.
pub async fn run_expire(args: ExpireArgs, config: &Config) -> Result<JanitorMetrics> {
    let mut janitor_config = config.janitor.clone();
    if args.dry_run {
        janitor_config = janitor_config.dry_run();
    }

    let mut store = open_archive(&config.database_path)?;
    debug!("Sweeping archive at {}", config.database_path.display());

    if args.watch {
        let mut worker = JanitorWorker::new(janitor_config);
        worker.run(store).await?;
        return Ok(worker.metrics().clone());
    }

    if let Some(cycles) = args.cycles {
        let mut worker = JanitorWorker::new(janitor_config);
        worker.run_cycles(&mut store, cycles).await?;
        return Ok(worker.metrics().clone());
    }

    let mut janitor = Janitor::new(janitor_config);
    Ok(janitor.sweep(&mut store)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsroom_domain::time::expiry_date;
    use newsroom_domain::traits::ArchiveStore;
    use newsroom_domain::{ArchiveFilter, ArchiveRecord, ItemBuilder};
    use tempfile::TempDir;

    fn seeded_config(dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.database_path = dir.path().join("archive.db");

        let mut store = open_archive(&config.database_path).unwrap();
        let records = [Some(-30), Some(-1), Some(30), None]
            .into_iter()
            .enumerate()
            .map(|(i, minutes)| {
                let item = ItemBuilder::new(format!("item-{}", i))
                    .headline("h")
                    .expiry(minutes.map(expiry_date))
                    .build()
                    .unwrap();
                ArchiveRecord::new(item)
            })
            .collect();
        store.insert(records).unwrap();
        config
    }

    fn remaining(config: &Config) -> usize {
        open_archive(&config.database_path)
            .unwrap()
            .count(&ArchiveFilter::all())
            .unwrap()
    }

    #[tokio::test]
    async fn test_one_shot_sweep() {
        let dir = TempDir::new().unwrap();
        let config = seeded_config(&dir);
        let args = ExpireArgs {
            dry_run: false,
            watch: false,
            cycles: None,
        };

        let metrics = run_expire(args, &config).await.unwrap();
        assert_eq!(metrics.sweep_count, 1);
        assert_eq!(metrics.removed_total, 2);
        assert_eq!(remaining(&config), 2);
    }

    #[tokio::test]
    async fn test_dry_run_flag_keeps_records() {
        let dir = TempDir::new().unwrap();
        let config = seeded_config(&dir);
        let args = ExpireArgs {
            dry_run: true,
            watch: false,
            cycles: None,
        };

        let metrics = run_expire(args, &config).await.unwrap();
        assert_eq!(metrics.dry_run_matches, 2);
        assert_eq!(metrics.removed_total, 0);
        assert_eq!(remaining(&config), 4);
    }

    #[tokio::test]
    async fn test_single_scheduled_cycle() {
        let dir = TempDir::new().unwrap();
        let config = seeded_config(&dir);
        let args = ExpireArgs {
            dry_run: false,
            watch: false,
            cycles: Some(1),
        };

        // The first tick fires immediately, so one cycle does not wait
        let metrics = run_expire(args, &config).await.unwrap();
        assert_eq!(metrics.sweep_count, 1);
        assert_eq!(remaining(&config), 2);
    }
}
