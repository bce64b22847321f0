//! Newsroom Janitor
//!
//! Background maintenance service that removes expired items from the archive.
//!
//! # Overview
//!
//! Every archived item may carry an expiry timestamp, taken from the wire
//! document or applied at ingest. The Janitor is responsible for:
//! - **Expiry sweep**: Selecting records whose expiry is set and not later than now
//! - **Removal**: Deleting those records (or only counting them in dry-run mode)
//! - **Metrics collection**: Tracking sweep outcomes for operators
//!
//! Items without an expiry are never touched.
//!
//! # Usage
//!
//! ## One-time Sweep
//!
//! ```no_run
//! use newsroom_janitor::Janitor;
//! use newsroom_store::SqliteArchive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = SqliteArchive::new("newsroom.db")?;
//! let mut janitor = Janitor::default_config();
//!
//! let metrics = janitor.sweep(&mut store)?;
//! println!("{}", metrics.summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Background Worker
//!
//! ```no_run
//! use newsroom_janitor::{JanitorConfig, JanitorWorker};
//! use newsroom_store::SqliteArchive;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SqliteArchive::new("newsroom.db")?;
//!     let mut worker = JanitorWorker::new(JanitorConfig::default());
//!
//!     // Run indefinitely (until Ctrl+C)
//!     worker.run(store).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [janitor]
//! sweep_interval_minutes = 60
//! dry_run = false
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod janitor;
mod metrics;
mod worker;

pub use config::JanitorConfig;
pub use error::JanitorError;
pub use janitor::Janitor;
pub use metrics::JanitorMetrics;
pub use worker::JanitorWorker;
