//! Command implementations.

pub mod config;
pub mod expire;
pub mod ingest;

pub use self::config::execute_config;
pub use self::expire::execute_expire;
pub use self::ingest::execute_ingest;

use crate::error::Result;
use newsroom_store::SqliteArchive;
use std::fs;
use std::path::Path;

/// Open the archive database, creating its directory when needed.
pub fn open_archive(path: &Path) -> Result<SqliteArchive> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(SqliteArchive::new(path)?)
}
