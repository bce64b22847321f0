//! Ingest command implementation.

use crate::cli::IngestArgs;
use crate::commands::open_archive;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use newsroom_ingest::{IngestBatch, IngestResult, Ingester, ParserRegistry, WireDocument};
use std::fs;
use tracing::debug;
use std::path::{Path, PathBuf};

/// Execute the ingest command.
pub async fn execute_ingest(
    args: IngestArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let result = run_ingest(args, config).await?;
    println!("{}", formatter.format_ingest(&result)?);
    Ok(())
}

/// Read the documents named on the command line and archive them.
pub async fn run_ingest(args: IngestArgs, config: &Config) -> Result<IngestResult> {
    let files = expand_paths(&args.paths)?;
    if files.is_empty() {
        return Err(CliError::InvalidInput(
            "No wire documents found in the given paths".to_string(),
        ));
    }
    debug!("Reading {} wire document(s)", files.len());

    let documents = files
        .iter()
        .map(|path| -> Result<WireDocument> {
            let bytes = fs::read(path)?;
            Ok(WireDocument::new(
                path.display().to_string(),
                args.format.as_deref(),
                bytes,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut ingest_config = config.ingest.clone();
    if let Some(provider) = args.provider {
        ingest_config.provider = provider;
    }

    let store = open_archive(&config.database_path)?;
    let ingester = Ingester::new(ParserRegistry::with_defaults(), store, ingest_config);

    Ok(ingester.ingest(IngestBatch::new(documents)).await?)
}

/// Expand directories to their `*.xml` files, sorted by name; plain files pass
/// through as given.
fn expand_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut entries = fs::read_dir(path)?
                .map(|entry| entry.map(|e| e.path()))
                .collect::<std::io::Result<Vec<_>>>()?;
            entries.retain(|p| p.is_file() && is_xml(p));
            entries.sort();
            files.extend(entries);
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            return Err(CliError::InvalidInput(format!(
                "No such file or directory: {}",
                path.display()
            )));
        }
    }

    Ok(files)
}

fn is_xml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("xml"))
        .unwrap_or(false)
}
