//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use newsroom_ingest::IngestResult;
use newsroom_janitor::JanitorMetrics;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Active output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format the outcome of an ingest job.
    pub fn format_ingest(&self, result: &IngestResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_ingest_json(result),
            OutputFormat::Table => Ok(self.format_ingest_table(result)),
            OutputFormat::Quiet => Ok(self.format_ingest_quiet(result)),
        }
    }

    fn format_ingest_json(&self, result: &IngestResult) -> Result<String> {
        let created: Vec<serde_json::Value> = result
            .items_created
            .iter()
            .map(|item| {
                serde_json::json!({
                    "record_id": item.record_id.to_string(),
                    "guid": item.guid,
                    "headline": item.headline,
                    "source": item.source_id
                })
            })
            .collect();

        let failures: Vec<serde_json::Value> = result
            .failures
            .iter()
            .map(|failure| {
                serde_json::json!({
                    "source": failure.source_id,
                    "guid": failure.guid,
                    "kind": failure.kind.as_str(),
                    "reason": failure.reason
                })
            })
            .collect();

        let output = serde_json::json!({
            "provider": result.metadata.provider,
            "total_documents": result.metadata.total_documents,
            "processing_time_ms": result.metadata.processing_time_ms,
            "created": created,
            "failures": failures
        });

        Ok(serde_json::to_string_pretty(&output)?)
    }

    fn format_ingest_table(&self, result: &IngestResult) -> String {
        let mut sections = Vec::new();

        if !result.items_created.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["ID", "GUID", "Headline", "Source"]);
            for item in &result.items_created {
                let id = item.record_id.to_string();
                builder.push_record([
                    &id[..8], // Truncate ID for readability
                    item.guid.as_str(),
                    item.headline.as_str(),
                    item.source_id.as_str(),
                ]);
            }
            sections.push(render(builder));
        }

        if !result.failures.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Source", "GUID", "Kind", "Reason"]);
            for failure in &result.failures {
                builder.push_record([
                    failure.source_id.as_str(),
                    failure.guid.as_deref().unwrap_or("-"),
                    failure.kind.as_str(),
                    failure.reason.as_str(),
                ]);
            }
            sections.push(render(builder));
        }

        let summary = format!(
            "Archived {} of {} document(s) from '{}' in {}ms",
            result.items_created.len(),
            result.metadata.total_documents,
            result.metadata.provider,
            result.metadata.processing_time_ms
        );
        sections.push(if result.failures.is_empty() {
            self.success(&summary)
        } else {
            self.warning(&format!("{}, {} skipped", summary, result.failures.len()))
        });

        let quarantined = result.quarantined();
        if !quarantined.is_empty() {
            sections.push(self.info(&format!(
                "{} document(s) quarantined for manual handling",
                quarantined.len()
            )));
        }

        sections.join("\n")
    }

    fn format_ingest_quiet(&self, result: &IngestResult) -> String {
        let ids: Vec<String> = result
            .items_created
            .iter()
            .map(|item| item.record_id.to_string())
            .collect();
        ids.join("\n")
    }

    /// Format expiry sweep metrics.
    pub fn format_sweep(&self, metrics: &JanitorMetrics, dry_run: bool) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "dry_run": dry_run,
                "sweeps": metrics.sweep_count,
                "last_matched": metrics.last_matched,
                "last_removed": metrics.last_removed,
                "removed_total": metrics.removed_total,
                "dry_run_matches": metrics.dry_run_matches,
                "runtime_ms": metrics.total_runtime_ms
            }))?),
            OutputFormat::Quiet => Ok(if dry_run {
                metrics.dry_run_matches.to_string()
            } else {
                metrics.removed_total.to_string()
            }),
            OutputFormat::Table => Ok(if dry_run {
                self.info(&format!(
                    "Dry run: {} expired item(s) would be removed",
                    metrics.dry_run_matches
                ))
            } else {
                self.success(&format!(
                    "Removed {} expired item(s) in {} sweep(s)",
                    metrics.removed_total, metrics.sweep_count
                ))
            }),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}
