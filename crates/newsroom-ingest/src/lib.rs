//! Newsroom Ingest
//!
//! Normalizes wire-format news documents into canonical items and archives
//! them.
//!
//! # Overview
//!
//! Providers deliver stories in their own serializations. Each ingest job takes
//! a batch of raw documents, picks a parser for each one (declared format,
//! configured default, or the document's shape), builds a canonical item and
//! writes it to the archive. NITF is supported out of the box; further formats
//! are added by registering an [`ItemParser`].
//!
//! # Architecture
//!
//! ```text
//! bytes → decode → XML tree → ParserRegistry → ItemParser → CanonicalItem → ArchiveStore
//! ```
//!
//! # Key Features
//!
//! - **Format Dispatch**: Parsers looked up by identifier or sniffed from the root element
//! - **Charset Handling**: Byte-order marks and declared encodings such as ISO-8859-1
//! - **Builder Defaults**: Every optional field has one documented default
//! - **Isolated Failures**: A bad document is reported and skipped, never fatal to the batch
//!
//! # Example Usage
//!
//! ```no_run
//! use newsroom_ingest::{IngestBatch, IngestConfig, Ingester, ParserRegistry, WireDocument};
//! use newsroom_store::SqliteArchive;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteArchive::new(":memory:")?;
//! let ingester = Ingester::new(ParserRegistry::with_defaults(), store, IngestConfig::default());
//!
//! let xml = std::fs::read("story.xml")?;
//! let batch = IngestBatch::new(vec![WireDocument::new("story.xml", Some("nitf"), xml)]);
//!
//! let result = ingester.ingest(batch).await?;
//!
//! println!("Archived: {} items", result.items_created.len());
//! println!("Failed: {} documents", result.failures.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod decode;
mod error;
mod ingester;
mod parser;
mod registry;
mod tree;
mod types;

pub mod nitf;

#[cfg(test)]
mod tests;

pub use config::IngestConfig;
pub use decode::{decode, parse_tree};
pub use error::IngestError;
pub use ingester::Ingester;
pub use nitf::NitfParser;
pub use parser::ItemParser;
pub use registry::ParserRegistry;
pub use types::{
    FailureKind, IngestBatch, IngestFailure, IngestMetadata, IngestResult, IngestedItem,
    WireDocument,
};
