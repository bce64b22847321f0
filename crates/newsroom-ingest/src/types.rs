//! Request and response types for ingest jobs

use crate::error::IngestError;
use newsroom_domain::RecordId;

/// One inbound wire document
#[derive(Debug, Clone)]
pub struct WireDocument {
    /// Where the document came from (file path, feed entry id)
    pub source_id: String,

    /// Declared format identifier; `None` lets the registry sniff it
    pub format: Option<String>,

    /// Raw document bytes
    pub bytes: Vec<u8>,
}

impl WireDocument {
    /// Create a document with a declared format
    pub fn new(source_id: impl Into<String>, format: Option<&str>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            source_id: source_id.into(),
            format: format.map(str::to_string),
            bytes: bytes.into(),
        }
    }
}

/// A batch of documents fetched by one ingest job
#[derive(Debug, Clone, Default)]
pub struct IngestBatch {
    /// Documents in fetch order
    pub documents: Vec<WireDocument>,
}

impl IngestBatch {
    /// Create a batch from documents
    pub fn new(documents: Vec<WireDocument>) -> Self {
        Self { documents }
    }
}

/// Result of an ingest job
#[derive(Debug, Clone)]
pub struct IngestResult {
    /// Items that were parsed and archived
    pub items_created: Vec<IngestedItem>,

    /// Documents that were skipped
    pub failures: Vec<IngestFailure>,

    /// Metadata about the job
    pub metadata: IngestMetadata,
}

impl IngestResult {
    /// Failures whose format had no parser, for manual handling
    pub fn quarantined(&self) -> Vec<&IngestFailure> {
        self.failures
            .iter()
            .filter(|f| f.kind == FailureKind::UnsupportedFormat)
            .collect()
    }
}

/// Information about a successfully archived item
#[derive(Debug, Clone)]
pub struct IngestedItem {
    /// ID of the archive record
    pub record_id: RecordId,

    /// Item guid
    pub guid: String,

    /// Item headline
    pub headline: String,

    /// Source the item was read from
    pub source_id: String,
}

/// Classification of a failed document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Required structure missing or not a well-formed document
    Malformed,
    /// A field could not be converted
    Format,
    /// No parser for the format
    UnsupportedFormat,
    /// The store rejected the record
    Store,
}

impl FailureKind {
    /// Get the failure kind as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Malformed => "malformed",
            FailureKind::Format => "format",
            FailureKind::UnsupportedFormat => "unsupported_format",
            FailureKind::Store => "store",
        }
    }
}

impl From<&IngestError> for FailureKind {
    fn from(e: &IngestError) -> Self {
        match e {
            IngestError::MalformedDocument(_) => FailureKind::Malformed,
            IngestError::Format(_) => FailureKind::Format,
            IngestError::UnsupportedFormat(_) => FailureKind::UnsupportedFormat,
            IngestError::Store(_) | IngestError::Config(_) => FailureKind::Store,
        }
    }
}

/// Information about a document that was skipped
#[derive(Debug, Clone)]
pub struct IngestFailure {
    /// Source the document was read from
    pub source_id: String,

    /// Document guid, when it could be recovered
    pub guid: Option<String>,

    /// Failure classification
    pub kind: FailureKind,

    /// Reason for failure
    pub reason: String,
}

/// Metadata about an ingest job
#[derive(Debug, Clone)]
pub struct IngestMetadata {
    /// Provider name
    pub provider: String,

    /// Timestamp when the job finished (seconds since Unix epoch)
    pub timestamp: i64,

    /// Total documents in the batch
    pub total_documents: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}
