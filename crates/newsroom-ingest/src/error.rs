//! Error types for ingestion

use thiserror::Error;

/// Errors that can occur while ingesting a wire document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    /// A structurally required element is absent, or the bytes are not a
    /// well-formed document
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// A field's content cannot be converted to its expected type
    #[error("Format error: {0}")]
    Format(String),

    /// No parser is registered for the declared or sniffed format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Archive store error
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<roxmltree::Error> for IngestError {
    fn from(e: roxmltree::Error) -> Self {
        IngestError::MalformedDocument(format!("XML parse error: {}", e))
    }
}

impl From<newsroom_domain::MissingField> for IngestError {
    fn from(e: newsroom_domain::MissingField) -> Self {
        IngestError::MalformedDocument(e.to_string())
    }
}
