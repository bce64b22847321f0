//! Item parser contract shared by every wire format

use crate::error::IngestError;
use newsroom_domain::CanonicalItem;
use roxmltree::Document;

/// Turns one parsed wire document into one canonical item
///
/// Implementations must be pure functions of the tree: no I/O and no shared
/// mutable state, so documents of a batch can be parsed on any thread.
pub trait ItemParser: Send + Sync {
    /// Format identifier this parser is registered under (lowercase)
    fn format(&self) -> &'static str;

    /// Whether the document's shape belongs to this format
    fn can_parse(&self, doc: &Document<'_>) -> bool;

    /// Produce the canonical item
    fn parse(&self, doc: &Document<'_>) -> Result<CanonicalItem, IngestError>;

    /// Document identifier, when it can be recovered, for failure reports
    fn guid(&self, _doc: &Document<'_>) -> Option<String> {
        None
    }
}
