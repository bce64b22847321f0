//! Parser registry: maps wire format identifiers to item parsers

use crate::error::IngestError;
use crate::nitf::NitfParser;
use crate::parser::ItemParser;
use roxmltree::Document;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of item parsers keyed by lowercase format identifier
///
/// # Examples
///
/// ```
/// use newsroom_ingest::ParserRegistry;
///
/// let registry = ParserRegistry::with_defaults();
/// assert!(registry.dispatch("NITF").is_ok());
/// assert!(registry.dispatch("ninjs").is_err());
/// ```
#[derive(Clone, Default)]
pub struct ParserRegistry {
    parsers: HashMap<String, Arc<dyn ItemParser>>,
}

impl ParserRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in format
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(NitfParser::new());
        registry
    }

    /// Register a parser under its format identifier
    ///
    /// Replaces any parser already registered for that format.
    pub fn register<P: ItemParser + 'static>(&mut self, parser: P) {
        self.parsers
            .insert(parser.format().to_ascii_lowercase(), Arc::new(parser));
    }

    /// Look up the parser for a format identifier (case-insensitive)
    pub fn dispatch(&self, format: &str) -> Result<Arc<dyn ItemParser>, IngestError> {
        self.parsers
            .get(&format.trim().to_ascii_lowercase())
            .cloned()
            .ok_or_else(|| IngestError::UnsupportedFormat(format.to_string()))
    }

    /// Identify the format from the document shape
    pub fn sniff(&self, doc: &Document<'_>) -> Result<Arc<dyn ItemParser>, IngestError> {
        let mut formats: Vec<&String> = self.parsers.keys().collect();
        formats.sort();

        formats
            .into_iter()
            .filter_map(|format| self.parsers.get(format))
            .find(|parser| parser.can_parse(doc))
            .cloned()
            .ok_or_else(|| {
                IngestError::UnsupportedFormat(format!(
                    "unrecognised root element <{}>",
                    doc.root_element().tag_name().name()
                ))
            })
    }

    /// Registered format identifiers, sorted
    pub fn formats(&self) -> Vec<&str> {
        let mut formats: Vec<&str> = self.parsers.keys().map(String::as_str).collect();
        formats.sort_unstable();
        formats
    }
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("formats", &self.formats())
            .finish()
    }
}
