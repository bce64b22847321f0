//! Core Ingester implementation

use crate::config::IngestConfig;
use crate::decode::{decode, parse_tree};
use crate::error::IngestError;
use crate::registry::ParserRegistry;
use crate::types::{
    FailureKind, IngestBatch, IngestFailure, IngestMetadata, IngestResult, IngestedItem,
    WireDocument,
};
use newsroom_domain::time::{expiry_date, utcnow};
use newsroom_domain::{ArchiveRecord, ArchiveStore, CanonicalItem};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// The Ingester turns a batch of wire documents into archived items
///
/// Documents are decoded and parsed on the blocking pool, at most
/// `parse_workers` at a time, then written to the store one by one in input
/// order. A document that fails is reported and skipped; the rest of the batch
/// carries on.
pub struct Ingester<S>
where
    S: ArchiveStore,
{
    registry: Arc<ParserRegistry>,
    store: Arc<Mutex<S>>,
    config: IngestConfig,
}

impl<S> Ingester<S>
where
    S: ArchiveStore,
    S::Error: std::fmt::Display,
{
    /// Create a new Ingester owning its store
    pub fn new(registry: ParserRegistry, store: S, config: IngestConfig) -> Self {
        Self::with_shared_store(registry, Arc::new(Mutex::new(store)), config)
    }

    /// Create a new Ingester over a store shared with other components
    pub fn with_shared_store(
        registry: ParserRegistry,
        store: Arc<Mutex<S>>,
        config: IngestConfig,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            store,
            config,
        }
    }

    /// Handle to the underlying store
    pub fn store(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.store)
    }

    /// Active configuration
    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Run one ingest job
    pub async fn ingest(&self, batch: IngestBatch) -> Result<IngestResult, IngestError> {
        self.config.validate().map_err(IngestError::Config)?;

        let start_time = Instant::now();
        let total_documents = batch.documents.len();

        info!(
            "Starting ingest of {} documents from provider '{}'",
            total_documents, self.config.provider
        );

        let semaphore = Arc::new(Semaphore::new(self.config.parse_workers));
        let mut pending = Vec::with_capacity(total_documents);

        for document in batch.documents {
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .map_err(|e| IngestError::Config(format!("Parse pool closed: {}", e)))?;

            let source_id = document.source_id.clone();
            let registry = Arc::clone(&self.registry);
            let default_format = self.config.default_format.clone();
            let max_bytes = self.config.max_document_bytes;

            let handle = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                parse_document(&registry, document, default_format.as_deref(), max_bytes)
            });
            pending.push((source_id, handle));
        }

        let mut items_created = Vec::new();
        let mut failures = Vec::new();

        for (source_id, handle) in pending {
            let parsed = handle.await.unwrap_or_else(|e| ParsedDocument {
                guid: None,
                result: Err(IngestError::MalformedDocument(format!(
                    "Parse task failed: {}",
                    e
                ))),
            });

            let outcome = parsed
                .result
                .and_then(|item| self.persist(item, &source_id));

            match outcome {
                Ok(created) => {
                    debug!("Archived {} from {}", created.guid, source_id);
                    items_created.push(created);
                }
                Err(e) => {
                    let label = parsed.guid.as_deref().unwrap_or(&source_id);
                    warn!("Skipping document {}: {}", label, e);
                    failures.push(IngestFailure {
                        source_id,
                        guid: parsed.guid,
                        kind: FailureKind::from(&e),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let metadata = IngestMetadata {
            provider: self.config.provider.clone(),
            timestamp: utcnow().timestamp(),
            total_documents,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        };

        info!(
            "Ingest complete: {} archived, {} failed",
            items_created.len(),
            failures.len()
        );

        Ok(IngestResult {
            items_created,
            failures,
            metadata,
        })
    }

    /// Write one item to the store
    fn persist(&self, item: CanonicalItem, source_id: &str) -> Result<IngestedItem, IngestError> {
        let guid = item.guid.clone();
        let headline = item.headline.clone();

        let mut record = ArchiveRecord::new(item).with_provider(self.config.provider.as_str());
        if record.item.expiry.is_none() {
            record.item.expiry = self.config.content_expiry_minutes.map(expiry_date);
        }

        let record_id = {
            let mut store = self
                .store
                .lock()
                .map_err(|e| IngestError::Store(format!("Store lock error: {}", e)))?;
            store
                .insert(vec![record])
                .map_err(|e| IngestError::Store(e.to_string()))?
                .into_iter()
                .next()
                .ok_or_else(|| IngestError::Store("insert returned no id".to_string()))?
        };

        Ok(IngestedItem {
            record_id,
            guid,
            headline,
            source_id: source_id.to_string(),
        })
    }
}

/// Outcome of decoding and parsing one document
struct ParsedDocument {
    guid: Option<String>,
    result: Result<CanonicalItem, IngestError>,
}

/// Decode, pick a parser and parse; runs on the blocking pool
fn parse_document(
    registry: &ParserRegistry,
    document: WireDocument,
    default_format: Option<&str>,
    max_bytes: usize,
) -> ParsedDocument {
    if document.bytes.len() > max_bytes {
        return ParsedDocument {
            guid: None,
            result: Err(IngestError::MalformedDocument(format!(
                "document is {} bytes, limit is {}",
                document.bytes.len(),
                max_bytes
            ))),
        };
    }

    let declared = match document.format.as_deref().or(default_format) {
        Some(format) => match registry.dispatch(format) {
            Ok(parser) => Some(parser),
            Err(e) => return ParsedDocument { guid: None, result: Err(e) },
        },
        None => None,
    };

    let text = match decode(&document.bytes) {
        Ok(text) => text,
        Err(e) => return ParsedDocument { guid: None, result: Err(e) },
    };
    let tree = match parse_tree(&text) {
        Ok(tree) => tree,
        Err(e) => return ParsedDocument { guid: None, result: Err(e) },
    };

    let parser = match declared {
        Some(parser) => parser,
        None => match registry.sniff(&tree) {
            Ok(parser) => parser,
            Err(e) => return ParsedDocument { guid: None, result: Err(e) },
        },
    };

    debug!("Parsing {} as {}", document.source_id, parser.format());
    ParsedDocument {
        guid: parser.guid(&tree),
        result: parser.parse(&tree),
    }
}
