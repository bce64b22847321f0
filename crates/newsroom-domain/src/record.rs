//! Archive record module - the persisted form of a canonical item

use crate::item::CanonicalItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an archive record based on UUIDv7
///
/// UUIDv7 keeps records sortable by insertion time without coordination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(u128);

impl RecordId {
    /// Generate a new UUIDv7-based RecordId
    ///
    /// # Examples
    ///
    /// ```
    /// use newsroom_domain::RecordId;
    ///
    /// let id = RecordId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a RecordId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a RecordId from a UUID string
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid UUIDv7 string: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Workflow position of a record (owned by the desk/stage subsystem)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRef {
    /// Desk identifier
    pub desk: Option<String>,

    /// Stage identifier
    pub stage: Option<String>,
}

/// A canonical item as stored in the archive
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveRecord {
    /// Record identifier
    pub id: RecordId,

    /// The normalized item
    pub item: CanonicalItem,

    /// Workflow-assigned sequential id
    pub unique_id: Option<u64>,

    /// Workflow position
    pub task: Option<TaskRef>,

    /// Name of the ingest provider that delivered the item
    pub ingest_provider: Option<String>,
}

impl ArchiveRecord {
    /// Wrap an item in a fresh record
    pub fn new(item: CanonicalItem) -> Self {
        Self {
            id: RecordId::new(),
            item,
            unique_id: None,
            task: None,
            ingest_provider: None,
        }
    }

    /// Set the ingest provider
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.ingest_provider = Some(provider.into());
        self
    }

    /// Expiry of the record's item
    pub fn expiry(&self) -> Option<DateTime<Utc>> {
        self.item.expiry
    }

    /// Apply a partial update
    pub fn apply(&mut self, patch: RecordPatch) {
        if let Some(expiry) = patch.expiry {
            self.item.expiry = expiry;
        }
        if let Some(task) = patch.task {
            self.task = Some(task);
        }
        if let Some(unique_id) = patch.unique_id {
            self.unique_id = Some(unique_id);
        }
    }
}

/// Partial update of an archive record
///
/// `expiry: Some(None)` clears the expiry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    /// New expiry
    pub expiry: Option<Option<DateTime<Utc>>>,

    /// New workflow position
    pub task: Option<TaskRef>,

    /// New sequential id
    pub unique_id: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemBuilder;

    fn item() -> CanonicalItem {
        ItemBuilder::new("id").headline("h").build().unwrap()
    }

    #[test]
    fn test_record_id_display_and_parse() {
        let id = RecordId::new();
        let id_str = id.to_string();
        assert_eq!(id_str.len(), 36);
        assert_eq!(RecordId::from_string(&id_str).unwrap(), id);
        assert!(RecordId::from_string("not-a-uuid").is_err());
    }

    #[test]
    fn test_patch_clears_expiry() {
        let mut record = ArchiveRecord::new(item());
        record.item.expiry = Some(Utc::now());

        record.apply(RecordPatch {
            expiry: Some(None),
            ..Default::default()
        });
        assert!(record.expiry().is_none());
    }

    #[test]
    fn test_patch_sets_task() {
        let mut record = ArchiveRecord::new(item());
        record.apply(RecordPatch {
            task: Some(TaskRef {
                desk: Some("sports".to_string()),
                stage: Some("incoming".to_string()),
            }),
            unique_id: Some(97),
            ..Default::default()
        });

        assert_eq!(record.unique_id, Some(97));
        assert_eq!(
            record.task.as_ref().and_then(|t| t.stage.as_deref()),
            Some("incoming")
        );
    }
}
