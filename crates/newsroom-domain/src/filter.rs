//! Archive query criteria
//!
//! Includes the expiry query builder used by the expiry sweep.

use crate::record::ArchiveRecord;
use crate::time::format_timestamp;

/// Criteria for selecting archive records
///
/// The default filter matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveFilter {
    /// Only records whose expiry is set
    pub expiry_set: bool,

    /// Only records whose expiry is at or before this timestamp
    /// (storage serialization)
    pub expiry_lte: Option<String>,

    /// Only records with this guid
    pub guid: Option<String>,

    /// Maximum records to return
    pub limit: Option<usize>,
}

impl ArchiveFilter {
    /// Match every record
    pub fn all() -> Self {
        Self::default()
    }

    /// Select records whose expiry is set and not later than `now`
    ///
    /// `now` must use the storage serialization
    /// ([`format_timestamp`](crate::time::format_timestamp)). Records without
    /// an expiry are never selected, whatever `now` is.
    ///
    /// # Examples
    ///
    /// ```
    /// use newsroom_domain::ArchiveFilter;
    ///
    /// let filter = ArchiveFilter::expired("2024-01-01T00:00:00Z");
    /// assert!(filter.expiry_set);
    /// assert_eq!(filter.expiry_lte.as_deref(), Some("2024-01-01T00:00:00Z"));
    /// ```
    pub fn expired(now: impl Into<String>) -> Self {
        Self {
            expiry_set: true,
            expiry_lte: Some(now.into()),
            ..Default::default()
        }
    }

    /// Select the record with the given guid
    pub fn by_guid(guid: impl Into<String>) -> Self {
        Self {
            guid: Some(guid.into()),
            ..Default::default()
        }
    }

    /// Cap the number of returned records
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Evaluate the filter against a record in memory
    ///
    /// Mirrors what a store does in its query language, including the string
    /// comparison on the serialized expiry. `limit` is not applied here.
    pub fn matches(&self, record: &ArchiveRecord) -> bool {
        let expiry = record.expiry().map(|e| format_timestamp(&e));

        if (self.expiry_set || self.expiry_lte.is_some()) && expiry.is_none() {
            return false;
        }

        if let (Some(now), Some(expiry)) = (&self.expiry_lte, &expiry) {
            if expiry.as_str() > now.as_str() {
                return false;
            }
        }

        if let Some(guid) = &self.guid {
            if &record.item.guid != guid {
                return false;
            }
        }

        true
    }
}
