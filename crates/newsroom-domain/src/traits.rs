//! Trait definitions for external interactions
//!
//! These traits define the boundary between the ingestion core and
//! persistence. Implementations live in other crates.

use crate::{ArchiveFilter, ArchiveRecord, RecordId, RecordPatch};

/// Trait for storing, querying and expiring archive records
///
/// Implemented by the infrastructure layer (newsroom-store). Inserts are
/// atomic per record; the core does not manage transaction scope.
pub trait ArchiveStore {
    /// Error type for store operations
    type Error;

    /// Insert records, returning their ids in input order
    fn insert(&mut self, records: Vec<ArchiveRecord>) -> Result<Vec<RecordId>, Self::Error>;

    /// Get a record by ID
    fn get(&self, id: RecordId) -> Result<Option<ArchiveRecord>, Self::Error>;

    /// Apply a partial update; returns false if the record does not exist
    fn patch(&mut self, id: RecordId, patch: RecordPatch) -> Result<bool, Self::Error>;

    /// Find records matching a filter
    fn find(&self, filter: &ArchiveFilter) -> Result<Vec<ArchiveRecord>, Self::Error>;

    /// Count records matching a filter
    fn count(&self, filter: &ArchiveFilter) -> Result<usize, Self::Error>;

    /// Delete records matching a filter, returning how many were removed
    fn delete(&mut self, filter: &ArchiveFilter) -> Result<usize, Self::Error>;
}
