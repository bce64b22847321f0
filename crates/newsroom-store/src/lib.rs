//! Newsroom Storage Layer
//!
//! Implements the ArchiveStore trait on SQLite.
//!
//! # Architecture
//!
//! - One `archive` table keyed by record id
//! - Queried fields (`guid`, `expiry`) live in indexed columns
//! - The full canonical item is kept as a JSON document
//!
//! Expiry values use the fixed-width storage serialization from
//! `newsroom_domain::time`, so `expiry <= ?` compares correctly as text.
//!
//! # Examples
//!
//! ```no_run
//! use newsroom_store::SqliteArchive;
//!
//! let store = SqliteArchive::new(":memory:").unwrap();
//! // Store is now ready for archive operations
//! ```

#![warn(missing_docs)]

use newsroom_domain::time::format_timestamp;
use newsroom_domain::traits::ArchiveStore;
use newsroom_domain::{ArchiveFilter, ArchiveRecord, CanonicalItem, RecordId, RecordPatch, TaskRef};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Record not found
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Item could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A record with this id already exists
    #[error("Duplicate record: {0}")]
    Duplicate(String),
}

const SELECT_COLUMNS: &str =
    "SELECT id, unique_id, task_json, ingest_provider, item_json FROM archive";

/// SQLite-based implementation of ArchiveStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Share one store behind a mutex, or
/// give each thread its own SqliteArchive on the same database file.
pub struct SqliteArchive {
    conn: Connection,
}

impl SqliteArchive {
    /// Open (or create) an archive at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use newsroom_store::SqliteArchive;
    ///
    /// let store = SqliteArchive::new("newsroom.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    /// Convert RecordId to bytes for storage
    fn record_id_to_bytes(id: RecordId) -> Vec<u8> {
        id.value().to_be_bytes().to_vec()
    }

    /// Convert bytes to RecordId
    fn bytes_to_record_id(bytes: &[u8]) -> Result<RecordId, StoreError> {
        let arr: [u8; 16] = bytes.try_into().map_err(|_| {
            StoreError::InvalidData(format!(
                "Expected 16 bytes for RecordId, got {}",
                bytes.len()
            ))
        })?;
        Ok(RecordId::from_value(u128::from_be_bytes(arr)))
    }

    fn unique_id_to_sql(unique_id: Option<u64>) -> Result<Option<i64>, StoreError> {
        unique_id
            .map(|value| {
                i64::try_from(value).map_err(|_| {
                    StoreError::InvalidData(format!("unique_id {} out of range", value))
                })
            })
            .transpose()
    }

    /// Column values for a record, in `archive` column order after `id`
    fn encode(record: &ArchiveRecord) -> Result<EncodedRecord, StoreError> {
        Ok(EncodedRecord {
            id: Self::record_id_to_bytes(record.id),
            guid: record.item.guid.clone(),
            unique_id: Self::unique_id_to_sql(record.unique_id)?,
            expiry: record.expiry().map(|e| format_timestamp(&e)),
            task_json: record.task.as_ref().map(serde_json::to_string).transpose()?,
            ingest_provider: record.ingest_provider.clone(),
            item_json: serde_json::to_string(&record.item)?,
        })
    }

    fn decode_row(row: &Row<'_>) -> Result<ArchiveRecord, StoreError> {
        let id_bytes: Vec<u8> = row.get(0)?;
        let unique_id: Option<i64> = row.get(1)?;
        let task_json: Option<String> = row.get(2)?;
        let item_json: String = row.get(4)?;

        let unique_id = unique_id
            .map(|value| {
                u64::try_from(value).map_err(|_| {
                    StoreError::InvalidData(format!("negative unique_id {}", value))
                })
            })
            .transpose()?;
        let task = task_json
            .map(|json| serde_json::from_str::<TaskRef>(&json))
            .transpose()?;
        let item: CanonicalItem = serde_json::from_str(&item_json)?;

        Ok(ArchiveRecord {
            id: Self::bytes_to_record_id(&id_bytes)?,
            item,
            unique_id,
            task,
            ingest_provider: row.get(3)?,
        })
    }

    /// `WHERE` clause and parameters for a filter (limit excluded)
    fn where_clause(filter: &ArchiveFilter) -> (String, Vec<Box<dyn rusqlite::ToSql>>) {
        let mut sql = String::from(" WHERE 1=1");
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if filter.expiry_set || filter.expiry_lte.is_some() {
            sql.push_str(" AND expiry IS NOT NULL");
        }

        if let Some(now) = &filter.expiry_lte {
            sql.push_str(" AND expiry <= ?");
            params.push(Box::new(now.clone()));
        }

        if let Some(guid) = &filter.guid {
            sql.push_str(" AND guid = ?");
            params.push(Box::new(guid.clone()));
        }

        (sql, params)
    }

    /// Ids selected by a filter, limit applied, in insertion order
    fn select_ids_sql(filter: &ArchiveFilter) -> (String, Vec<Box<dyn rusqlite::ToSql>>) {
        let (where_sql, mut params) = Self::where_clause(filter);
        let mut sql = format!("SELECT id FROM archive{} ORDER BY rowid", where_sql);

        if let Some(limit) = filter.limit {
            sql.push_str(" LIMIT ?");
            params.push(Box::new(limit));
        }

        (sql, params)
    }

    fn write_back(&self, record: &ArchiveRecord) -> Result<(), StoreError> {
        let encoded = Self::encode(record)?;
        self.conn.execute(
            "UPDATE archive SET guid = ?2, unique_id = ?3, expiry = ?4, task_json = ?5,
             ingest_provider = ?6, item_json = ?7 WHERE id = ?1",
            params![
                &encoded.id,
                &encoded.guid,
                encoded.unique_id,
                &encoded.expiry,
                &encoded.task_json,
                &encoded.ingest_provider,
                &encoded.item_json,
            ],
        )?;
        Ok(())
    }
}

/// A record flattened to column values
struct EncodedRecord {
    id: Vec<u8>,
    guid: String,
    unique_id: Option<i64>,
    expiry: Option<String>,
    task_json: Option<String>,
    ingest_provider: Option<String>,
    item_json: String,
}

/// Wrap a store error so it can leave a rusqlite row callback
fn row_error(e: StoreError) -> rusqlite::Error {
    match e {
        StoreError::Database(e) => e,
        other => rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(other),
        ),
    }
}

impl ArchiveStore for SqliteArchive {
    type Error = StoreError;

    fn insert(&mut self, records: Vec<ArchiveRecord>) -> Result<Vec<RecordId>, Self::Error> {
        let mut ids = Vec::with_capacity(records.len());

        for record in records {
            let encoded = Self::encode(&record)?;

            let exists: bool = self
                .conn
                .query_row(
                    "SELECT 1 FROM archive WHERE id = ?1",
                    params![&encoded.id],
                    |_| Ok(true),
                )
                .optional()?
                .unwrap_or(false);

            if exists {
                return Err(StoreError::Duplicate(record.id.to_string()));
            }

            self.conn.execute(
                "INSERT INTO archive (id, guid, unique_id, expiry, task_json, ingest_provider, item_json)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    &encoded.id,
                    &encoded.guid,
                    encoded.unique_id,
                    &encoded.expiry,
                    &encoded.task_json,
                    &encoded.ingest_provider,
                    &encoded.item_json,
                ],
            )?;

            ids.push(record.id);
        }

        Ok(ids)
    }

    fn get(&self, id: RecordId) -> Result<Option<ArchiveRecord>, Self::Error> {
        let id_bytes = Self::record_id_to_bytes(id);

        let record = self
            .conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![&id_bytes],
                |row| Self::decode_row(row).map_err(row_error),
            )
            .optional()?;

        Ok(record)
    }

    fn patch(&mut self, id: RecordId, patch: RecordPatch) -> Result<bool, Self::Error> {
        let Some(mut record) = self.get(id)? else {
            return Ok(false);
        };

        record.apply(patch);
        self.write_back(&record)?;
        Ok(true)
    }

    fn find(&self, filter: &ArchiveFilter) -> Result<Vec<ArchiveRecord>, Self::Error> {
        let (ids_sql, params) = Self::select_ids_sql(filter);
        let sql = format!(
            "{} WHERE id IN ({}) ORDER BY rowid",
            SELECT_COLUMNS, ids_sql
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let records = stmt
            .query_map(&param_refs[..], |row| Self::decode_row(row).map_err(row_error))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn count(&self, filter: &ArchiveFilter) -> Result<usize, Self::Error> {
        let (ids_sql, params) = Self::select_ids_sql(filter);
        let sql = format!("SELECT COUNT(*) FROM ({})", ids_sql);
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let count: i64 = self.conn.query_row(&sql, &param_refs[..], |row| row.get(0))?;
        usize::try_from(count).map_err(|_| StoreError::InvalidData(format!("negative count {}", count)))
    }

    fn delete(&mut self, filter: &ArchiveFilter) -> Result<usize, Self::Error> {
        let (ids_sql, params) = Self::select_ids_sql(filter);
        let sql = format!("DELETE FROM archive WHERE id IN ({})", ids_sql);
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let removed = self.conn.execute(&sql, &param_refs[..])?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_bytes_round_trip() {
        let id = RecordId::new();
        let bytes = SqliteArchive::record_id_to_bytes(id);
        assert_eq!(bytes.len(), 16);
        assert_eq!(SqliteArchive::bytes_to_record_id(&bytes).unwrap(), id);
    }

    #[test]
    fn test_bytes_to_record_id_wrong_length() {
        let result = SqliteArchive::bytes_to_record_id(&[1, 2, 3]);
        assert!(matches!(result, Err(StoreError::InvalidData(_))));
    }

    #[test]
    fn test_where_clause_for_expiry_query() {
        let filter = ArchiveFilter::expired("2024-01-01T00:00:00Z");
        let (sql, params) = SqliteArchive::where_clause(&filter);
        assert_eq!(sql, " WHERE 1=1 AND expiry IS NOT NULL AND expiry <= ?");
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_where_clause_match_all() {
        let (sql, params) = SqliteArchive::where_clause(&ArchiveFilter::all());
        assert_eq!(sql, " WHERE 1=1");
        assert!(params.is_empty());
    }

    #[test]
    fn test_unique_id_out_of_range() {
        let result = SqliteArchive::unique_id_to_sql(Some(u64::MAX));
        assert!(matches!(result, Err(StoreError::InvalidData(_))));
        assert_eq!(SqliteArchive::unique_id_to_sql(Some(97)).unwrap(), Some(97));
    }
}
