//! Integration tests for newsroom-store
//!
//! These tests verify the insert/get/patch cycle and the expiry query.

use newsroom_domain::time::{expiry_date, format_timestamp, utcnow};
use newsroom_domain::traits::ArchiveStore;
use newsroom_domain::{
    ArchiveFilter, ArchiveRecord, CanonicalItem, ItemBuilder, RecordId, RecordPatch, Subject,
    TaskRef,
};
use newsroom_store::{SqliteArchive, StoreError};

fn item(guid: &str, expiry_minutes: Option<i64>) -> CanonicalItem {
    ItemBuilder::new(guid)
        .headline(format!("Headline {}", guid))
        .expiry(expiry_minutes.map(expiry_date))
        .build()
        .unwrap()
}

fn record(guid: &str, expiry_minutes: Option<i64>) -> ArchiveRecord {
    ArchiveRecord::new(item(guid, expiry_minutes))
}

#[test]
fn test_store_initialization() {
    let store = SqliteArchive::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
}

#[test]
fn test_insert_and_get_record() {
    let mut store = SqliteArchive::new(":memory:").unwrap();

    let item = ItemBuilder::new("AAP.1")
        .headline("England arrive")
        .subjects(vec![Subject {
            name: "Cricket".to_string(),
            qcode: Some("15017000".to_string()),
        }])
        .keywords(vec!["CRICKET".to_string()])
        .word_count(120)
        .build()
        .unwrap();
    let mut record = ArchiveRecord::new(item).with_provider("aap");
    record.unique_id = Some(97);
    record.task = Some(TaskRef {
        desk: Some("sports".to_string()),
        stage: None,
    });
    let id = record.id;

    let ids = store.insert(vec![record.clone()]).unwrap();
    assert_eq!(ids, vec![id]);

    let retrieved = store.get(id).unwrap().expect("record should exist");
    assert_eq!(retrieved, record);
}

#[test]
fn test_get_missing_record() {
    let store = SqliteArchive::new(":memory:").unwrap();
    assert!(store.get(RecordId::new()).unwrap().is_none());
}

#[test]
fn test_duplicate_detection() {
    let mut store = SqliteArchive::new(":memory:").unwrap();
    let record = record("dup", None);

    assert!(store.insert(vec![record.clone()]).is_ok());

    let result = store.insert(vec![record]);
    assert!(matches!(result, Err(StoreError::Duplicate(_))));
}

#[test]
fn test_insert_returns_ids_in_order() {
    let mut store = SqliteArchive::new(":memory:").unwrap();
    let records: Vec<_> = ["a", "b", "c"].iter().map(|g| record(g, None)).collect();
    let expected: Vec<_> = records.iter().map(|r| r.id).collect();

    assert_eq!(store.insert(records).unwrap(), expected);

    let guids: Vec<_> = store
        .find(&ArchiveFilter::all())
        .unwrap()
        .into_iter()
        .map(|r| r.item.guid)
        .collect();
    assert_eq!(guids, vec!["a", "b", "c"]);
}

#[test]
fn test_expiry_query_selects_only_past_expiries() {
    let mut store = SqliteArchive::new(":memory:").unwrap();

    let records = vec![
        record("minus10", Some(-10)),
        record("zero", Some(0)),
        record("plus10", Some(10)),
        record("plus20", Some(20)),
        record("plus30", Some(30)),
        record("null", None),
    ];
    store.insert(records).unwrap();

    let mut no_expiry = record("unique", None);
    no_expiry.unique_id = Some(97);
    store.insert(vec![no_expiry]).unwrap();

    let now = format_timestamp(&utcnow());
    let filter = ArchiveFilter::expired(now);

    let expired = store.find(&filter).unwrap();
    let mut guids: Vec<_> = expired.iter().map(|r| r.item.guid.as_str()).collect();
    guids.sort_unstable();
    assert_eq!(guids, vec!["minus10", "zero"]);
    assert_eq!(store.count(&filter).unwrap(), 2);
}

#[test]
fn test_find_by_guid_and_limit() {
    let mut store = SqliteArchive::new(":memory:").unwrap();
    store
        .insert(vec![record("x", None), record("y", None), record("x", None)])
        .unwrap();

    assert_eq!(store.find(&ArchiveFilter::by_guid("x")).unwrap().len(), 2);
    assert_eq!(store.count(&ArchiveFilter::by_guid("z")).unwrap(), 0);
    assert_eq!(
        store.find(&ArchiveFilter::all().with_limit(2)).unwrap().len(),
        2
    );
    assert_eq!(store.count(&ArchiveFilter::all().with_limit(2)).unwrap(), 2);
}

#[test]
fn test_delete_expired() {
    let mut store = SqliteArchive::new(":memory:").unwrap();
    store
        .insert(vec![
            record("old", Some(-60)),
            record("fresh", Some(60)),
            record("forever", None),
        ])
        .unwrap();

    let filter = ArchiveFilter::expired(format_timestamp(&utcnow()));
    assert_eq!(store.delete(&filter).unwrap(), 1);
    assert_eq!(store.delete(&filter).unwrap(), 0);

    let remaining: Vec<_> = store
        .find(&ArchiveFilter::all())
        .unwrap()
        .into_iter()
        .map(|r| r.item.guid)
        .collect();
    assert_eq!(remaining, vec!["fresh", "forever"]);
}

#[test]
fn test_patch_expiry_moves_record_into_sweep() {
    let mut store = SqliteArchive::new(":memory:").unwrap();
    let record = record("later", Some(60));
    let id = record.id;
    store.insert(vec![record]).unwrap();

    let filter = ArchiveFilter::expired(format_timestamp(&utcnow()));
    assert_eq!(store.count(&filter).unwrap(), 0);

    let patched = store
        .patch(
            id,
            RecordPatch {
                expiry: Some(Some(expiry_date(-5))),
                ..RecordPatch::default()
            },
        )
        .unwrap();
    assert!(patched);
    assert_eq!(store.count(&filter).unwrap(), 1);

    let cleared = store
        .patch(
            id,
            RecordPatch {
                expiry: Some(None),
                unique_id: Some(5),
                ..RecordPatch::default()
            },
        )
        .unwrap();
    assert!(cleared);
    assert_eq!(store.count(&filter).unwrap(), 0);
    assert_eq!(store.get(id).unwrap().unwrap().unique_id, Some(5));
}

#[test]
fn test_patch_missing_record() {
    let mut store = SqliteArchive::new(":memory:").unwrap();
    let patched = store.patch(RecordId::new(), RecordPatch::default()).unwrap();
    assert!(!patched);
}

#[test]
fn test_persists_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("archive.db");

    let record = record("durable", Some(-1));
    let id = record.id;
    {
        let mut store = SqliteArchive::new(&path).unwrap();
        store.insert(vec![record]).unwrap();
    }

    let store = SqliteArchive::new(&path).unwrap();
    let retrieved = store.get(id).unwrap().unwrap();
    assert_eq!(retrieved.item.guid, "durable");
    assert_eq!(store.count(&ArchiveFilter::expired(format_timestamp(&utcnow()))).unwrap(), 1);
}
