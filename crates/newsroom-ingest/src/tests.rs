//! Integration tests for the Ingester

#[cfg(test)]
mod tests {
    use crate::{FailureKind, IngestBatch, IngestConfig, Ingester, ParserRegistry, WireDocument};
    use newsroom_domain::time::{format_timestamp, utcnow};
    use newsroom_domain::traits::ArchiveStore;
    use newsroom_domain::{ArchiveFilter, ItemType};
    use newsroom_store::SqliteArchive;

    const AAP_STORY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE nitf SYSTEM "nitf-3-3.dtd">
<nitf>
  <head>
    <meta name="anpa-keyword" content="RUGBY-WALLABIES"/>
    <meta name="anpa-format" content="t"/>
    <tobject>
      <tobject.subject tobject.subject.refnum="15073000" tobject.subject.type="Sport" tobject.subject.matter="Rugby union"/>
    </tobject>
    <docdata management-status="usable">
      <doc-id id-string="AAP.RUGBY.1"/>
      <urgency ed-urg="2"/>
      <date.issue norm="20240301T093000"/>
      <date.expire norm="20240302T093000"/>
    </docdata>
  </head>
  <body>
    <body.head>
      <hedline><hl1>Wallabies name squad</hl1></hedline>
      <byline>By <person>Sam Lee</person></byline>
    </body.head>
    <body.content>
      <p>The Wallabies have named a 33-man squad.</p>
    </body.content>
  </body>
</nitf>"#;

    fn story(guid: &str) -> String {
        format!(
            r#"<nitf><head><docdata><doc-id id-string="{}"/></docdata></head>
<body><body.head><hedline><hl1>Story {}</hl1></hedline></body.head>
<body.content><p>one two three</p></body.content></body></nitf>"#,
            guid, guid
        )
    }

    fn create_test_ingester(config: IngestConfig) -> Ingester<SqliteArchive> {
        let store = SqliteArchive::new(":memory:").unwrap();
        Ingester::new(ParserRegistry::with_defaults(), store, config)
    }

    #[tokio::test]
    async fn test_full_ingest_flow() {
        let ingester = create_test_ingester(IngestConfig::default());
        let batch = IngestBatch::new(vec![WireDocument::new("aap.xml", None, AAP_STORY)]);

        let result = ingester.ingest(batch).await.unwrap();
        assert_eq!(result.items_created.len(), 1);
        assert!(result.failures.is_empty());

        let store = ingester.store();
        let store = store.lock().unwrap();
        let record = store
            .get(result.items_created[0].record_id)
            .unwrap()
            .expect("archived record");

        assert_eq!(record.item.guid, "AAP.RUGBY.1");
        assert_eq!(record.item.urgency, "2");
        assert_eq!(record.item.item_type, ItemType::Preformatted);
        assert_eq!(record.item.slugline.as_deref(), Some("RUGBY-WALLABIES"));
        assert_eq!(record.item.byline, "By Sam Lee");
        assert_eq!(record.item.word_count, Some(7));
        assert_eq!(record.item.subject.len(), 2);
        assert_eq!(record.ingest_provider.as_deref(), Some("file"));

        // The wire expiry is in the past, so the sweep query already selects it
        let expired = ArchiveFilter::expired(format_timestamp(&utcnow()));
        assert_eq!(store.count(&expired).unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_id_excluded_from_archive() {
        let ingester = create_test_ingester(IngestConfig::default());
        let without_id = story("GONE").replace(r#"<doc-id id-string="GONE"/>"#, "");

        let batch = IngestBatch::new(vec![
            WireDocument::new("one.xml", Some("nitf"), story("ONE")),
            WireDocument::new("gone.xml", Some("nitf"), without_id),
            WireDocument::new("two.xml", Some("nitf"), story("TWO")),
        ]);

        let result = ingester.ingest(batch).await.unwrap();

        assert_eq!(result.items_created.len(), 2);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].kind, FailureKind::Malformed);

        let store = ingester.store();
        let store = store.lock().unwrap();
        let guids: Vec<_> = store
            .find(&ArchiveFilter::all())
            .unwrap()
            .into_iter()
            .map(|r| r.item.guid)
            .collect();
        assert_eq!(guids, vec!["ONE", "TWO"]);
    }

    #[tokio::test]
    async fn test_latin1_document() {
        let ingester = create_test_ingester(IngestConfig::default());

        let mut bytes = br#"<?xml version="1.0" encoding="ISO-8859-1"?>
<nitf><head><docdata><doc-id id-string="AFP.1"/></docdata></head>
<body><body.head><hedline><hl1>Caf"#
            .to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(b" de Flore reopens</hl1></hedline></body.head></body></nitf>");

        let result = ingester
            .ingest(IngestBatch::new(vec![WireDocument::new("afp.xml", None, bytes)]))
            .await
            .unwrap();

        assert_eq!(result.items_created.len(), 1);
        assert_eq!(result.items_created[0].headline, "Café de Flore reopens");
    }

    #[tokio::test]
    async fn test_garbage_bytes_are_malformed() {
        let ingester = create_test_ingester(IngestConfig::default());
        let batch = IngestBatch::new(vec![
            WireDocument::new("junk.bin", Some("nitf"), vec![0xFF, 0xFE, 0x00, 0x3C]),
            WireDocument::new("truncated.xml", Some("nitf"), "<nitf><head>"),
        ]);

        let result = ingester.ingest(batch).await.unwrap();

        assert!(result.items_created.is_empty());
        assert_eq!(result.failures.len(), 2);
        assert!(result
            .failures
            .iter()
            .all(|f| f.kind == FailureKind::Malformed));
    }

    #[tokio::test]
    async fn test_quarantine_and_format_errors() {
        let ingester = create_test_ingester(IngestConfig::default());
        let bad_count = story("WC").replace(
            "<docdata>",
            r#"<meta name="anpa-wordcount" content="lots"/><docdata>"#,
        );

        let batch = IngestBatch::new(vec![
            WireDocument::new("feed.json", Some("ninjs"), "{}"),
            WireDocument::new("wc.xml", None, bad_count),
            WireDocument::new("ok.xml", None, story("OK")),
        ]);

        let result = ingester.ingest(batch).await.unwrap();

        assert_eq!(result.items_created.len(), 1);
        assert_eq!(result.quarantined().len(), 1);
        assert_eq!(result.quarantined()[0].source_id, "feed.json");

        let format_failure = result
            .failures
            .iter()
            .find(|f| f.kind == FailureKind::Format)
            .expect("format failure");
        assert_eq!(format_failure.guid.as_deref(), Some("WC"));
    }

    #[tokio::test]
    async fn test_content_expiry_feeds_sweep() {
        let config = IngestConfig {
            content_expiry_minutes: Some(60),
            provider: "reuters".to_string(),
            ..IngestConfig::default()
        };
        let ingester = create_test_ingester(config);

        ingester
            .ingest(IngestBatch::new(vec![WireDocument::new("r.xml", None, story("R1"))]))
            .await
            .unwrap();

        let store = ingester.store();
        let store = store.lock().unwrap();
        let records = store.find(&ArchiveFilter::by_guid("R1")).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].expiry().is_some());
        assert_eq!(records[0].ingest_provider.as_deref(), Some("reuters"));

        let expired = ArchiveFilter::expired(format_timestamp(&utcnow()));
        assert_eq!(store.count(&expired).unwrap(), 0);
    }
}
