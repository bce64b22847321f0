//! NITF (News Industry Text Format) item parser
//!
//! Reads the `head/docdata` block for identity, status and dates, the
//! `head/tobject` and `head/meta` blocks for classification, and
//! `body/body.head` plus `body/body.content` for the story itself.

pub mod extract;
pub mod meta;

use crate::error::IngestError;
use crate::parser::ItemParser;
use crate::tree::{self, find};
use newsroom_domain::{CanonicalItem, ItemBuilder, ItemType, DEFAULT_PUBSTATUS, DEFAULT_URGENCY};
use roxmltree::{Document, Node};
use tracing::debug;

/// Format identifier
pub const FORMAT: &str = "nitf";

/// Required root element
const ROOT_ELEMENT: &str = "nitf";

/// Parser for NITF documents
#[derive(Debug, Clone, Copy, Default)]
pub struct NitfParser;

impl NitfParser {
    /// Create a new NITF parser
    pub fn new() -> Self {
        Self
    }

    fn root<'a, 'input>(&self, doc: &'a Document<'input>) -> Result<Node<'a, 'input>, IngestError> {
        let root = doc.root_element();
        if root.tag_name().name() != ROOT_ELEMENT {
            return Err(IngestError::MalformedDocument(format!(
                "expected <{}> root, found <{}>",
                ROOT_ELEMENT,
                root.tag_name().name()
            )));
        }
        Ok(root)
    }
}

impl ItemParser for NitfParser {
    fn format(&self) -> &'static str {
        FORMAT
    }

    fn can_parse(&self, doc: &Document<'_>) -> bool {
        doc.root_element().tag_name().name() == ROOT_ELEMENT
    }

    fn guid(&self, doc: &Document<'_>) -> Option<String> {
        find(doc.root_element(), "head/docdata/doc-id").and_then(|id| tree::attr(id, "id-string"))
    }

    fn parse(&self, doc: &Document<'_>) -> Result<CanonicalItem, IngestError> {
        let root = self.root(doc)?;

        let docdata = find(root, "head/docdata")
            .ok_or_else(|| IngestError::MalformedDocument("missing head/docdata".to_string()))?;
        let guid = find(docdata, "doc-id")
            .and_then(|id| id.attribute("id-string"))
            .ok_or_else(|| IngestError::MalformedDocument("missing doc-id/@id-string".to_string()))?;

        let urgency = find(docdata, "urgency")
            .and_then(|node| node.attribute("ed-urg"))
            .unwrap_or(DEFAULT_URGENCY);
        let pubstatus = docdata
            .attribute("management-status")
            .unwrap_or(DEFAULT_PUBSTATUS);

        let issued = extract::norm_datetime(find(docdata, "date.issue"))?;
        let expiry = extract::norm_datetime(find(docdata, "date.expire"))?;

        let headline = find(root, "body/body.head/hedline/hl1").ok_or_else(|| {
            IngestError::MalformedDocument(format!("{}: missing body.head/hedline/hl1", guid))
        })?;

        let builder = ItemBuilder::new(guid)
            .item_type(ItemType::Text)
            .urgency(urgency)
            .pubstatus(pubstatus)
            .issued(issued)
            .expiry(expiry)
            .subjects(extract::subjects(root))
            .body_html(extract::content(root))
            .places(extract::places(docdata))
            .keywords(extract::keywords(docdata))
            .ednote(find(docdata, "ed-msg").and_then(|msg| tree::attr(msg, "info")))
            .headline(tree::text(headline).unwrap_or_default())
            .abstract_text(tree::text_at(root, "body/body.head/abstract"))
            .dateline(tree::text_at(root, "body/body.head/dateline/location/city"))
            .byline(extract::byline(root));

        let mut builder = meta::map_head(builder, root)?;

        if builder.current_word_count().is_none() {
            let count = extract::word_count(builder.current_body_html());
            builder = builder.word_count(count);
        }

        let item = builder.build()?;
        debug!(
            "Parsed NITF item {} ({} subjects, {} words)",
            item.guid,
            item.subject.len(),
            item.word_count.unwrap_or_default()
        );
        Ok(item)
    }
}
