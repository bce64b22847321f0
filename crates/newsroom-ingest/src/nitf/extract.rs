//! Field extractors for NITF documents
//!
//! Each extractor reads one field group from the tree and falls back to an
//! empty value when the nodes are absent. Only `norm_datetime` can fail.

use crate::error::IngestError;
use crate::tree::{self, find, find_all};
use chrono::{DateTime, NaiveDateTime, Utc};
use newsroom_domain::{Place, Subject};
use roxmltree::Node;

/// Compact ISO 8601 form used by `@norm` attributes
const NORM_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Same, with a trailing UTC offset
const NORM_FORMAT_TZ: &str = "%Y%m%dT%H%M%S%z";

/// Subject attributes read from each `tobject.subject`, in order
const SUBJECT_LEVELS: [&str; 3] = [
    "tobject.subject.type",
    "tobject.subject.matter",
    "tobject.subject.detail",
];

/// Event location of the story
///
/// Only the first `evloc` is read.
pub fn places(docdata: Node<'_, '_>) -> Vec<Place> {
    match tree::children(docdata, "evloc").next() {
        Some(evloc) => vec![Place {
            name: tree::attr(evloc, "city"),
            code: tree::attr(evloc, "iso-cc"),
        }],
        None => Vec::new(),
    }
}

/// Subject codes from `head/tobject/tobject.subject`
///
/// Every non-empty level attribute becomes one subject; the reference number
/// of a node is attached to the last subject that node produced.
pub fn subjects(root: Node<'_, '_>) -> Vec<Subject> {
    let mut subjects = Vec::new();

    for node in find_all(root, "head/tobject/tobject.subject") {
        let before = subjects.len();
        subjects.extend(
            SUBJECT_LEVELS
                .iter()
                .filter_map(|level| node.attribute(*level))
                .filter(|name| !name.is_empty())
                .map(Subject::new),
        );

        if subjects.len() > before {
            if let Some(last) = subjects.last_mut() {
                last.qcode = tree::attr(node, "tobject.subject.refnum");
            }
        }
    }

    subjects
}

/// Keywords from `key-list/keyword/@key`
pub fn keywords(docdata: Node<'_, '_>) -> Vec<String> {
    find_all(docdata, "key-list/keyword")
        .into_iter()
        .filter_map(|keyword| tree::attr(keyword, "key"))
        .collect()
}

/// Body markup of `body/body.content`, copied from the source text
///
/// Each element child is taken with whatever trails it up to the next element
/// (or the closing tag), so entities, comments and whitespace survive as
/// written. Text before the first element is dropped.
pub fn content(root: Node<'_, '_>) -> String {
    let Some(body) = find(root, "body/body.content") else {
        return String::new();
    };

    let source = body.document().input_text();
    let outer = body.range();
    let inner_end = source[outer.clone()]
        .rfind("</")
        .map(|offset| outer.start + offset)
        .unwrap_or(outer.end);

    let elements: Vec<Node<'_, '_>> = body.children().filter(|n| n.is_element()).collect();
    let mut html = String::new();

    for (index, element) in elements.iter().enumerate() {
        let start = element.range().start;
        let end = elements
            .get(index + 1)
            .map(|next| next.range().start)
            .unwrap_or(inner_end);
        if let Some(slice) = source.get(start..end) {
            html.push_str(slice);
        }
    }

    html
}

/// Timestamp from the `@norm` attribute of a date node
///
/// Absent node is `Ok(None)`; a node whose `norm` is missing or unreadable is
/// a `Format` error.
pub fn norm_datetime(node: Option<Node<'_, '_>>) -> Result<Option<DateTime<Utc>>, IngestError> {
    let Some(node) = node else {
        return Ok(None);
    };

    let element = node.tag_name().name();
    let raw = node.attribute("norm").ok_or_else(|| {
        IngestError::Format(format!("<{}> has no norm attribute", element))
    })?;

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, NORM_FORMAT) {
        return Ok(Some(naive.and_utc()));
    }

    DateTime::parse_from_str(raw, NORM_FORMAT_TZ)
        .map(|dt| Some(dt.with_timezone(&Utc)))
        .map_err(|e| IngestError::Format(format!("<{}> norm '{}': {}", element, raw, e)))
}

/// Byline from `body/body.head/byline`
///
/// With a `person` child, the free text and the person's name are trimmed and
/// joined by one space.
pub fn byline(root: Node<'_, '_>) -> String {
    let Some(node) = find(root, "body/body.head/byline") else {
        return String::new();
    };

    let free_text = tree::text(node).unwrap_or_default();
    match tree::children(node, "person").next() {
        Some(person) => {
            let name = tree::text(person).unwrap_or_default().trim();
            [free_text.trim(), name]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        }
        None => free_text.to_string(),
    }
}

/// Word count of body markup
///
/// Tags separate words; what remains is split on whitespace.
pub fn word_count(html: &str) -> u32 {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' if in_tag => {
                in_tag = false;
                text.push(' ');
            }
            _ if in_tag => {}
            _ => text.push(c),
        }
    }

    u32::try_from(text.split_whitespace().count()).unwrap_or(u32::MAX)
}
