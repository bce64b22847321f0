//! Decode raw wire bytes into text and parse the XML tree

use crate::error::IngestError;
use encoding_rs::{Encoding, UTF_8};
use roxmltree::{Document, ParsingOptions};
use std::borrow::Cow;

/// How far into the document to look for the XML declaration
const PROLOG_SCAN_LIMIT: usize = 256;

/// Decode document bytes to text
///
/// A byte-order mark wins; otherwise the `encoding` label of the XML
/// declaration is honoured; otherwise UTF-8. Invalid sequences for the chosen
/// encoding make the document malformed.
pub fn decode(bytes: &[u8]) -> Result<Cow<'_, str>, IngestError> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => {
            let encoding = declared_encoding(bytes)
                .and_then(|label| Encoding::for_label(label.as_bytes()))
                .unwrap_or(UTF_8);
            (encoding, bytes)
        }
    };

    let (text, had_errors) = encoding.decode_without_bom_handling(body);
    if had_errors {
        return Err(IngestError::MalformedDocument(format!(
            "invalid byte sequence for encoding {}",
            encoding.name()
        )));
    }
    Ok(text)
}

/// Read the `encoding` label from the XML declaration, if any
fn declared_encoding(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(PROLOG_SCAN_LIMIT)];
    let head = String::from_utf8_lossy(head);
    let decl = head.strip_prefix("<?xml")?;
    let decl = &decl[..decl.find("?>")?];

    let start = decl.find("encoding")? + "encoding".len();
    let rest = decl[start..].trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &rest[1..];
    let end = value.find(quote)?;
    Some(value[..end].trim().to_string())
}

/// Parse decoded text into a tree
///
/// Wire feeds routinely carry a DOCTYPE, so DTDs are allowed.
pub fn parse_tree(text: &str) -> Result<Document<'_>, IngestError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(text, options)?)
}
