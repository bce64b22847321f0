//! `head/meta` mapping
//!
//! Provider metadata arrives as generic `name`/`content` pairs. Recognised
//! names are dispatched through [`MetaField`]; anything else is ignored.

use crate::error::IngestError;
use crate::tree::find_all;
use newsroom_domain::{Category, ItemBuilder, ItemType};
use roxmltree::Node;

/// `anpa-format` content that keeps an item as plain text
const TEXT_FORMAT_MARKER: &str = "x";

/// One metadata node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaEntry<'a> {
    /// `@name`
    pub name: Option<&'a str>,
    /// `@content`
    pub content: Option<&'a str>,
}

impl<'a> MetaEntry<'a> {
    /// Create an entry with a name
    pub fn new(name: &'a str, content: Option<&'a str>) -> Self {
        Self {
            name: Some(name),
            content,
        }
    }
}

/// Metadata names with an effect on the item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaField {
    /// `anpa-keyword`: slugline
    Keyword,
    /// `anpa-sequence`: provider sequence number
    Sequence,
    /// `anpa-category`: category code
    Category,
    /// `anpa-wordcount`: explicit word count
    WordCount,
    /// `anpa-takekey`: take key
    TakeKey,
    /// `anpa-format`: text or preformatted
    Format,
}

impl MetaField {
    /// Every recognised field
    pub const ALL: [MetaField; 6] = [
        MetaField::Keyword,
        MetaField::Sequence,
        MetaField::Category,
        MetaField::WordCount,
        MetaField::TakeKey,
        MetaField::Format,
    ];

    /// Name as it appears in `meta/@name`
    pub fn name(&self) -> &'static str {
        match self {
            MetaField::Keyword => "anpa-keyword",
            MetaField::Sequence => "anpa-sequence",
            MetaField::Category => "anpa-category",
            MetaField::WordCount => "anpa-wordcount",
            MetaField::TakeKey => "anpa-takekey",
            MetaField::Format => "anpa-format",
        }
    }

    /// Look up a field by exact name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    /// Write `content` into the matching item field
    pub fn apply(self, builder: ItemBuilder, content: Option<&str>) -> Result<ItemBuilder, IngestError> {
        let owned = content.map(str::to_string);

        Ok(match self {
            MetaField::Keyword => builder.slugline(owned),
            MetaField::Sequence => builder.ingest_provider_sequence(owned),
            MetaField::Category => builder.anpa_category(Category {
                qcode: owned,
                name: String::new(),
            }),
            MetaField::WordCount => builder.word_count(parse_word_count(content)?),
            MetaField::TakeKey => builder.anpa_take_key(owned),
            MetaField::Format => {
                let marker = content.unwrap_or(TEXT_FORMAT_MARKER).to_lowercase();
                if marker == TEXT_FORMAT_MARKER {
                    builder.item_type(ItemType::Text)
                } else {
                    builder.item_type(ItemType::Preformatted)
                }
            }
        })
    }
}

fn parse_word_count(content: Option<&str>) -> Result<u32, IngestError> {
    let raw = content.ok_or_else(|| {
        IngestError::Format(format!("{} has no content", MetaField::WordCount.name()))
    })?;

    raw.trim().parse::<u32>().map_err(|_| {
        IngestError::Format(format!(
            "{} '{}' is not a non-negative integer",
            MetaField::WordCount.name(),
            raw
        ))
    })
}

/// Metadata entries under `head/meta`, in document order
pub fn entries<'a>(root: Node<'a, '_>) -> Vec<MetaEntry<'a>> {
    find_all(root, "head/meta")
        .into_iter()
        .map(|meta| MetaEntry {
            name: meta.attribute("name"),
            content: meta.attribute("content"),
        })
        .collect()
}

/// Apply every entry in order; later entries overwrite earlier ones
pub fn apply_metadata<'a>(
    mut builder: ItemBuilder,
    entries: impl IntoIterator<Item = MetaEntry<'a>>,
) -> Result<ItemBuilder, IngestError> {
    for entry in entries {
        if let Some(field) = entry.name.and_then(MetaField::from_name) {
            builder = field.apply(builder, entry.content)?;
        }
    }
    Ok(builder)
}

/// Convenience for callers holding the tree
pub fn map_head(builder: ItemBuilder, root: Node<'_, '_>) -> Result<ItemBuilder, IngestError> {
    apply_metadata(builder, entries(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsroom_domain::CanonicalItem;
    use roxmltree::Document;

    fn map(entries: Vec<MetaEntry<'_>>) -> Result<CanonicalItem, IngestError> {
        let builder = ItemBuilder::new("guid").headline("h");
        Ok(apply_metadata(builder, entries)?.build()?)
    }

    #[test]
    fn test_from_name_is_exact() {
        assert_eq!(MetaField::from_name("anpa-format"), Some(MetaField::Format));
        assert_eq!(MetaField::from_name("ANPA-FORMAT"), None);
        assert_eq!(MetaField::from_name("anpa-format "), None);
        for field in MetaField::ALL {
            assert_eq!(MetaField::from_name(field.name()), Some(field));
        }
    }

    #[test]
    fn test_unknown_names_leave_item_unchanged() {
        let baseline = map(vec![]).unwrap();
        let mapped = map(vec![
            MetaEntry::new("anpa-priority", Some("1")),
            MetaEntry::new("x-custom", None),
            MetaEntry {
                name: None,
                content: Some("orphan"),
            },
        ])
        .unwrap();
        assert_eq!(mapped, baseline);
    }

    #[test]
    fn test_string_fields() {
        let item = map(vec![
            MetaEntry::new("anpa-keyword", Some("CRICKET-ASHES")),
            MetaEntry::new("anpa-sequence", Some("0042")),
            MetaEntry::new("anpa-category", Some("s")),
            MetaEntry::new("anpa-takekey", Some("1st Test")),
        ])
        .unwrap();

        assert_eq!(item.slugline.as_deref(), Some("CRICKET-ASHES"));
        assert_eq!(item.ingest_provider_sequence.as_deref(), Some("0042"));
        assert_eq!(
            item.anpa_category,
            Some(Category {
                qcode: Some("s".to_string()),
                name: String::new(),
            })
        );
        assert_eq!(item.anpa_take_key.as_deref(), Some("1st Test"));
    }

    #[test]
    fn test_word_count_parsed() {
        let item = map(vec![MetaEntry::new("anpa-wordcount", Some(" 42 "))]).unwrap();
        assert_eq!(item.word_count, Some(42));
    }

    #[test]
    fn test_word_count_rejects_bad_values() {
        for bad in [Some("forty"), Some("-3"), Some(""), None] {
            let result = map(vec![MetaEntry::new("anpa-wordcount", bad)]);
            assert!(
                matches!(result, Err(IngestError::Format(_))),
                "expected format error for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_format_field() {
        let absent = map(vec![]).unwrap();
        assert_eq!(absent.item_type, ItemType::Text);

        let preformatted = map(vec![MetaEntry::new("anpa-format", Some("t"))]).unwrap();
        assert_eq!(preformatted.item_type, ItemType::Preformatted);

        let text = map(vec![MetaEntry::new("anpa-format", Some("X"))]).unwrap();
        assert_eq!(text.item_type, ItemType::Text);

        let missing_content = map(vec![MetaEntry::new("anpa-format", None)]).unwrap();
        assert_eq!(missing_content.item_type, ItemType::Text);
    }

    #[test]
    fn test_last_write_wins() {
        let item = map(vec![
            MetaEntry::new("anpa-keyword", Some("FIRST")),
            MetaEntry::new("anpa-format", Some("t")),
            MetaEntry::new("anpa-keyword", Some("SECOND")),
            MetaEntry::new("anpa-format", Some("x")),
        ])
        .unwrap();

        assert_eq!(item.slugline.as_deref(), Some("SECOND"));
        assert_eq!(item.item_type, ItemType::Text);
    }

    #[test]
    fn test_entries_from_tree() {
        let doc = Document::parse(
            r#"<nitf><head>
                <meta name="anpa-keyword" content="SLUG"/>
                <meta name="anpa-format"/>
                <title>ignored</title>
            </head></nitf>"#,
        )
        .unwrap();

        let found = entries(doc.root_element());
        assert_eq!(
            found,
            vec![
                MetaEntry::new("anpa-keyword", Some("SLUG")),
                MetaEntry::new("anpa-format", None),
            ]
        );

        let item = map_head(ItemBuilder::new("g").headline("h"), doc.root_element())
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(item.slugline.as_deref(), Some("SLUG"));
    }
}
