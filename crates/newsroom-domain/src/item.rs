//! Canonical item module - the normalized form of every ingested news item

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default urgency rank when the wire item carries none
pub const DEFAULT_URGENCY: &str = "5";

/// Default publication status when the wire item carries none
pub const DEFAULT_PUBSTATUS: &str = "usable";

/// Item class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// Regular text story
    #[default]
    Text,

    /// Fixed-width (tabular, agate) copy
    Preformatted,
}

impl ItemType {
    /// Get the item type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Text => "text",
            ItemType::Preformatted => "preformatted",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subject classification entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Human-readable subject name
    pub name: String,

    /// Subject reference code, only set on the last entry of a subject group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qcode: Option<String>,
}

impl Subject {
    /// Create a subject without a qcode
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qcode: None,
        }
    }
}

/// Event location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    /// City name
    pub name: Option<String>,

    /// ISO country code
    pub code: Option<String>,
}

/// ANPA category reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category code
    pub qcode: Option<String>,

    /// Category name (not carried by the wire, always empty at ingest)
    pub name: String,
}

/// A news item in its canonical, format-independent form
///
/// Built once per inbound wire document by an item parser, then persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalItem {
    /// Globally unique identifier taken from the wire document
    pub guid: String,

    /// Same value as `guid`
    pub uri: String,

    /// Item class
    #[serde(rename = "type")]
    pub item_type: ItemType,

    /// Urgency rank
    pub urgency: String,

    /// Publication status (usable, withheld, canceled)
    pub pubstatus: String,

    /// When the item was first created
    pub firstcreated: Option<DateTime<Utc>>,

    /// When this version was created
    pub versioncreated: Option<DateTime<Utc>>,

    /// When the item expires; `None` means never
    pub expiry: Option<DateTime<Utc>>,

    /// Subject classification, in document order
    pub subject: Vec<Subject>,

    /// Body markup, preserved as received
    pub body_html: String,

    /// Event locations
    pub place: Vec<Place>,

    /// Keywords, in document order
    pub keywords: Vec<String>,

    /// Editorial note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ednote: Option<String>,

    /// Headline
    pub headline: String,

    /// Abstract
    #[serde(rename = "abstract")]
    pub abstract_text: String,

    /// Dateline city
    pub dateline: String,

    /// Byline
    pub byline: String,

    /// Slugline (anpa-keyword)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slugline: Option<String>,

    /// Provider sequence number (anpa-sequence)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingest_provider_sequence: Option<String>,

    /// ANPA category
    #[serde(
        rename = "anpa-category",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub anpa_category: Option<Category>,

    /// Word count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u32>,

    /// ANPA take key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anpa_take_key: Option<String>,
}

impl CanonicalItem {
    /// Start building an item with the given identifier
    pub fn builder(guid: impl Into<String>) -> ItemBuilder {
        ItemBuilder::new(guid)
    }
}

/// A required field was never set on an [`ItemBuilder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    /// No headline
    Headline,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingField::Headline => f.write_str("missing required field: headline"),
        }
    }
}

impl std::error::Error for MissingField {}

/// Builder for [`CanonicalItem`]
///
/// Starts from the all-defaults item: type text, urgency "5", pubstatus
/// "usable", empty sequences and strings, no optional fields. Setters
/// overwrite; the last call wins.
///
/// # Examples
///
/// ```
/// use newsroom_domain::{CanonicalItem, ItemType};
///
/// let item = CanonicalItem::builder("urn:newsml:1")
///     .headline("Storm hits coast")
///     .build()
///     .unwrap();
///
/// assert_eq!(item.uri, "urn:newsml:1");
/// assert_eq!(item.item_type, ItemType::Text);
/// assert_eq!(item.urgency, "5");
/// assert_eq!(item.pubstatus, "usable");
/// ```
#[derive(Debug, Clone)]
pub struct ItemBuilder {
    item: CanonicalItem,
    headline: Option<String>,
}

impl ItemBuilder {
    /// Create a builder holding the default item
    pub fn new(guid: impl Into<String>) -> Self {
        let guid = guid.into();
        Self {
            item: CanonicalItem {
                uri: guid.clone(),
                guid,
                item_type: ItemType::Text,
                urgency: DEFAULT_URGENCY.to_string(),
                pubstatus: DEFAULT_PUBSTATUS.to_string(),
                firstcreated: None,
                versioncreated: None,
                expiry: None,
                subject: Vec::new(),
                body_html: String::new(),
                place: Vec::new(),
                keywords: Vec::new(),
                ednote: None,
                headline: String::new(),
                abstract_text: String::new(),
                dateline: String::new(),
                byline: String::new(),
                slugline: None,
                ingest_provider_sequence: None,
                anpa_category: None,
                word_count: None,
                anpa_take_key: None,
            },
            headline: None,
        }
    }

    /// Set the item type
    pub fn item_type(mut self, item_type: ItemType) -> Self {
        self.item.item_type = item_type;
        self
    }

    /// Set the urgency rank
    pub fn urgency(mut self, urgency: impl Into<String>) -> Self {
        self.item.urgency = urgency.into();
        self
    }

    /// Set the publication status
    pub fn pubstatus(mut self, pubstatus: impl Into<String>) -> Self {
        self.item.pubstatus = pubstatus.into();
        self
    }

    /// Set both creation timestamps from the issue date
    pub fn issued(mut self, issued: Option<DateTime<Utc>>) -> Self {
        self.item.firstcreated = issued;
        self.item.versioncreated = issued;
        self
    }

    /// Set the expiry
    pub fn expiry(mut self, expiry: Option<DateTime<Utc>>) -> Self {
        self.item.expiry = expiry;
        self
    }

    /// Set the subject list
    pub fn subjects(mut self, subjects: Vec<Subject>) -> Self {
        self.item.subject = subjects;
        self
    }

    /// Set the body markup
    pub fn body_html(mut self, body_html: impl Into<String>) -> Self {
        self.item.body_html = body_html.into();
        self
    }

    /// Set the places
    pub fn places(mut self, places: Vec<Place>) -> Self {
        self.item.place = places;
        self
    }

    /// Set the keywords
    pub fn keywords(mut self, keywords: Vec<String>) -> Self {
        self.item.keywords = keywords;
        self
    }

    /// Set the editorial note
    pub fn ednote(mut self, ednote: Option<String>) -> Self {
        self.item.ednote = ednote;
        self
    }

    /// Set the headline
    pub fn headline(mut self, headline: impl Into<String>) -> Self {
        self.headline = Some(headline.into());
        self
    }

    /// Set the abstract
    pub fn abstract_text(mut self, abstract_text: impl Into<String>) -> Self {
        self.item.abstract_text = abstract_text.into();
        self
    }

    /// Set the dateline
    pub fn dateline(mut self, dateline: impl Into<String>) -> Self {
        self.item.dateline = dateline.into();
        self
    }

    /// Set the byline
    pub fn byline(mut self, byline: impl Into<String>) -> Self {
        self.item.byline = byline.into();
        self
    }

    /// Set the slugline
    pub fn slugline(mut self, slugline: Option<String>) -> Self {
        self.item.slugline = slugline;
        self
    }

    /// Set the provider sequence
    pub fn ingest_provider_sequence(mut self, sequence: Option<String>) -> Self {
        self.item.ingest_provider_sequence = sequence;
        self
    }

    /// Set the ANPA category
    pub fn anpa_category(mut self, category: Category) -> Self {
        self.item.anpa_category = Some(category);
        self
    }

    /// Set the word count
    pub fn word_count(mut self, word_count: u32) -> Self {
        self.item.word_count = Some(word_count);
        self
    }

    /// Set the ANPA take key
    pub fn anpa_take_key(mut self, take_key: Option<String>) -> Self {
        self.item.anpa_take_key = take_key;
        self
    }

    /// Current word count, if one was set
    pub fn current_word_count(&self) -> Option<u32> {
        self.item.word_count
    }

    /// Current body markup
    pub fn current_body_html(&self) -> &str {
        &self.item.body_html
    }

    /// Finish the item
    pub fn build(self) -> Result<CanonicalItem, MissingField> {
        let headline = self.headline.ok_or(MissingField::Headline)?;
        Ok(CanonicalItem {
            headline,
            ..self.item
        })
    }
}
