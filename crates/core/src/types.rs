//! Core record types
//!
//! This module defines the records that flow through a search:
//! - Document: one corpus entry, immutable after load
//! - RawRecord: optional enrichment record from an external store
//! - ResultItem: presentation record produced per ranked document

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A corpus document (one tweet)
///
/// Owned by the corpus index and never mutated after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Stable external identifier, unique within a corpus
    pub id: String,

    /// Raw text
    pub content: String,

    /// ISO-8601 timestamp string, kept verbatim
    pub date: String,

    /// Hashtags without the leading `#`
    pub hashtags: Vec<String>,

    /// Like count
    pub likes: u64,

    /// Retweet count
    pub retweets: u64,

    /// Canonical source link
    pub url: String,

    /// Two-letter language code
    pub language: String,
}

impl Document {
    /// Create a document with the given id and content
    ///
    /// Remaining fields start empty/zero; use the builders to fill them.
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Document {
            id: id.into(),
            content: content.into(),
            date: String::new(),
            hashtags: vec![],
            likes: 0,
            retweets: 0,
            url: String::new(),
            language: String::new(),
        }
    }

    /// Builder: set date
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Builder: set hashtags
    pub fn with_hashtags(mut self, hashtags: Vec<String>) -> Self {
        self.hashtags = hashtags;
        self
    }

    /// Builder: set like and retweet counts
    pub fn with_engagement(mut self, likes: u64, retweets: u64) -> Self {
        self.likes = likes;
        self.retweets = retweets;
        self
    }

    /// Builder: set source url
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Builder: set language code
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Parsed `date`, if it is a recognizable timestamp
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.date)
    }
}

/// Parse an ISO-8601 timestamp into UTC
///
/// Accepts RFC 3339 (`2024-09-30T18:39:08+00:00`, `...Z`), the space-separated
/// form with an offset, naive date-times (taken as UTC) and bare dates
/// (midnight UTC). Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Enrichment record from the raw-record store
///
/// When present for a document id, its fields override the corpus
/// document's content and supply the author fields of the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Original (unprocessed) text
    pub content: String,

    /// Author display name
    pub user_name: String,

    /// Author identifier
    pub user_id: String,
}

impl RawRecord {
    /// Create a new RawRecord
    pub fn new(
        content: impl Into<String>,
        user_name: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        RawRecord {
            content: content.into(),
            user_name: user_name.into(),
            user_id: user_id.into(),
        }
    }
}

/// One ranked search result, ready for presentation
///
/// Created once per search call and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    /// Document id
    pub id: String,

    /// Document text (enrichment record's text when one was found)
    pub content: String,

    /// Document hashtags
    pub hashtags: Vec<String>,

    /// Internal detail link, parameterized by id and search id
    pub url: String,

    /// Original external link
    pub tweet_url: String,

    /// Final score under the algorithm that produced this result
    pub ranking: f64,

    /// Human-formatted date, or the raw string when unparsable
    pub date: String,

    /// Like count
    pub likes: u64,

    /// Retweet count
    pub retweets: u64,

    /// Human-readable language name, or "Unknown"
    pub language: String,

    /// Author display name (enrichment only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    /// Author identifier (enrichment only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}
