//! Result construction
//!
//! Turns ranked `(position, score)` pairs into [`ResultItem`]s, optionally
//! enriched from a [`RawRecordStore`].

use crate::corpus::CorpusIndex;
use std::collections::HashMap;
use tweetrank_core::{parse_timestamp, RawRecord, ResultItem};

/// Display pattern for result dates, e.g. `30 September 2024, 18:39`
pub const DATE_FORMAT: &str = "%d %B %Y, %H:%M";

/// Label for language codes missing from [`LANGUAGES`]
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Two-letter language code -> display name
pub const LANGUAGES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("bn", "Bengali"),
    ("ca", "Catalan"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("eu", "Basque"),
    ("fa", "Persian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("gu", "Gujarati"),
    ("hi", "Hindi"),
    ("ht", "Haitian Creole"),
    ("hu", "Hungarian"),
    ("in", "Indonesian"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("kn", "Kannada"),
    ("ko", "Korean"),
    ("ml", "Malayalam"),
    ("mr", "Marathi"),
    ("ne", "Nepali"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("or", "Odia"),
    ("pa", "Punjabi"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sv", "Swedish"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("th", "Thai"),
    ("tl", "Tagalog"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("vi", "Vietnamese"),
    ("zh", "Chinese"),
];

/// Display name for a language code, or `"Unknown"`
pub fn language_name(code: &str) -> &'static str {
    LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or(UNKNOWN_LANGUAGE)
}

/// Reformat an ISO-8601 date for display; the raw string passes through
/// when it does not parse.
pub fn format_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(ts) => ts.format(DATE_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

// ============================================================================
// RawRecordStore
// ============================================================================

/// Lookup of enrichment records by document id
///
/// A missing record is not an error; the result simply carries no author
/// fields.
pub trait RawRecordStore: Send + Sync {
    /// Record for a document id, if any
    fn lookup(&self, id: &str) -> Option<RawRecord>;
}

/// Store that never has a record
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnrichment;

impl RawRecordStore for NoEnrichment {
    fn lookup(&self, _id: &str) -> Option<RawRecord> {
        None
    }
}

impl RawRecordStore for HashMap<String, RawRecord> {
    fn lookup(&self, id: &str) -> Option<RawRecord> {
        self.get(id).cloned()
    }
}

// ============================================================================
// ResultBuilder
// ============================================================================

/// Builds result items for one search call
pub struct ResultBuilder<'a> {
    corpus: &'a CorpusIndex,
    records: &'a dyn RawRecordStore,
}

impl<'a> ResultBuilder<'a> {
    /// Create a builder over a corpus and an enrichment store
    pub fn new(corpus: &'a CorpusIndex, records: &'a dyn RawRecordStore) -> Self {
        ResultBuilder { corpus, records }
    }

    /// One item per ranked pair, in the given order
    ///
    /// Positions outside the corpus are skipped.
    pub fn build(&self, ranked: &[(usize, f64)], search_id: &str) -> Vec<ResultItem> {
        ranked
            .iter()
            .filter_map(|&(pos, score)| {
                let doc = self.corpus.document(pos)?;
                let record = self.records.lookup(&doc.id);

                let (content, user_name, user_id) = match record {
                    Some(r) => (r.content, Some(r.user_name), Some(r.user_id)),
                    None => (doc.content.clone(), None, None),
                };

                Some(ResultItem {
                    id: doc.id.clone(),
                    content,
                    hashtags: doc.hashtags.clone(),
                    url: format!("doc_details?id={}&search_id={}", doc.id, search_id),
                    tweet_url: doc.url.clone(),
                    ranking: score,
                    date: format_date(&doc.date),
                    likes: doc.likes,
                    retweets: doc.retweets,
                    language: language_name(&doc.language).to_string(),
                    user_name,
                    user_id,
                })
            })
            .collect()
    }
}
