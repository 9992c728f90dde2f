//! CSV corpus loader
//!
//! Reads a headered CSV into [`Document`]s in file order. Columns are
//! located by header name, so extra columns and any column order are fine.

use std::io::Read;
use std::path::Path;
use tracing::{info, warn};
use tweetrank_core::{Document, Error, Result};

/// Columns every corpus file must carry
pub const REQUIRED_COLUMNS: &[&str] = &[
    "id", "content", "date", "hashtags", "likes", "retweets", "url", "language",
];

/// Header position of each required column
struct Columns {
    id: usize,
    content: usize,
    date: usize,
    hashtags: usize,
    likes: usize,
    retweets: usize,
    url: usize,
    language: usize,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| find(**name).is_none())
            .map(|name| (*name).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingColumns(missing));
        }

        let at = |name: &str| find(name).unwrap_or_default();
        Ok(Columns {
            id: at("id"),
            content: at("content"),
            date: at("date"),
            hashtags: at("hashtags"),
            likes: at("likes"),
            retweets: at("retweets"),
            url: at("url"),
            language: at("language"),
        })
    }

    fn document(&self, record: &csv::StringRecord) -> std::result::Result<Document, String> {
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let id = field(self.id).trim();
        if id.is_empty() {
            return Err("empty id".to_string());
        }
        let likes = parse_count(field(self.likes))
            .ok_or_else(|| format!("bad likes value '{}'", field(self.likes)))?;
        let retweets = parse_count(field(self.retweets))
            .ok_or_else(|| format!("bad retweets value '{}'", field(self.retweets)))?;

        Ok(Document::new(id, field(self.content))
            .with_date(field(self.date).trim())
            .with_hashtags(parse_hashtags(field(self.hashtags)))
            .with_engagement(likes, retweets)
            .with_url(field(self.url).trim())
            .with_language(field(self.language).trim()))
    }
}

/// Load a corpus from a CSV file
///
/// # Errors
///
/// `Io` if the file cannot be opened, `MissingColumns` if the header lacks
/// a required column, `Csv` if the header cannot be read.
pub fn load_corpus(path: &Path) -> Result<Vec<Document>> {
    let file = std::fs::File::open(path)?;
    info!(target: "tweetrank::loader", path = %path.display(), "Loading corpus");
    load_corpus_from_reader(file)
}

/// Load a corpus from any CSV source
///
/// Rows that fail to parse are skipped with a warning.
pub fn load_corpus_from_reader<R: Read>(reader: R) -> Result<Vec<Document>> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader
        .headers()
        .map_err(|e| Error::Csv(e.to_string()))?
        .clone();
    let columns = Columns::locate(&headers)?;

    let mut documents = Vec::new();
    let mut skipped = 0usize;
    for (row, result) in reader.records().enumerate() {
        let parsed = result
            .map_err(|e| e.to_string())
            .and_then(|record| columns.document(&record));
        match parsed {
            Ok(doc) => documents.push(doc),
            Err(reason) => {
                skipped += 1;
                warn!(target: "tweetrank::loader", row = row + 1, %reason, "Skipping corpus row");
            }
        }
    }

    info!(
        target: "tweetrank::loader",
        loaded = documents.len(),
        skipped,
        "Corpus loaded"
    );
    Ok(documents)
}

/// Parse a non-negative count, accepting a float form such as `12.0`
///
/// Empty fields count as 0.
pub fn parse_count(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0);
    }
    if let Ok(n) = raw.parse::<u64>() {
        return Some(n);
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 => Some(f as u64),
        _ => None,
    }
}

/// Parse a hashtag field
///
/// Accepts a bracketed list literal (`['a', 'b']`), a comma or space
/// separated list, or an empty field. Quotes and a leading `#` are removed.
pub fn parse_hashtags(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);

    inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(|tag| tag.trim_matches(|c: char| c == '\'' || c == '"'))
        .map(|tag| tag.trim_start_matches('#'))
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}
