//! Per-search result cache
//!
//! Maps a caller-supplied search id to the ordered results of that search so
//! they can be fetched again without re-scoring. Last writer wins. Entries
//! never expire.

use dashmap::DashMap;
use std::sync::Arc;
use tweetrank_core::ResultItem;

/// Concurrent search id -> results map
///
/// Uses DashMap for concurrent access. Writers under distinct ids do not
/// block each other.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: DashMap<String, Arc<Vec<ResultItem>>>,
}

impl ResultCache {
    /// Create an empty cache
    pub fn new() -> Self {
        ResultCache {
            entries: DashMap::new(),
        }
    }

    /// Store results under a search id, replacing any previous entry
    pub fn put(&self, search_id: impl Into<String>, results: Vec<ResultItem>) {
        self.entries.insert(search_id.into(), Arc::new(results));
    }

    /// Results stored under a search id; empty when the id is unknown
    pub fn get(&self, search_id: &str) -> Vec<ResultItem> {
        self.entries
            .get(search_id)
            .map(|entry| entry.value().as_ref().clone())
            .unwrap_or_default()
    }

    /// Check if a search id has an entry
    pub fn contains(&self, search_id: &str) -> bool {
        self.entries.contains_key(search_id)
    }

    /// Number of cached searches
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is cached
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
