//! Search orchestrator
//!
//! ```text
//! search(query, search_id, algorithm, top_n)
//!      │
//!      ▼
//!   parse algorithm ──► UnsupportedAlgorithm (nothing scored, nothing cached)
//!      │
//!   validate top_n  ──► InvalidArgument
//!      │
//!   normalize query (tfidf, composite)
//!      │
//!   Scorer::score ──► ScoreVector::ranked(top_n)
//!      │
//!   ResultBuilder::build ──► ResultCache::put(search_id)
//!      │
//!      ▼
//!   Vec<ResultItem>
//! ```
//!
//! The engine holds only `Arc`s and immutable scorer parameters. All
//! per-query state lives on the stack of the calling thread.

use crate::cache::ResultCache;
use crate::composite::CompositeScorer;
use crate::config::EngineConfig;
use crate::corpus::CorpusIndex;
use crate::results::{NoEnrichment, RawRecordStore, ResultBuilder};
use crate::scorer::{Bm25Scorer, Scorer, ScorerContext};
use crate::tfidf::TfidfScorer;
use crate::tokenizer::normalize;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;
use tweetrank_core::{Algorithm, Error, Result, ResultItem};

// ============================================================================
// SearchEngine
// ============================================================================

/// Ranks a fixed corpus and remembers results per search id
///
/// Cloning is cheap; clones share the corpus, the enrichment store and the
/// result cache.
#[derive(Clone)]
pub struct SearchEngine {
    corpus: Arc<CorpusIndex>,
    records: Arc<dyn RawRecordStore>,
    cache: Arc<ResultCache>,
    config: EngineConfig,
    tfidf: TfidfScorer,
    bm25: Bm25Scorer,
    composite: CompositeScorer,
}

impl SearchEngine {
    /// Create an engine over a corpus with default configuration
    pub fn new(corpus: Arc<CorpusIndex>) -> Self {
        let config = EngineConfig::default();
        SearchEngine {
            corpus,
            records: Arc::new(NoEnrichment),
            cache: Arc::new(ResultCache::new()),
            bm25: config.bm25_scorer(),
            composite: CompositeScorer::new(config.composite),
            tfidf: TfidfScorer::new(),
            config,
        }
    }

    /// Builder: apply a configuration
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the configuration fails validation.
    pub fn with_config(mut self, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        self.bm25 = config.bm25_scorer();
        self.composite = CompositeScorer::new(config.composite);
        self.config = config;
        Ok(self)
    }

    /// Builder: enrich results from a raw-record store
    pub fn with_records(mut self, records: Arc<dyn RawRecordStore>) -> Self {
        self.records = records;
        self
    }

    /// Corpus being searched
    pub fn corpus(&self) -> &CorpusIndex {
        &self.corpus
    }

    /// Result cache shared by this engine and its clones
    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Algorithm from the configuration
    pub fn default_algorithm(&self) -> Algorithm {
        self.config.algorithm().unwrap_or(Algorithm::Tfidf)
    }

    /// Result depth from the configuration
    pub fn default_top_n(&self) -> usize {
        self.config.default_top_n
    }

    /// Search with an algorithm given by name
    ///
    /// # Errors
    ///
    /// - `UnsupportedAlgorithm` if `algorithm` is not `"tfidf"`, `"bm25"` or
    ///   `"composite"`; raised before any scoring.
    /// - `InvalidArgument` if `top_n` is 0.
    pub fn search(
        &self,
        query: &str,
        search_id: &str,
        algorithm: &str,
        top_n: usize,
    ) -> Result<Vec<ResultItem>> {
        let algorithm: Algorithm = algorithm.parse()?;
        self.search_with(query, search_id, algorithm, top_n)
    }

    /// Search with a typed algorithm
    ///
    /// Returns at most `min(top_n, corpus size)` results, best first, and
    /// stores them under `search_id` (replacing any earlier entry).
    pub fn search_with(
        &self,
        query: &str,
        search_id: &str,
        algorithm: Algorithm,
        top_n: usize,
    ) -> Result<Vec<ResultItem>> {
        if top_n == 0 {
            return Err(Error::InvalidArgument(
                "top_n must be at least 1".to_string(),
            ));
        }
        let start = Instant::now();

        let query_text = if algorithm.normalizes_query() {
            normalize(query)
        } else {
            query.to_string()
        };

        let ctx = ScorerContext::new(&self.corpus, top_n);
        let scorer = self.scorer(algorithm);
        let ranked = scorer.score(&query_text, &ctx).ranked(top_n);

        let results =
            ResultBuilder::new(&self.corpus, self.records.as_ref()).build(&ranked, search_id);
        self.cache.put(search_id, results.clone());

        debug!(
            target: "tweetrank::search",
            search_id,
            algorithm = scorer.name(),
            top_n,
            hits = results.len(),
            elapsed_micros = start.elapsed().as_micros() as u64,
            "Search complete"
        );

        Ok(results)
    }

    /// Results stored under a search id; empty when the id is unknown
    pub fn get_results(&self, search_id: &str) -> Vec<ResultItem> {
        self.cache.get(search_id)
    }

    fn scorer(&self, algorithm: Algorithm) -> &dyn Scorer {
        match algorithm {
            Algorithm::Tfidf => &self.tfidf,
            Algorithm::Bm25 => &self.bm25,
            Algorithm::Composite => &self.composite,
        }
    }
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("documents", &self.corpus.len())
            .field("cached_searches", &self.cache.len())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tweetrank_core::{Document, RawRecord};

    fn engine() -> SearchEngine {
        let corpus = CorpusIndex::new(vec![
            Document::new("A", "cats are great pets"),
            Document::new("B", "dogs are loyal"),
            Document::new("C", "cats and dogs"),
        ])
        .unwrap();
        SearchEngine::new(Arc::new(corpus))
    }

    #[test]
    fn test_search_caches_results() {
        let engine = engine();
        let results = engine.search("cats", "s1", "tfidf", 3).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(engine.get_results("s1"), results);
        assert!(engine.cache().contains("s1"));
    }

    #[test]
    fn test_unsupported_algorithm_caches_nothing() {
        let engine = engine();
        let err = engine.search("cats", "s1", "pagerank", 3).unwrap_err();
        assert!(matches!(err, Error::UnsupportedAlgorithm(ref a) if a == "pagerank"));
        assert!(engine.cache().is_empty());
    }

    #[test]
    fn test_zero_top_n_rejected() {
        let engine = engine();
        let err = engine.search("cats", "s1", "bm25", 0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(engine.get_results("s1").is_empty());
    }

    #[test]
    fn test_top_n_larger_than_corpus() {
        let engine = engine();
        for algorithm in Algorithm::all() {
            let results = engine.search_with("cats", "s", *algorithm, 50).unwrap();
            assert_eq!(results.len(), 3, "{}", algorithm);
        }
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let mut config = EngineConfig::default();
        config.default_top_n = 0;
        assert!(engine().with_config(config).is_err());
    }

    #[test]
    fn test_with_config_rejects_b_above_one() {
        let mut config = EngineConfig::default();
        config.bm25.b = 2.0;
        let err = engine().with_config(config).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_with_config_applies_defaults() {
        let config = EngineConfig {
            default_algorithm: "bm25".to_string(),
            default_top_n: 2,
            ..EngineConfig::default()
        };
        let engine = engine().with_config(config).unwrap();
        assert_eq!(engine.default_algorithm(), Algorithm::Bm25);
        assert_eq!(engine.default_top_n(), 2);
    }

    #[test]
    fn test_with_records_enriches() {
        let mut store = HashMap::new();
        store.insert("C".to_string(), RawRecord::new("Cats & dogs!", "Bob", "7"));
        let engine = engine().with_records(Arc::new(store));

        let results = engine.search("cats", "s", "tfidf", 3).unwrap();
        let c = results.iter().find(|r| r.id == "C").unwrap();
        assert_eq!(c.content, "Cats & dogs!");
        assert_eq!(c.user_name.as_deref(), Some("Bob"));
    }

    #[test]
    fn test_clones_share_cache() {
        let engine = engine();
        let clone = engine.clone();
        clone.search("dogs", "shared", "bm25", 2).unwrap();
        assert_eq!(engine.get_results("shared").len(), 2);
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchEngine>();
    }
}
