//! Ranking engine for tweetrank
//!
//! This crate provides:
//! - Text normalization (contractions, stopwords, Snowball stemming)
//! - CorpusIndex: the load-once document collection
//! - Scorer trait with TF-IDF, BM25 and composite implementations
//! - ResultBuilder with pluggable enrichment (RawRecordStore)
//! - ResultCache for retrieval by search id
//! - SearchEngine orchestrating all of the above
//! - EngineConfig (`tweetrank.toml`) and a CSV corpus loader
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use tweetrank_core::Document;
//! use tweetrank_search::{CorpusIndex, SearchEngine};
//!
//! let corpus = CorpusIndex::new(vec![
//!     Document::new("1", "cats are great pets"),
//!     Document::new("2", "dogs are loyal"),
//! ])?;
//! let engine = SearchEngine::new(Arc::new(corpus));
//!
//! let results = engine.search("cats", "q1", "tfidf", 10)?;
//! assert_eq!(results[0].id, "1");
//! assert_eq!(engine.get_results("q1"), results);
//! # Ok::<(), tweetrank_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod composite;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod loader;
pub mod results;
pub mod scorer;
pub mod tfidf;
pub mod tokenizer;

// Re-export commonly used types
pub use cache::ResultCache;
pub use composite::{recency_score, CompositeScorer, CompositeWeights};
pub use config::{Bm25Config, EngineConfig, CONFIG_FILE_NAME};
pub use corpus::CorpusIndex;
pub use engine::SearchEngine;
pub use loader::{load_corpus, load_corpus_from_reader};
pub use results::{language_name, NoEnrichment, RawRecordStore, ResultBuilder};
pub use scorer::{Bm25Scorer, ScoreVector, Scorer, ScorerContext};
pub use tfidf::TfidfScorer;
pub use tokenizer::{normalize, normalize_terms};
