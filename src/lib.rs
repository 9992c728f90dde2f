//! tweetrank - ranked search over a tweet corpus
//!
//! Loads a fixed corpus into memory and ranks it against free-text queries
//! with TF-IDF, BM25 or a composite of relevance, engagement and recency.
//! Results are kept per search id for later retrieval.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use tweetrank::{load_corpus, CorpusIndex, SearchEngine};
//!
//! let corpus = CorpusIndex::new(load_corpus("tweets.csv".as_ref())?)?;
//! let engine = SearchEngine::new(Arc::new(corpus));
//!
//! let results = engine.search("farmers protest", "q1", "bm25", 20)?;
//! let again = engine.get_results("q1");
//! ```

pub use tweetrank_core::*;
pub use tweetrank_search::*;
