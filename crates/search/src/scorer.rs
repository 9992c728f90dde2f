//! Scoring infrastructure
//!
//! This module provides:
//! - ScoreVector: per-query document scores with stable ranking
//! - ScorerContext: corpus reference, wall-clock and depth for one query
//! - Scorer trait for pluggable scoring algorithms
//! - Bm25Scorer: Okapi BM25 over raw tokens

use crate::corpus::CorpusIndex;
use crate::tokenizer::raw_tokens;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;

// ============================================================================
// ScoreVector
// ============================================================================

/// Scores for one query, keyed by corpus position
///
/// Dense vectors score every document; sparse vectors (composite) score only
/// a candidate subset. Entries are kept in ascending position order, which is
/// what makes [`ScoreVector::ranked`] break ties by corpus order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreVector {
    entries: Vec<(usize, f64)>,
}

impl ScoreVector {
    /// One score per document, position = index
    pub fn dense(scores: Vec<f64>) -> Self {
        ScoreVector {
            entries: scores.into_iter().enumerate().collect(),
        }
    }

    /// Scores for a subset of positions
    pub fn sparse(mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|(pos, _)| *pos);
        ScoreVector { entries }
    }

    /// Score at a position, if scored
    pub fn get(&self, pos: usize) -> Option<f64> {
        self.entries
            .binary_search_by_key(&pos, |(p, _)| *p)
            .ok()
            .map(|i| self.entries[i].1)
    }

    /// Number of scored positions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no position is scored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(position, score)` in ascending position order
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Rank by score descending and keep the first `top_n`
    ///
    /// The sort is stable over ascending positions, so equal scores keep
    /// corpus order.
    pub fn ranked(&self, top_n: usize) -> Vec<(usize, f64)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked.truncate(top_n);
        ranked
    }
}

// ============================================================================
// ScorerContext
// ============================================================================

/// Context for one scoring call
///
/// Carries the corpus, the wall-clock instant the query is scored at, and
/// the requested result depth. Built fresh per query.
#[derive(Debug, Clone, Copy)]
pub struct ScorerContext<'a> {
    /// Corpus being scored
    pub corpus: &'a CorpusIndex,

    /// Wall-clock time for recency calculations
    pub now: DateTime<Utc>,

    /// Requested number of results
    pub top_n: usize,
}

impl<'a> ScorerContext<'a> {
    /// Create a new ScorerContext at the current time
    pub fn new(corpus: &'a CorpusIndex, top_n: usize) -> Self {
        ScorerContext {
            corpus,
            now: Utc::now(),
            top_n,
        }
    }

    /// Builder: pin the scoring instant
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }
}

// ============================================================================
// Scorer Trait
// ============================================================================

/// Pluggable scoring interface
///
/// Scorers take a query and return a score per document. Higher scores
/// indicate more relevant documents. Each call builds its own working state;
/// nothing is cached across calls.
///
/// # Thread Safety
///
/// Scorers must be Send + Sync for concurrent search operations.
pub trait Scorer: Send + Sync {
    /// Score the corpus against a query
    ///
    /// The expected query form depends on the scorer: normalized text for
    /// TF-IDF and composite, raw text for BM25.
    fn score(&self, query: &str, ctx: &ScorerContext<'_>) -> ScoreVector;

    /// Name for debugging and logging
    fn name(&self) -> &str;
}

// ============================================================================
// Bm25Scorer
// ============================================================================

/// Okapi BM25 over raw whitespace tokens
///
/// # BM25 Formula
///
/// For each query token t (repeated tokens count each time):
/// score += IDF(t) * (tf * (k1 + 1)) / (tf + k1 * max(0, 1 - b + b * dl/avgdl))
///
/// Where:
/// - tf = raw token frequency in document
/// - dl = document length in raw tokens
/// - avgdl = average document length, from the corpus index
/// - k1 = term saturation parameter (default 1.5)
/// - b = length normalization parameter (default 0.75)
///
/// # IDF
///
/// IDF(t) = ln((N - df + 0.5) / (df + 0.5)), which is negative for terms in
/// more than half the corpus. Those terms get `epsilon * average IDF`
/// instead, where the average runs over the whole vocabulary (default
/// epsilon 0.25). The floor itself is never below zero.
///
/// Tokens are matched exactly: no case folding, no punctuation stripping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Scorer {
    /// k1 parameter: term frequency saturation
    k1: f64,
    /// b parameter: length normalization
    b: f64,
    /// Fraction of the average IDF given to over-common terms
    epsilon: f64,
}

impl Default for Bm25Scorer {
    fn default() -> Self {
        Bm25Scorer {
            k1: 1.5,
            b: 0.75,
            epsilon: 0.25,
        }
    }
}

impl Bm25Scorer {
    /// Create a new Bm25Scorer with custom parameters
    pub fn new(k1: f64, b: f64) -> Self {
        Bm25Scorer {
            k1,
            b,
            ..Self::default()
        }
    }

    /// Replace the negative-IDF fraction
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Saturation parameter
    pub fn k1(&self) -> f64 {
        self.k1
    }

    /// Length normalization parameter
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Negative-IDF fraction
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    fn okapi_idf(n: f64, df: f64) -> f64 {
        ((n - df + 0.5) / (df + 0.5)).ln()
    }

    /// Mean unfloored IDF over every distinct corpus term
    pub fn average_idf(corpus: &CorpusIndex) -> f64 {
        let vocabulary = corpus.vocabulary_size();
        if vocabulary == 0 {
            return 0.0;
        }
        let n = corpus.total_docs() as f64;
        let sum: f64 = corpus
            .doc_freq_spectrum()
            .iter()
            .map(|&(df, terms)| terms as f64 * Self::okapi_idf(n, df as f64))
            .sum();
        sum / vocabulary as f64
    }

    /// IDF given to terms whose Okapi IDF is negative
    fn negative_idf_floor(&self, corpus: &CorpusIndex) -> f64 {
        (self.epsilon * Self::average_idf(corpus)).max(0.0)
    }

    fn idf_with_floor(corpus: &CorpusIndex, term: &str, floor: f64) -> f64 {
        let df = corpus.doc_freq(term);
        if df == 0 {
            return 0.0;
        }
        let idf = Self::okapi_idf(corpus.total_docs() as f64, df as f64);
        if idf < 0.0 {
            floor
        } else {
            idf
        }
    }

    /// IDF of a raw term; zero for terms the corpus does not contain
    pub fn idf(&self, corpus: &CorpusIndex, term: &str) -> f64 {
        Self::idf_with_floor(corpus, term, self.negative_idf_floor(corpus))
    }
}

impl Scorer for Bm25Scorer {
    fn score(&self, query: &str, ctx: &ScorerContext<'_>) -> ScoreVector {
        let corpus = ctx.corpus;
        let query_tokens = raw_tokens(query);
        if query_tokens.is_empty() {
            return ScoreVector::dense(vec![0.0; corpus.len()]);
        }

        let floor = self.negative_idf_floor(corpus);
        let idfs: HashMap<&str, f64> = query_tokens
            .iter()
            .map(|t| (t.as_str(), Self::idf_with_floor(corpus, t, floor)))
            .collect();
        let avg_len = corpus.avg_doc_len();
        let k1 = self.k1.max(0.0);

        let scores = (0..corpus.len())
            .map(|pos| {
                let doc_tokens = corpus.raw_tokens(pos).unwrap_or(&[]);
                let doc_len = doc_tokens.len() as f64;

                let mut term_counts: HashMap<&str, usize> = HashMap::new();
                for token in doc_tokens {
                    *term_counts.entry(token.as_str()).or_insert(0) += 1;
                }

                // Never negative, even for b > 1 on short documents
                let length_norm = (1.0 - self.b + self.b * doc_len / avg_len).max(0.0);

                let mut score = 0.0;
                for token in &query_tokens {
                    let tf = term_counts.get(token.as_str()).copied().unwrap_or(0) as f64;
                    if tf == 0.0 {
                        continue;
                    }
                    let tf_component = (tf * (k1 + 1.0)) / (tf + k1 * length_norm);
                    score += idfs[token.as_str()] * tf_component;
                }
                score
            })
            .collect();

        ScoreVector::dense(scores)
    }

    fn name(&self) -> &str {
        "bm25"
    }
}

// ============================================================================
// Tests
// ============================================================================
