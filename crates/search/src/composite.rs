//! Composite scoring: relevance, social popularity and recency
//!
//! This module provides:
//! - CompositeWeights: the fusion coefficients
//! - CompositeScorer: re-scores the TF-IDF top-N with the weighted sum
//!
//! The three signals live on unrelated scales (cosine in `[0, 1]`, raw
//! engagement counts, inverse seconds). The sum is taken as-is with no
//! normalization step.

use crate::scorer::{ScoreVector, Scorer, ScorerContext};
use crate::tfidf::TfidfScorer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use tweetrank_core::Document;

// ============================================================================
// CompositeWeights
// ============================================================================

/// Fusion coefficients
///
/// `composite = relevance * cosine + social * (likes_weight * likes +
/// retweets_weight * retweets) + recency * 1 / (age_seconds + 1)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeWeights {
    /// Weight of the TF-IDF cosine score
    pub relevance: f64,
    /// Weight of the social score
    pub social: f64,
    /// Weight of the recency score
    pub recency: f64,
    /// Per-like contribution to the social score
    pub likes_weight: f64,
    /// Per-retweet contribution to the social score
    pub retweets_weight: f64,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        CompositeWeights {
            relevance: 0.55,
            social: 0.30,
            recency: 0.15,
            likes_weight: 0.3,
            retweets_weight: 0.7,
        }
    }
}

impl CompositeWeights {
    /// Check every coefficient is finite
    pub fn is_finite(&self) -> bool {
        [
            self.relevance,
            self.social,
            self.recency,
            self.likes_weight,
            self.retweets_weight,
        ]
        .iter()
        .all(|w| w.is_finite())
    }

    /// Social popularity of a document (raw engagement magnitudes)
    pub fn social_score(&self, doc: &Document) -> f64 {
        self.likes_weight * doc.likes as f64 + self.retweets_weight * doc.retweets as f64
    }

    /// Fuse the three signals
    pub fn combine(&self, relevance: f64, social: f64, recency: f64) -> f64 {
        self.relevance * relevance + self.social * social + self.recency * recency
    }
}

/// `1 / (seconds since the document date + 1)`
///
/// Seconds are fractional at millisecond resolution. A date in the future
/// counts as zero seconds old; an unparsable date scores 0.
pub fn recency_score(doc: &Document, now: DateTime<Utc>) -> f64 {
    match doc.timestamp() {
        Some(ts) => {
            let age_secs = ((now - ts).num_milliseconds() as f64 / 1000.0).max(0.0);
            1.0 / (age_secs + 1.0)
        }
        None => {
            debug!(
                target: "tweetrank::composite",
                id = %doc.id,
                date = %doc.date,
                "Unparsable date, recency scored as 0"
            );
            0.0
        }
    }
}

// ============================================================================
// CompositeScorer
// ============================================================================

/// Weighted fusion over the TF-IDF top-N
///
/// Scores only the positions TF-IDF ranks into the first `ctx.top_n`; all
/// other documents are left out of the returned (sparse) vector.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositeScorer {
    weights: CompositeWeights,
    relevance: TfidfScorer,
}

impl CompositeScorer {
    /// Create a new CompositeScorer with custom weights
    pub fn new(weights: CompositeWeights) -> Self {
        CompositeScorer {
            weights,
            relevance: TfidfScorer::new(),
        }
    }

    /// Weights in use
    pub fn weights(&self) -> &CompositeWeights {
        &self.weights
    }
}

impl Scorer for CompositeScorer {
    fn score(&self, query: &str, ctx: &ScorerContext<'_>) -> ScoreVector {
        let candidates = self.relevance.score(query, ctx).ranked(ctx.top_n);

        let entries = candidates
            .into_iter()
            .filter_map(|(pos, relevance)| {
                let doc = ctx.corpus.document(pos)?;
                let social = self.weights.social_score(doc);
                let recency = recency_score(doc, ctx.now);
                Some((pos, self.weights.combine(relevance, social, recency)))
            })
            .collect();

        ScoreVector::sparse(entries)
    }

    fn name(&self) -> &str {
        "composite"
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::CorpusIndex;
    use crate::tokenizer::normalize;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-10-01T12:00:00+00:00")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn doc(id: &str, content: &str, date: &str, likes: u64, retweets: u64) -> Document {
        Document::new(id, content)
            .with_date(date)
            .with_engagement(likes, retweets)
    }

    #[test]
    fn test_default_weights() {
        let w = CompositeWeights::default();
        assert_eq!(w.relevance, 0.55);
        assert_eq!(w.social, 0.30);
        assert_eq!(w.recency, 0.15);
        assert!(w.is_finite());
    }

    #[test]
    fn test_social_score_raw_magnitudes() {
        let w = CompositeWeights::default();
        let d = doc("1", "x", "", 10, 20);
        assert!((w.social_score(&d) - (3.0 + 14.0)).abs() < 1e-12);
    }

    #[test]
    fn test_combine_literal_sum() {
        let w = CompositeWeights::default();
        let combined = w.combine(0.5, 17.0, 0.25);
        assert!((combined - (0.55 * 0.5 + 0.30 * 17.0 + 0.15 * 0.25)).abs() < 1e-12);
    }

    #[test]
    fn test_recency_score() {
        let n = now();
        let fresh = doc("1", "x", &n.to_rfc3339(), 0, 0);
        assert!((recency_score(&fresh, n) - 1.0).abs() < 1e-12);

        let ten_seconds = doc("2", "x", &(n - Duration::seconds(9)).to_rfc3339(), 0, 0);
        assert!((recency_score(&ten_seconds, n) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_recency_future_and_garbage() {
        let n = now();
        let future = doc("1", "x", &(n + Duration::days(1)).to_rfc3339(), 0, 0);
        assert!((recency_score(&future, n) - 1.0).abs() < 1e-12);

        let garbage = doc("2", "x", "last tuesday", 0, 0);
        assert_eq!(recency_score(&garbage, n), 0.0);
    }

    #[test]
    fn test_restricted_to_tfidf_top_n() {
        let index = CorpusIndex::new(vec![
            doc("a", "solar panels", "2024-09-30T00:00:00+00:00", 0, 0),
            doc("b", "wind turbines", "2024-09-30T00:00:00+00:00", 1000, 1000),
            doc("c", "solar farms", "2024-09-30T00:00:00+00:00", 0, 0),
        ])
        .unwrap();
        let ctx = ScorerContext::new(&index, 2).with_now(now());
        let scores = CompositeScorer::default().score(&normalize("solar"), &ctx);

        // "b" has no relevance and is outside the TF-IDF top 2
        assert_eq!(scores.len(), 2);
        assert!(scores.get(0).is_some());
        assert!(scores.get(1).is_none());
        assert!(scores.get(2).is_some());
    }

    #[test]
    fn test_retweets_increase_score() {
        let date = "2024-09-30T00:00:00+00:00";
        let index = CorpusIndex::new(vec![
            doc("a", "solar power", date, 5, 1),
            doc("b", "solar power", date, 5, 2),
        ])
        .unwrap();
        let ctx = ScorerContext::new(&index, 2).with_now(now());
        let scores = CompositeScorer::default().score(&normalize("solar"), &ctx);

        assert!(scores.get(1).unwrap() > scores.get(0).unwrap());
        assert_eq!(scores.ranked(2)[0].0, 1);
    }

    #[test]
    fn test_recent_document_scores_higher() {
        let n = now();
        let index = CorpusIndex::new(vec![
            doc("old", "solar power", &(n - Duration::days(10)).to_rfc3339(), 3, 3),
            doc("new", "solar power", &n.to_rfc3339(), 3, 3),
        ])
        .unwrap();
        let ctx = ScorerContext::new(&index, 2).with_now(n);
        let scores = CompositeScorer::default().score(&normalize("solar"), &ctx);

        assert!(scores.get(1).unwrap() > scores.get(0).unwrap());
    }

    #[test]
    fn test_custom_weights() {
        let weights = CompositeWeights {
            relevance: 1.0,
            social: 0.0,
            recency: 0.0,
            ..CompositeWeights::default()
        };
        let index = CorpusIndex::new(vec![doc("a", "solar", "", 99, 99)]).unwrap();
        let ctx = ScorerContext::new(&index, 1).with_now(now());
        let scores = CompositeScorer::new(weights).score(&normalize("solar"), &ctx);
        assert!((scores.get(0).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_composite_name() {
        assert_eq!(CompositeScorer::default().name(), "composite");
    }
}
