//! TF-IDF vector space scoring
//!
//! The vocabulary is fit over the corpus on every call. Nothing is cached
//! between queries, so concurrent searches never share vectorizer state.
//!
//! Weighting:
//! - tf = raw term count
//! - idf(t) = ln((1 + n) / (1 + df(t))) + 1
//! - document and query vectors are L2-normalized, so the dot product is the
//!   cosine similarity

use crate::corpus::CorpusIndex;
use crate::scorer::{ScoreVector, Scorer, ScorerContext};
use crate::tokenizer::{analyze, term_pattern_tokens};
use std::collections::{BTreeMap, HashMap};

/// Sparse vector: vocabulary index -> weight
///
/// Ordered by index so sums run in the same order for every document.
type SparseVector = BTreeMap<usize, f64>;

/// Vocabulary and IDF weights fit over one corpus
#[derive(Debug, Clone)]
struct Vectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl Vectorizer {
    /// Fit over the corpus and return the normalized document vectors
    fn fit_transform(corpus: &CorpusIndex) -> (Self, Vec<SparseVector>) {
        let analyzed: Vec<Vec<String>> = corpus.documents().iter().map(|d| analyze(&d.content)).collect();

        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_freqs: Vec<usize> = Vec::new();
        let mut counts: Vec<HashMap<usize, usize>> = Vec::with_capacity(analyzed.len());

        for terms in &analyzed {
            let mut tf: HashMap<usize, usize> = HashMap::new();
            for term in terms {
                let next = vocabulary.len();
                let idx = *vocabulary.entry(term.clone()).or_insert(next);
                if idx == doc_freqs.len() {
                    doc_freqs.push(0);
                }
                *tf.entry(idx).or_insert(0) += 1;
            }
            for idx in tf.keys() {
                doc_freqs[*idx] += 1;
            }
            counts.push(tf);
        }

        let n = corpus.len() as f64;
        let idf: Vec<f64> = doc_freqs
            .iter()
            .map(|df| ((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();

        let vectorizer = Vectorizer { vocabulary, idf };
        let vectors = counts.iter().map(|tf| vectorizer.weigh(tf)).collect();
        (vectorizer, vectors)
    }

    /// Project already-normalized query text into the fitted space
    ///
    /// Terms outside the vocabulary are dropped.
    fn transform_query(&self, normalized_query: &str) -> SparseVector {
        let mut tf: HashMap<usize, usize> = HashMap::new();
        for term in term_pattern_tokens(normalized_query) {
            if let Some(idx) = self.vocabulary.get(&term) {
                *tf.entry(*idx).or_insert(0) += 1;
            }
        }
        self.weigh(&tf)
    }

    /// tf * idf, then L2-normalize
    fn weigh(&self, tf: &HashMap<usize, usize>) -> SparseVector {
        let mut vector: SparseVector = tf
            .iter()
            .map(|(idx, count)| (*idx, *count as f64 * self.idf[*idx]))
            .collect();

        let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for weight in vector.values_mut() {
                *weight /= norm;
            }
        }
        vector
    }
}

/// Dot product of two unit vectors, clamped into `[0, 1]`
fn cosine(query: &SparseVector, doc: &SparseVector) -> f64 {
    if query.is_empty() || doc.is_empty() {
        return 0.0;
    }
    let dot: f64 = query
        .iter()
        .filter_map(|(idx, w)| doc.get(idx).map(|d| w * d))
        .sum();
    dot.clamp(0.0, 1.0)
}

/// Cosine similarity in a TF-IDF space fit over the corpus
///
/// Expects the query already normalized (see
/// [`normalize`](crate::tokenizer::normalize)); document content is
/// analyzed with the same pipeline during the fit. An empty or
/// all-stopword query scores every document 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfidfScorer;

impl TfidfScorer {
    /// Create a new TfidfScorer
    pub fn new() -> Self {
        TfidfScorer
    }
}

impl Scorer for TfidfScorer {
    fn score(&self, query: &str, ctx: &ScorerContext<'_>) -> ScoreVector {
        let (vectorizer, documents) = Vectorizer::fit_transform(ctx.corpus);
        let query_vector = vectorizer.transform_query(query);

        let scores = documents
            .iter()
            .map(|doc| cosine(&query_vector, doc))
            .collect();
        ScoreVector::dense(scores)
    }

    fn name(&self) -> &str {
        "tfidf"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::normalize;
    use tweetrank_core::Document;

    fn corpus(contents: &[&str]) -> CorpusIndex {
        CorpusIndex::new(
            contents
                .iter()
                .enumerate()
                .map(|(i, c)| Document::new(format!("doc{}", i), *c)),
        )
        .unwrap()
    }

    fn score(index: &CorpusIndex, query: &str) -> ScoreVector {
        let ctx = ScorerContext::new(index, index.len());
        TfidfScorer::new().score(&normalize(query), &ctx)
    }

    #[test]
    fn test_stemmed_match() {
        let index = corpus(&["cats are great pets", "dogs are loyal", "cats and dogs"]);
        let scores = score(&index, "cats");

        assert!(scores.get(0).unwrap() > 0.0);
        assert_eq!(scores.get(1), Some(0.0));
        assert!(scores.get(2).unwrap() > 0.0);
    }

    #[test]
    fn test_identical_document_scores_one() {
        let index = corpus(&["solar power", "wind farms"]);
        let scores = score(&index, "solar power");
        assert!((scores.get(0).unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(scores.get(1), Some(0.0));
    }

    #[test]
    fn test_scores_bounded() {
        let index = corpus(&["alpha beta gamma", "beta beta", "gamma delta alpha", "epsilon"]);
        for query in ["alpha", "beta gamma", "delta epsilon alpha", "zeta"] {
            for (_, s) in score(&index, query).iter() {
                assert!((0.0..=1.0).contains(&s), "score {} out of range", s);
            }
        }
    }

    #[test]
    fn test_empty_query_all_zero() {
        let index = corpus(&["alpha", "beta"]);
        let scores = score(&index, "");
        assert_eq!(scores.len(), 2);
        assert!(scores.iter().all(|(_, s)| s == 0.0));
    }

    #[test]
    fn test_stopword_query_all_zero() {
        let index = corpus(&["the cat", "a dog"]);
        let scores = score(&index, "the and of");
        assert!(scores.iter().all(|(_, s)| s == 0.0));
    }

    #[test]
    fn test_unseen_terms_ignored() {
        let index = corpus(&["alpha beta", "gamma"]);
        let with_unseen = score(&index, "alpha zebra");
        let without = score(&index, "alpha");
        assert_eq!(with_unseen, without);
    }

    #[test]
    fn test_rare_term_outweighs_common() {
        // "common" everywhere, "rare" only in doc 1
        let index = corpus(&["common words", "common rare", "common text"]);
        let scores = score(&index, "common rare");
        let ranked = scores.ranked(3);
        assert_eq!(ranked[0].0, 1);
    }

    #[test]
    fn test_fit_vocabulary() {
        let index = corpus(&["cats cats dogs", "dogs"]);
        let (vectorizer, docs) = Vectorizer::fit_transform(&index);
        assert_eq!(vectorizer.vocabulary.len(), 2);

        // "dog" appears in both documents: idf = ln(3/3) + 1 = 1
        let dog = vectorizer.vocabulary["dog"];
        assert!((vectorizer.idf[dog] - 1.0).abs() < 1e-12);

        // Document vectors are unit length
        for doc in &docs {
            let norm: f64 = doc.values().map(|w| w * w).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_tfidf_name() {
        assert_eq!(TfidfScorer::new().name(), "tfidf");
    }
}
