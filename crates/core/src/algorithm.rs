//! Ranking algorithm enumeration
//!
//! | Algorithm | Query form | Signal |
//! |-----------|------------|--------|
//! | Tfidf | normalized terms | cosine similarity |
//! | Bm25 | raw whitespace tokens | Okapi BM25 |
//! | Composite | normalized terms | relevance + social + recency |

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The ranking algorithms a search can be dispatched to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// TF-IDF vector space, cosine similarity
    Tfidf,

    /// Okapi BM25 over raw tokens
    Bm25,

    /// Weighted sum of TF-IDF relevance, social popularity and recency
    Composite,
}

impl Algorithm {
    /// All algorithms (for iteration)
    pub const ALL: [Algorithm; 3] = [Algorithm::Tfidf, Algorithm::Bm25, Algorithm::Composite];

    /// Get all algorithms as a slice
    pub fn all() -> &'static [Algorithm] {
        &Self::ALL
    }

    /// Short identifier accepted by `search`
    pub const fn id(&self) -> &'static str {
        match self {
            Algorithm::Tfidf => "tfidf",
            Algorithm::Bm25 => "bm25",
            Algorithm::Composite => "composite",
        }
    }

    /// Parse from short identifier
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "tfidf" => Some(Algorithm::Tfidf),
            "bm25" => Some(Algorithm::Bm25),
            "composite" => Some(Algorithm::Composite),
            _ => None,
        }
    }

    /// Whether the query is passed through the text normalizer
    ///
    /// BM25 scores raw whitespace tokens on both sides.
    pub const fn normalizes_query(&self) -> bool {
        !matches!(self, Algorithm::Bm25)
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Algorithm::from_id(s).ok_or_else(|| Error::UnsupportedAlgorithm(s.to_string()))
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_all() {
        let all = Algorithm::all();
        assert_eq!(all.len(), 3);
        assert!(all.contains(&Algorithm::Tfidf));
        assert!(all.contains(&Algorithm::Bm25));
        assert!(all.contains(&Algorithm::Composite));
    }

    #[test]
    fn test_id_round_trip() {
        for algorithm in Algorithm::all() {
            assert_eq!(Algorithm::from_id(algorithm.id()), Some(*algorithm));
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "unknown".parse::<Algorithm>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedAlgorithm(ref name) if name == "unknown"));
    }

    #[test]
    fn test_from_str_is_case_sensitive() {
        assert!("TFIDF".parse::<Algorithm>().is_err());
        assert!("Bm25".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_normalizes_query() {
        assert!(Algorithm::Tfidf.normalizes_query());
        assert!(Algorithm::Composite.normalizes_query());
        assert!(!Algorithm::Bm25.normalizes_query());
    }

    #[test]
    fn test_serde_uses_ids() {
        let json = serde_json::to_string(&Algorithm::Composite).unwrap();
        assert_eq!(json, "\"composite\"");
        let parsed: Algorithm = serde_json::from_str("\"bm25\"").unwrap();
        assert_eq!(parsed, Algorithm::Bm25);
    }

    #[test]
    fn test_display() {
        assert_eq!(Algorithm::Tfidf.to_string(), "tfidf");
    }
}
