//! Engine configuration via `tweetrank.toml`
//!
//! Every field has a default, so an empty or partial file is valid. Values
//! are checked by [`EngineConfig::validate`] when read from disk.

use crate::composite::CompositeWeights;
use crate::scorer::Bm25Scorer;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tweetrank_core::{Algorithm, Error, Result};

/// Config file name looked up next to the corpus.
pub const CONFIG_FILE_NAME: &str = "tweetrank.toml";

/// BM25 tunables, persisted under `[bm25]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bm25Config {
    /// Term frequency saturation
    pub k1: f64,
    /// Length normalization, in `[0, 1]`
    pub b: f64,
    /// Fraction of the average IDF given to terms in over half the corpus
    pub epsilon: f64,
}

impl Default for Bm25Config {
    fn default() -> Self {
        let scorer = Bm25Scorer::default();
        Bm25Config {
            k1: scorer.k1(),
            b: scorer.b(),
            epsilon: scorer.epsilon(),
        }
    }
}

/// Engine configuration loaded from `tweetrank.toml`.
///
/// # Example
///
/// ```toml
/// default_algorithm = "bm25"
/// default_top_n = 10
///
/// [bm25]
/// k1 = 1.2
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Algorithm used when the caller does not name one: `"tfidf"`,
    /// `"bm25"` or `"composite"`.
    #[serde(default = "default_algorithm_str")]
    pub default_algorithm: String,
    /// Result depth used when the caller does not give one.
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
    /// BM25 parameters.
    #[serde(default)]
    pub bm25: Bm25Config,
    /// Composite fusion weights.
    #[serde(default)]
    pub composite: CompositeWeights,
}

fn default_algorithm_str() -> String {
    Algorithm::Tfidf.id().to_string()
}

fn default_top_n() -> usize {
    20
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_algorithm: default_algorithm_str(),
            default_top_n: default_top_n(),
            bm25: Bm25Config::default(),
            composite: CompositeWeights::default(),
        }
    }
}

impl EngineConfig {
    /// Parse the default algorithm string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the name is not a known algorithm.
    pub fn algorithm(&self) -> Result<Algorithm> {
        Algorithm::from_id(&self.default_algorithm).ok_or_else(|| {
            Error::InvalidConfig(format!(
                "Invalid default_algorithm '{}' in {}. Expected \"tfidf\", \"bm25\" or \"composite\".",
                self.default_algorithm, CONFIG_FILE_NAME
            ))
        })
    }

    /// BM25 scorer built from the `[bm25]` section.
    pub fn bm25_scorer(&self) -> Bm25Scorer {
        Bm25Scorer::new(self.bm25.k1, self.bm25.b).with_epsilon(self.bm25.epsilon)
    }

    /// Check every value is usable.
    pub fn validate(&self) -> Result<()> {
        self.algorithm()?;
        if self.default_top_n == 0 {
            return Err(Error::InvalidConfig(
                "default_top_n must be at least 1".to_string(),
            ));
        }
        let Bm25Config { k1, b, epsilon } = self.bm25;
        if !k1.is_finite() || k1 < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "bm25.k1 must be finite and non-negative, got {}",
                k1
            )));
        }
        if !(0.0..=1.0).contains(&b) {
            return Err(Error::InvalidConfig(format!(
                "bm25.b must be between 0 and 1, got {}",
                b
            )));
        }
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "bm25.epsilon must be finite and non-negative, got {}",
                epsilon
            )));
        }
        if !self.composite.is_finite() {
            return Err(Error::InvalidConfig(
                "Composite weights must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# tweetrank configuration
#
# Algorithm used when none is given: "tfidf" (default), "bm25" or "composite"
#   "tfidf"     = cosine similarity over normalized, stemmed terms
#   "bm25"      = Okapi BM25 over raw whitespace tokens
#   "composite" = TF-IDF relevance fused with engagement and recency
default_algorithm = "tfidf"

# Number of results returned when none is given
default_top_n = 20

# k1 >= 0, 0 <= b <= 1. Terms in more than half the corpus have a negative
# Okapi IDF; they score epsilon * (average IDF of the vocabulary) instead.
[bm25]
k1 = 1.5
b = 0.75
epsilon = 0.25

# composite = relevance * cosine
#           + social * (likes_weight * likes + retweets_weight * retweets)
#           + recency * 1 / (seconds_since_posted + 1)
[composite]
relevance = 0.55
social = 0.30
recency = 0.15
likes_weight = 0.3
retweets_weight = 0.7
"#
    }

    /// Read, parse and validate config from a file path.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, `InvalidConfig` if it does not parse
    /// or fails validation.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&content).map_err(|e| {
            Error::InvalidConfig(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }
}
