//! Load-once corpus index
//!
//! This module provides:
//! - CorpusIndex: the ordered document list every scorer reads from
//! - Raw whitespace tokenization per document (BM25 input)
//! - Corpus-level BM25 statistics (document frequency, its spectrum over the
//!   vocabulary, average length)
//!
//! The index is read-only after construction. Share it through `Arc`;
//! concurrent readers need no locking.

use crate::tokenizer::raw_tokens;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;
use tweetrank_core::{Document, Error, Result};

/// Immutable, ordered document collection plus raw-token statistics
///
/// # Invariants
///
/// - `raw_tokens[i]` is the tokenization of `documents[i]`
/// - `positions[documents[i].id] == i`
/// - never empty
#[derive(Debug, Clone)]
pub struct CorpusIndex {
    /// Documents in load order
    documents: Vec<Document>,

    /// Whitespace tokens per document, same order as `documents`
    raw_tokens: Vec<Vec<String>>,

    /// Document id -> position
    positions: HashMap<String, usize>,

    /// Raw term -> number of documents containing it
    doc_freqs: HashMap<String, usize>,

    /// (document frequency, number of terms with it), ascending
    df_spectrum: Vec<(usize, usize)>,

    /// Sum of all raw document lengths (for average calculation)
    total_doc_len: usize,
}

impl CorpusIndex {
    /// Build the index from documents in iteration order
    ///
    /// # Errors
    ///
    /// - `EmptyCorpus` if no documents are supplied
    /// - `DuplicateDocument` if two documents share an id
    pub fn new<I>(documents: I) -> Result<Self>
    where
        I: IntoIterator<Item = Document>,
    {
        let documents: Vec<Document> = documents.into_iter().collect();
        if documents.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let mut positions = HashMap::with_capacity(documents.len());
        for (pos, doc) in documents.iter().enumerate() {
            if positions.insert(doc.id.clone(), pos).is_some() {
                return Err(Error::DuplicateDocument(doc.id.clone()));
            }
        }

        let raw: Vec<Vec<String>> = documents.iter().map(|d| raw_tokens(&d.content)).collect();

        let mut doc_freqs: HashMap<String, usize> = HashMap::new();
        let mut total_doc_len = 0;
        for tokens in &raw {
            total_doc_len += tokens.len();
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *doc_freqs.entry(term.to_string()).or_insert(0) += 1;
            }
        }

        let mut spectrum: BTreeMap<usize, usize> = BTreeMap::new();
        for &df in doc_freqs.values() {
            *spectrum.entry(df).or_insert(0) += 1;
        }

        debug!(
            target: "tweetrank::corpus",
            documents = documents.len(),
            vocabulary = doc_freqs.len(),
            total_tokens = total_doc_len,
            "Corpus index built"
        );

        Ok(CorpusIndex {
            documents,
            raw_tokens: raw,
            positions,
            doc_freqs,
            df_spectrum: spectrum.into_iter().collect(),
            total_doc_len,
        })
    }

    // ========================================================================
    // Documents
    // ========================================================================

    /// Number of documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Always false; construction rejects empty input
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// All documents in corpus order
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Document at a position
    pub fn document(&self, pos: usize) -> Option<&Document> {
        self.documents.get(pos)
    }

    /// Position of a document id
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Document by id
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.position(id).map(|pos| &self.documents[pos])
    }

    /// Raw whitespace tokens of the document at a position
    pub fn raw_tokens(&self, pos: usize) -> Option<&[String]> {
        self.raw_tokens.get(pos).map(Vec::as_slice)
    }

    /// Iterate `(position, document)` in corpus order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Document)> {
        self.documents.iter().enumerate()
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Total number of documents (for IDF calculation)
    pub fn total_docs(&self) -> usize {
        self.documents.len()
    }

    /// Number of documents whose raw tokens contain `term`
    pub fn doc_freq(&self, term: &str) -> usize {
        self.doc_freqs.get(term).copied().unwrap_or(0)
    }

    /// Number of distinct raw terms
    pub fn vocabulary_size(&self) -> usize {
        self.doc_freqs.len()
    }

    /// Document frequencies grouped by value: `(df, terms with that df)`,
    /// ascending by `df`
    ///
    /// Corpus-wide IDF aggregates iterate this instead of the vocabulary, so
    /// their summation order does not depend on hash order.
    pub fn doc_freq_spectrum(&self) -> &[(usize, usize)] {
        &self.df_spectrum
    }

    /// Average raw document length in tokens
    pub fn avg_doc_len(&self) -> f64 {
        self.total_doc_len as f64 / self.documents.len() as f64
    }
}
