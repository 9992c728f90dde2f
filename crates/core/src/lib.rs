//! Core types for tweetrank
//!
//! This crate defines the foundational types used throughout the system:
//! - Document: one corpus entry (a tweet)
//! - RawRecord: enrichment record from an external store
//! - ResultItem: presentation record for one ranked document
//! - Algorithm: the ranking algorithms a search can dispatch to
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithm;
pub mod error;
pub mod types;

pub use algorithm::Algorithm;
pub use error::{Error, Result};
pub use types::{parse_timestamp, Document, RawRecord, ResultItem};
