//! Search contexts that weights are compiled against.
//!
//! A [`SearchContext`] is the index snapshot a query tree is compiled for.
//! Span queries only thread it through to their weights, which read term
//! and collection statistics from it.

pub mod config;
pub mod searcher;

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::index::term::Term;
use crate::index::term_context::TermContext;
use crate::search::config::Bm25Params;

/// Trait for index snapshots that weights are built against.
pub trait SearchContext: Send + Sync + Debug {
    /// Get the maximum document ID across all segments, plus one.
    fn max_doc(&self) -> u64;

    /// Resolve the statistics of `term` in every segment of the snapshot.
    ///
    /// Fails with an index access error when a segment's term dictionary
    /// cannot be read.
    fn term_context(&self, term: &Term) -> Result<TermContext>;

    /// Get the statistics of `field` summed over every segment.
    fn collection_statistics(&self, field: &str) -> Result<CollectionStatistics>;

    /// Get the similarity parameters weights score with.
    fn similarity(&self) -> &Bm25Params;

    /// Get the statistics of `term` as seen through `context`.
    fn term_statistics(&self, term: &Term, context: &TermContext) -> TermStatistics {
        TermStatistics {
            term: term.clone(),
            doc_freq: context.doc_freq(),
            total_term_freq: context.total_term_freq(),
        }
    }
}

/// Statistics of one field across a whole snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionStatistics {
    /// The field name.
    pub field: String,

    /// Maximum document ID across all segments, plus one.
    pub max_doc: u64,

    /// Number of documents with this field.
    pub doc_count: u64,

    /// Total number of term occurrences in the field.
    pub sum_total_term_freq: u64,

    /// Sum of the document frequencies of every term in the field.
    pub sum_doc_freq: u64,

    /// Whether every segment reported statistics for the field. When false
    /// the sums cover only the segments that did.
    pub complete: bool,
}

impl CollectionStatistics {
    /// Average number of tokens per document holding the field.
    pub fn avg_field_length(&self) -> f32 {
        if self.doc_count == 0 || self.sum_total_term_freq == 0 {
            return 1.0;
        }
        self.sum_total_term_freq as f32 / self.doc_count as f32
    }

    /// Document count used for idf: documents with the field, or every document
    /// when some segment could not report field statistics.
    ///
    /// Falling back to `max_doc` keeps the count at or above any term's
    /// document frequency, so idf never goes negative.
    pub fn idf_doc_count(&self) -> u64 {
        if !self.complete || self.doc_count == 0 {
            self.max_doc
        } else {
            self.doc_count
        }
    }
}

/// Statistics of one term across a whole snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermStatistics {
    /// The term.
    pub term: Term,

    /// Number of documents containing the term.
    pub doc_freq: u64,

    /// Total number of occurrences of the term.
    pub total_term_freq: u64,
}
