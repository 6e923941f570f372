//! Segment reader boundary.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::index::term::Term;
use crate::index::term_context::TermState;

/// Trait for readers over one immutable index segment.
///
/// Implementations report unreadable structures (a missing or corrupt term
/// dictionary, unreadable field statistics) as
/// [`SpanwiseError::IndexAccess`](crate::error::SpanwiseError::IndexAccess).
pub trait SegmentReader: Send + Sync + Debug {
    /// Get the maximum document ID in the segment, plus one.
    fn max_doc(&self) -> u64;

    /// Look up the statistics of `term` in this segment.
    ///
    /// Returns `Ok(None)` when the segment does not contain the term.
    fn term_state(&self, term: &Term) -> Result<Option<TermState>>;

    /// Get the statistics of `field` in this segment.
    ///
    /// Returns `Ok(None)` when the segment cannot report them; searchers then
    /// treat the field's collection statistics as incomplete.
    fn field_stats(&self, field: &str) -> Result<Option<FieldStats>>;

    /// Get document frequency for a specific term in this segment.
    fn doc_freq(&self, term: &Term) -> Result<u64> {
        Ok(self.term_state(term)?.map_or(0, |state| state.doc_freq))
    }
}

/// Statistics about a field inside one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldStats {
    /// Number of documents with this field.
    pub doc_count: u64,

    /// Total number of term occurrences in the field.
    pub sum_total_term_freq: u64,

    /// Sum of the document frequencies of every term in the field.
    pub sum_doc_freq: u64,
}

impl FieldStats {
    /// Add the statistics of `other` to these.
    pub fn accumulate(&mut self, other: &FieldStats) {
        self.doc_count += other.doc_count;
        self.sum_total_term_freq += other.sum_total_term_freq;
        self.sum_doc_freq += other.sum_doc_freq;
    }
}
