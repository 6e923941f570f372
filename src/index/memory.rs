//! In-memory statistics segment.
//!
//! [`MemorySegment`] keeps only what weight construction reads: a term
//! dictionary of [`TermState`]s and per-field statistics. It has no postings
//! and is meant for tests, tools and small in-process indexes.

use std::collections::BTreeMap;

use ahash::AHashMap;

use crate::error::Result;
use crate::index::reader::{FieldStats, SegmentReader};
use crate::index::term::Term;
use crate::index::term_context::TermState;

/// An immutable in-memory segment.
#[derive(Debug, Clone, Default)]
pub struct MemorySegment {
    max_doc: u64,
    terms: AHashMap<Term, TermState>,
    fields: AHashMap<String, FieldStats>,
}

impl MemorySegment {
    /// Start building a segment.
    pub fn builder() -> MemorySegmentBuilder {
        MemorySegmentBuilder::new()
    }

    /// Number of distinct terms in the segment.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }
}

impl SegmentReader for MemorySegment {
    fn max_doc(&self) -> u64 {
        self.max_doc
    }

    fn term_state(&self, term: &Term) -> Result<Option<TermState>> {
        Ok(self.terms.get(term).copied())
    }

    fn field_stats(&self, field: &str) -> Result<Option<FieldStats>> {
        // The whole dictionary is in memory, so an absent field is known to be empty.
        Ok(Some(self.fields.get(field).copied().unwrap_or_default()))
    }
}

/// Builder for [`MemorySegment`].
///
/// Documents are added per field as already-analyzed tokens separated by
/// whitespace.
#[derive(Debug, Default)]
pub struct MemorySegmentBuilder {
    max_doc: u64,
    terms: AHashMap<Term, TermState>,
    fields: AHashMap<String, FieldStats>,
}

impl MemorySegmentBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one document given as `(field, tokens)` pairs.
    ///
    /// A field listed more than once contributes all its tokens to the same
    /// document.
    pub fn add_document(&mut self, fields: &[(&str, &str)]) -> &mut Self {
        let mut per_field: BTreeMap<&str, AHashMap<&str, u64>> = BTreeMap::new();
        for (field, tokens) in fields {
            let freqs = per_field.entry(*field).or_default();
            for token in tokens.split_whitespace() {
                *freqs.entry(token).or_insert(0) += 1;
            }
        }

        for (field, freqs) in per_field {
            if freqs.is_empty() {
                continue;
            }

            let stats = self.fields.entry(field.to_string()).or_default();
            stats.doc_count += 1;
            stats.sum_doc_freq += freqs.len() as u64;
            stats.sum_total_term_freq += freqs.values().sum::<u64>();

            for (token, freq) in freqs {
                let state = self.terms.entry(Term::new(field, token)).or_default();
                state.doc_freq += 1;
                state.total_term_freq += freq;
            }
        }

        self.max_doc += 1;
        self
    }

    /// Finish the segment, assigning postings locations in term order.
    pub fn build(&mut self) -> MemorySegment {
        let mut terms: Vec<(Term, TermState)> = self.terms.drain().collect();
        terms.sort_by(|a, b| a.0.cmp(&b.0));

        let mut offset = 0;
        let terms = terms
            .into_iter()
            .map(|(term, state)| {
                // One fixed-width entry per (doc, freq) pair.
                let len = state.doc_freq * 8;
                let state = state.with_postings(offset, len);
                offset += len;
                (term, state)
            })
            .collect();

        MemorySegment {
            max_doc: std::mem::take(&mut self.max_doc),
            terms,
            fields: std::mem::take(&mut self.fields),
        }
    }
}
