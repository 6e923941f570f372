//! Collection-wide term statistics and their per-query aggregate.
//!
//! A [`TermContext`] collects the [`TermState`] of one term in every segment
//! of a searcher. [`TermContexts`] is the ordered term to context map that
//! span weights contribute into while a query tree is compiled.

use std::collections::BTreeMap;
use std::collections::btree_map::{self, Entry};

use log::trace;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::index::term::Term;

/// Ordinal of a segment inside one searcher.
pub type SegmentOrd = u32;

/// Statistics of one term inside one segment.
///
/// Ordered field by field, frequencies first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct TermState {
    /// Number of documents in the segment containing the term.
    pub doc_freq: u64,
    /// Total number of occurrences of the term in the segment.
    pub total_term_freq: u64,
    /// Offset of the term's postings in the segment.
    pub postings_offset: u64,
    /// Size of the term's postings in bytes.
    pub postings_len: u64,
}

impl TermState {
    /// Create a term state with the given frequencies and no postings location.
    pub fn new(doc_freq: u64, total_term_freq: u64) -> Self {
        TermState {
            doc_freq,
            total_term_freq,
            postings_offset: 0,
            postings_len: 0,
        }
    }

    /// Set the postings location.
    pub fn with_postings(mut self, offset: u64, len: u64) -> Self {
        self.postings_offset = offset;
        self.postings_len = len;
        self
    }
}

/// Statistics of one term accumulated across the segments of a searcher.
///
/// Each segment is recorded at most once; the summed frequencies always
/// equal the sum over the recorded states.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TermContext {
    states: BTreeMap<SegmentOrd, TermState>,
    doc_freq: u64,
    total_term_freq: u64,
}

impl TermContext {
    /// Create an empty term context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a term context holding a single segment's state.
    pub fn from_state(ord: SegmentOrd, state: TermState) -> Self {
        let mut context = Self::new();
        context.register(ord, state);
        context
    }

    /// Record the state of the term in segment `ord`.
    ///
    /// Returns `false` and leaves the context untouched if the segment was
    /// already recorded.
    pub fn register(&mut self, ord: SegmentOrd, state: TermState) -> bool {
        match self.states.entry(ord) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(state);
                self.doc_freq += state.doc_freq;
                self.total_term_freq += state.total_term_freq;
                true
            }
        }
    }

    /// Merge the segments of `other` into this context.
    ///
    /// Returns the number of newly recorded segments. A segment present in
    /// both contexts with different states keeps the greater state, so the
    /// result does not depend on which side is merged into which.
    pub fn merge(&mut self, other: &TermContext) -> usize {
        let mut added = 0;
        for (&ord, &state) in &other.states {
            match self.states.get(&ord).copied() {
                None => {
                    self.register(ord, state);
                    added += 1;
                }
                Some(existing) if state > existing => {
                    trace!("segment {ord} has conflicting term states, keeping {state:?}");
                    self.states.insert(ord, state);
                    self.doc_freq = self.doc_freq - existing.doc_freq + state.doc_freq;
                    self.total_term_freq =
                        self.total_term_freq - existing.total_term_freq + state.total_term_freq;
                }
                Some(_) => {}
            }
        }
        added
    }

    /// Number of documents containing the term, across all recorded segments.
    pub fn doc_freq(&self) -> u64 {
        self.doc_freq
    }

    /// Total occurrences of the term, across all recorded segments.
    pub fn total_term_freq(&self) -> u64 {
        self.total_term_freq
    }

    /// Get the state recorded for segment `ord`.
    pub fn get(&self, ord: SegmentOrd) -> Option<&TermState> {
        self.states.get(&ord)
    }

    /// Iterate over the recorded segments in ordinal order.
    pub fn states(&self) -> impl Iterator<Item = (SegmentOrd, &TermState)> {
        self.states.iter().map(|(&ord, state)| (ord, state))
    }

    /// Number of recorded segments.
    pub fn segment_count(&self) -> usize {
        self.states.len()
    }

    /// Whether no segment has been recorded.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Ordered map from [`Term`] to its [`TermContext`].
///
/// Contributions for an equal term are merged into the existing context
/// rather than replacing it. Iteration follows the [`Term`] order, never the
/// order of contribution. Serialized as a sequence of `(term, context)`
/// entries in that order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TermContexts {
    contexts: BTreeMap<Term, TermContext>,
}

impl TermContexts {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `context` for `term`, or merge it into the context already present.
    pub fn contribute(&mut self, term: &Term, context: &TermContext) {
        match self.contexts.get_mut(term) {
            Some(existing) => {
                existing.merge(context);
            }
            None => {
                self.contexts.insert(term.clone(), context.clone());
            }
        }
    }

    /// Merge every entry of `other` into this map.
    pub fn absorb(&mut self, other: TermContexts) {
        for (term, context) in other.contexts {
            match self.contexts.entry(term) {
                Entry::Occupied(mut slot) => {
                    slot.get_mut().merge(&context);
                }
                Entry::Vacant(slot) => {
                    slot.insert(context);
                }
            }
        }
    }

    /// Get the context of `term`.
    pub fn get(&self, term: &Term) -> Option<&TermContext> {
        self.contexts.get(term)
    }

    /// Whether `term` has a context.
    pub fn contains(&self, term: &Term) -> bool {
        self.contexts.contains_key(term)
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Iterate over the entries in term order.
    pub fn iter(&self) -> btree_map::Iter<'_, Term, TermContext> {
        self.contexts.iter()
    }

    /// Iterate over the terms in order.
    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.contexts.keys()
    }
}

impl Serialize for TermContexts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.contexts.iter())
    }
}

impl<'de> Deserialize<'de> for TermContexts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<(Term, TermContext)>::deserialize(deserializer)?;
        let mut contexts = TermContexts::new();
        for (term, context) in entries {
            contexts.contribute(&term, &context);
        }
        Ok(contexts)
    }
}

impl<'a> IntoIterator for &'a TermContexts {
    type Item = (&'a Term, &'a TermContext);
    type IntoIter = btree_map::Iter<'a, Term, TermContext>;

    fn into_iter(self) -> Self::IntoIter {
        self.contexts.iter()
    }
}

impl IntoIterator for TermContexts {
    type Item = (Term, TermContext);
    type IntoIter = btree_map::IntoIter<Term, TermContext>;

    fn into_iter(self) -> Self::IntoIter {
        self.contexts.into_iter()
    }
}
