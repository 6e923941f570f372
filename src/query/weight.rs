//! Compiled, per-search-context form of a query.

use std::collections::BTreeSet;
use std::fmt::Debug;

use crate::index::term::Term;

/// Trait for weights.
///
/// A weight is built by [`Query::create_weight`](crate::query::query::Query::create_weight)
/// for one search context and is discarded once its scorers are built.
pub trait Weight: Send + Sync + Debug {
    /// Add every term this weight reads to `terms`.
    fn extract_terms(&self, terms: &mut BTreeSet<Term>);

    /// Get the value used for query normalization.
    fn value_for_normalization(&self) -> f32;

    /// Apply the top-level query norm and boost.
    fn normalize(&mut self, query_norm: f32, boost: f32);

    /// Score a match from its (sloppy) frequency and the length of its field.
    ///
    /// Weights built without score statistics return 0.0.
    fn score(&self, freq: f32, field_length: f32) -> f32;
}

impl<W: Weight + ?Sized> Weight for Box<W> {
    fn extract_terms(&self, terms: &mut BTreeSet<Term>) {
        (**self).extract_terms(terms)
    }

    fn value_for_normalization(&self) -> f32 {
        (**self).value_for_normalization()
    }

    fn normalize(&mut self, query_norm: f32, boost: f32) {
        (**self).normalize(query_norm, boost)
    }

    fn score(&self, freq: f32, field_length: f32) -> f32 {
        (**self).score(freq, field_length)
    }
}
