//! Base query trait.

use std::fmt::Debug;

use crate::error::Result;
use crate::query::weight::Weight;
use crate::search::SearchContext;

/// Trait for search queries.
///
/// This is the entry point generic query compilation uses for every query
/// type. Span queries get it through a blanket implementation, see
/// [`SpanQuery`](crate::query::span::SpanQuery).
pub trait Query: Send + Sync + Debug {
    /// Create a weight for this query against `context`.
    ///
    /// When `needs_scores` is false the weight may skip score statistics.
    fn create_weight(&self, context: &dyn SearchContext, needs_scores: bool)
    -> Result<Box<dyn Weight>>;
}
