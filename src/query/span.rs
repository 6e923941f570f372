//! Span queries for positional and proximity-based searching.
//!
//! Span queries match on term *positions*, and composite span queries
//! (near, or, not, containing, ...) are trees of simpler ones. This module
//! defines the contract every span query and span weight implements, and
//! [`term_contexts`], which composite queries use to merge the statistics of
//! their children's weights before building their own weight.
//!
//! # Example
//!
//! A composite weight aggregating its children:
//!
//! ```
//! use spanwise::error::Result;
//! use spanwise::index::TermContexts;
//! use spanwise::query::span::{SpanWeight, term_contexts};
//!
//! fn children_contexts(children: &[Box<dyn SpanWeight>]) -> Result<TermContexts> {
//!     term_contexts(children)
//! }
//! ```

pub mod collector;
pub mod weight;

use std::fmt::Debug;
use std::sync::Arc;

use log::debug;
use rayon::prelude::*;

use crate::error::Result;
use crate::index::term_context::TermContexts;
use crate::query::query::Query;
use crate::query::similarity::SpanSimWeight;
use crate::query::span::collector::{SpanCollectorFactory, no_op_factory};
use crate::query::weight::Weight;
use crate::search::SearchContext;

/// Base trait for span queries.
///
/// Span queries are immutable: building a weight never changes the query,
/// and one query may be compiled from many threads at once.
///
/// Every span query is also a [`Query`]: its two-argument
/// [`Query::create_weight`] builds the span weight with the shared
/// [`NO_OP_FACTORY`](collector::NO_OP_FACTORY).
pub trait SpanQuery: Send + Sync + Debug {
    /// Get the field this query matches in, or `None` if it spans several fields.
    fn field(&self) -> Option<&str>;

    /// Create a span weight for this query against `context`.
    ///
    /// `collector_factory` supplies the collectors that gather postings data
    /// while matching. Fails with an index access error when the context's
    /// term data cannot be read.
    fn create_span_weight(
        &self,
        context: &dyn SearchContext,
        needs_scores: bool,
        collector_factory: Arc<dyn SpanCollectorFactory>,
    ) -> Result<Box<dyn SpanWeight>>;

    /// Clone this span query.
    fn clone_box(&self) -> Box<dyn SpanQuery>;
}

impl<Q: SpanQuery + ?Sized> Query for Q {
    fn create_weight(
        &self,
        context: &dyn SearchContext,
        needs_scores: bool,
    ) -> Result<Box<dyn Weight>> {
        let weight = self.create_span_weight(context, needs_scores, no_op_factory())?;
        Ok(weight)
    }
}

impl<Q: SpanQuery + ?Sized> SpanQuery for Box<Q> {
    fn field(&self) -> Option<&str> {
        (**self).field()
    }

    fn create_span_weight(
        &self,
        context: &dyn SearchContext,
        needs_scores: bool,
        collector_factory: Arc<dyn SpanCollectorFactory>,
    ) -> Result<Box<dyn SpanWeight>> {
        (**self).create_span_weight(context, needs_scores, collector_factory)
    }

    fn clone_box(&self) -> Box<dyn SpanQuery> {
        (**self).clone_box()
    }
}

impl Clone for Box<dyn SpanQuery> {
    fn clone(&self) -> Self {
        (**self).clone_box()
    }
}

/// Weight of a span query.
pub trait SpanWeight: Weight {
    /// Get the field of the query this weight was built for.
    fn field(&self) -> Option<&str>;

    /// Contribute the term contexts of every term this weight reads.
    ///
    /// Implementations must go through [`TermContexts::contribute`] so that
    /// an equal term already present is merged, not replaced.
    fn extract_term_contexts(&self, contexts: &mut TermContexts) -> Result<()>;

    /// Get the similarity statistics, if the weight was built with scores.
    fn sim_weight(&self) -> Option<&SpanSimWeight>;

    /// Get the factory of the collectors used while matching.
    fn collector_factory(&self) -> &Arc<dyn SpanCollectorFactory>;
}

impl<W: SpanWeight + ?Sized> SpanWeight for Box<W> {
    fn field(&self) -> Option<&str> {
        (**self).field()
    }

    fn extract_term_contexts(&self, contexts: &mut TermContexts) -> Result<()> {
        (**self).extract_term_contexts(contexts)
    }

    fn sim_weight(&self) -> Option<&SpanSimWeight> {
        (**self).sim_weight()
    }

    fn collector_factory(&self) -> &Arc<dyn SpanCollectorFactory> {
        (**self).collector_factory()
    }
}

/// Build the map of terms to term contexts of a set of span weights.
///
/// Accepts any collection of weight references: an array, a slice, a
/// `Vec<Box<dyn SpanWeight>>` or an iterator. Contributions of equal terms
/// are merged, so the result does not depend on the order of `weights`, and
/// iteration follows term order. The first failing contribution aborts the
/// whole aggregation.
pub fn term_contexts<'a, I, W>(weights: I) -> Result<TermContexts>
where
    I: IntoIterator<Item = &'a W>,
    W: SpanWeight + ?Sized + 'a,
{
    let mut contexts = TermContexts::new();
    let mut weight_count = 0usize;
    for weight in weights {
        weight.extract_term_contexts(&mut contexts)?;
        weight_count += 1;
    }

    debug!(
        "aggregated term contexts of {weight_count} span weights into {} terms",
        contexts.len()
    );
    Ok(contexts)
}

/// Parallel form of [`term_contexts`].
///
/// Each rayon worker folds a share of `weights` into its own map and the
/// maps are merged pairwise, so the result equals [`term_contexts`] over the
/// same weights.
pub fn par_term_contexts<W>(weights: &[W]) -> Result<TermContexts>
where
    W: SpanWeight,
{
    let contexts = weights
        .par_iter()
        .try_fold(TermContexts::new, |mut contexts, weight| -> Result<TermContexts> {
            weight.extract_term_contexts(&mut contexts)?;
            Ok(contexts)
        })
        .try_reduce(TermContexts::new, |mut left, right| {
            left.absorb(right);
            Ok(left)
        })?;

    debug!(
        "aggregated term contexts of {} span weights into {} terms in parallel",
        weights.len(),
        contexts.len()
    );
    Ok(contexts)
}
