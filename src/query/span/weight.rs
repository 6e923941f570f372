//! Shared state of span weights.

use std::collections::BTreeSet;
use std::sync::Arc;

use log::debug;

use crate::error::Result;
use crate::index::term::Term;
use crate::index::term_context::TermContexts;
use crate::query::similarity::SpanSimWeight;
use crate::query::span::collector::{PostingsFlag, SpanCollectorFactory};
use crate::search::SearchContext;

/// State every span weight carries: its field, the term contexts it was
/// built from, its collector factory and, when scores are needed, its
/// similarity statistics.
///
/// Concrete weights embed one and delegate the common parts of
/// [`Weight`](crate::query::weight::Weight) and
/// [`SpanWeight`](crate::query::span::SpanWeight) to it.
#[derive(Debug)]
pub struct SpanWeightBase {
    field: Option<String>,
    term_contexts: TermContexts,
    needs_scores: bool,
    sim_weight: Option<SpanSimWeight>,
    collector_factory: Arc<dyn SpanCollectorFactory>,
}

impl SpanWeightBase {
    /// Build the shared state for a weight over `field`.
    ///
    /// Similarity statistics are computed only when `needs_scores` is set,
    /// the field is known and there is at least one term context.
    pub fn new(
        field: Option<&str>,
        context: &dyn SearchContext,
        term_contexts: TermContexts,
        needs_scores: bool,
        collector_factory: Arc<dyn SpanCollectorFactory>,
    ) -> Result<Self> {
        let sim_weight = match field {
            Some(field) if needs_scores && !term_contexts.is_empty() => {
                Some(SpanSimWeight::build(context, field, &term_contexts)?)
            }
            _ => None,
        };

        debug!(
            "span weight on {} over {} terms (scores: {})",
            field.unwrap_or("<multiple fields>"),
            term_contexts.len(),
            sim_weight.is_some()
        );

        Ok(SpanWeightBase {
            field: field.map(str::to_string),
            term_contexts,
            needs_scores,
            sim_weight,
            collector_factory,
        })
    }

    /// Get the field, or `None` for weights spanning several fields.
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Get the term contexts the weight was built from.
    pub fn term_contexts(&self) -> &TermContexts {
        &self.term_contexts
    }

    /// Whether the weight was built to produce scores.
    pub fn needs_scores(&self) -> bool {
        self.needs_scores
    }

    /// Get the similarity statistics, if any.
    pub fn sim_weight(&self) -> Option<&SpanSimWeight> {
        self.sim_weight.as_ref()
    }

    /// Get the collector factory.
    pub fn collector_factory(&self) -> &Arc<dyn SpanCollectorFactory> {
        &self.collector_factory
    }

    /// Postings data the collectors of this weight read.
    pub fn required_postings(&self) -> PostingsFlag {
        self.collector_factory.new_collector().required_postings()
    }

    /// Contribute the weight's own term contexts into `contexts`.
    pub fn extract_term_contexts(&self, contexts: &mut TermContexts) {
        for (term, context) in &self.term_contexts {
            contexts.contribute(term, context);
        }
    }

    /// Add the weight's terms to `terms`.
    pub fn extract_terms(&self, terms: &mut BTreeSet<Term>) {
        terms.extend(self.term_contexts.terms().cloned());
    }

    /// Squared weight for query normalization; 1.0 without statistics.
    pub fn value_for_normalization(&self) -> f32 {
        self.sim_weight
            .as_ref()
            .map_or(1.0, SpanSimWeight::value_for_normalization)
    }

    /// Apply the top-level query norm and boost.
    pub fn normalize(&mut self, query_norm: f32, boost: f32) {
        if let Some(sim_weight) = self.sim_weight.as_mut() {
            sim_weight.normalize(query_norm, boost);
        }
    }

    /// Score a match; 0.0 without statistics.
    pub fn score(&self, freq: f32, field_length: f32) -> f32 {
        self.sim_weight
            .as_ref()
            .map_or(0.0, |sim_weight| sim_weight.score(freq, field_length))
    }
}
