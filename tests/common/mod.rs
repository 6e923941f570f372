//! Span query fixtures shared by the integration tests.
//!
//! Concrete span queries live outside this crate; these are the smallest
//! implementations that exercise the contract: a single-term query and an
//! "or" composite that aggregates its children's term contexts.

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::Arc;

use spanwise::error::{Result, SpanwiseError};
use spanwise::index::{
    FieldStats, MemorySegment, SegmentOrd, SegmentReader, Term, TermContext, TermContexts,
    TermState,
};
use spanwise::query::{
    SpanCollectorFactory, SpanQuery, SpanSimWeight, SpanWeight, SpanWeightBase, Weight,
    no_op_factory, term_contexts,
};
use spanwise::search::SearchContext;
use spanwise::search::searcher::IndexSearcher;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Matches a single term.
#[derive(Debug, Clone)]
pub struct TermSpanQuery {
    term: Term,
}

impl TermSpanQuery {
    pub fn new(field: &str, text: &str) -> Self {
        TermSpanQuery {
            term: Term::new(field, text),
        }
    }
}

impl SpanQuery for TermSpanQuery {
    fn field(&self) -> Option<&str> {
        Some(self.term.field())
    }

    fn create_span_weight(
        &self,
        context: &dyn SearchContext,
        needs_scores: bool,
        collector_factory: Arc<dyn SpanCollectorFactory>,
    ) -> Result<Box<dyn SpanWeight>> {
        let term_context = context.term_context(&self.term)?;
        let mut contexts = TermContexts::new();
        contexts.contribute(&self.term, &term_context);

        let base = SpanWeightBase::new(
            self.field(),
            context,
            contexts,
            needs_scores,
            collector_factory,
        )?;
        Ok(Box::new(BaseSpanWeight { base }))
    }

    fn clone_box(&self) -> Box<dyn SpanQuery> {
        Box::new(self.clone())
    }
}

/// Matches any of its clauses.
#[derive(Debug, Clone)]
pub struct OrSpanQuery {
    clauses: Vec<Box<dyn SpanQuery>>,
}

impl OrSpanQuery {
    pub fn new(clauses: Vec<Box<dyn SpanQuery>>) -> Self {
        OrSpanQuery { clauses }
    }
}

impl SpanQuery for OrSpanQuery {
    fn field(&self) -> Option<&str> {
        let first = self.clauses.first()?.field()?;
        self.clauses
            .iter()
            .all(|clause| clause.field() == Some(first))
            .then_some(first)
    }

    fn create_span_weight(
        &self,
        context: &dyn SearchContext,
        needs_scores: bool,
        collector_factory: Arc<dyn SpanCollectorFactory>,
    ) -> Result<Box<dyn SpanWeight>> {
        if self.clauses.is_empty() {
            return Err(SpanwiseError::query("span or query needs at least one clause"));
        }

        let children = self
            .clauses
            .iter()
            .map(|clause| clause.create_span_weight(context, false, collector_factory.clone()))
            .collect::<Result<Vec<_>>>()?;
        let contexts = term_contexts(&children)?;

        let base = SpanWeightBase::new(
            self.field(),
            context,
            contexts,
            needs_scores,
            collector_factory,
        )?;
        Ok(Box::new(BaseSpanWeight { base }))
    }

    fn clone_box(&self) -> Box<dyn SpanQuery> {
        Box::new(self.clone())
    }
}

/// A weight that is nothing but its [`SpanWeightBase`].
#[derive(Debug)]
pub struct BaseSpanWeight {
    base: SpanWeightBase,
}

impl Weight for BaseSpanWeight {
    fn extract_terms(&self, terms: &mut BTreeSet<Term>) {
        self.base.extract_terms(terms)
    }

    fn value_for_normalization(&self) -> f32 {
        self.base.value_for_normalization()
    }

    fn normalize(&mut self, query_norm: f32, boost: f32) {
        self.base.normalize(query_norm, boost)
    }

    fn score(&self, freq: f32, field_length: f32) -> f32 {
        self.base.score(freq, field_length)
    }
}

impl SpanWeight for BaseSpanWeight {
    fn field(&self) -> Option<&str> {
        self.base.field()
    }

    fn extract_term_contexts(&self, contexts: &mut TermContexts) -> Result<()> {
        self.base.extract_term_contexts(contexts);
        Ok(())
    }

    fn sim_weight(&self) -> Option<&SpanSimWeight> {
        self.base.sim_weight()
    }

    fn collector_factory(&self) -> &Arc<dyn SpanCollectorFactory> {
        self.base.collector_factory()
    }
}

/// A weight with hand-written contributions, each tied to one segment.
#[derive(Debug)]
pub struct FixedSpanWeight {
    contributions: Vec<(Term, TermContext)>,
    factory: Arc<dyn SpanCollectorFactory>,
}

impl FixedSpanWeight {
    pub fn new() -> Self {
        FixedSpanWeight {
            contributions: Vec::new(),
            factory: no_op_factory(),
        }
    }

    pub fn with(mut self, field: &str, text: &str, ord: SegmentOrd, doc_freq: u64) -> Self {
        self.contributions.push((
            Term::new(field, text),
            TermContext::from_state(ord, TermState::new(doc_freq, doc_freq)),
        ));
        self
    }
}

impl Weight for FixedSpanWeight {
    fn extract_terms(&self, terms: &mut BTreeSet<Term>) {
        terms.extend(self.contributions.iter().map(|(term, _)| term.clone()));
    }

    fn value_for_normalization(&self) -> f32 {
        1.0
    }

    fn normalize(&mut self, _query_norm: f32, _boost: f32) {}

    fn score(&self, _freq: f32, _field_length: f32) -> f32 {
        0.0
    }
}

impl SpanWeight for FixedSpanWeight {
    fn field(&self) -> Option<&str> {
        None
    }

    fn extract_term_contexts(&self, contexts: &mut TermContexts) -> Result<()> {
        for (term, context) in &self.contributions {
            contexts.contribute(term, context);
        }
        Ok(())
    }

    fn sim_weight(&self) -> Option<&SpanSimWeight> {
        None
    }

    fn collector_factory(&self) -> &Arc<dyn SpanCollectorFactory> {
        &self.factory
    }
}

/// A segment whose term dictionary cannot be read.
#[derive(Debug)]
pub struct CorruptSegment;

impl SegmentReader for CorruptSegment {
    fn max_doc(&self) -> u64 {
        10
    }

    fn term_state(&self, _term: &Term) -> Result<Option<TermState>> {
        Err(SpanwiseError::index_access("term dictionary checksum mismatch"))
    }

    fn field_stats(&self, _field: &str) -> Result<Option<FieldStats>> {
        Err(SpanwiseError::index_access("field statistics missing"))
    }
}

/// Two segments: "cat" in 3 body documents of the first and 5 of the second.
pub fn cat_searcher() -> IndexSearcher {
    let mut first = MemorySegment::builder();
    for _ in 0..3 {
        first.add_document(&[("body", "the cat sat"), ("title", "ant")]);
    }
    first.add_document(&[("body", "a bee")]);

    let mut second = MemorySegment::builder();
    for _ in 0..5 {
        second.add_document(&[("body", "cat and bee")]);
    }
    second.add_document(&[("title", "ant and bee")]);

    IndexSearcher::new(vec![Arc::new(first.build()), Arc::new(second.build())])
}
