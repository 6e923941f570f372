//! Per-match collection hooks for span matching.
//!
//! A span weight holds a [`SpanCollectorFactory`]; the matching layer asks it
//! for a fresh [`SpanCollector`] and feeds it every leaf term occurrence of
//! each match. [`NO_OP_FACTORY`] collects nothing and is what every span
//! query uses unless told otherwise.

use std::fmt::Debug;
use std::sync::Arc;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::index::term::Term;

/// Postings data a collector needs the matching layer to decode.
///
/// Variants are ordered by cost; a later variant implies the earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PostingsFlag {
    /// Term positions only.
    Positions,
    /// Positions and payloads.
    Payloads,
    /// Positions, payloads and character offsets.
    Offsets,
}

/// Collects postings information from the leaves of a span match.
pub trait SpanCollector: Send + Debug {
    /// Collect one leaf occurrence of `term` at `position`.
    fn collect_leaf(&mut self, term: &Term, position: u32, payload: Option<&[u8]>) -> Result<()>;

    /// Called when the driving spans move to a new match.
    fn reset(&mut self);

    /// Postings data this collector reads.
    fn required_postings(&self) -> PostingsFlag {
        PostingsFlag::Positions
    }
}

/// Creates [`SpanCollector`]s for span weights.
pub trait SpanCollectorFactory: Send + Sync + Debug {
    /// Create a new, empty collector.
    fn new_collector(&self) -> Box<dyn SpanCollector>;
}

/// A collector that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSpanCollector;

impl SpanCollector for NoOpSpanCollector {
    fn collect_leaf(
        &mut self,
        _term: &Term,
        _position: u32,
        _payload: Option<&[u8]>,
    ) -> Result<()> {
        Ok(())
    }

    fn reset(&mut self) {}
}

/// Factory of [`NoOpSpanCollector`]s. Use the shared [`NO_OP_FACTORY`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSpanCollectorFactory;

impl SpanCollectorFactory for NoOpSpanCollectorFactory {
    fn new_collector(&self) -> Box<dyn SpanCollector> {
        // Zero-sized, so this does not allocate.
        Box::new(NoOpSpanCollector)
    }
}

lazy_static! {
    /// The process-wide factory that collects nothing.
    pub static ref NO_OP_FACTORY: Arc<dyn SpanCollectorFactory> =
        Arc::new(NoOpSpanCollectorFactory);
}

/// Get a handle to [`NO_OP_FACTORY`].
pub fn no_op_factory() -> Arc<dyn SpanCollectorFactory> {
    Arc::clone(&NO_OP_FACTORY)
}

/// Whether `factory` is the shared no-op factory.
pub fn is_no_op(factory: &Arc<dyn SpanCollectorFactory>) -> bool {
    Arc::ptr_eq(factory, &NO_OP_FACTORY)
}

/// A collector that records the payload of every leaf of the current match.
#[derive(Debug, Clone, Default)]
pub struct PayloadSpanCollector {
    payloads: Vec<Vec<u8>>,
}

impl PayloadSpanCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the payloads collected since the last reset.
    pub fn payloads(&self) -> &[Vec<u8>] {
        &self.payloads
    }
}

impl SpanCollector for PayloadSpanCollector {
    fn collect_leaf(&mut self, _term: &Term, _position: u32, payload: Option<&[u8]>) -> Result<()> {
        if let Some(payload) = payload {
            self.payloads.push(payload.to_vec());
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.payloads.clear();
    }

    fn required_postings(&self) -> PostingsFlag {
        PostingsFlag::Payloads
    }
}

/// Factory of [`PayloadSpanCollector`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadSpanCollectorFactory;

impl SpanCollectorFactory for PayloadSpanCollectorFactory {
    fn new_collector(&self) -> Box<dyn SpanCollector> {
        Box::new(PayloadSpanCollector::new())
    }
}
