//! Query system: base query and weight contracts, span queries.

#[allow(clippy::module_inception)]
pub mod query;
pub mod similarity;
pub mod span;
pub mod weight;

pub use self::query::Query;
pub use self::similarity::SpanSimWeight;
pub use self::span::collector::{
    NO_OP_FACTORY, NoOpSpanCollector, NoOpSpanCollectorFactory, PayloadSpanCollector,
    PayloadSpanCollectorFactory, PostingsFlag, SpanCollector, SpanCollectorFactory, no_op_factory,
};
pub use self::span::weight::SpanWeightBase;
pub use self::span::{SpanQuery, SpanWeight, par_term_contexts, term_contexts};
pub use self::weight::Weight;
