//! # Spanwise
//!
//! The compile-time side of span queries for inverted-index search.
//!
//! ## Features
//!
//! - A [`SpanQuery`](query::SpanQuery) contract usable through the generic
//!   two-argument [`Query`](query::Query) entry point
//! - Deterministic, order-independent aggregation of term statistics across
//!   the clauses of a span query tree
//! - Pluggable per-match span collectors with a shared no-op default
//! - BM25 span statistics computed at weight construction
//! - An in-memory statistics segment and a multi-segment searcher

pub mod error;
pub mod index;
pub mod query;
pub mod search;

pub mod prelude {
    pub use crate::error::{Result, SpanwiseError};
    pub use crate::index::{Term, TermContext, TermContexts, TermState};
    pub use crate::query::{Query, SpanQuery, SpanWeight, Weight, term_contexts};
    pub use crate::search::SearchContext;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
