//! Index-side value types and the segment reader boundary.

pub mod memory;
pub mod reader;
pub mod term;
pub mod term_context;

pub use self::memory::{MemorySegment, MemorySegmentBuilder};
pub use self::reader::{FieldStats, SegmentReader};
pub use self::term::Term;
pub use self::term_context::{SegmentOrd, TermContext, TermContexts, TermState};
