//! Error types for the Spanwise library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`SpanwiseError`] enum. Weight construction only ever produces
//! [`SpanwiseError::IndexAccess`] on its own; the remaining variants cover
//! configuration and the I/O plumbing of callers.
//!
//! # Examples
//!
//! ```
//! use spanwise::error::{Result, SpanwiseError};
//!
//! fn read_dictionary() -> Result<()> {
//!     Err(SpanwiseError::index_access("term dictionary for segment 0 is corrupt"))
//! }
//!
//! match read_dictionary() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => assert!(e.is_index_access()),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Spanwise operations.
#[derive(Error, Debug)]
pub enum SpanwiseError {
    /// Required index structures (term dictionary, field statistics) could not be read.
    #[error("Index access error: {0}")]
    IndexAccess(String),

    /// Query-related errors (malformed query trees, unsupported clauses, etc.)
    #[error("Query error: {0}")]
    Query(String),

    /// Rejected configuration values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SpanwiseError.
pub type Result<T> = std::result::Result<T, SpanwiseError>;

impl SpanwiseError {
    /// Create a new index access error.
    pub fn index_access<S: Into<String>>(msg: S) -> Self {
        SpanwiseError::IndexAccess(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        SpanwiseError::Query(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        SpanwiseError::InvalidConfig(msg.into())
    }

    /// Whether this error was raised while reading index structures.
    pub fn is_index_access(&self) -> bool {
        matches!(self, SpanwiseError::IndexAccess(_))
    }
}
