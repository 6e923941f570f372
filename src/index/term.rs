//! Indexed token identity.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A term: one indexed token of one field.
///
/// Terms are ordered by field name first, then by their bytes compared
/// lexicographically as unsigned values. The derived ordering relies on the
/// field order below, so keep `field` declared before `bytes`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Term {
    /// The field this term was indexed in.
    field: String,
    /// The token bytes, as produced by analysis.
    bytes: Vec<u8>,
}

impl Term {
    /// Create a new term.
    ///
    /// Terms are not analyzed: `bytes` must already be in indexed form.
    pub fn new<F, B>(field: F, bytes: B) -> Self
    where
        F: Into<String>,
        B: Into<Vec<u8>>,
    {
        Term {
            field: field.into(),
            bytes: bytes.into(),
        }
    }

    /// Get the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Get the token bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Get the token as text, replacing invalid UTF-8 sequences.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.text())
    }
}
