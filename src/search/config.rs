//! Configuration for searchers.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpanwiseError};

/// BM25 similarity parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bm25Params {
    /// Term frequency saturation.
    pub k1: f32,

    /// Field length normalization, between 0 (none) and 1 (full).
    pub b: f32,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Bm25Params { k1: 1.2, b: 0.75 }
    }
}

impl Bm25Params {
    /// Check that the parameters are usable.
    pub fn validate(&self) -> Result<()> {
        if !self.k1.is_finite() || self.k1 < 0.0 {
            return Err(SpanwiseError::invalid_config(format!(
                "k1 must be a non-negative number, got {}",
                self.k1
            )));
        }
        if !(0.0..=1.0).contains(&self.b) {
            return Err(SpanwiseError::invalid_config(format!(
                "b must be between 0 and 1, got {}",
                self.b
            )));
        }
        Ok(())
    }
}

/// Configuration for [`IndexSearcher`](crate::search::searcher::IndexSearcher).
///
/// # Example
///
/// ```
/// use spanwise::search::config::SearcherConfig;
///
/// let config = SearcherConfig::from_json(r#"{ "similarity": { "k1": 0.9 } }"#).unwrap();
/// assert_eq!(config.similarity.k1, 0.9);
/// assert_eq!(config.similarity.b, 0.75);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearcherConfig {
    /// Similarity used when weights compute score statistics.
    pub similarity: Bm25Params,
}

impl SearcherConfig {
    /// Parse and validate a JSON configuration. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SearcherConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        self.similarity.validate()
    }
}
