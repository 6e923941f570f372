//! Searcher over an ordered list of segments.

use std::sync::Arc;

use log::{debug, trace};

use crate::error::{Result, SpanwiseError};
use crate::index::reader::{FieldStats, SegmentReader};
use crate::index::term::Term;
use crate::index::term_context::{SegmentOrd, TermContext};
use crate::search::config::{Bm25Params, SearcherConfig};
use crate::search::{CollectionStatistics, SearchContext};

/// A search context over a fixed, ordered set of segments.
///
/// The position of a segment in the list is its [`SegmentOrd`]; term
/// contexts resolved through one searcher are therefore mergeable.
#[derive(Debug, Clone)]
pub struct IndexSearcher {
    segments: Vec<Arc<dyn SegmentReader>>,
    config: SearcherConfig,
}

/// Ordinal of the segment at `index`, or an error if it does not fit a [`SegmentOrd`].
fn segment_ord(index: usize) -> Result<SegmentOrd> {
    SegmentOrd::try_from(index).map_err(|_| {
        SpanwiseError::invalid_config(format!(
            "segment {index} exceeds the maximum segment ordinal {}",
            SegmentOrd::MAX
        ))
    })
}

impl IndexSearcher {
    /// Create a searcher with the default configuration.
    ///
    /// The segment count is checked when terms are resolved; use
    /// [`with_config`](Self::with_config) to reject it up front.
    pub fn new(segments: Vec<Arc<dyn SegmentReader>>) -> Self {
        IndexSearcher {
            segments,
            config: SearcherConfig::default(),
        }
    }

    /// Create a searcher with a custom configuration.
    pub fn with_config(
        segments: Vec<Arc<dyn SegmentReader>>,
        config: SearcherConfig,
    ) -> Result<Self> {
        config.validate()?;
        if let Some(last) = segments.len().checked_sub(1) {
            segment_ord(last)?;
        }
        Ok(IndexSearcher { segments, config })
    }

    /// Get the segments in ordinal order.
    pub fn segments(&self) -> &[Arc<dyn SegmentReader>] {
        &self.segments
    }

    /// Get the configuration.
    pub fn config(&self) -> &SearcherConfig {
        &self.config
    }
}

impl SearchContext for IndexSearcher {
    fn max_doc(&self) -> u64 {
        self.segments.iter().map(|segment| segment.max_doc()).sum()
    }

    fn term_context(&self, term: &Term) -> Result<TermContext> {
        let mut context = TermContext::new();
        for (index, segment) in self.segments.iter().enumerate() {
            let ord = segment_ord(index)?;
            if let Some(state) = segment.term_state(term)? {
                trace!("{term} found in segment {ord} (doc_freq={})", state.doc_freq);
                context.register(ord, state);
            }
        }
        debug!(
            "resolved {term} in {} of {} segments (doc_freq={})",
            context.segment_count(),
            self.segments.len(),
            context.doc_freq()
        );
        Ok(context)
    }

    fn collection_statistics(&self, field: &str) -> Result<CollectionStatistics> {
        let mut totals = FieldStats::default();
        let mut complete = true;
        for (index, segment) in self.segments.iter().enumerate() {
            match segment.field_stats(field)? {
                Some(stats) => totals.accumulate(&stats),
                None => {
                    debug!("segment {index} has no statistics for field {field}");
                    complete = false;
                }
            }
        }
        Ok(CollectionStatistics {
            field: field.to_string(),
            max_doc: self.max_doc(),
            doc_count: totals.doc_count,
            sum_total_term_freq: totals.sum_total_term_freq,
            sum_doc_freq: totals.sum_doc_freq,
            complete,
        })
    }

    fn similarity(&self) -> &Bm25Params {
        &self.config.similarity
    }
}
