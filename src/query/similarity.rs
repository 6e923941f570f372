//! BM25 statistics computed while span weights are built.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::index::term_context::TermContexts;
use crate::search::SearchContext;

/// Score statistics of a span weight.
///
/// Built once per weight from the weight's term contexts; the idf of a span
/// is the sum of the idfs of every term it reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanSimWeight {
    /// Field the statistics were computed for.
    field: String,
    /// Summed inverse document frequency.
    idf: f32,
    /// Average field length in the collection.
    avg_field_length: f32,
    /// BM25 k1 parameter.
    k1: f32,
    /// BM25 b parameter.
    b: f32,
    /// Boost applied by normalization.
    boost: f32,
    /// idf * boost.
    weight: f32,
}

impl SpanSimWeight {
    /// Compute the statistics of `field` for the given term contexts.
    pub fn build(
        context: &dyn SearchContext,
        field: &str,
        term_contexts: &TermContexts,
    ) -> Result<Self> {
        let collection = context.collection_statistics(field)?;
        let params = *context.similarity();
        let doc_count = collection.idf_doc_count();

        let idf = term_contexts
            .iter()
            .map(|(term, term_context)| {
                let stats = context.term_statistics(term, term_context);
                Self::idf(stats.doc_freq, doc_count)
            })
            .sum::<f32>();

        Ok(SpanSimWeight {
            field: field.to_string(),
            idf,
            avg_field_length: collection.avg_field_length(),
            k1: params.k1,
            b: params.b,
            boost: 1.0,
            weight: idf,
        })
    }

    /// Calculate the IDF (Inverse Document Frequency) of one term.
    pub fn idf(doc_freq: u64, doc_count: u64) -> f32 {
        let n = doc_count as f32;
        let df = doc_freq as f32;

        // IDF = log(1 + (N - df + 0.5) / (df + 0.5))
        (1.0 + (n - df + 0.5) / (df + 0.5)).ln()
    }

    /// Get the field.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Get the summed idf.
    pub fn idf_sum(&self) -> f32 {
        self.idf
    }

    /// Get the boost.
    pub fn boost(&self) -> f32 {
        self.boost
    }

    /// Get the average field length.
    pub fn avg_field_length(&self) -> f32 {
        self.avg_field_length
    }

    /// Squared weight, for query normalization.
    pub fn value_for_normalization(&self) -> f32 {
        let weight = self.idf * self.boost;
        weight * weight
    }

    /// Apply the top-level boost. BM25 ignores the query norm.
    pub fn normalize(&mut self, _query_norm: f32, boost: f32) {
        self.boost = boost;
        self.weight = self.idf * boost;
    }

    /// Score a document from its sloppy span frequency and field length.
    pub fn score(&self, freq: f32, field_length: f32) -> f32 {
        if freq <= 0.0 {
            return 0.0;
        }

        let norm_factor = 1.0 - self.b + self.b * (field_length / self.avg_field_length);

        // TF = (freq * (k1 + 1)) / (freq + k1 * norm_factor)
        let tf = (freq * (self.k1 + 1.0)) / (freq + self.k1 * norm_factor);
        self.weight * tf
    }
}
