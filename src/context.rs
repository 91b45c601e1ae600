//! Assembles retrieved passages into a single context block for prompting.

use crate::document::RetrievedDocument;

/// Default separator between passages.
const DEFAULT_SEPARATOR: &str = "\n\n";

/// Flattens an ordered list of retrieved passages into one text blob.
///
/// Retrieval order is preserved; there is no deduplication and no length
/// capping. Any downstream limit belongs to the model boundary, not here.
#[derive(Debug, Clone)]
pub struct ContextAssembler {
    separator: String,
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self { separator: DEFAULT_SEPARATOR.to_string() }
    }
}

impl ContextAssembler {
    /// Create an assembler with the default double line-break separator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an assembler with a custom separator.
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self { separator: separator.into() }
    }

    /// Join the passages in retrieval order.
    ///
    /// An empty input yields an empty string, not an error; whether an empty
    /// context is usable is the caller's decision.
    pub fn join(&self, documents: &[RetrievedDocument]) -> String {
        documents.iter().map(|d| d.text.as_str()).collect::<Vec<_>>().join(&self.separator)
    }
}
