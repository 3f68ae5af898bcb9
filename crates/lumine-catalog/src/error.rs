//! Error types for lumine-catalog

use thiserror::Error;

/// Errors that can occur while reading catalog documents
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Error parsing JSON
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Document parsed but has the wrong top-level shape
    #[error("Unexpected {document} layout: expected {expected}")]
    UnexpectedShape {
        /// Which document was being read
        document: &'static str,
        /// Description of the expected layout
        expected: &'static str,
    },
}
