//! Error types for outcome decoding.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    /// The structural header had more dot components than any recognized
    /// layout produces. Callers should treat the whole run as suspect:
    /// this shape only appears when the utPLSQL output format has drifted.
    #[error(
        "outcome header {header:?} has {components} dot-separated components, expected at most 2; \
         the utPLSQL outcome table is not in a recognized format"
    )]
    StructuralFormat { header: String, components: usize },
}

/// Result type for decode operations
pub type Result<T> = std::result::Result<T, DecodeError>;
