//! utplsq-core - decoding and aggregation of utPLSQL outcomes
//!
//! utPLSQL stores each test outcome as a status plus a loosely-structured
//! free-text description. This crate provides:
//! - A best-effort, rule-ordered decoder from description text to a
//!   normalized [`DescriptionRecord`]
//! - A [`RunAggregator`] that accumulates per-line outcomes across a run
//! - The [`OutcomeSource`] boundary trait for fetching raw rows
//!
//! The decoder is a pure function: identical input always yields an
//! identical record, and the only fatal input shape is a header whose dot
//! structure matches no recognized layout.

pub mod aggregate;
pub mod decoder;
pub mod error;
pub mod record;
pub mod source;

// Re-export key types
pub use aggregate::{RunAggregator, STATUS_SUCCESS};
pub use decoder::{decode, ASSERT_TYPE_UNKNOWN};
pub use error::DecodeError;
pub use record::DescriptionRecord;
pub use source::{OutcomeRow, OutcomeSource};
