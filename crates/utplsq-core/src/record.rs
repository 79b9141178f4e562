//! Normalized form of one decoded outcome description.

use serde::{Deserialize, Serialize};

/// Default duration for a decoded record. utPLSQL records no per-test
/// timing, so the value stays `"0"` unless a timing-aware caller sets it.
pub const DEFAULT_DURATION: &str = "0";

/// The constituent elements of a single utPLSQL outcome description.
///
/// A record is built once by [`crate::decoder::decode`] and returned by
/// value; every field is always populated. Fields that could not be
/// recovered from the input carry their documented fallback instead of an
/// empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionRecord {
    /// Dotted-path identifier of the tested unit, or the suite-setup
    /// fallback when the line carries no per-procedure structure.
    pub procedure_name: String,

    /// The specific test identifier extracted from the line.
    pub test_name: String,

    /// Assertion kind (e.g. `EQ`), or the unknown-assert sentinel.
    pub assertion_type: String,

    /// Free-text outcome payload. May be empty.
    pub result_message: String,

    /// Numeric duration string, `"0"` unless set via [`Self::with_duration`].
    pub duration: String,
}

impl DescriptionRecord {
    /// Build a record with the default duration.
    pub fn new(
        procedure_name: String,
        test_name: String,
        assertion_type: String,
        result_message: String,
    ) -> Self {
        Self {
            procedure_name,
            test_name,
            assertion_type,
            result_message,
            duration: DEFAULT_DURATION.to_string(),
        }
    }

    /// Return the record with its duration replaced.
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = duration.into();
        self
    }
}
