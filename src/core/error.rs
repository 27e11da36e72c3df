//! Structural failures of the merge pipeline.
//!
//! Data-quality problems (malformed numbers, missing samples, empty
//! signals) never surface here; they degrade to NaN or absent values.

/// Errors raised when a series violates the equal-length invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// A column does not line up with the time column it is sampled on
    LengthMismatch {
        series: &'static str,
        expected: usize,
        found: usize,
    },
}

impl MergeError {
    pub(crate) fn check_len(
        series: &'static str,
        expected: usize,
        found: usize,
    ) -> Result<(), MergeError> {
        if expected == found {
            Ok(())
        } else {
            Err(MergeError::LengthMismatch {
                series,
                expected,
                found,
            })
        }
    }
}

impl std::fmt::Display for MergeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeError::LengthMismatch {
                series,
                expected,
                found,
            } => write!(
                f,
                "Length mismatch in {series}: expected {expected} samples, found {found}"
            ),
        }
    }
}

impl std::error::Error for MergeError {}
