//! Error types for bizplots-stats
//!
//! Every failure is an input-validation failure raised before any
//! statistic is returned.

use thiserror::Error;

/// Errors raised by the statistic extractors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    /// Percentile out of range, bad ordering, empty sample set,
    /// oversized draw or unsupported array rank
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Two arrays that must align do not
    #[error("Shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// Explicit row selection references a row that does not exist
    #[error("Index {index} out of bounds for {len} rows")]
    OutOfBounds { index: usize, len: usize },
}

impl StatsError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        StatsError::InvalidInput {
            message: message.into(),
        }
    }

    pub(crate) fn shape(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        StatsError::ShapeMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }
}

/// Result type alias for statistic operations
pub type StatsResult<T> = Result<T, StatsError>;

/// Validation utilities
pub mod validation {
    use super::*;

    /// Validate a percentile lies in [0, 100]
    pub fn validate_percentile(q: f64) -> StatsResult<()> {
        if !(0.0..=100.0).contains(&q) {
            return Err(StatsError::invalid(format!(
                "percentile {q} is outside [0, 100]"
            )));
        }
        Ok(())
    }

    /// Validate inner and outer coverage widths: 0 <= inner <= outer <= 100
    pub fn validate_widths(inner: f64, outer: f64) -> StatsResult<()> {
        validate_percentile(inner)?;
        validate_percentile(outer)?;
        if inner > outer {
            return Err(StatsError::invalid(format!(
                "inner percentile {inner} exceeds outer percentile {outer}"
            )));
        }
        Ok(())
    }

    /// Validate a ribbon ladder: 0 <= min < 50 < max <= 100, count >= 1
    pub fn validate_ladder(count: usize, min: f64, max: f64) -> StatsResult<()> {
        if count == 0 {
            return Err(StatsError::invalid("ribbon count must be at least 1"));
        }
        if !(0.0..50.0).contains(&min) {
            return Err(StatsError::invalid(format!(
                "percentile_min {min} must lie in [0, 50)"
            )));
        }
        if !(max > 50.0 && max <= 100.0) {
            return Err(StatsError::invalid(format!(
                "percentile_max {max} must lie in (50, 100]"
            )));
        }
        Ok(())
    }
}
