//! Error types for bizplots-core
//!
//! Provides error handling for:
//! - Statistic extraction (wrapped from bizplots-stats)
//! - Geometry grouping
//! - Rendering backends
//! - Configuration

use std::path::PathBuf;
use thiserror::Error;

use bizplots_stats::StatsError;

use crate::types::Orientation;

/// Main error type for plotting operations
#[derive(Error, Debug)]
pub enum PlotError {
    /// Statistic extraction failed
    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    /// Rendering failed
    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    /// Geometry arrays disagree in length
    #[error("Shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// A box with a different orientation was added to a group
    #[error("Mixed orientations in one group: group is {group:?}, box is {item:?}")]
    MixedOrientation {
        group: Orientation,
        item: Orientation,
    },

    /// A labelled group has no member in a role list
    #[error("Group '{label}' has no {role} to represent in the legend")]
    EmptyGroup { label: String, role: &'static str },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by rendering backends
#[derive(Error, Debug)]
pub enum RenderError {
    /// Nothing to autoscale against
    #[error("Figure has no data to draw")]
    NoData,

    /// Figure size cannot hold the plot area
    #[error("Invalid figure size: {width}x{height} (margins {margin})")]
    InvalidSize { width: u32, height: u32, margin: u32 },

    /// A legend icon could not be built
    #[error("Legend entry '{label}' failed: {message}")]
    Legend { label: String, message: String },

    /// The drawing backend rejected an element
    #[error("Drawing backend failed: {0}")]
    Backend(String),

    /// Writing the rendered figure failed
    #[error("Failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },
}

/// Configuration validation and parsing errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A value lies outside its allowed range
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// Two related values are inconsistent
    #[error("Inconsistent values: {0}")]
    Inconsistent(String),

    /// Parsing failed
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Result type alias for plotting operations
pub type PlotResult<T> = Result<T, PlotError>;

/// Result type alias for render operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Result type alias for configuration
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_error_wraps() {
        let err: PlotError = StatsError::OutOfBounds { index: 7, len: 3 }.into();
        assert!(matches!(err, PlotError::Stats(_)));
        assert!(err.to_string().contains('7'));
    }

    #[test]
    fn test_empty_group_display() {
        let err = PlotError::EmptyGroup {
            label: "revenue".to_string(),
            role: "markers",
        };
        let msg = err.to_string();
        assert!(msg.contains("revenue"));
        assert!(msg.contains("markers"));
    }

    #[test]
    fn test_render_error_display() {
        let err = RenderError::InvalidSize {
            width: 10,
            height: 20,
            margin: 40,
        };
        assert!(err.to_string().contains("10x20"));
    }

    #[test]
    fn test_config_error_wraps() {
        let err: PlotError = ConfigError::OutOfRange("alpha".to_string()).into();
        assert!(err.to_string().contains("alpha"));
    }
}
