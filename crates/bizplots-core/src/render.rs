//! Rendering interface
//!
//! A renderer receives finished primitives in data coordinates together
//! with an opaque style value. Plot entry points never look inside the
//! style; they only pick one from [`Renderer::next_style`] when the caller
//! did not supply one.

use serde::{Deserialize, Serialize};

use crate::geometry::{Band, Polyline, Segment};
use crate::group::GeometryGroup;
use crate::types::Point2;

/// Per-primitive adjustments applied on top of a series style
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleHints {
    /// Multiplier for the style's line width (or marker size)
    pub width_scale: f64,
    /// Multiplier for the style's opacity
    pub alpha: f64,
}

impl Default for StyleHints {
    fn default() -> Self {
        Self {
            width_scale: 1.0,
            alpha: 1.0,
        }
    }
}

impl StyleHints {
    pub fn width(width_scale: f64) -> Self {
        Self {
            width_scale,
            ..Default::default()
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}

/// A drawing target
pub trait Renderer {
    /// Series style, opaque to the plotting layer
    type Style: Clone;

    /// Next style in the colour cycle
    fn next_style(&mut self) -> Self::Style;

    fn draw_segment(&mut self, segment: &Segment, style: &Self::Style, hints: StyleHints);

    fn draw_marker(&mut self, center: Point2, style: &Self::Style, hints: StyleHints);

    fn draw_polyline(&mut self, line: &Polyline, style: &Self::Style, hints: StyleHints);

    fn draw_band(&mut self, band: &Band, style: &Self::Style, hints: StyleHints);

    /// Register a drawn group so it can appear in the legend
    fn add_group(&mut self, group: GeometryGroup, style: Self::Style, hints: StyleHints);
}
