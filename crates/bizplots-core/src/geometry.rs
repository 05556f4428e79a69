//! Geometry primitives built from extracted statistics
//!
//! Everything here is plain data in data coordinates. Styling is left to
//! the renderer.

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use bizplots_stats::{QuantileBox, RibbonBands, StatsError};

use crate::error::{PlotError, PlotResult};
use crate::types::{Orientation, Point2};

/// A straight line between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    pub fn transpose(&self) -> Self {
        Self {
            start: self.start.transpose(),
            end: self.end.transpose(),
        }
    }
}

/// An open sequence of points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Point2>,
}

impl Polyline {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Shaded region between two curves over a shared x vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub x: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl Band {
    /// Closed outline: along the lower curve, back along the upper one
    pub fn outline(&self) -> Vec<Point2> {
        let forward = self.x.iter().zip(&self.lower).map(|(&x, &y)| Point2::new(x, y));
        let backward = self
            .x
            .iter()
            .zip(&self.upper)
            .rev()
            .map(|(&x, &y)| Point2::new(x, y));
        forward.chain(backward).collect()
    }
}

/// The three primitives of one quantile box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxPrimitives {
    pub outer: Segment,
    pub inner: Segment,
    pub median: Point2,
}

impl BoxPrimitives {
    pub fn transpose(&self) -> Self {
        Self {
            outer: self.outer.transpose(),
            inner: self.inner.transpose(),
            median: self.median.transpose(),
        }
    }
}

/// Build the outer segment, inner segment and median marker of a box
pub fn build_box_primitives(stats: &QuantileBox, orientation: Orientation) -> BoxPrimitives {
    let pos = stats.position;
    BoxPrimitives {
        outer: Segment::new(
            orientation.place(pos, stats.outer.low),
            orientation.place(pos, stats.outer.high),
        ),
        inner: Segment::new(
            orientation.place(pos, stats.inner.low),
            orientation.place(pos, stats.inner.high),
        ),
        median: orientation.place(pos, stats.median),
    }
}

/// Build one band per ribbon, innermost first
pub fn build_ribbon_primitives(x: &[f64], ribbons: &RibbonBands) -> PlotResult<Vec<Band>> {
    ribbons
        .iter()
        .map(|band| -> PlotResult<Band> {
            for curve in [&band.lower, &band.upper] {
                if curve.len() != x.len() {
                    return Err(PlotError::ShapeMismatch {
                        context: "ribbon x/curve".to_string(),
                        expected: x.len(),
                        actual: curve.len(),
                    });
                }
            }
            Ok(Band {
                x: x.to_vec(),
                lower: band.lower.clone(),
                upper: band.upper.clone(),
            })
        })
        .collect()
}

/// Build one polyline per selected row, in selection order
pub fn build_spaghetti_primitives(
    x: &[f64],
    y_rows: ArrayView2<'_, f64>,
    indices: &[usize],
) -> PlotResult<Vec<Polyline>> {
    if y_rows.ncols() != x.len() {
        return Err(PlotError::ShapeMismatch {
            context: "spaghetti x/row length".to_string(),
            expected: x.len(),
            actual: y_rows.ncols(),
        });
    }

    indices
        .iter()
        .map(|&index| -> PlotResult<Polyline> {
            if index >= y_rows.nrows() {
                return Err(StatsError::OutOfBounds {
                    index,
                    len: y_rows.nrows(),
                }
                .into());
            }
            let points = x
                .iter()
                .zip(y_rows.row(index))
                .map(|(&x, &y)| Point2::new(x, y))
                .collect();
            Ok(Polyline { points })
        })
        .collect()
}
