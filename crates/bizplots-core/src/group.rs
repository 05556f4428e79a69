//! Labelled geometry groups
//!
//! Each plotting call returns one group holding its primitives split by
//! role. Legend icons index into these role lists, so a labelled group
//! must never have an empty one.

use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};
use crate::geometry::{Band, BoxPrimitives, Polyline, Segment};
use crate::types::{Label, Orientation, Point2};

/// Line-width multipliers for the three box roles
///
/// These are style hints for renderers, not geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeScale {
    pub outer: f64,
    pub inner: f64,
    pub marker: f64,
}

impl Default for StrokeScale {
    fn default() -> Self {
        Self {
            outer: 0.8,
            inner: 1.8,
            marker: 1.5,
        }
    }
}

/// Quantile boxes split into thin lines, thick lines and markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantileGroup {
    pub label: Label,
    pub orientation: Orientation,
    pub stroke: StrokeScale,
    pub outer: Vec<Segment>,
    pub inner: Vec<Segment>,
    pub markers: Vec<Point2>,
}

impl QuantileGroup {
    pub fn new(label: Label, orientation: Orientation, stroke: StrokeScale) -> Self {
        Self {
            label,
            orientation,
            stroke,
            outer: Vec::new(),
            inner: Vec::new(),
            markers: Vec::new(),
        }
    }

    /// Add one box built with `orientation`
    pub fn push(&mut self, orientation: Orientation, prims: BoxPrimitives) -> PlotResult<()> {
        if orientation != self.orientation {
            return Err(PlotError::MixedOrientation {
                group: self.orientation,
                item: orientation,
            });
        }
        self.outer.push(prims.outer);
        self.inner.push(prims.inner);
        self.markers.push(prims.median);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

/// Individual sample curves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaghettiGroup {
    pub label: Label,
    pub lines: Vec<Polyline>,
}

/// Nested percentile bands, innermost first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RibbonGroup {
    pub label: Label,
    pub bands: Vec<Band>,
}

/// Kind of a geometry group, used to pick a legend handler
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupKind {
    Quantiles,
    Spaghetti,
    Ribbons,
}

/// Any group produced by a plotting call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GeometryGroup {
    Quantiles(QuantileGroup),
    Spaghetti(SpaghettiGroup),
    Ribbons(RibbonGroup),
}

impl GeometryGroup {
    pub fn kind(&self) -> GroupKind {
        match self {
            GeometryGroup::Quantiles(_) => GroupKind::Quantiles,
            GeometryGroup::Spaghetti(_) => GroupKind::Spaghetti,
            GeometryGroup::Ribbons(_) => GroupKind::Ribbons,
        }
    }

    pub fn label(&self) -> &Label {
        match self {
            GeometryGroup::Quantiles(g) => &g.label,
            GeometryGroup::Spaghetti(g) => &g.label,
            GeometryGroup::Ribbons(g) => &g.label,
        }
    }

    /// Every role list paired with its name
    fn role_sizes(&self) -> Vec<(&'static str, usize)> {
        match self {
            GeometryGroup::Quantiles(g) => vec![
                ("outer lines", g.outer.len()),
                ("inner lines", g.inner.len()),
                ("markers", g.markers.len()),
            ],
            GeometryGroup::Spaghetti(g) => vec![("lines", g.lines.len())],
            GeometryGroup::Ribbons(g) => vec![("bands", g.bands.len())],
        }
    }

    /// Check a labelled group has something to show in the legend
    pub fn validate(&self) -> PlotResult<()> {
        let Label::Entry(text) = self.label() else {
            return Ok(());
        };
        match self.role_sizes().into_iter().find(|(_, n)| *n == 0) {
            Some((role, _)) => Err(PlotError::EmptyGroup {
                label: text.clone(),
                role,
            }),
            None => Ok(()),
        }
    }
}

impl From<QuantileGroup> for GeometryGroup {
    fn from(group: QuantileGroup) -> Self {
        GeometryGroup::Quantiles(group)
    }
}

impl From<SpaghettiGroup> for GeometryGroup {
    fn from(group: SpaghettiGroup) -> Self {
        GeometryGroup::Spaghetti(group)
    }
}

impl From<RibbonGroup> for GeometryGroup {
    fn from(group: RibbonGroup) -> Self {
        GeometryGroup::Ribbons(group)
    }
}
