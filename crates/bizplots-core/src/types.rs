//! Common types for bizplots-core
//!
//! Points live in data coordinates. Orientation decides which geometric
//! axis carries the position and which carries the statistic value.

use serde::{Deserialize, Serialize};

/// A 2D point of f64 values
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Swap the two coordinates
    pub fn transpose(&self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point2 {
    fn from(arr: [f64; 2]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
        }
    }
}

/// Direction in which the statistic value varies
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Position along x, value along y
    #[default]
    Vertical,
    /// Position along y, value along x
    Horizontal,
}

impl Orientation {
    /// Place a (position, value) pair in x/y coordinates
    pub fn place(&self, position: f64, value: f64) -> Point2 {
        match self {
            Orientation::Vertical => Point2::new(position, value),
            Orientation::Horizontal => Point2::new(value, position),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Orientation::Vertical => "vertical",
            Orientation::Horizontal => "horizontal",
        }
    }
}

impl std::str::FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vertical" => Ok(Orientation::Vertical),
            "horizontal" => Ok(Orientation::Horizontal),
            other => Err(format!("unknown orientation: {other}")),
        }
    }
}

/// Legend label of a geometry group
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    /// Shown in the legend with this text
    Entry(String),
    /// Left out of the legend
    #[default]
    NoLegend,
}

impl Label {
    pub fn entry(text: impl Into<String>) -> Self {
        Label::Entry(text.into())
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Label::Entry(text) => Some(text),
            Label::NoLegend => None,
        }
    }

    pub fn is_shown(&self) -> bool {
        matches!(self, Label::Entry(_))
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Label::Entry(text.to_string())
    }
}

impl From<Option<String>> for Label {
    fn from(text: Option<String>) -> Self {
        text.map(Label::Entry).unwrap_or_default()
    }
}
