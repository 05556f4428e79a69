//! bizplots-core - Summary plots for business time series
//!
//! This crate turns sample matrices into plot geometry and draws it:
//!
//! - **Quantile boxes**: thin outer line, thick inner line and a median
//!   marker per position
//! - **Spaghetti**: a random or explicit subset of sample curves
//! - **Ribbons**: nested percentile bands around the median
//! - **Legends**: small representative icons per geometry group
//! - **Currency labels**: `$1.23k`-style tick formatting
//!
//! # Architecture
//!
//! Statistics come from `bizplots-stats`. The geometry builders here are
//! pure functions producing primitives in data coordinates, grouped by
//! role. Drawing goes through the [`render::Renderer`] trait; the crate
//! ships an SVG backend in [`svg`].
//!
//! ```
//! use bizplots_core::{plot_quantiles, QuantileConfig, SvgFigure};
//! use bizplots_stats::BoxSamples;
//!
//! let mut fig = SvgFigure::default();
//! let group = plot_quantiles(
//!     &mut fig,
//!     &[1.0, 1.0, 1.0],
//!     BoxSamples::Flat(&[10.0, 20.0, 30.0]),
//!     &QuantileConfig::default(),
//!     None,
//!     "revenue",
//! )
//! .unwrap();
//! assert_eq!(group.markers[0].y, 20.0);
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod geometry;
pub mod group;
pub mod legend;
pub mod plot;
pub mod render;
pub mod svg;
pub mod types;

pub use config::{FigureConfig, PlotConfig, QuantileConfig, RibbonConfig, SpaghettiConfig};
pub use error::{ConfigError, ConfigResult, PlotError, PlotResult, RenderError, RenderResult};
pub use format::{as_currency, human_readable, CurrencyFormat, CurrencyFormatter, SignPolicy, TickFormatter};
pub use geometry::{
    build_box_primitives, build_ribbon_primitives, build_spaghetti_primitives, Band, BoxPrimitives,
    Polyline, Segment,
};
pub use group::{GeometryGroup, GroupKind, QuantileGroup, RibbonGroup, SpaghettiGroup, StrokeScale};
pub use legend::{HandlerMap, IconBox, IconRole, IconShape, IconSynthesizer};
pub use plot::{plot_quantiles, plot_ribbons, plot_spaghetti};
pub use render::{Renderer, StyleHints};
pub use svg::{SvgFigure, SvgStyle};
pub use types::{Label, Orientation, Point2};
