//! Plotting entry points
//!
//! Each function computes statistics and geometry first, validates the
//! resulting group, and only then draws into the target. A failing call
//! leaves the target untouched.

use ndarray::ArrayView2;

use bizplots_stats::{
    compute_boxes_by_position, compute_ribbon_bands, select_sample_rows, BoxSamples,
    SampleRequest,
};

use crate::config::{QuantileConfig, RibbonConfig, SpaghettiConfig};
use crate::error::{PlotError, PlotResult};
use crate::geometry::{build_box_primitives, build_ribbon_primitives, build_spaghetti_primitives};
use crate::group::{GeometryGroup, QuantileGroup, RibbonGroup, SpaghettiGroup};
use crate::render::{Renderer, StyleHints};
use crate::types::Label;

/// Draw one quantile box per distinct position
///
/// `samples` is either a flat slice aligned with `positions` or a matrix
/// whose columns line up with `positions`.
pub fn plot_quantiles<R: Renderer>(
    target: &mut R,
    positions: &[f64],
    samples: BoxSamples<'_>,
    config: &QuantileConfig,
    style: Option<R::Style>,
    label: impl Into<Label>,
) -> PlotResult<QuantileGroup> {
    let boxes = compute_boxes_by_position(positions, samples, config.pct_inner, config.pct_outer)?;

    let mut group = QuantileGroup::new(label.into(), config.orientation, config.stroke);
    for stats in &boxes {
        group.push(
            config.orientation,
            build_box_primitives(stats, config.orientation),
        )?;
    }
    GeometryGroup::Quantiles(group.clone()).validate()?;

    let style = style.unwrap_or_else(|| target.next_style());
    let width = config.line_width;
    let outer = StyleHints::width(width * config.stroke.outer);
    let inner = StyleHints::width(width * config.stroke.inner);
    let marker = StyleHints::width(width * config.stroke.marker);

    for segment in &group.outer {
        target.draw_segment(segment, &style, outer);
    }
    for segment in &group.inner {
        target.draw_segment(segment, &style, inner);
    }
    for &center in &group.markers {
        target.draw_marker(center, &style, marker);
    }

    tracing::debug!(
        boxes = group.len(),
        orientation = config.orientation.name(),
        "plotted quantiles"
    );
    target.add_group(group.clone().into(), style, StyleHints::width(width));
    Ok(group)
}

/// Draw a subset of sample rows as individual curves
///
/// Rows of `y_rows` are samples, columns line up with `x`.
pub fn plot_spaghetti<R: Renderer>(
    target: &mut R,
    x: &[f64],
    y_rows: ArrayView2<'_, f64>,
    request: &SampleRequest,
    config: &SpaghettiConfig,
    style: Option<R::Style>,
    label: impl Into<Label>,
) -> PlotResult<SpaghettiGroup> {
    if y_rows.ncols() != x.len() {
        return Err(PlotError::ShapeMismatch {
            context: "spaghetti x/row length".to_string(),
            expected: x.len(),
            actual: y_rows.ncols(),
        });
    }

    let rows = select_sample_rows(y_rows.nrows(), request, config.seed)?;
    let group = SpaghettiGroup {
        label: label.into(),
        lines: build_spaghetti_primitives(x, y_rows, &rows)?,
    };
    GeometryGroup::Spaghetti(group.clone()).validate()?;

    let style = style.unwrap_or_else(|| target.next_style());
    let hints = StyleHints::width(config.line_width).with_alpha(config.alpha);
    for line in &group.lines {
        target.draw_polyline(line, &style, hints);
    }

    tracing::debug!(lines = group.lines.len(), rows = ?rows, "plotted spaghetti");
    target.add_group(group.clone().into(), style, hints);
    Ok(group)
}

/// Draw nested percentile ribbons, outermost first so inner ones sit on top
///
/// Rows of `samples` are draws, columns line up with `x`.
pub fn plot_ribbons<R: Renderer>(
    target: &mut R,
    x: &[f64],
    samples: ArrayView2<'_, f64>,
    config: &RibbonConfig,
    style: Option<R::Style>,
    label: impl Into<Label>,
) -> PlotResult<RibbonGroup> {
    if samples.ncols() != x.len() {
        return Err(PlotError::ShapeMismatch {
            context: "ribbon x/sample columns".to_string(),
            expected: x.len(),
            actual: samples.ncols(),
        });
    }

    let ribbons = compute_ribbon_bands(
        samples,
        config.num_ribbons,
        config.percentile_min,
        config.percentile_max,
    )?;
    let group = RibbonGroup {
        label: label.into(),
        bands: build_ribbon_primitives(x, &ribbons)?,
    };
    GeometryGroup::Ribbons(group.clone()).validate()?;

    let style = style.unwrap_or_else(|| target.next_style());
    let hints = StyleHints::default().with_alpha(config.alpha);
    for band in group.bands.iter().rev() {
        target.draw_band(band, &style, hints);
    }

    tracing::debug!(
        ribbons = group.bands.len(),
        percentile_min = config.percentile_min,
        percentile_max = config.percentile_max,
        "plotted ribbons"
    );
    target.add_group(group.clone().into(), style, hints);
    Ok(group)
}
