//! SVG backend
//!
//! `SvgFigure` records primitives in data coordinates and hands them to a
//! plotters `SVGBackend` only when rendered, so autoscaling sees every
//! series.

use std::error::Error;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::FigureConfig;
use crate::error::{RenderError, RenderResult};
use crate::format::TickFormatter;
use crate::geometry::{Band, Polyline, Segment};
use crate::group::GeometryGroup;
use crate::legend::{HandlerMap, IconBox, IconRole, IconShape};
use crate::render::{Renderer, StyleHints};
use crate::types::Point2;

/// The tab10 qualitative colour cycle
pub const TAB10: [[u8; 3]; 10] = [
    [0x1f, 0x77, 0xb4],
    [0xff, 0x7f, 0x0e],
    [0x2c, 0xa0, 0x2c],
    [0xd6, 0x27, 0x28],
    [0x94, 0x67, 0xbd],
    [0x8c, 0x56, 0x4b],
    [0xe3, 0x77, 0xc2],
    [0x7f, 0x7f, 0x7f],
    [0xbc, 0xbd, 0x22],
    [0x17, 0xbe, 0xcf],
];

/// Relative padding added around the data bounds
const PAD_FRACTION: f64 = 0.05;

/// Base marker radius in pixels, before the width scale
const MARKER_RADIUS: f64 = 3.0;

const FONT: &str = "sans-serif";

/// Style of one SVG series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvgStyle {
    /// RGB stroke and fill colour
    pub color: [u8; 3],
    /// Multiplier applied to every stroke width in the series
    pub line_width: f64,
    pub alpha: f64,
    pub marker_face: [u8; 3],
}

impl SvgStyle {
    pub fn new(color: [u8; 3]) -> Self {
        Self {
            color,
            line_width: 1.0,
            alpha: 1.0,
            marker_face: [0xff, 0xff, 0xff],
        }
    }

    fn stroke(&self, width: f64, opacity: f64) -> ShapeStyle {
        rgb(self.color).mix(opacity).stroke_width(pixels(width))
    }

    fn fill(&self, opacity: f64) -> ShapeStyle {
        rgb(self.color).mix(opacity).filled()
    }
}

fn rgb([r, g, b]: [u8; 3]) -> RGBColor {
    RGBColor(r, g, b)
}

/// Whole pixels, never thinner than one
fn pixels(width: f64) -> u32 {
    width.round().max(1.0) as u32
}

#[derive(Debug, Clone)]
enum Element {
    Segment(Segment),
    Marker(Point2),
    Polyline(Polyline),
    Band(Band),
}

#[derive(Debug, Clone)]
struct Drawn {
    element: Element,
    style: SvgStyle,
    hints: StyleHints,
}

/// Axis-aligned data bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    fn from_points(points: impl IntoIterator<Item = Point2>) -> Option<Self> {
        points
            .into_iter()
            .filter(|p| p.x.is_finite() && p.y.is_finite())
            .fold(None, |acc: Option<Bounds>, p| {
                Some(match acc {
                    None => Bounds {
                        x_min: p.x,
                        x_max: p.x,
                        y_min: p.y,
                        y_max: p.y,
                    },
                    Some(b) => Bounds {
                        x_min: b.x_min.min(p.x),
                        x_max: b.x_max.max(p.x),
                        y_min: b.y_min.min(p.y),
                        y_max: b.y_max.max(p.y),
                    },
                })
            })
    }

    /// Widen by `fraction` of the span on each side
    ///
    /// A zero span is widened by half a unit instead.
    fn padded(&self, fraction: f64) -> Self {
        let pad = |lo: f64, hi: f64| {
            let span = hi - lo;
            if span > 0.0 {
                (lo - span * fraction, hi + span * fraction)
            } else {
                (lo - 0.5, hi + 0.5)
            }
        };
        let (x_min, x_max) = pad(self.x_min, self.x_max);
        let (y_min, y_max) = pad(self.y_min, self.y_max);
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }
}

/// One labelled legend row, icons already synthesized
struct LegendRow<'a> {
    text: &'a str,
    shapes: Vec<IconShape>,
    style: &'a SvgStyle,
    hints: &'a StyleHints,
}

/// An SVG figure
pub struct SvgFigure {
    config: FigureConfig,
    title: Option<String>,
    cycle_index: usize,
    drawn: Vec<Drawn>,
    legend: Vec<(GeometryGroup, SvgStyle, StyleHints)>,
    handlers: HandlerMap,
    y_formatter: Option<Box<dyn TickFormatter>>,
}

impl SvgFigure {
    pub fn new(config: FigureConfig) -> Self {
        Self {
            config,
            title: None,
            cycle_index: 0,
            drawn: Vec::new(),
            legend: Vec::new(),
            handlers: HandlerMap::default(),
            y_formatter: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_handlers(mut self, handlers: HandlerMap) -> Self {
        self.handlers = handlers;
        self
    }

    /// Label y ticks with `formatter` instead of plain numbers
    pub fn with_y_formatter(mut self, formatter: impl TickFormatter + 'static) -> Self {
        self.y_formatter = Some(Box::new(formatter));
        self
    }

    /// Number of primitives drawn so far
    pub fn primitive_count(&self) -> usize {
        self.drawn.len()
    }

    /// Data bounds before padding
    pub fn data_bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.drawn.iter().flat_map(|d| element_points(&d.element)))
    }

    /// Render the SVG document
    pub fn render(&self) -> RenderResult<String> {
        let (width, height, margin) = (self.config.width, self.config.height, self.config.margin);
        if width <= 2 * margin || height <= 2 * margin {
            return Err(RenderError::InvalidSize {
                width,
                height,
                margin,
            });
        }
        let bounds = self.data_bounds().ok_or(RenderError::NoData)?;
        let rows = self.legend_rows()?;

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
            self.draw(&root, bounds.padded(PAD_FRACTION), &rows)
                .map_err(|e| RenderError::Backend(e.to_string()))?;
        }
        Ok(svg)
    }

    /// Render and write to `path`
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        let svg = self.render()?;
        std::fs::write(path, svg).map_err(|e| RenderError::Write {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "wrote svg figure");
        Ok(())
    }

    /// Synthesize icons for every labelled group
    fn legend_rows(&self) -> RenderResult<Vec<LegendRow<'_>>> {
        let icon = IconBox::new(self.config.icon_width, self.config.icon_height);
        self.legend
            .iter()
            .filter_map(|(group, style, hints)| {
                group.label().text().map(|text| (text, group, style, hints))
            })
            .map(|(text, group, style, hints)| {
                let shapes = self
                    .handlers
                    .synthesize(group, icon)
                    .map_err(|e| RenderError::Legend {
                        label: text.to_string(),
                        message: e.to_string(),
                    })?;
                Ok::<_, RenderError>(LegendRow {
                    text,
                    shapes,
                    style,
                    hints,
                })
            })
            .collect()
    }

    fn draw(
        &self,
        root: &DrawingArea<SVGBackend<'_>, Shift>,
        bounds: Bounds,
        rows: &[LegendRow<'_>],
    ) -> Result<(), Box<dyn Error>> {
        root.fill(&WHITE)?;

        let mut builder = ChartBuilder::on(root);
        builder
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(self.config.margin);
        if let Some(title) = &self.title {
            builder.caption(title, (FONT, 16));
        }
        let mut chart = builder
            .build_cartesian_2d(bounds.x_min..bounds.x_max, bounds.y_min..bounds.y_max)?;

        let y_label = |value: &f64| match &self.y_formatter {
            Some(formatter) => formatter.format_tick(*value),
            None => format!("{value:.2}"),
        };
        chart
            .configure_mesh()
            .y_labels(self.config.y_ticks)
            .y_label_formatter(&y_label)
            .draw()?;

        for drawn in &self.drawn {
            let style = &drawn.style;
            let width = style.line_width * drawn.hints.width_scale;
            let opacity = style.alpha * drawn.hints.alpha;

            match &drawn.element {
                Element::Segment(s) => {
                    chart.draw_series(std::iter::once(PathElement::new(
                        vec![(s.start.x, s.start.y), (s.end.x, s.end.y)],
                        style.stroke(width, opacity),
                    )))?;
                }
                Element::Marker(p) => {
                    let radius = pixels(MARKER_RADIUS * drawn.hints.width_scale);
                    let face = rgb(style.marker_face).mix(opacity).filled();
                    let edge = style.stroke(style.line_width, opacity);
                    chart.draw_series([
                        Circle::new((p.x, p.y), radius, face),
                        Circle::new((p.x, p.y), radius, edge),
                    ])?;
                }
                Element::Polyline(line) => {
                    chart.draw_series(LineSeries::new(
                        line.points.iter().map(|p| (p.x, p.y)),
                        style.stroke(width, opacity),
                    ))?;
                }
                Element::Band(band) => {
                    let outline: Vec<(f64, f64)> =
                        band.outline().into_iter().map(|p| (p.x, p.y)).collect();
                    chart.draw_series(std::iter::once(Polygon::new(
                        outline,
                        style.fill(opacity),
                    )))?;
                }
            }
        }

        let (x_range, y_range) = chart.plotting_area().get_pixel_range();
        draw_legend(root, (x_range.start + 8, y_range.start + 8), &self.config, rows)?;

        root.present()?;
        Ok(())
    }

    fn record(&mut self, element: Element, style: &SvgStyle, hints: StyleHints) {
        self.drawn.push(Drawn {
            element,
            style: style.clone(),
            hints,
        });
    }
}

impl Default for SvgFigure {
    fn default() -> Self {
        Self::new(FigureConfig::default())
    }
}

impl std::fmt::Debug for SvgFigure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgFigure")
            .field("config", &self.config)
            .field("primitives", &self.drawn.len())
            .field("legend_entries", &self.legend.len())
            .finish()
    }
}

impl Renderer for SvgFigure {
    type Style = SvgStyle;

    fn next_style(&mut self) -> SvgStyle {
        let color = TAB10[self.cycle_index % TAB10.len()];
        self.cycle_index += 1;
        SvgStyle::new(color)
    }

    fn draw_segment(&mut self, segment: &Segment, style: &SvgStyle, hints: StyleHints) {
        self.record(Element::Segment(*segment), style, hints);
    }

    fn draw_marker(&mut self, center: Point2, style: &SvgStyle, hints: StyleHints) {
        self.record(Element::Marker(center), style, hints);
    }

    fn draw_polyline(&mut self, line: &Polyline, style: &SvgStyle, hints: StyleHints) {
        self.record(Element::Polyline(line.clone()), style, hints);
    }

    fn draw_band(&mut self, band: &Band, style: &SvgStyle, hints: StyleHints) {
        self.record(Element::Band(band.clone()), style, hints);
    }

    fn add_group(&mut self, group: GeometryGroup, style: SvgStyle, hints: StyleHints) {
        self.legend.push((group, style, hints));
    }
}

fn element_points(element: &Element) -> Vec<Point2> {
    match element {
        Element::Segment(s) => vec![s.start, s.end],
        Element::Marker(p) => vec![*p],
        Element::Polyline(line) => line.points.clone(),
        Element::Band(band) => band.outline(),
    }
}

/// Draw legend rows in pixels, starting at the top-left `corner`
fn draw_legend(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    corner: (i32, i32),
    config: &FigureConfig,
    rows: &[LegendRow<'_>],
) -> Result<(), Box<dyn Error>> {
    let (icon_w, icon_h) = (config.icon_width, config.icon_height);
    let row_h = icon_h + 6.0;

    for (i, row) in rows.iter().enumerate() {
        // Icon shapes have their origin at the bottom-left, y up
        let origin = (
            corner.0 as f64,
            corner.1 as f64 + i as f64 * row_h + icon_h,
        );
        for shape in &row.shapes {
            draw_icon_shape(root, shape, origin, row.style, row.hints)?;
        }
        let text_at = (
            (origin.0 + icon_w + 6.0).round() as i32,
            (origin.1 - icon_h / 2.0 - 6.0).round() as i32,
        );
        root.draw(&Text::new(row.text, text_at, (FONT, 11).into_font()))?;
    }
    Ok(())
}

fn draw_icon_shape(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    shape: &IconShape,
    origin: (f64, f64),
    style: &SvgStyle,
    hints: &StyleHints,
) -> Result<(), Box<dyn Error>> {
    let opacity = style.alpha * hints.alpha;
    let to_px = |x: f64, y: f64| ((origin.0 + x).round() as i32, (origin.1 - y).round() as i32);

    match shape {
        IconShape::Rect {
            x,
            y,
            width,
            height,
            role,
        } => {
            let fill_opacity = match role {
                IconRole::Band(_) => opacity,
                _ => style.alpha,
            };
            root.draw(&Rectangle::new(
                [to_px(*x, y + height), to_px(x + width, *y)],
                style.fill(fill_opacity),
            ))?;
        }
        IconShape::Circle { center, radius, .. } => {
            let at = to_px(center.x, center.y);
            let radius = pixels(*radius);
            root.draw(&Circle::new(at, radius, rgb(style.marker_face).filled()))?;
            root.draw(&Circle::new(at, radius, style.stroke(style.line_width, 1.0)))?;
        }
        IconShape::Polyline { points, .. } => {
            root.draw(&PathElement::new(
                points.iter().map(|p| to_px(p.x, p.y)).collect::<Vec<_>>(),
                style.stroke(style.line_width, opacity),
            ))?;
        }
    }
    Ok(())
}
