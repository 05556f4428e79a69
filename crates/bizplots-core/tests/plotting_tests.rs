//! Plotting integration tests against a recording renderer

use bizplots_core::{
    as_currency, plot_quantiles, plot_ribbons, plot_spaghetti, Band, CurrencyFormat,
    GeometryGroup, HandlerMap, IconBox, IconShape, Label, Orientation, PlotConfig, PlotError,
    Point2, Polyline, QuantileConfig, Renderer, RibbonConfig, Segment, SignPolicy,
    SpaghettiConfig, StyleHints,
};
use bizplots_stats::{BoxSamples, SampleRequest};
use ndarray::Array2;
use proptest::prelude::*;
use rstest::rstest;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Segment(Segment, f64),
    Marker(Point2, f64),
    Polyline(usize),
    Band(f64),
    Group(String),
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
    styles_taken: usize,
}

impl Renderer for Recorder {
    type Style = usize;

    fn next_style(&mut self) -> usize {
        self.styles_taken += 1;
        self.styles_taken
    }

    fn draw_segment(&mut self, segment: &Segment, _style: &usize, hints: StyleHints) {
        self.calls.push(Call::Segment(*segment, hints.width_scale));
    }

    fn draw_marker(&mut self, center: Point2, _style: &usize, hints: StyleHints) {
        self.calls.push(Call::Marker(center, hints.width_scale));
    }

    fn draw_polyline(&mut self, line: &Polyline, _style: &usize, _hints: StyleHints) {
        self.calls.push(Call::Polyline(line.len()));
    }

    fn draw_band(&mut self, band: &Band, _style: &usize, _hints: StyleHints) {
        self.calls.push(Call::Band(band.upper[0] - band.lower[0]));
    }

    fn add_group(&mut self, group: GeometryGroup, _style: usize, _hints: StyleHints) {
        let name = group.label().text().unwrap_or("<none>").to_string();
        self.calls.push(Call::Group(name));
    }
}

fn quantile_samples() -> (Vec<f64>, Vec<f64>) {
    let mut positions = Vec::new();
    let mut values = Vec::new();
    for pos in [1.0, 2.0, 3.0] {
        for i in 0..=20 {
            positions.push(pos);
            values.push(pos * 10.0 + i as f64);
        }
    }
    (positions, values)
}

// === Quantiles ===

#[test]
fn test_quantile_stroke_scales_reach_renderer() {
    let (positions, values) = quantile_samples();
    let mut target = Recorder::default();
    let config = QuantileConfig::default();
    plot_quantiles(
        &mut target,
        &positions,
        BoxSamples::Flat(&values),
        &config,
        None,
        "boxes",
    )
    .unwrap();

    let widths: Vec<f64> = target
        .calls
        .iter()
        .filter_map(|c| match c {
            Call::Segment(_, w) | Call::Marker(_, w) => Some(*w),
            _ => None,
        })
        .collect();
    assert_eq!(widths.len(), 9);
    assert!((widths[0] - 1.5 * 0.8).abs() < 1e-12);
    assert!((widths[3] - 1.5 * 1.8).abs() < 1e-12);
    assert!((widths[6] - 1.5 * 1.5).abs() < 1e-12);
    assert_eq!(target.calls.last(), Some(&Call::Group("boxes".to_string())));
    assert_eq!(target.styles_taken, 1);
}

#[test]
fn test_labelled_empty_quantiles_fail() {
    let mut target = Recorder::default();
    let err = plot_quantiles(
        &mut target,
        &[],
        BoxSamples::Flat(&[]),
        &QuantileConfig::default(),
        None,
        "nothing",
    )
    .unwrap_err();
    assert!(matches!(err, PlotError::EmptyGroup { .. }));
    assert!(target.calls.is_empty());
}

#[test]
fn test_unlabelled_empty_quantiles_succeed() {
    let mut target = Recorder::default();
    let group = plot_quantiles(
        &mut target,
        &[],
        BoxSamples::Flat(&[]),
        &QuantileConfig::default(),
        None,
        Label::NoLegend,
    )
    .unwrap();
    assert!(group.is_empty());
    assert_eq!(target.calls, vec![Call::Group("<none>".to_string())]);
}

#[test]
fn test_explicit_style_skips_cycle() {
    let (positions, values) = quantile_samples();
    let mut target = Recorder::default();
    plot_quantiles(
        &mut target,
        &positions,
        BoxSamples::Flat(&values),
        &QuantileConfig::default(),
        Some(99),
        Label::NoLegend,
    )
    .unwrap();
    assert_eq!(target.styles_taken, 0);
}

// === Spaghetti ===

#[rstest]
#[case(SampleRequest::Count(4), 4)]
#[case(SampleRequest::Indices(vec![0, 0, 7]), 3)]
#[case(SampleRequest::Count(8), 8)]
fn test_spaghetti_line_count(#[case] request: SampleRequest, #[case] expected: usize) {
    let rows = Array2::from_shape_fn((8, 5), |(i, j)| (i + j) as f64);
    let x: Vec<f64> = (0..5).map(|j| j as f64).collect();
    let mut target = Recorder::default();
    let group = plot_spaghetti(
        &mut target,
        &x,
        rows.view(),
        &request,
        &SpaghettiConfig::default(),
        None,
        "paths",
    )
    .unwrap();

    assert_eq!(group.lines.len(), expected);
    let polylines = target
        .calls
        .iter()
        .filter(|c| matches!(c, Call::Polyline(5)))
        .count();
    assert_eq!(polylines, expected);
}

#[test]
fn test_spaghetti_out_of_bounds_index() {
    let rows = Array2::<f64>::zeros((3, 2));
    let mut target = Recorder::default();
    let err = plot_spaghetti(
        &mut target,
        &[0.0, 1.0],
        rows.view(),
        &SampleRequest::Indices(vec![1, 3]),
        &SpaghettiConfig::default(),
        None,
        "paths",
    )
    .unwrap_err();
    assert!(matches!(err, PlotError::Stats(_)));
    assert!(target.calls.is_empty());
}

#[test]
fn test_spaghetti_seed_reproducible() {
    let rows = Array2::from_shape_fn((50, 2), |(i, _)| i as f64);
    let config = SpaghettiConfig {
        seed: Some(2024),
        ..Default::default()
    };
    let draw = || {
        let mut target = Recorder::default();
        plot_spaghetti(
            &mut target,
            &[0.0, 1.0],
            rows.view(),
            &SampleRequest::Count(6),
            &config,
            None,
            Label::NoLegend,
        )
        .unwrap()
    };
    assert_eq!(draw(), draw());
}

// === Ribbons ===

#[test]
fn test_ribbons_drawn_outermost_first() {
    let samples = Array2::from_shape_fn((101, 2), |(i, _)| i as f64);
    let mut target = Recorder::default();
    plot_ribbons(
        &mut target,
        &[0.0, 1.0],
        samples.view(),
        &RibbonConfig::default(),
        None,
        "range",
    )
    .unwrap();

    let widths: Vec<f64> = target
        .calls
        .iter()
        .filter_map(|c| match c {
            Call::Band(w) => Some(*w),
            _ => None,
        })
        .collect();
    assert_eq!(widths.len(), 3);
    assert!(widths[0] >= widths[1] && widths[1] >= widths[2]);
}

#[test]
fn test_ribbons_reject_bad_ladder() {
    let samples = Array2::<f64>::zeros((4, 2));
    let config = RibbonConfig {
        percentile_min: 60.0,
        ..Default::default()
    };
    let mut target = Recorder::default();
    let err = plot_ribbons(
        &mut target,
        &[0.0, 1.0],
        samples.view(),
        &config,
        None,
        "range",
    )
    .unwrap_err();
    assert!(matches!(err, PlotError::Stats(_)));
}

// === Legend icons ===

#[test]
fn test_ribbon_icon_uses_descent_origin() {
    let samples = Array2::from_shape_fn((11, 2), |(i, _)| i as f64);
    let mut target = Recorder::default();
    let group = plot_ribbons(
        &mut target,
        &[0.0, 1.0],
        samples.view(),
        &RibbonConfig::default(),
        None,
        "range",
    )
    .unwrap();

    let icon = IconBox {
        xdescent: 0.0,
        ydescent: 3.0,
        width: 30.0,
        height: 12.0,
    };
    let shapes = HandlerMap::default()
        .synthesize(&group.into(), icon)
        .unwrap();
    assert_eq!(shapes.len(), 3);
    match &shapes[0] {
        IconShape::Rect { y, height, .. } => {
            assert!((y + 3.0).abs() < 1e-12);
            assert!((height - 18.0).abs() < 1e-12);
        }
        other => panic!("expected rect, got {other:?}"),
    }
}

// === Currency ===

#[rstest]
#[case(-50.0, Some(0), SignPolicy::NegativeOnly, false, "-$50")]
#[case(50.0, Some(0), SignPolicy::Always, false, "+$50")]
#[case(1234.5, Some(2), SignPolicy::SpaceForPositive, true, " $1.23k")]
#[case(2_500_000.0, Some(1), SignPolicy::NegativeOnly, true, "$2.5m")]
#[case(0.0, Some(2), SignPolicy::NegativeOnly, true, "$0.00")]
#[case(-12345.678, Some(2), SignPolicy::NegativeOnly, false, "-$12,345.68")]
fn test_currency_cases(
    #[case] value: f64,
    #[case] decimals: Option<usize>,
    #[case] sign: SignPolicy,
    #[case] human: bool,
    #[case] expected: &str,
) {
    let format = CurrencyFormat::default()
        .with_decimals(decimals)
        .with_sign(sign)
        .with_human_readable(human);
    assert_eq!(as_currency(value, &format), expected);
}

// === Config ===

#[test]
fn test_config_drives_orientation() {
    let config = PlotConfig::from_toml(
        r#"
[quantiles]
orientation = "horizontal"
"#,
    )
    .unwrap();
    config.validate().unwrap();

    let (positions, values) = quantile_samples();
    let mut target = Recorder::default();
    let group = plot_quantiles(
        &mut target,
        &positions,
        BoxSamples::Flat(&values),
        &config.quantiles,
        None,
        Label::NoLegend,
    )
    .unwrap();
    assert_eq!(group.orientation, Orientation::Horizontal);
    assert_eq!(group.markers[0].y, 1.0);
}

// === Properties ===

proptest! {
    #[test]
    fn prop_horizontal_is_transpose_of_vertical(
        values in prop::collection::vec(-1e6f64..1e6, 1..40),
        pos in -100.0f64..100.0,
    ) {
        let positions = vec![pos; values.len()];
        let build = |orientation| {
            let config = QuantileConfig { orientation, ..Default::default() };
            let mut target = Recorder::default();
            plot_quantiles(
                &mut target,
                &positions,
                BoxSamples::Flat(&values),
                &config,
                None,
                Label::NoLegend,
            )
            .unwrap()
        };
        let v = build(Orientation::Vertical);
        let h = build(Orientation::Horizontal);

        prop_assert_eq!(v.outer[0].transpose(), h.outer[0]);
        prop_assert_eq!(v.inner[0].transpose(), h.inner[0]);
        prop_assert_eq!(v.markers[0].transpose(), h.markers[0]);
    }

    #[test]
    fn prop_currency_sign_matches_value(value in -1e15f64..1e15) {
        let format = CurrencyFormat::default().with_sign(SignPolicy::Always);
        let label = as_currency(value, &format);
        let expected = if value.is_sign_negative() { '-' } else { '+' };
        prop_assert_eq!(label.chars().next(), Some(expected));
        prop_assert_eq!(label.chars().nth(1), Some('$'));
    }

    #[test]
    fn prop_quantile_icon_stays_in_box(w in 4.0f64..100.0, h in 4.0f64..100.0) {
        let (positions, values) = quantile_samples();
        let mut target = Recorder::default();
        let group = plot_quantiles(
            &mut target,
            &positions,
            BoxSamples::Flat(&values),
            &QuantileConfig::default(),
            None,
            "boxes",
        )
        .unwrap();
        let shapes = HandlerMap::default()
            .synthesize(&group.into(), IconBox::new(w, h))
            .unwrap();

        for shape in shapes {
            match shape {
                IconShape::Rect { x, y, width, height, .. } => {
                    prop_assert!(x >= 0.0 && x + width <= w + 1e-9);
                    prop_assert!(y >= 0.0 && y + height <= h + 1e-9);
                }
                IconShape::Circle { center, radius, .. } => {
                    prop_assert!(center.y - radius >= -1e-9);
                    prop_assert!(center.y + radius <= h + 1e-9);
                }
                IconShape::Polyline { .. } => {}
            }
        }
    }
}
