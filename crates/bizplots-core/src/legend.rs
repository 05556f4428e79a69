//! Legend icon synthesis
//!
//! A legend entry shows a small picture that stands for a whole group.
//! Synthesizers turn a group and an icon box into a handful of shapes in
//! icon coordinates; the renderer colours them by role.

use std::collections::HashMap;
use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};
use crate::group::{GeometryGroup, GroupKind};
use crate::types::Point2;

/// Space reserved for one legend icon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IconBox {
    pub xdescent: f64,
    pub ydescent: f64,
    pub width: f64,
    pub height: f64,
}

impl IconBox {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            xdescent: 0.0,
            ydescent: 0.0,
            width,
            height,
        }
    }
}

/// What a shape in an icon stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconRole {
    OuterLine,
    InnerLine,
    Marker,
    Line,
    /// Band at this index of the group (0 = innermost)
    Band(usize),
}

/// A shape in icon coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IconShape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        role: IconRole,
    },
    Circle {
        center: Point2,
        radius: f64,
        role: IconRole,
    },
    Polyline {
        points: Vec<Point2>,
        role: IconRole,
    },
}

impl IconShape {
    pub fn role(&self) -> IconRole {
        match self {
            IconShape::Rect { role, .. }
            | IconShape::Circle { role, .. }
            | IconShape::Polyline { role, .. } => *role,
        }
    }
}

/// Produces representative legend shapes for a group
pub trait IconSynthesizer: Send + Sync {
    fn synthesize(&self, group: &GeometryGroup, icon: IconBox) -> PlotResult<Vec<IconShape>>;
}

fn empty(group: &GeometryGroup, role: &'static str) -> PlotError {
    PlotError::EmptyGroup {
        label: group.label().text().unwrap_or_default().to_string(),
        role,
    }
}

/// Thin bar, thick bar and a circle, like one quantile box lying down
#[derive(Debug, Clone, Copy, Default)]
pub struct QuantileIcon;

impl IconSynthesizer for QuantileIcon {
    fn synthesize(&self, group: &GeometryGroup, icon: IconBox) -> PlotResult<Vec<IconShape>> {
        let GeometryGroup::Quantiles(quantiles) = group else {
            return Err(empty(group, "quantile boxes"));
        };
        if quantiles.outer.is_empty() {
            return Err(empty(group, "outer lines"));
        }
        if quantiles.markers.is_empty() {
            return Err(empty(group, "markers"));
        }

        let IconBox {
            xdescent,
            ydescent,
            width,
            height,
        } = icon;
        let mid = ydescent + height / 2.0;

        let thin = height / 20.0;
        let thick = height / 4.0;
        Ok(vec![
            IconShape::Rect {
                x: xdescent,
                y: mid - thin / 2.0,
                width,
                height: thin,
                role: IconRole::OuterLine,
            },
            IconShape::Rect {
                x: xdescent + width * 0.25,
                y: mid - thick / 2.0,
                width: width * 0.5,
                height: thick,
                role: IconRole::InnerLine,
            },
            IconShape::Circle {
                center: Point2::new(xdescent + width / 2.0, mid),
                radius: height / 3.0,
                role: IconRole::Marker,
            },
        ])
    }
}

/// Three phase-shifted sine waves
#[derive(Debug, Clone, Copy)]
pub struct SpaghettiIcon {
    pub samples: usize,
}

impl Default for SpaghettiIcon {
    fn default() -> Self {
        Self { samples: 50 }
    }
}

impl IconSynthesizer for SpaghettiIcon {
    fn synthesize(&self, group: &GeometryGroup, icon: IconBox) -> PlotResult<Vec<IconShape>> {
        match group {
            GeometryGroup::Spaghetti(g) if !g.lines.is_empty() => {}
            _ => return Err(empty(group, "lines")),
        }

        let IconBox {
            xdescent,
            width,
            height,
            ..
        } = icon;
        let mid = height / 2.0;
        let amp = height / 3.0;
        let steps = self.samples.max(2);
        let xs: Vec<f64> = (0..steps)
            .map(|i| xdescent + width * i as f64 / (steps - 1) as f64)
            .collect();

        let wave = |shift: f64| IconShape::Polyline {
            points: xs
                .iter()
                .map(|&x| Point2::new(x, mid + amp * (((x + shift) / width) * TAU).sin()))
                .collect(),
            role: IconRole::Line,
        };

        Ok(vec![wave(0.0), wave(-width / 3.0), wave(width / 3.0)])
    }
}

/// Nested rectangles, outermost first
#[derive(Debug, Clone, Copy, Default)]
pub struct RibbonIcon;

impl IconSynthesizer for RibbonIcon {
    fn synthesize(&self, group: &GeometryGroup, icon: IconBox) -> PlotResult<Vec<IconShape>> {
        let count = match group {
            GeometryGroup::Ribbons(g) if !g.bands.is_empty() => g.bands.len(),
            _ => return Err(empty(group, "bands")),
        };

        let step = icon.height / 2.0 / count as f64;
        Ok((0..count)
            .map(|i| {
                let y = -icon.ydescent + i as f64 * step;
                IconShape::Rect {
                    x: icon.xdescent,
                    y,
                    width: icon.width,
                    height: icon.height - 2.0 * y,
                    role: IconRole::Band(count - 1 - i),
                }
            })
            .collect())
    }
}

/// Legend handler per group kind
pub struct HandlerMap {
    handlers: HashMap<GroupKind, Box<dyn IconSynthesizer>>,
}

impl HandlerMap {
    /// Replace the handler for one group kind
    pub fn with_handler(mut self, kind: GroupKind, handler: impl IconSynthesizer + 'static) -> Self {
        self.handlers.insert(kind, Box::new(handler));
        self
    }

    /// Icon shapes for `group`
    pub fn synthesize(&self, group: &GeometryGroup, icon: IconBox) -> PlotResult<Vec<IconShape>> {
        match self.handlers.get(&group.kind()) {
            Some(handler) => handler.synthesize(group, icon),
            None => Ok(Vec::new()),
        }
    }
}

impl Default for HandlerMap {
    fn default() -> Self {
        let mut handlers: HashMap<GroupKind, Box<dyn IconSynthesizer>> = HashMap::new();
        handlers.insert(GroupKind::Quantiles, Box::new(QuantileIcon));
        handlers.insert(GroupKind::Spaghetti, Box::new(SpaghettiIcon::default()));
        handlers.insert(GroupKind::Ribbons, Box::new(RibbonIcon));
        Self { handlers }
    }
}

impl std::fmt::Debug for HandlerMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerMap")
            .field("kinds", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Band, BoxPrimitives, Polyline, Segment};
    use crate::group::{QuantileGroup, RibbonGroup, SpaghettiGroup, StrokeScale};
    use crate::types::{Label, Orientation};

    fn quantiles() -> GeometryGroup {
        let mut g = QuantileGroup::new(Label::entry("q"), Orientation::Vertical, StrokeScale::default());
        g.push(
            Orientation::Vertical,
            BoxPrimitives {
                outer: Segment::new(Point2::new(0.0, 0.0), Point2::new(0.0, 4.0)),
                inner: Segment::new(Point2::new(0.0, 1.0), Point2::new(0.0, 3.0)),
                median: Point2::new(0.0, 2.0),
            },
        )
        .unwrap();
        g.into()
    }

    fn ribbons(n: usize) -> GeometryGroup {
        let band = Band {
            x: vec![0.0, 1.0],
            lower: vec![0.0, 0.0],
            upper: vec![1.0, 1.0],
        };
        RibbonGroup {
            label: Label::entry("r"),
            bands: vec![band; n],
        }
        .into()
    }

    #[test]
    fn test_quantile_icon_layout() {
        let shapes = QuantileIcon
            .synthesize(&quantiles(), IconBox::new(40.0, 20.0))
            .unwrap();
        assert_eq!(shapes.len(), 3);

        match &shapes[0] {
            IconShape::Rect { x, y, width, height, role } => {
                assert_eq!(*role, IconRole::OuterLine);
                assert_eq!(*x, 0.0);
                assert_eq!(*width, 40.0);
                assert!((height - 1.0).abs() < 1e-12);
                assert!((y - 9.5).abs() < 1e-12);
            }
            other => panic!("unexpected shape {other:?}"),
        }
        match &shapes[1] {
            IconShape::Rect { x, width, height, .. } => {
                assert_eq!(*x, 10.0);
                assert_eq!(*width, 20.0);
                assert_eq!(*height, 5.0);
            }
            other => panic!("unexpected shape {other:?}"),
        }
        match &shapes[2] {
            IconShape::Circle { center, radius, role } => {
                assert_eq!(*center, Point2::new(20.0, 10.0));
                assert!((radius - 20.0 / 3.0).abs() < 1e-12);
                assert_eq!(*role, IconRole::Marker);
            }
            other => panic!("unexpected shape {other:?}"),
        }
    }

    #[test]
    fn test_quantile_icon_requires_members() {
        let group: GeometryGroup =
            QuantileGroup::new(Label::entry("q"), Orientation::Vertical, StrokeScale::default())
                .into();
        let err = QuantileIcon
            .synthesize(&group, IconBox::new(40.0, 20.0))
            .unwrap_err();
        assert!(matches!(err, PlotError::EmptyGroup { .. }));
    }

    #[test]
    fn test_spaghetti_icon_waves() {
        let group: GeometryGroup = SpaghettiGroup {
            label: Label::entry("s"),
            lines: vec![Polyline {
                points: vec![Point2::new(0.0, 0.0)],
            }],
        }
        .into();
        let shapes = SpaghettiIcon::default()
            .synthesize(&group, IconBox::new(30.0, 12.0))
            .unwrap();

        assert_eq!(shapes.len(), 3);
        for shape in &shapes {
            let IconShape::Polyline { points, role } = shape else {
                panic!("expected polyline");
            };
            assert_eq!(*role, IconRole::Line);
            assert_eq!(points.len(), 50);
            assert_eq!(points[0].x, 0.0);
            assert!((points[49].x - 30.0).abs() < 1e-12);
            assert!(points.iter().all(|p| p.y >= 2.0 - 1e-9 && p.y <= 10.0 + 1e-9));
        }
        // Unshifted wave starts on the midline
        let IconShape::Polyline { points, .. } = &shapes[0] else {
            unreachable!()
        };
        assert!((points[0].y - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_ribbon_icon_nesting() {
        let shapes = RibbonIcon
            .synthesize(&ribbons(2), IconBox::new(40.0, 20.0))
            .unwrap();
        assert_eq!(shapes.len(), 2);

        let heights: Vec<f64> = shapes
            .iter()
            .map(|s| match s {
                IconShape::Rect { height, .. } => *height,
                _ => f64::NAN,
            })
            .collect();
        assert_eq!(heights, vec![20.0, 10.0]);
        assert_eq!(shapes[0].role(), IconRole::Band(1));
        assert_eq!(shapes[1].role(), IconRole::Band(0));
    }

    #[test]
    fn test_ribbon_icon_descent_origin() {
        let icon = IconBox {
            xdescent: 0.0,
            ydescent: 2.0,
            width: 10.0,
            height: 8.0,
        };
        let shapes = RibbonIcon.synthesize(&ribbons(1), icon).unwrap();
        assert_eq!(
            shapes[0],
            IconShape::Rect {
                x: 0.0,
                y: -2.0,
                width: 10.0,
                height: 12.0,
                role: IconRole::Band(0),
            }
        );
    }

    #[test]
    fn test_handler_map_dispatch() {
        let map = HandlerMap::default();
        assert_eq!(
            map.synthesize(&quantiles(), IconBox::new(10.0, 10.0))
                .unwrap()
                .len(),
            3
        );
        assert_eq!(
            map.synthesize(&ribbons(3), IconBox::new(10.0, 10.0))
                .unwrap()
                .len(),
            3
        );
    }

    #[test]
    fn test_handler_map_override() {
        struct Blank;
        impl IconSynthesizer for Blank {
            fn synthesize(&self, _: &GeometryGroup, _: IconBox) -> PlotResult<Vec<IconShape>> {
                Ok(Vec::new())
            }
        }

        let map = HandlerMap::default().with_handler(GroupKind::Ribbons, Blank);
        assert!(map
            .synthesize(&ribbons(2), IconBox::new(10.0, 10.0))
            .unwrap()
            .is_empty());
    }
}
