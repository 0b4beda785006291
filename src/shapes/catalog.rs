//! Fixed parametric outlines for every [`ShapeKind`], in local coordinates.
//!
//! Outlines live roughly in a 0..120 box with y pointing down. The generator
//! rescales them uniformly, so only proportions matter here.

use std::f32::consts::{PI, TAU};

use egui::{Pos2, pos2};
use kurbo::{Circle, Ellipse, RoundedRect, Shape as _};

use super::ShapeKind;
use crate::geometry::VectorPath;

const CURVE_TOLERANCE: f64 = 0.1;

pub(super) fn outline(kind: ShapeKind) -> VectorPath {
    match kind {
        ShapeKind::Rectangle => VectorPath::polygon(&[
            pos2(0.0, 0.0),
            pos2(120.0, 0.0),
            pos2(120.0, 80.0),
            pos2(0.0, 80.0),
        ]),
        ShapeKind::RoundedRectangle => VectorPath::from_bez_path(
            &RoundedRect::new(0.0, 0.0, 120.0, 80.0, 14.0).to_path(CURVE_TOLERANCE),
        ),
        ShapeKind::Circle => VectorPath::from_bez_path(
            &Circle::new((50.0, 50.0), 50.0).to_path(CURVE_TOLERANCE),
        ),
        ShapeKind::Ellipse => VectorPath::from_bez_path(
            &Ellipse::new((60.0, 40.0), (60.0, 40.0), 0.0).to_path(CURVE_TOLERANCE),
        ),
        ShapeKind::Triangle => {
            VectorPath::polygon(&[pos2(50.0, 0.0), pos2(100.0, 100.0), pos2(0.0, 100.0)])
        }
        ShapeKind::RightTriangle => {
            VectorPath::polygon(&[pos2(0.0, 0.0), pos2(0.0, 100.0), pos2(100.0, 100.0)])
        }
        ShapeKind::Diamond => VectorPath::polygon(&[
            pos2(50.0, 0.0),
            pos2(100.0, 50.0),
            pos2(50.0, 100.0),
            pos2(0.0, 50.0),
        ]),
        ShapeKind::Pentagon => VectorPath::polygon(&regular_polygon(5)),
        ShapeKind::Hexagon => VectorPath::polygon(&regular_polygon(6)),
        ShapeKind::Octagon => VectorPath::polygon(&regular_polygon(8)),
        ShapeKind::Parallelogram => VectorPath::polygon(&[
            pos2(25.0, 0.0),
            pos2(120.0, 0.0),
            pos2(95.0, 70.0),
            pos2(0.0, 70.0),
        ]),
        ShapeKind::Trapezoid => VectorPath::polygon(&[
            pos2(25.0, 0.0),
            pos2(95.0, 0.0),
            pos2(120.0, 70.0),
            pos2(0.0, 70.0),
        ]),
        ShapeKind::Star4 => VectorPath::polygon(&star(4, 0.35)),
        ShapeKind::Star5 => VectorPath::polygon(&star(5, 0.382)),
        ShapeKind::Star6 => VectorPath::polygon(&star(6, 0.5)),
        ShapeKind::Star8 => VectorPath::polygon(&star(8, 0.6)),
        ShapeKind::ArrowRight => VectorPath::polygon(&arrow_right()),
        ShapeKind::ArrowLeft => VectorPath::polygon(&map_points(&arrow_right(), |p| {
            pos2(100.0 - p.x, p.y)
        })),
        ShapeKind::ArrowUp => {
            VectorPath::polygon(&map_points(&arrow_right(), |p| pos2(p.y, 100.0 - p.x)))
        }
        ShapeKind::ArrowDown => VectorPath::polygon(&map_points(&arrow_right(), |p| pos2(p.y, p.x))),
        ShapeKind::DoubleArrow => VectorPath::polygon(&[
            pos2(0.0, 50.0),
            pos2(30.0, 10.0),
            pos2(30.0, 32.0),
            pos2(90.0, 32.0),
            pos2(90.0, 10.0),
            pos2(120.0, 50.0),
            pos2(90.0, 90.0),
            pos2(90.0, 68.0),
            pos2(30.0, 68.0),
            pos2(30.0, 90.0),
        ]),
        ShapeKind::SpeechBubble => speech_bubble(),
        ShapeKind::ThoughtBubble => thought_bubble(),
        ShapeKind::Heart => heart(),
        ShapeKind::Cross => VectorPath::polygon(&[
            pos2(35.0, 0.0),
            pos2(65.0, 0.0),
            pos2(65.0, 35.0),
            pos2(100.0, 35.0),
            pos2(100.0, 65.0),
            pos2(65.0, 65.0),
            pos2(65.0, 100.0),
            pos2(35.0, 100.0),
            pos2(35.0, 65.0),
            pos2(0.0, 65.0),
            pos2(0.0, 35.0),
            pos2(35.0, 35.0),
        ]),
    }
}

/// Regular polygon with a vertex pointing up, inscribed in a radius-50 circle
fn regular_polygon(sides: usize) -> Vec<Pos2> {
    (0..sides)
        .map(|i| {
            let angle = -PI / 2.0 + TAU * i as f32 / sides as f32;
            pos2(50.0 + 50.0 * angle.cos(), 50.0 + 50.0 * angle.sin())
        })
        .collect()
}

/// Star alternating between the outer radius and `inner_ratio` of it
fn star(points: usize, inner_ratio: f32) -> Vec<Pos2> {
    let count = points * 2;
    (0..count)
        .map(|i| {
            let radius = if i % 2 == 0 { 50.0 } else { 50.0 * inner_ratio };
            let angle = -PI / 2.0 + TAU * i as f32 / count as f32;
            pos2(50.0 + radius * angle.cos(), 50.0 + radius * angle.sin())
        })
        .collect()
}

fn arrow_right() -> Vec<Pos2> {
    vec![
        pos2(0.0, 30.0),
        pos2(60.0, 30.0),
        pos2(60.0, 0.0),
        pos2(100.0, 50.0),
        pos2(60.0, 100.0),
        pos2(60.0, 70.0),
        pos2(0.0, 70.0),
    ]
}

fn map_points(points: &[Pos2], f: impl Fn(Pos2) -> Pos2) -> Vec<Pos2> {
    points.iter().copied().map(f).collect()
}

fn speech_bubble() -> VectorPath {
    let mut path = VectorPath::new();
    path.move_to(pos2(14.0, 0.0))
        .line_to(pos2(106.0, 0.0))
        .quad_to(pos2(120.0, 0.0), pos2(120.0, 14.0))
        .line_to(pos2(120.0, 66.0))
        .quad_to(pos2(120.0, 80.0), pos2(106.0, 80.0))
        .line_to(pos2(50.0, 80.0))
        .line_to(pos2(26.0, 104.0))
        .line_to(pos2(32.0, 80.0))
        .line_to(pos2(14.0, 80.0))
        .quad_to(pos2(0.0, 80.0), pos2(0.0, 66.0))
        .line_to(pos2(0.0, 14.0))
        .quad_to(pos2(0.0, 0.0), pos2(14.0, 0.0))
        .close();
    path
}

/// Cloud outline of outward bumps around an ellipse, trailed by two small circles
fn thought_bubble() -> VectorPath {
    const BUMPS: usize = 9;
    let center = pos2(60.0, 40.0);
    let (rx, ry) = (56.0, 36.0);
    let on_ellipse = |angle: f32, scale: f32| {
        pos2(
            center.x + rx * scale * angle.cos(),
            center.y + ry * scale * angle.sin(),
        )
    };

    let mut path = VectorPath::new();
    path.move_to(on_ellipse(0.0, 1.0));
    for i in 0..BUMPS {
        let a0 = TAU * i as f32 / BUMPS as f32;
        let a1 = TAU * (i + 1) as f32 / BUMPS as f32;
        let ctrl = on_ellipse((a0 + a1) / 2.0, 1.35);
        path.quad_to(ctrl, on_ellipse(a1, 1.0));
    }
    path.close();

    path.extend(&VectorPath::from_bez_path(
        &Circle::new((22.0, 94.0), 8.0).to_path(CURVE_TOLERANCE),
    ));
    path.extend(&VectorPath::from_bez_path(
        &Circle::new((8.0, 110.0), 5.0).to_path(CURVE_TOLERANCE),
    ));
    path
}

fn heart() -> VectorPath {
    let mut path = VectorPath::new();
    path.move_to(pos2(50.0, 30.0))
        .cubic_to(pos2(50.0, 27.0), pos2(45.0, 15.0), pos2(25.0, 15.0))
        .cubic_to(pos2(0.0, 15.0), pos2(0.0, 42.5), pos2(0.0, 42.5))
        .cubic_to(pos2(0.0, 60.0), pos2(20.0, 77.0), pos2(50.0, 95.0))
        .cubic_to(pos2(80.0, 77.0), pos2(100.0, 60.0), pos2(100.0, 42.5))
        .cubic_to(pos2(100.0, 42.5), pos2(100.0, 15.0), pos2(75.0, 15.0))
        .cubic_to(pos2(60.0, 15.0), pos2(50.0, 27.0), pos2(50.0, 30.0))
        .close();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_geometry() {
        for kind in ShapeKind::ALL {
            let path = outline(kind);
            let bounds = path.bounds();
            assert!(!path.is_empty(), "{kind:?} has no commands");
            assert!(
                bounds.width() > 0.0 && bounds.height() > 0.0,
                "{kind:?} has degenerate bounds {bounds:?}"
            );
        }
    }

    #[test]
    fn test_regular_polygon_vertex_count() {
        assert_eq!(regular_polygon(6).len(), 6);
        assert_eq!(star(5, 0.4).len(), 10);
    }

    #[test]
    fn test_arrow_up_points_up() {
        let up = map_points(&arrow_right(), |p| pos2(p.y, 100.0 - p.x));
        let tip = up
            .iter()
            .copied()
            .min_by(|a, b| a.y.total_cmp(&b.y))
            .unwrap();
        assert_eq!(tip, pos2(50.0, 0.0));
    }
}
