//! Serializable vector geometry shared by shapes, icons and the rasterizer.
//!
//! Paths are stored as a flat list of [`PathCommand`]s in egui coordinates so
//! they round-trip through serde. Anything that needs curve math (bounds,
//! SVG path data, affine transforms) converts to a [`kurbo::BezPath`].

pub mod hit_testing;

use egui::{Pos2, Rect, Vec2, pos2};
use kurbo::{BezPath, PathEl, Shape as _};
use serde::{Deserialize, Serialize};

/// One segment of a vector path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathCommand {
    MoveTo { to: Pos2 },
    LineTo { to: Pos2 },
    QuadTo { ctrl: Pos2, to: Pos2 },
    CubicTo { ctrl1: Pos2, ctrl2: Pos2, to: Pos2 },
    Close,
}

/// A vector path made of move/line/curve commands
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VectorPath {
    commands: Vec<PathCommand>,
}

impl VectorPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, to: Pos2) -> &mut Self {
        self.commands.push(PathCommand::MoveTo { to });
        self
    }

    pub fn line_to(&mut self, to: Pos2) -> &mut Self {
        self.commands.push(PathCommand::LineTo { to });
        self
    }

    pub fn quad_to(&mut self, ctrl: Pos2, to: Pos2) -> &mut Self {
        self.commands.push(PathCommand::QuadTo { ctrl, to });
        self
    }

    pub fn cubic_to(&mut self, ctrl1: Pos2, ctrl2: Pos2, to: Pos2) -> &mut Self {
        self.commands.push(PathCommand::CubicTo { ctrl1, ctrl2, to });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Build a closed polygon through the given points
    pub fn polygon(points: &[Pos2]) -> Self {
        let mut path = Self::new();
        if let Some((first, rest)) = points.split_first() {
            path.move_to(*first);
            for point in rest {
                path.line_to(*point);
            }
            path.close();
        }
        path
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Append every command of `other` to this path
    pub fn extend(&mut self, other: &VectorPath) {
        self.commands.extend_from_slice(&other.commands);
    }

    /// Convert from a kurbo path
    pub fn from_bez_path(path: &BezPath) -> Self {
        let commands = path
            .elements()
            .iter()
            .map(|el| match *el {
                PathEl::MoveTo(p) => PathCommand::MoveTo { to: from_point(p) },
                PathEl::LineTo(p) => PathCommand::LineTo { to: from_point(p) },
                PathEl::QuadTo(c, p) => PathCommand::QuadTo {
                    ctrl: from_point(c),
                    to: from_point(p),
                },
                PathEl::CurveTo(c1, c2, p) => PathCommand::CubicTo {
                    ctrl1: from_point(c1),
                    ctrl2: from_point(c2),
                    to: from_point(p),
                },
                PathEl::ClosePath => PathCommand::Close,
            })
            .collect();
        Self { commands }
    }

    /// Convert to a kurbo path
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo { to } => path.move_to(to_point(to)),
                PathCommand::LineTo { to } => path.line_to(to_point(to)),
                PathCommand::QuadTo { ctrl, to } => path.quad_to(to_point(ctrl), to_point(to)),
                PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                    path.curve_to(to_point(ctrl1), to_point(ctrl2), to_point(to))
                }
                PathCommand::Close => path.close_path(),
            }
        }
        path
    }

    /// Tight bounding box of the path geometry (control points excluded)
    pub fn bounds(&self) -> Rect {
        if self.commands.is_empty() {
            return Rect::NOTHING;
        }
        from_kurbo_rect(self.to_bez_path().bounding_box())
    }

    /// Apply a placement to every point of the path
    pub fn placed(&self, placement: Placement) -> VectorPath {
        let commands = self
            .commands
            .iter()
            .map(|command| match *command {
                PathCommand::MoveTo { to } => PathCommand::MoveTo {
                    to: placement.apply(to),
                },
                PathCommand::LineTo { to } => PathCommand::LineTo {
                    to: placement.apply(to),
                },
                PathCommand::QuadTo { ctrl, to } => PathCommand::QuadTo {
                    ctrl: placement.apply(ctrl),
                    to: placement.apply(to),
                },
                PathCommand::CubicTo { ctrl1, ctrl2, to } => PathCommand::CubicTo {
                    ctrl1: placement.apply(ctrl1),
                    ctrl2: placement.apply(ctrl2),
                    to: placement.apply(to),
                },
                PathCommand::Close => PathCommand::Close,
            })
            .collect();
        VectorPath { commands }
    }

    /// Whether `pos` lies inside the filled area of the path (non-zero rule)
    pub fn contains(&self, pos: Pos2) -> bool {
        self.to_bez_path().winding(to_point(pos)) != 0
    }
}

/// Uniform scale followed by a translation, mapping local geometry onto the canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Pos2,
    pub scale: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position: Pos2::ZERO,
            scale: 1.0,
        }
    }
}

impl Placement {
    /// Placement that scales `local` so its longest side is `target` and centers it on `center`
    pub fn fit_centered(local: Rect, target: f32, center: Pos2) -> Self {
        let longest = local.width().max(local.height());
        let scale = if longest > 0.0 { target / longest } else { 1.0 };
        Self::centered(local, scale, center)
    }

    /// Placement with the given scale, centering `local` on `center`
    pub fn centered(local: Rect, scale: f32, center: Pos2) -> Self {
        let position = center - local.center().to_vec2() * scale;
        Self { position, scale }
    }

    pub fn apply(&self, local: Pos2) -> Pos2 {
        self.position + local.to_vec2() * self.scale
    }

    pub fn apply_rect(&self, local: Rect) -> Rect {
        Rect::from_min_max(self.apply(local.min), self.apply(local.max))
    }

    /// Map a canvas position back into local coordinates
    pub fn invert(&self, canvas: Pos2) -> Pos2 {
        if self.scale == 0.0 {
            return canvas;
        }
        ((canvas - self.position) / self.scale).to_pos2()
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

/// Calculate the bounding box for a set of points
pub fn calculate_bounds(points: &[Pos2], padding: f32) -> Rect {
    if points.is_empty() {
        return Rect::NOTHING;
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Rect::from_min_max(
        pos2(min_x - padding, min_y - padding),
        pos2(max_x + padding, max_y + padding),
    )
}

/// Union of a sequence of rectangles, or `Rect::NOTHING` when empty
pub fn union_rects(rects: impl IntoIterator<Item = Rect>) -> Rect {
    rects.into_iter().fold(Rect::NOTHING, |acc, rect| acc.union(rect))
}

pub fn to_point(pos: Pos2) -> kurbo::Point {
    kurbo::Point::new(pos.x as f64, pos.y as f64)
}

pub fn from_point(point: kurbo::Point) -> Pos2 {
    pos2(point.x as f32, point.y as f32)
}

pub fn from_kurbo_rect(rect: kurbo::Rect) -> Rect {
    Rect::from_min_max(
        pos2(rect.x0 as f32, rect.y0 as f32),
        pos2(rect.x1 as f32, rect.y1 as f32),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    #[test]
    fn test_polygon_bounds() {
        let path = VectorPath::polygon(&[pos2(1.0, 2.0), pos2(5.0, 2.0), pos2(3.0, 8.0)]);
        let bounds = path.bounds();
        assert_eq!(bounds.min, pos2(1.0, 2.0));
        assert_eq!(bounds.max, pos2(5.0, 8.0));
    }

    #[test]
    fn test_empty_path_has_no_bounds() {
        assert_eq!(VectorPath::new().bounds(), Rect::NOTHING);
    }

    #[test]
    fn test_fit_centered_scales_longest_side() {
        let local = Rect::from_min_max(pos2(0.0, 0.0), pos2(2.0, 1.0));
        let placement = Placement::fit_centered(local, 100.0, pos2(50.0, 50.0));
        let placed = placement.apply_rect(local);

        assert!((placed.width() - 100.0).abs() < 1e-4);
        assert!((placed.height() - 50.0).abs() < 1e-4);
        assert!((placed.center().x - 50.0).abs() < 1e-4);
        assert!((placed.center().y - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_placement_invert() {
        let mut placement = Placement {
            position: pos2(10.0, 20.0),
            scale: 4.0,
        };
        placement.translate(vec2(5.0, 0.0));
        let local = pos2(1.5, -2.0);
        let back = placement.invert(placement.apply(local));
        assert!((back - local).length() < 1e-5);
    }

    #[test]
    fn test_contains_uses_fill_area() {
        let square = VectorPath::polygon(&[
            pos2(0.0, 0.0),
            pos2(10.0, 0.0),
            pos2(10.0, 10.0),
            pos2(0.0, 10.0),
        ]);
        assert!(square.contains(pos2(5.0, 5.0)));
        assert!(!square.contains(pos2(15.0, 5.0)));
    }

    #[test]
    fn test_union_rects() {
        let a = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
        let b = Rect::from_min_max(pos2(4.0, -2.0), pos2(6.0, 0.5));
        let union = union_rects([a, b]);
        assert_eq!(union.min, pos2(0.0, -2.0));
        assert_eq!(union.max, pos2(6.0, 1.0));
        assert_eq!(union_rects(std::iter::empty()), Rect::NOTHING);
    }
}
