//! Shape generator: turns a [`ShapeKind`] into a placed [`Shape`] object.

mod catalog;

use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};

use crate::config::FillMode;
use crate::element::{ObjectStyle, Shape};
use crate::geometry::{Placement, VectorPath};

/// Every shape the generator knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    RoundedRectangle,
    Circle,
    Ellipse,
    Triangle,
    RightTriangle,
    Diamond,
    Pentagon,
    Hexagon,
    Octagon,
    Parallelogram,
    Trapezoid,
    Star4,
    Star5,
    Star6,
    Star8,
    ArrowRight,
    ArrowLeft,
    ArrowUp,
    ArrowDown,
    DoubleArrow,
    SpeechBubble,
    ThoughtBubble,
    Heart,
    Cross,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 25] = [
        Self::Rectangle,
        Self::RoundedRectangle,
        Self::Circle,
        Self::Ellipse,
        Self::Triangle,
        Self::RightTriangle,
        Self::Diamond,
        Self::Pentagon,
        Self::Hexagon,
        Self::Octagon,
        Self::Parallelogram,
        Self::Trapezoid,
        Self::Star4,
        Self::Star5,
        Self::Star6,
        Self::Star8,
        Self::ArrowRight,
        Self::ArrowLeft,
        Self::ArrowUp,
        Self::ArrowDown,
        Self::DoubleArrow,
        Self::SpeechBubble,
        Self::ThoughtBubble,
        Self::Heart,
        Self::Cross,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Rectangle => "Rectangle",
            Self::RoundedRectangle => "Rounded rectangle",
            Self::Circle => "Circle",
            Self::Ellipse => "Ellipse",
            Self::Triangle => "Triangle",
            Self::RightTriangle => "Right triangle",
            Self::Diamond => "Diamond",
            Self::Pentagon => "Pentagon",
            Self::Hexagon => "Hexagon",
            Self::Octagon => "Octagon",
            Self::Parallelogram => "Parallelogram",
            Self::Trapezoid => "Trapezoid",
            Self::Star4 => "4-point star",
            Self::Star5 => "5-point star",
            Self::Star6 => "6-point star",
            Self::Star8 => "8-point star",
            Self::ArrowRight => "Arrow right",
            Self::ArrowLeft => "Arrow left",
            Self::ArrowUp => "Arrow up",
            Self::ArrowDown => "Arrow down",
            Self::DoubleArrow => "Double arrow",
            Self::SpeechBubble => "Speech bubble",
            Self::ThoughtBubble => "Thought bubble",
            Self::Heart => "Heart",
            Self::Cross => "Cross",
        }
    }

    /// Local outline of this shape before placement
    pub fn outline(self) -> VectorPath {
        catalog::outline(self)
    }
}

/// Style a new shape gets under the given fill mode
pub fn shape_style(fill_mode: FillMode, stroke_width: f32, color: Color32) -> ObjectStyle {
    match fill_mode {
        FillMode::Regular => ObjectStyle::outline(stroke_width, color),
        FillMode::Solid => ObjectStyle::solid(color),
    }
}

/// Build a shape scaled so its longest side is `target_size`, centered on `center`
pub fn build_shape(
    kind: ShapeKind,
    fill_mode: FillMode,
    stroke_width: f32,
    color: Color32,
    center: Pos2,
    target_size: f32,
) -> Shape {
    let path = kind.outline();
    let placement = Placement::fit_centered(path.bounds(), target_size, center);
    let style = shape_style(fill_mode, stroke_width, color);
    log::debug!("Generated {} at {:?} (scale {:.3})", kind.label(), center, placement.scale);
    Shape::new(kind, path, placement, style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use egui::pos2;

    #[test]
    fn test_regular_shape_is_outlined() {
        let color = Color32::from_rgb(0x02, 0x06, 0x17);
        let shape = build_shape(
            ShapeKind::Rectangle,
            FillMode::Regular,
            3.0,
            color,
            pos2(200.0, 200.0),
            160.0,
        );
        assert_eq!(shape.style().fill_alpha(), 0);
        assert_eq!(shape.style().stroke_width, 3.0);
        assert_eq!(shape.style().stroke_color, color);
    }

    #[test]
    fn test_solid_shape_has_no_stroke() {
        let shape = build_shape(
            ShapeKind::Star5,
            FillMode::Solid,
            3.0,
            Color32::RED,
            pos2(100.0, 100.0),
            160.0,
        );
        assert!(shape.style().fill_alpha() > 0);
        assert_eq!(shape.style().stroke_width, 0.0);
    }

    #[test]
    fn test_shapes_are_scaled_and_centered() {
        let center = pos2(300.0, 250.0);
        for kind in ShapeKind::ALL {
            let shape = build_shape(kind, FillMode::Solid, 0.0, Color32::BLACK, center, 160.0);
            let bounds = shape.geometry_bounds();
            let longest = bounds.width().max(bounds.height());
            assert!((longest - 160.0).abs() < 0.5, "{kind:?} longest side {longest}");
            assert!((bounds.center() - center).length() < 0.5, "{kind:?} not centered");
        }
    }
}
