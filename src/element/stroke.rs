use egui::{Color32, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::{Element, ObjectHeader, ObjectStyle, common};
use crate::geometry::{calculate_bounds, hit_testing};

/// Freehand stroke representing a series of connected points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub header: ObjectHeader,
    points: Vec<Pos2>,
    style: ObjectStyle,
}

impl Stroke {
    /// Create a new stroke with the given properties
    pub fn new(points: Vec<Pos2>, thickness: f32, color: Color32) -> Self {
        Self {
            header: ObjectHeader::new(),
            points,
            style: ObjectStyle::outline(thickness, color),
        }
    }

    /// Get the points that make up this stroke
    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.style.stroke_color
    }

    pub fn thickness(&self) -> f32 {
        self.style.stroke_width
    }
}

impl Element for Stroke {
    fn header(&self) -> &ObjectHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut ObjectHeader {
        &mut self.header
    }

    fn element_type(&self) -> &'static str {
        "stroke"
    }

    fn style(&self) -> ObjectStyle {
        self.style
    }

    fn bounds(&self) -> Rect {
        calculate_bounds(&self.points, self.style.stroke_width / 2.0)
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        hit_testing::distance_to_polyline(pos, &self.points)
            <= common::pick_radius(self.style.stroke_width)
    }

    fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
        self.invalidate_texture();
    }
}
