use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::{Element, ObjectHeader, ObjectStyle, common};
use crate::geometry::{calculate_bounds, hit_testing};

/// Straight line segment placed with the line tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub header: ObjectHeader,
    start: Pos2,
    end: Pos2,
    style: ObjectStyle,
}

impl Line {
    pub fn new(start: Pos2, end: Pos2, style: ObjectStyle) -> Self {
        Self {
            header: ObjectHeader::new(),
            start,
            end,
            style,
        }
    }

    pub fn start(&self) -> Pos2 {
        self.start
    }

    pub fn end(&self) -> Pos2 {
        self.end
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

impl Element for Line {
    fn header(&self) -> &ObjectHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut ObjectHeader {
        &mut self.header
    }

    fn element_type(&self) -> &'static str {
        "line"
    }

    fn style(&self) -> ObjectStyle {
        self.style
    }

    fn bounds(&self) -> Rect {
        calculate_bounds(&[self.start, self.end], self.style.stroke_width / 2.0)
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        hit_testing::distance_to_line_segment(pos, self.start, self.end)
            <= common::pick_radius(self.style.stroke_width)
    }

    fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
        self.invalidate_texture();
    }
}
