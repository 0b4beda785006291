use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::{Element, ObjectHeader, ObjectStyle, common};
use crate::geometry::{Placement, VectorPath};
use crate::shapes::ShapeKind;

/// Parametric shape from the shape catalog, placed on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub header: ObjectHeader,
    kind: ShapeKind,
    /// Geometry in the catalog's local coordinate space
    path: VectorPath,
    placement: Placement,
    style: ObjectStyle,
}

impl Shape {
    pub fn new(kind: ShapeKind, path: VectorPath, placement: Placement, style: ObjectStyle) -> Self {
        Self {
            header: ObjectHeader::new(),
            kind,
            path,
            placement,
            style,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn local_path(&self) -> &VectorPath {
        &self.path
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Path in canvas coordinates
    pub fn canvas_path(&self) -> VectorPath {
        self.path.placed(self.placement)
    }

    /// Bounds of the placed geometry without the stroke outline
    pub fn geometry_bounds(&self) -> Rect {
        self.placement.apply_rect(self.path.bounds())
    }
}

impl Element for Shape {
    fn header(&self) -> &ObjectHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut ObjectHeader {
        &mut self.header
    }

    fn element_type(&self) -> &'static str {
        "shape"
    }

    fn style(&self) -> ObjectStyle {
        self.style
    }

    fn bounds(&self) -> Rect {
        common::outline_bounds(self.geometry_bounds(), self.style.stroke_width)
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        if self.style.has_fill() {
            self.path.contains(self.placement.invert(pos))
        } else {
            self.bounds().contains(pos)
        }
    }

    fn translate(&mut self, delta: Vec2) {
        self.placement.translate(delta);
        self.invalidate_texture();
    }
}
