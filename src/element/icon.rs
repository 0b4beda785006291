use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::{Element, ObjectHeader, ObjectStyle, common};
use crate::geometry::{Placement, VectorPath, union_rects};

/// Imported vector icon: all sub-paths of the source grouped into one object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Icon {
    pub header: ObjectHeader,
    /// Asset path the icon was fetched from
    source: String,
    paths: Vec<VectorPath>,
    placement: Placement,
    style: ObjectStyle,
}

impl Icon {
    pub fn new(
        source: impl Into<String>,
        paths: Vec<VectorPath>,
        placement: Placement,
        style: ObjectStyle,
    ) -> Self {
        Self {
            header: ObjectHeader::new(),
            source: source.into(),
            paths,
            placement,
            style,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn paths(&self) -> &[VectorPath] {
        &self.paths
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Sub-paths merged into a single path in canvas coordinates
    pub fn canvas_path(&self) -> VectorPath {
        let mut merged = VectorPath::new();
        for path in &self.paths {
            merged.extend(&path.placed(self.placement));
        }
        merged
    }

    pub fn local_bounds(&self) -> Rect {
        union_rects(self.paths.iter().map(VectorPath::bounds))
    }
}

impl Element for Icon {
    fn header(&self) -> &ObjectHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut ObjectHeader {
        &mut self.header
    }

    fn element_type(&self) -> &'static str {
        "icon"
    }

    fn style(&self) -> ObjectStyle {
        self.style
    }

    fn bounds(&self) -> Rect {
        let local = self.local_bounds();
        if local == Rect::NOTHING {
            return local;
        }
        common::outline_bounds(self.placement.apply_rect(local), self.style.stroke_width)
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        self.bounds().contains(pos)
    }

    fn translate(&mut self, delta: Vec2) {
        self.placement.translate(delta);
        self.invalidate_texture();
    }
}
