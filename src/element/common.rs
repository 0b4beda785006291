use egui::Rect;

// Common constants for all element types
pub const MIN_ELEMENT_SIZE: f32 = 2.0;

/// Minimum pick distance for thin elements such as strokes and lines
pub const HIT_SLOP: f32 = 4.0;

/// Inflate bounds by half the stroke width so the outline is fully enclosed
pub(crate) fn outline_bounds(geometry: Rect, stroke_width: f32) -> Rect {
    if geometry == Rect::NOTHING {
        return geometry;
    }
    geometry.expand(stroke_width.max(0.0) / 2.0)
}

/// Pick radius for a stroked element of the given width
pub(crate) fn pick_radius(stroke_width: f32) -> f32 {
    (stroke_width / 2.0).max(HIT_SLOP)
}
