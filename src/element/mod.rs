use std::fmt;

use egui::{Color32, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod common;
pub(crate) mod icon;
pub(crate) mod image;
pub(crate) mod line;
pub(crate) mod shape;
pub(crate) mod stroke;

pub use common::{HIT_SLOP, MIN_ELEMENT_SIZE};
pub use icon::Icon;
pub use image::{CompositeRaster, Image, RasterData};
pub use line::Line;
pub use shape::Shape;
pub use stroke::Stroke;

/// Stable identifier of a drawable object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(Uuid);

impl ObjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity and ordering shared by every object on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectHeader {
    pub id: ObjectId,
    /// Insertion order, used as z-index. Assigned by the canvas on insert.
    #[serde(default)]
    pub z_index: u64,
    /// Bumped on every content change, used for texture cache invalidation
    #[serde(skip)]
    pub version: u64,
}

impl ObjectHeader {
    pub fn new() -> Self {
        Self {
            id: ObjectId::new(),
            z_index: 0,
            version: 0,
        }
    }
}

impl Default for ObjectHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// Stroke and fill styling carried by every object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectStyle {
    pub stroke_width: f32,
    pub stroke_color: Color32,
    /// Fill color; its alpha is the fill alpha (0 = transparent)
    pub fill_color: Color32,
}

impl ObjectStyle {
    pub const NONE: Self = Self {
        stroke_width: 0.0,
        stroke_color: Color32::TRANSPARENT,
        fill_color: Color32::TRANSPARENT,
    };

    /// Outline-only style
    pub fn outline(width: f32, color: Color32) -> Self {
        Self {
            stroke_width: width,
            stroke_color: color,
            fill_color: Color32::TRANSPARENT,
        }
    }

    /// Opaque fill without an outline
    pub fn solid(color: Color32) -> Self {
        let [r, g, b, _] = color.to_srgba_unmultiplied();
        Self {
            stroke_width: 0.0,
            stroke_color: Color32::TRANSPARENT,
            fill_color: Color32::from_rgb(r, g, b),
        }
    }

    pub fn fill_alpha(&self) -> u8 {
        self.fill_color.a()
    }

    pub fn has_fill(&self) -> bool {
        self.fill_alpha() > 0
    }

    pub fn has_stroke(&self) -> bool {
        self.stroke_width > 0.0 && self.stroke_color.a() > 0
    }
}

impl Default for ObjectStyle {
    fn default() -> Self {
        Self::NONE
    }
}

/// Common trait that all canvas objects implement
pub trait Element {
    fn header(&self) -> &ObjectHeader;

    fn header_mut(&mut self) -> &mut ObjectHeader;

    /// Get the unique identifier for this element
    fn id(&self) -> ObjectId {
        self.header().id
    }

    /// Insertion order of this element on the canvas
    fn z_index(&self) -> u64 {
        self.header().z_index
    }

    /// Get the element type tag, as used in serialized snapshots
    fn element_type(&self) -> &'static str;

    fn style(&self) -> ObjectStyle;

    /// Axis-aligned box enclosing the untransformed geometry, stroke included
    fn bounds(&self) -> Rect;

    /// Test if the element contains the given canvas position
    fn hit_test(&self, pos: Pos2) -> bool;

    /// Translate the element by the given delta
    fn translate(&mut self, delta: Vec2);

    /// Whether selection and the eraser may target this element
    fn is_selectable(&self) -> bool {
        true
    }

    /// Get the current texture version for cache invalidation
    fn texture_version(&self) -> u64 {
        self.header().version
    }

    /// Invalidate the element's texture (called when element is modified)
    fn invalidate_texture(&mut self) {
        self.header_mut().version += 1;
    }
}

/// Every kind of object the canvas can hold. Array order on the canvas is z-order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawableObject {
    Stroke(Stroke),
    Shape(Shape),
    Line(Line),
    Icon(Icon),
    Image(Image),
    CompositeRaster(CompositeRaster),
}

impl DrawableObject {
    fn as_element(&self) -> &dyn Element {
        match self {
            Self::Stroke(s) => s,
            Self::Shape(s) => s,
            Self::Line(l) => l,
            Self::Icon(i) => i,
            Self::Image(i) => i,
            Self::CompositeRaster(c) => c,
        }
    }

    fn as_element_mut(&mut self) -> &mut dyn Element {
        match self {
            Self::Stroke(s) => s,
            Self::Shape(s) => s,
            Self::Line(l) => l,
            Self::Icon(i) => i,
            Self::Image(i) => i,
            Self::CompositeRaster(c) => c,
        }
    }

    pub fn is_raster(&self) -> bool {
        matches!(self, Self::Image(_) | Self::CompositeRaster(_))
    }

    pub fn set_z_index(&mut self, z_index: u64) {
        self.header_mut().z_index = z_index;
    }
}

impl Element for DrawableObject {
    fn header(&self) -> &ObjectHeader {
        self.as_element().header()
    }

    fn header_mut(&mut self) -> &mut ObjectHeader {
        self.as_element_mut().header_mut()
    }

    fn element_type(&self) -> &'static str {
        self.as_element().element_type()
    }

    fn style(&self) -> ObjectStyle {
        self.as_element().style()
    }

    fn bounds(&self) -> Rect {
        self.as_element().bounds()
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        self.as_element().hit_test(pos)
    }

    fn translate(&mut self, delta: Vec2) {
        self.as_element_mut().translate(delta)
    }

    fn is_selectable(&self) -> bool {
        self.as_element().is_selectable()
    }
}

impl From<Stroke> for DrawableObject {
    fn from(value: Stroke) -> Self {
        Self::Stroke(value)
    }
}

impl From<Shape> for DrawableObject {
    fn from(value: Shape) -> Self {
        Self::Shape(value)
    }
}

impl From<Line> for DrawableObject {
    fn from(value: Line) -> Self {
        Self::Line(value)
    }
}

impl From<Icon> for DrawableObject {
    fn from(value: Icon) -> Self {
        Self::Icon(value)
    }
}

impl From<Image> for DrawableObject {
    fn from(value: Image) -> Self {
        Self::Image(value)
    }
}

impl From<CompositeRaster> for DrawableObject {
    fn from(value: CompositeRaster) -> Self {
        Self::CompositeRaster(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_type_tags_match_serialized_tag() {
        let stroke: DrawableObject =
            Stroke::new(vec![pos2(0.0, 0.0), pos2(4.0, 4.0)], 2.0, Color32::BLACK).into();
        let json = serde_json::to_value(&stroke).unwrap();
        assert_eq!(json["type"], "stroke");
        assert_eq!(stroke.element_type(), "stroke");

        let line: DrawableObject =
            Line::new(pos2(0.0, 0.0), pos2(1.0, 0.0), ObjectStyle::outline(1.0, Color32::RED)).into();
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["type"], line.element_type());
    }

    #[test]
    fn test_solid_style_is_opaque_without_stroke() {
        let style = ObjectStyle::solid(Color32::from_rgba_unmultiplied(10, 20, 30, 40));
        assert_eq!(style.fill_alpha(), 255);
        assert_eq!(style.stroke_width, 0.0);
        assert!(!style.has_stroke());
    }

    #[test]
    fn test_invalidate_bumps_version() {
        let mut stroke: DrawableObject =
            Stroke::new(vec![pos2(0.0, 0.0)], 2.0, Color32::BLACK).into();
        let before = stroke.texture_version();
        stroke.translate(egui::vec2(1.0, 1.0));
        assert!(stroke.texture_version() > before);
    }
}
