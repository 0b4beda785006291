use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::{Element, ObjectHeader, ObjectStyle};

/// PNG-encoded pixels with their pixel dimensions
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterData {
    #[serde(with = "png_base64")]
    png: Vec<u8>,
    width: u32,
    height: u32,
}

// Image bytes are noisy in logs, only print the length
impl std::fmt::Debug for RasterData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterData")
            .field("png_len", &self.png.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl RasterData {
    pub fn new(png: Vec<u8>, width: u32, height: u32) -> Self {
        Self { png, width, height }
    }

    pub fn png(&self) -> &[u8] {
        &self.png
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

mod png_base64 {
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded.as_bytes()).map_err(D::Error::custom)
    }
}

/// Bitmap image imported by the user or restored from a raster snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub header: ObjectHeader,
    raster: RasterData,
    position: Pos2,
    size: Vec2,
    /// Background images restored from a raster snapshot are not selectable
    #[serde(default = "default_selectable")]
    selectable: bool,
}

fn default_selectable() -> bool {
    true
}

impl Image {
    pub fn new(raster: RasterData, position: Pos2, size: Vec2) -> Self {
        Self {
            header: ObjectHeader::new(),
            raster,
            position,
            size,
            selectable: true,
        }
    }

    /// Non-editable image locked in place behind everything else
    pub fn background(raster: RasterData, position: Pos2, size: Vec2) -> Self {
        Self {
            selectable: false,
            ..Self::new(raster, position, size)
        }
    }

    pub fn raster(&self) -> &RasterData {
        &self.raster
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }
}

impl Element for Image {
    fn header(&self) -> &ObjectHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut ObjectHeader {
        &mut self.header
    }

    fn element_type(&self) -> &'static str {
        "image"
    }

    fn style(&self) -> ObjectStyle {
        ObjectStyle::NONE
    }

    fn bounds(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        self.bounds().contains(pos)
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
        // No need to invalidate texture for translation
    }

    fn is_selectable(&self) -> bool {
        self.selectable
    }
}

/// Raster produced by the eraser: the visual result of the objects it replaced
/// with the erase path subtracted. Never becomes vector geometry again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeRaster {
    pub header: ObjectHeader,
    raster: RasterData,
    position: Pos2,
    size: Vec2,
    /// Number of objects merged into this raster
    #[serde(default)]
    merged_count: usize,
}

impl CompositeRaster {
    /// Place a composite so that it covers exactly `bounds`
    pub fn new(raster: RasterData, bounds: Rect, merged_count: usize) -> Self {
        Self {
            header: ObjectHeader::new(),
            raster,
            position: bounds.min,
            size: bounds.size(),
            merged_count,
        }
    }

    pub fn raster(&self) -> &RasterData {
        &self.raster
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn merged_count(&self) -> usize {
        self.merged_count
    }
}

impl Element for CompositeRaster {
    fn header(&self) -> &ObjectHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut ObjectHeader {
        &mut self.header
    }

    fn element_type(&self) -> &'static str {
        "composite_raster"
    }

    fn style(&self) -> ObjectStyle {
        ObjectStyle::NONE
    }

    fn bounds(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        self.bounds().contains(pos)
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}
