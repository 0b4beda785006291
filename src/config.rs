use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::shapes::ShapeKind;

/// Default outline color for shapes and lines (#020617)
pub const DEFAULT_STROKE_COLOR: Color32 = Color32::from_rgb(0x02, 0x06, 0x17);

/// Engine tuning knobs. Everything has a sensible default so old saved
/// configs keep loading when fields are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Width of the eraser path in canvas units
    pub eraser_width: f32,
    /// Longest side of a newly generated shape
    pub shape_target_size: f32,
    /// Width of a newly imported icon
    pub icon_target_width: f32,
    /// Imported images larger than this (either side) are scaled down
    pub max_image_dimension: u32,
    /// Minimum seconds between two persisted canvas snapshots
    pub autosave_interval_secs: f64,
    /// Seconds a container size must be stable before the canvas is resized
    pub resize_debounce_secs: f64,
    /// Pixels per canvas unit when rasterizing (eraser composites, textures)
    pub raster_scale: f32,
    /// Optional cap on in-memory history entries; `None` keeps everything
    pub max_history: Option<usize>,
    /// Base URL of the icon listing endpoint
    pub asset_base_url: String,
    pub background: Color32,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            eraser_width: 20.0,
            shape_target_size: 160.0,
            icon_target_width: 120.0,
            max_image_dimension: 512,
            autosave_interval_secs: 2.0,
            resize_debounce_secs: 0.15,
            raster_scale: 2.0,
            max_history: None,
            asset_base_url: "http://localhost:8080/api".to_owned(),
            background: Color32::WHITE,
        }
    }
}

/// Global shape fill toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    /// Transparent fill, visible outline
    #[default]
    Regular,
    /// Opaque fill, no outline
    Solid,
}

/// Tool-agnostic style parameters, kept across tool switches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSettings {
    pub stroke_width: f32,
    pub stroke_color: Color32,
    pub fill_mode: FillMode,
    pub shape_kind: ShapeKind,
    pub icon_path: Option<String>,
    /// Keep every n-th pencil sample; 1 keeps all of them
    pub decimation: u32,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            stroke_width: 3.0,
            stroke_color: DEFAULT_STROKE_COLOR,
            fill_mode: FillMode::Regular,
            shape_kind: ShapeKind::Rectangle,
            icon_path: None,
            decimation: 2,
        }
    }
}

/// Rendering style requested from the image generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleType {
    #[default]
    Photorealistic,
    Illustration,
    Anime,
    Watercolor,
    Sketch,
}

impl StyleType {
    pub const ALL: [StyleType; 5] = [
        Self::Photorealistic,
        Self::Illustration,
        Self::Anime,
        Self::Watercolor,
        Self::Sketch,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Photorealistic => "Photorealistic",
            Self::Illustration => "Illustration",
            Self::Anime => "Anime",
            Self::Watercolor => "Watercolor",
            Self::Sketch => "Sketch",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    #[default]
    FullColor,
    Monochrome,
    Pastel,
}

impl ColorMode {
    pub const ALL: [ColorMode; 3] = [Self::FullColor, Self::Monochrome, Self::Pastel];

    pub fn label(self) -> &'static str {
        match self {
            Self::FullColor => "Full color",
            Self::Monochrome => "Monochrome",
            Self::Pastel => "Pastel",
        }
    }
}

/// Settings read by the generation-request collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub style_type: StyleType,
    pub color_mode: ColorMode,
    /// 0..=100
    pub creativity: u8,
    /// 0..=100
    pub detail: u8,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            style_type: StyleType::default(),
            color_mode: ColorMode::default(),
            creativity: 50,
            detail: 50,
        }
    }
}

impl GenerationSettings {
    /// Clamp the sliders into their valid range
    pub fn clamped(mut self) -> Self {
        self.creativity = self.creativity.min(100);
        self.detail = self.detail.min(100);
        self
    }
}

/// Everything persisted under the settings key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedSettings {
    pub style: StyleSettings,
    pub generation: GenerationSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let style: StyleSettings = serde_json::from_str(r#"{"stroke_width": 7.0}"#).unwrap();
        assert_eq!(style.stroke_width, 7.0);
        assert_eq!(style.fill_mode, FillMode::Regular);
        assert_eq!(style.decimation, 2);
    }

    #[test]
    fn test_generation_settings_clamped() {
        let settings = GenerationSettings {
            creativity: 180,
            detail: 101,
            ..Default::default()
        }
        .clamped();
        assert_eq!(settings.creativity, 100);
        assert_eq!(settings.detail, 100);
    }

    #[test]
    fn test_fill_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&FillMode::Solid).unwrap(), r#""solid""#);
    }
}
