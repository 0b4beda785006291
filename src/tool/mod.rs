mod controller;
mod trait_def;
pub mod types;

pub use controller::ToolController;
pub use trait_def::{PointerEvent, Tool, ToolPreview};
pub use types::ToolType;

use serde::{Deserialize, Serialize};

/// Identifier of the active tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    Pencil,
    Select,
    Eraser,
    Line,
    Shape,
    Icon,
    Image,
}

impl ToolKind {
    pub const ALL: [ToolKind; 7] = [
        Self::Pencil,
        Self::Select,
        Self::Eraser,
        Self::Line,
        Self::Shape,
        Self::Icon,
        Self::Image,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Pencil => "Pencil",
            Self::Select => "Select",
            Self::Eraser => "Eraser",
            Self::Line => "Line",
            Self::Shape => "Shape",
            Self::Icon => "Icon",
            Self::Image => "Image",
        }
    }
}
