pub mod eraser;
pub mod line;
pub mod pencil;
pub mod place;
pub mod select;

pub use eraser::EraserTool;
pub use line::LineTool;
pub use pencil::PencilTool;
pub use place::PlaceTool;
pub use select::SelectTool;

use super::{Tool, ToolKind};

/// The concrete tool behind each [`ToolKind`]
#[derive(Debug, Clone)]
pub enum ToolType {
    Pencil(PencilTool),
    Select(SelectTool),
    Eraser(EraserTool),
    Line(LineTool),
    /// Shape, icon and image placement share the drag-to-move behavior
    Place(PlaceTool),
}

impl ToolType {
    pub fn new(kind: ToolKind, eraser_width: f32) -> Self {
        match kind {
            ToolKind::Pencil => Self::Pencil(PencilTool::default()),
            ToolKind::Select => Self::Select(SelectTool::default()),
            ToolKind::Eraser => Self::Eraser(EraserTool::new(eraser_width)),
            ToolKind::Line => Self::Line(LineTool::default()),
            ToolKind::Shape | ToolKind::Icon | ToolKind::Image => {
                Self::Place(PlaceTool::new(kind))
            }
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Self::Pencil(_) => ToolKind::Pencil,
            Self::Select(_) => ToolKind::Select,
            Self::Eraser(_) => ToolKind::Eraser,
            Self::Line(_) => ToolKind::Line,
            Self::Place(tool) => tool.kind(),
        }
    }

    pub fn tool(&self) -> &dyn Tool {
        match self {
            Self::Pencil(tool) => tool,
            Self::Select(tool) => tool,
            Self::Eraser(tool) => tool,
            Self::Line(tool) => tool,
            Self::Place(tool) => tool,
        }
    }

    pub fn tool_mut(&mut self) -> &mut dyn Tool {
        match self {
            Self::Pencil(tool) => tool,
            Self::Select(tool) => tool,
            Self::Eraser(tool) => tool,
            Self::Line(tool) => tool,
            Self::Place(tool) => tool,
        }
    }
}

impl Default for ToolType {
    fn default() -> Self {
        Self::Pencil(PencilTool::default())
    }
}
