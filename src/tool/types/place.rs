use crate::canvas::CanvasSurface;
use crate::command::Command;
use crate::tool::{PointerEvent, Tool, ToolKind, ToolPreview};

use super::SelectTool;

/// Active while a shape, icon or image was just placed. Inserting happens
/// through the sketch context; on the canvas it behaves like the select tool
/// so the new object can be dragged into position.
#[derive(Debug, Clone)]
pub struct PlaceTool {
    kind: ToolKind,
    mover: SelectTool,
}

impl PlaceTool {
    pub fn new(kind: ToolKind) -> Self {
        Self {
            kind,
            mover: SelectTool::default(),
        }
    }

    pub fn kind(&self) -> ToolKind {
        self.kind
    }
}

impl Tool for PlaceTool {
    fn name(&self) -> &'static str {
        self.kind.label()
    }

    fn on_deactivate(&mut self) {
        self.mover.on_deactivate();
    }

    fn on_pointer(&mut self, event: PointerEvent, surface: &CanvasSurface) -> Option<Command> {
        self.mover.on_pointer(event, surface)
    }

    fn preview(&self) -> Option<ToolPreview> {
        self.mover.preview()
    }
}
