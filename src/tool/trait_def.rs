use egui::{Color32, Pos2, Vec2};

use crate::canvas::CanvasSurface;
use crate::command::Command;
use crate::config::StyleSettings;
use crate::element::ObjectId;

/// Pointer input already mapped into canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Pos2),
    Move(Pos2),
    Up(Pos2),
}

impl PointerEvent {
    pub fn pos(&self) -> Pos2 {
        match *self {
            Self::Down(pos) | Self::Move(pos) | Self::Up(pos) => pos,
        }
    }
}

/// Transient overlay a tool wants drawn on top of the canvas
#[derive(Debug, Clone, PartialEq)]
pub enum ToolPreview {
    Stroke {
        points: Vec<Pos2>,
        width: f32,
        color: Color32,
    },
    Erase {
        points: Vec<Pos2>,
        width: f32,
    },
    Segment {
        start: Pos2,
        end: Pos2,
        width: f32,
        color: Color32,
    },
    /// An object being dragged, not yet committed
    Drag { id: ObjectId, delta: Vec2 },
}

pub trait Tool {
    fn name(&self) -> &'static str;

    fn on_activate(&mut self) {}

    /// Drop any partial state. Called before another tool is activated.
    fn on_deactivate(&mut self);

    fn on_pointer(&mut self, event: PointerEvent, surface: &CanvasSurface) -> Option<Command>;

    /// Take over changed style parameters
    fn apply_style(&mut self, _style: &StyleSettings) {}

    fn preview(&self) -> Option<ToolPreview> {
        None
    }
}
