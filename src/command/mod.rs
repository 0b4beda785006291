mod history;

pub use history::SnapshotHistory;

use egui::Vec2;

use crate::element::{DrawableObject, ObjectId};
use crate::erase::ErasePath;

/// Mutation requested by a tool, executed by the sketch context
#[derive(Debug, Clone)]
pub enum Command {
    /// Add an object on top, optionally selecting it
    AddObject { object: DrawableObject, select: bool },
    MoveObject { id: ObjectId, delta: Vec2 },
    RemoveObject { id: ObjectId },
    /// Subtract an erase path from every object it touches
    Erase(ErasePath),
    Select(Option<ObjectId>),
}

impl Command {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddObject { .. } => "add_object",
            Self::MoveObject { .. } => "move_object",
            Self::RemoveObject { .. } => "remove_object",
            Self::Erase(_) => "erase",
            Self::Select(_) => "select",
        }
    }
}
