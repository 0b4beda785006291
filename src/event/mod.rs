mod bus;

pub use bus::EventBus;

use crate::element::ObjectId;

/// Change notifications emitted by the canvas surface on every mutation
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    ObjectAdded { id: ObjectId },
    ObjectModified { id: ObjectId },
    ObjectRemoved { id: ObjectId },
    /// Eraser swap: `removed` were replaced by `added` in the same z-slot
    ObjectsReplaced {
        removed: Vec<ObjectId>,
        added: ObjectId,
    },
    Cleared { count: usize },
    /// Object list loaded from persisted state
    Restored { count: usize },
    /// Most recently added object removed by undo
    Undone { id: ObjectId },
    Resized { side: f32 },
    SelectionChanged { selected: Option<ObjectId> },
}

impl CanvasEvent {
    /// Whether this event appends a snapshot to the history
    pub fn records_snapshot(&self) -> bool {
        matches!(
            self,
            Self::ObjectAdded { .. }
                | Self::ObjectModified { .. }
                | Self::ObjectRemoved { .. }
                | Self::ObjectsReplaced { .. }
                | Self::Cleared { .. }
        )
    }

    /// Whether the persisted canvas is stale after this event
    pub fn changes_content(&self) -> bool {
        self.records_snapshot() || matches!(self, Self::Undone { .. })
    }
}

pub trait EventHandler {
    fn handle_event(&mut self, event: &CanvasEvent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_is_not_recorded_but_persists() {
        let undone = CanvasEvent::Undone { id: ObjectId::new() };
        assert!(!undone.records_snapshot());
        assert!(undone.changes_content());

        let restored = CanvasEvent::Restored { count: 3 };
        assert!(!restored.records_snapshot());
        assert!(!restored.changes_content());
    }
}
