use egui::{Pos2, Vec2};

use crate::canvas::CanvasSurface;
use crate::command::Command;
use crate::element::ObjectId;
use crate::tool::{PointerEvent, Tool, ToolPreview};

#[derive(Debug, Clone, Copy)]
struct DragState {
    id: ObjectId,
    start: Pos2,
    current: Pos2,
}

/// Click to select, drag to move. The move is committed on release.
#[derive(Debug, Clone, Default)]
pub struct SelectTool {
    drag: Option<DragState>,
}

impl SelectTool {
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}

impl Tool for SelectTool {
    fn name(&self) -> &'static str {
        "Select"
    }

    fn on_deactivate(&mut self) {
        self.drag = None;
    }

    fn on_pointer(&mut self, event: PointerEvent, surface: &CanvasSurface) -> Option<Command> {
        match event {
            PointerEvent::Down(pos) => {
                let hit = surface.hit_test(pos);
                self.drag = hit.map(|id| DragState {
                    id,
                    start: pos,
                    current: pos,
                });
                Some(Command::Select(hit))
            }
            PointerEvent::Move(pos) => {
                if let Some(drag) = &mut self.drag {
                    drag.current = pos;
                }
                None
            }
            PointerEvent::Up(pos) => {
                let drag = self.drag.take()?;
                let delta = pos - drag.start;
                (delta != Vec2::ZERO).then_some(Command::MoveObject { id: drag.id, delta })
            }
        }
    }

    fn preview(&self) -> Option<ToolPreview> {
        self.drag.map(|drag| ToolPreview::Drag {
            id: drag.id,
            delta: drag.current - drag.start,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Stroke;
    use egui::{Color32, pos2, vec2};

    #[test]
    fn test_drag_moves_hit_object() {
        let mut surface = CanvasSurface::default();
        surface.resize(vec2(200.0, 200.0));
        let id = surface.add(Stroke::new(vec![pos2(50.0, 50.0)], 6.0, Color32::BLACK).into());

        let mut tool = SelectTool::default();
        assert!(matches!(
            tool.on_pointer(PointerEvent::Down(pos2(51.0, 50.0)), &surface),
            Some(Command::Select(Some(hit))) if hit == id
        ));
        tool.on_pointer(PointerEvent::Move(pos2(61.0, 55.0)), &surface);
        assert_eq!(
            tool.preview(),
            Some(ToolPreview::Drag {
                id,
                delta: vec2(10.0, 5.0)
            })
        );

        match tool.on_pointer(PointerEvent::Up(pos2(71.0, 60.0)), &surface) {
            Some(Command::MoveObject { id: moved, delta }) => {
                assert_eq!(moved, id);
                assert_eq!(delta, vec2(20.0, 10.0));
            }
            other => panic!("expected a move, got {other:?}"),
        }
    }

    #[test]
    fn test_click_on_empty_space_deselects() {
        let surface = CanvasSurface::default();
        let mut tool = SelectTool::default();
        assert!(matches!(
            tool.on_pointer(PointerEvent::Down(pos2(5.0, 5.0)), &surface),
            Some(Command::Select(None))
        ));
        assert!(tool.on_pointer(PointerEvent::Up(pos2(9.0, 9.0)), &surface).is_none());
    }
}
