use egui::Pos2;

use crate::canvas::CanvasSurface;
use crate::command::Command;
use crate::erase::ErasePath;
use crate::tool::{PointerEvent, Tool, ToolPreview};

/// Collects an erase path; the subtraction itself happens on pointer-up
#[derive(Debug, Clone)]
pub struct EraserTool {
    pub width: f32,
    points: Vec<Pos2>,
    erasing: bool,
}

impl EraserTool {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            points: Vec::new(),
            erasing: false,
        }
    }
}

impl Tool for EraserTool {
    fn name(&self) -> &'static str {
        "Eraser"
    }

    fn on_deactivate(&mut self) {
        self.points.clear();
        self.erasing = false;
    }

    fn on_pointer(&mut self, event: PointerEvent, _surface: &CanvasSurface) -> Option<Command> {
        match event {
            PointerEvent::Down(pos) => {
                self.points.clear();
                self.points.push(pos);
                self.erasing = true;
                None
            }
            PointerEvent::Move(pos) => {
                if self.erasing && self.points.last() != Some(&pos) {
                    self.points.push(pos);
                }
                None
            }
            PointerEvent::Up(pos) => {
                if !self.erasing {
                    return None;
                }
                self.erasing = false;
                if self.points.last() != Some(&pos) {
                    self.points.push(pos);
                }
                let path = ErasePath::new(std::mem::take(&mut self.points), self.width);
                Some(Command::Erase(path))
            }
        }
    }

    fn preview(&self) -> Option<ToolPreview> {
        self.erasing.then(|| ToolPreview::Erase {
            points: self.points.clone(),
            width: self.width,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_pointer_up_emits_erase() {
        let surface = CanvasSurface::default();
        let mut eraser = EraserTool::new(20.0);
        eraser.on_pointer(PointerEvent::Down(pos2(0.0, 0.0)), &surface);
        eraser.on_pointer(PointerEvent::Move(pos2(5.0, 0.0)), &surface);
        assert!(matches!(eraser.preview(), Some(ToolPreview::Erase { .. })));

        match eraser.on_pointer(PointerEvent::Up(pos2(10.0, 0.0)), &surface) {
            Some(Command::Erase(path)) => {
                assert_eq!(path.points().len(), 3);
                assert_eq!(path.width(), 20.0);
            }
            other => panic!("expected erase, got {other:?}"),
        }
        assert!(eraser.preview().is_none());
    }
}
