use egui::{Color32, Pos2};

use crate::canvas::CanvasSurface;
use crate::command::Command;
use crate::config::{DEFAULT_STROKE_COLOR, StyleSettings};
use crate::element::Stroke;
use crate::tool::{PointerEvent, Tool, ToolPreview};

/// Freehand brush. Keeps every n-th intermediate sample and always the last.
#[derive(Debug, Clone)]
pub struct PencilTool {
    pub color: Color32,
    pub thickness: f32,
    /// Keep every n-th sample; 1 keeps all
    pub decimation: u32,
    points: Vec<Pos2>,
    /// Samples seen since pointer-down
    samples: u32,
    drawing: bool,
}

impl Default for PencilTool {
    fn default() -> Self {
        Self {
            color: DEFAULT_STROKE_COLOR,
            thickness: 3.0,
            decimation: 2,
            points: Vec::new(),
            samples: 0,
            drawing: false,
        }
    }
}

impl PencilTool {
    fn start_stroke(&mut self, pos: Pos2) {
        self.points.clear();
        self.points.push(pos);
        self.samples = 0;
        self.drawing = true;
    }

    fn continue_stroke(&mut self, pos: Pos2) {
        self.samples += 1;
        if self.samples % self.decimation.max(1) == 0 {
            self.push_distinct(pos);
        }
    }

    fn finish_stroke(&mut self, pos: Pos2) -> Option<Command> {
        if !self.drawing {
            return None;
        }
        self.push_distinct(pos);
        self.drawing = false;
        let points = std::mem::take(&mut self.points);
        log::debug!("Committing stroke with {} points", points.len());
        let stroke = Stroke::new(points, self.thickness, self.color);
        Some(Command::AddObject {
            object: stroke.into(),
            select: false,
        })
    }

    fn push_distinct(&mut self, pos: Pos2) {
        if self.points.last() != Some(&pos) {
            self.points.push(pos);
        }
    }
}

impl Tool for PencilTool {
    fn name(&self) -> &'static str {
        "Pencil"
    }

    fn on_deactivate(&mut self) {
        self.points.clear();
        self.drawing = false;
    }

    fn on_pointer(&mut self, event: PointerEvent, _surface: &CanvasSurface) -> Option<Command> {
        match event {
            PointerEvent::Down(pos) => {
                self.start_stroke(pos);
                None
            }
            PointerEvent::Move(pos) if self.drawing => {
                self.continue_stroke(pos);
                None
            }
            PointerEvent::Move(_) => None,
            PointerEvent::Up(pos) => self.finish_stroke(pos),
        }
    }

    fn apply_style(&mut self, style: &StyleSettings) {
        self.color = style.stroke_color;
        self.thickness = style.stroke_width;
        self.decimation = style.decimation.max(1);
    }

    fn preview(&self) -> Option<ToolPreview> {
        self.drawing.then(|| ToolPreview::Stroke {
            points: self.points.clone(),
            width: self.thickness,
            color: self.color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{DrawableObject, Element};
    use egui::pos2;

    fn committed_points(command: Option<Command>) -> Vec<Pos2> {
        match command {
            Some(Command::AddObject {
                object: DrawableObject::Stroke(stroke),
                ..
            }) => stroke.points().to_vec(),
            other => panic!("expected a stroke, got {other:?}"),
        }
    }

    #[test]
    fn test_decimation_keeps_every_nth_and_last() {
        let surface = CanvasSurface::default();
        let mut pencil = PencilTool {
            decimation: 2,
            ..Default::default()
        };
        pencil.on_pointer(PointerEvent::Down(pos2(0.0, 0.0)), &surface);
        for i in 1..=5 {
            pencil.on_pointer(PointerEvent::Move(pos2(i as f32, 0.0)), &surface);
        }
        let points = committed_points(pencil.on_pointer(PointerEvent::Up(pos2(6.0, 0.0)), &surface));
        assert_eq!(
            points,
            vec![pos2(0.0, 0.0), pos2(2.0, 0.0), pos2(4.0, 0.0), pos2(6.0, 0.0)]
        );
    }

    #[test]
    fn test_single_sample_commits_dot() {
        let surface = CanvasSurface::default();
        let mut pencil = PencilTool::default();
        pencil.on_pointer(PointerEvent::Down(pos2(5.0, 5.0)), &surface);
        let points = committed_points(pencil.on_pointer(PointerEvent::Up(pos2(5.0, 5.0)), &surface));
        assert_eq!(points, vec![pos2(5.0, 5.0)]);
    }

    #[test]
    fn test_style_is_applied() {
        let surface = CanvasSurface::default();
        let mut pencil = PencilTool::default();
        pencil.apply_style(&StyleSettings {
            stroke_width: 2.0,
            stroke_color: Color32::BLACK,
            ..Default::default()
        });
        pencil.on_pointer(PointerEvent::Down(pos2(10.0, 10.0)), &surface);
        let command = pencil.on_pointer(PointerEvent::Up(pos2(50.0, 50.0)), &surface);
        let Some(Command::AddObject { object, .. }) = command else {
            panic!("no stroke committed");
        };
        assert_eq!(object.style().stroke_width, 2.0);
        assert_eq!(object.style().stroke_color, Color32::BLACK);
    }

    #[test]
    fn test_deactivate_discards_stroke() {
        let surface = CanvasSurface::default();
        let mut pencil = PencilTool::default();
        pencil.on_pointer(PointerEvent::Down(pos2(1.0, 1.0)), &surface);
        pencil.on_deactivate();
        assert!(pencil.preview().is_none());
        assert!(pencil.on_pointer(PointerEvent::Up(pos2(2.0, 2.0)), &surface).is_none());
    }
}
