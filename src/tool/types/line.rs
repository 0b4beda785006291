use egui::{Color32, Pos2};

use crate::canvas::CanvasSurface;
use crate::command::Command;
use crate::config::{DEFAULT_STROKE_COLOR, StyleSettings};
use crate::element::{Line, MIN_ELEMENT_SIZE, ObjectStyle};
use crate::tool::{PointerEvent, Tool, ToolPreview};

#[derive(Debug, Clone, Copy, PartialEq)]
enum LineState {
    Idle,
    /// First click placed, following the pointer
    Placing { start: Pos2, end: Pos2 },
}

/// Two-click line: the first click anchors, the second finalizes
#[derive(Debug, Clone)]
pub struct LineTool {
    pub color: Color32,
    pub width: f32,
    state: LineState,
}

impl Default for LineTool {
    fn default() -> Self {
        Self {
            color: DEFAULT_STROKE_COLOR,
            width: 3.0,
            state: LineState::Idle,
        }
    }
}

impl LineTool {
    pub fn is_placing(&self) -> bool {
        matches!(self.state, LineState::Placing { .. })
    }
}

impl Tool for LineTool {
    fn name(&self) -> &'static str {
        "Line"
    }

    fn on_deactivate(&mut self) {
        self.state = LineState::Idle;
    }

    fn on_pointer(&mut self, event: PointerEvent, _surface: &CanvasSurface) -> Option<Command> {
        match (self.state, event) {
            (LineState::Idle, PointerEvent::Down(pos)) => {
                self.state = LineState::Placing {
                    start: pos,
                    end: pos,
                };
                None
            }
            (LineState::Placing { start, .. }, PointerEvent::Move(pos)) => {
                self.state = LineState::Placing { start, end: pos };
                None
            }
            (LineState::Placing { start, .. }, PointerEvent::Down(end)) => {
                self.state = LineState::Idle;
                if start.distance(end) < MIN_ELEMENT_SIZE {
                    log::debug!("Discarding degenerate line at {start:?}");
                    return None;
                }
                let line = Line::new(start, end, ObjectStyle::outline(self.width, self.color));
                Some(Command::AddObject {
                    object: line.into(),
                    select: false,
                })
            }
            _ => None,
        }
    }

    fn apply_style(&mut self, style: &StyleSettings) {
        self.color = style.stroke_color;
        self.width = style.stroke_width;
    }

    fn preview(&self) -> Option<ToolPreview> {
        match self.state {
            LineState::Idle => None,
            LineState::Placing { start, end } => Some(ToolPreview::Segment {
                start,
                end,
                width: self.width,
                color: self.color,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::DrawableObject;
    use egui::pos2;

    #[test]
    fn test_two_clicks_make_a_line() {
        let surface = CanvasSurface::default();
        let mut tool = LineTool::default();

        assert!(tool.on_pointer(PointerEvent::Down(pos2(10.0, 10.0)), &surface).is_none());
        assert_eq!(
            tool.preview(),
            Some(ToolPreview::Segment {
                start: pos2(10.0, 10.0),
                end: pos2(10.0, 10.0),
                width: 3.0,
                color: DEFAULT_STROKE_COLOR,
            })
        );
        // Releasing the first click does not finish the line
        assert!(tool.on_pointer(PointerEvent::Up(pos2(10.0, 10.0)), &surface).is_none());
        tool.on_pointer(PointerEvent::Move(pos2(40.0, 50.0)), &surface);

        match tool.on_pointer(PointerEvent::Down(pos2(40.0, 50.0)), &surface) {
            Some(Command::AddObject {
                object: DrawableObject::Line(line),
                ..
            }) => {
                assert_eq!(line.start(), pos2(10.0, 10.0));
                assert_eq!(line.end(), pos2(40.0, 50.0));
            }
            other => panic!("expected a line, got {other:?}"),
        }
        assert!(!tool.is_placing());
    }

    #[test]
    fn test_deactivate_discards_preview() {
        let surface = CanvasSurface::default();
        let mut tool = LineTool::default();
        tool.on_pointer(PointerEvent::Down(pos2(10.0, 10.0)), &surface);
        tool.on_deactivate();
        assert!(tool.preview().is_none());
        // The next click starts over instead of finishing
        assert!(tool.on_pointer(PointerEvent::Down(pos2(60.0, 60.0)), &surface).is_none());
        assert!(tool.is_placing());
    }

    #[test]
    fn test_second_click_too_close_drops_line() {
        let surface = CanvasSurface::default();
        let mut tool = LineTool::default();
        tool.on_pointer(PointerEvent::Down(pos2(10.0, 10.0)), &surface);
        tool.on_pointer(PointerEvent::Up(pos2(10.0, 10.0)), &surface);

        let end = pos2(10.0 + MIN_ELEMENT_SIZE * 0.5, 10.0);
        assert!(tool.on_pointer(PointerEvent::Down(end), &surface).is_none());
        assert!(!tool.is_placing());
        assert!(tool.preview().is_none());
    }
}
