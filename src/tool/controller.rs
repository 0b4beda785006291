use crate::canvas::CanvasSurface;
use crate::command::Command;
use crate::config::StyleSettings;

use super::{PointerEvent, ToolKind, ToolPreview, ToolType};

/// Owns the single active tool and the style parameters shared by all tools
#[derive(Debug)]
pub struct ToolController {
    active: ToolType,
    style: StyleSettings,
    eraser_width: f32,
}

impl ToolController {
    pub fn new(style: StyleSettings, eraser_width: f32) -> Self {
        let mut active = ToolType::default();
        active.tool_mut().apply_style(&style);
        active.tool_mut().on_activate();
        Self {
            active,
            style,
            eraser_width,
        }
    }

    pub fn active_kind(&self) -> ToolKind {
        self.active.kind()
    }

    pub fn active(&self) -> &ToolType {
        &self.active
    }

    /// Deactivate the current tool, then activate a fresh instance of `kind`.
    /// Switching to the already active kind still discards partial state.
    pub fn switch(&mut self, kind: ToolKind) {
        let previous = self.active.kind();
        self.active.tool_mut().on_deactivate();

        let mut next = ToolType::new(kind, self.eraser_width);
        next.tool_mut().apply_style(&self.style);
        next.tool_mut().on_activate();
        self.active = next;
        log::debug!("Switched tool {previous:?} -> {kind:?}");
    }

    pub fn style(&self) -> &StyleSettings {
        &self.style
    }

    /// Update the shared style and push it into the active tool
    pub fn set_style(&mut self, style: StyleSettings) {
        if style != self.style {
            self.style = style;
            self.active.tool_mut().apply_style(&self.style);
        }
    }

    pub fn set_eraser_width(&mut self, width: f32) {
        self.eraser_width = width;
        if let ToolType::Eraser(eraser) = &mut self.active {
            eraser.width = width;
        }
    }

    /// Route a pointer event to the active tool. Input is rejected until the
    /// canvas is ready.
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        surface: &CanvasSurface,
    ) -> Option<Command> {
        if !surface.is_ready() {
            log::debug!("Canvas not ready, dropping {event:?}");
            return None;
        }
        self.active.tool_mut().on_pointer(event, surface)
    }

    pub fn preview(&self) -> Option<ToolPreview> {
        self.active.tool().preview()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, pos2, vec2};

    fn ready_surface() -> CanvasSurface {
        let mut surface = CanvasSurface::default();
        surface.resize(vec2(300.0, 300.0));
        surface
    }

    #[test]
    fn test_input_rejected_before_ready() {
        let surface = CanvasSurface::default();
        let mut controller = ToolController::new(StyleSettings::default(), 20.0);
        controller.handle_pointer(PointerEvent::Down(pos2(1.0, 1.0)), &surface);
        assert!(controller.preview().is_none());
        assert!(controller
            .handle_pointer(PointerEvent::Up(pos2(2.0, 2.0)), &surface)
            .is_none());
    }

    #[test]
    fn test_switch_discards_partial_line() {
        let surface = ready_surface();
        let mut controller = ToolController::new(StyleSettings::default(), 20.0);
        controller.switch(ToolKind::Line);
        controller.handle_pointer(PointerEvent::Down(pos2(10.0, 10.0)), &surface);
        assert!(controller.preview().is_some());

        controller.switch(ToolKind::Pencil);
        assert_eq!(controller.active_kind(), ToolKind::Pencil);
        assert!(controller.preview().is_none());

        controller.switch(ToolKind::Line);
        assert!(controller.preview().is_none());
    }

    #[test]
    fn test_style_survives_tool_switch() {
        let surface = ready_surface();
        let mut controller = ToolController::new(StyleSettings::default(), 20.0);
        controller.set_style(StyleSettings {
            stroke_width: 9.0,
            stroke_color: Color32::RED,
            ..Default::default()
        });
        controller.switch(ToolKind::Eraser);
        controller.switch(ToolKind::Pencil);

        controller.handle_pointer(PointerEvent::Down(pos2(10.0, 10.0)), &surface);
        match controller.preview() {
            Some(ToolPreview::Stroke { width, color, .. }) => {
                assert_eq!(width, 9.0);
                assert_eq!(color, Color32::RED);
            }
            other => panic!("expected stroke preview, got {other:?}"),
        }
    }
}
