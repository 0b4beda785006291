use std::time::Duration;

use egui::{Rect, Sense, Vec2};

use crate::input::{CanvasInput, InputHandler};
use crate::renderer::Renderer;
use crate::state::SketchContext;
use crate::util::time::current_time_secs;

/// The square drawing area, centered in whatever space is left
pub fn central_panel(
    ctx: &egui::Context,
    sketch: &mut SketchContext,
    renderer: &mut Renderer,
    input: &mut InputHandler,
) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let available = ui.available_rect_before_wrap();
        if sketch.observe_container(available.size(), current_time_secs()) {
            log::debug!("Canvas resized to {}", sketch.surface().side());
        }
        if sketch.is_resize_pending() {
            ctx.request_repaint_after(Duration::from_secs_f64(sketch.config().resize_debounce_secs));
        }
        if !sketch.surface().is_ready() {
            ui.centered_and_justified(|ui| ui.spinner());
            return;
        }

        let canvas_rect =
            Rect::from_center_size(available.center(), Vec2::splat(sketch.surface().side()));
        ui.allocate_rect(canvas_rect, Sense::click_and_drag());

        let events = input.process_input(ctx, canvas_rect, sketch.surface().viewport());
        for event in events {
            match event {
                CanvasInput::Pointer(pointer) => sketch.handle_pointer(pointer),
                CanvasInput::Zoom { focus, factor } => {
                    sketch.viewport_mut().zoom_at(canvas_rect.min, focus, factor)
                }
                CanvasInput::Pan(delta) => sketch.viewport_mut().pan(delta),
                CanvasInput::Undo if !ctx.wants_keyboard_input() => {
                    sketch.undo();
                }
                CanvasInput::Undo => {}
            }
        }

        let preview = sketch.tool_preview();
        renderer.render(
            ctx,
            ui.painter(),
            canvas_rect.min,
            sketch.surface(),
            preview.as_ref(),
        );
    });
}
