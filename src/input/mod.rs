use egui::{Context, InputState, Key, PointerButton, Pos2, Rect, Vec2};

use crate::canvas::Viewport;
use crate::tool::PointerEvent;

/// What the canvas should do in response to this frame's raw input
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasInput {
    /// Primary-button input for the active tool, in canvas coordinates
    Pointer(PointerEvent),
    /// Zoom by `factor` around the screen position `focus`
    Zoom { focus: Pos2, factor: f32 },
    /// Pan the view by a screen-space delta
    Pan(Vec2),
    Undo,
}

/// Converts raw egui input into [`CanvasInput`]s.
///
/// A primary drag that starts on the canvas keeps the gesture even if the
/// pointer wanders off it, so strokes end cleanly with a matching `Up`.
/// With no button held, moves are still reported while the pointer hovers
/// the canvas so two-click tools can follow the cursor.
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    gesture_active: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_gesture_active(&self) -> bool {
        self.gesture_active
    }

    /// Process this frame's input for a canvas drawn at `canvas_rect`
    pub fn process_input(
        &mut self,
        ctx: &Context,
        canvas_rect: Rect,
        viewport: &Viewport,
    ) -> Vec<CanvasInput> {
        ctx.input(|input| self.translate(input, canvas_rect, viewport))
    }

    fn translate(
        &mut self,
        input: &InputState,
        canvas_rect: Rect,
        viewport: &Viewport,
    ) -> Vec<CanvasInput> {
        let mut events = Vec::new();
        let origin = canvas_rect.min;
        let to_canvas = |pos: Pos2| viewport.screen_to_canvas(origin, pos);
        let pointer = &input.pointer;
        let pos = pointer.latest_pos();

        if let Some(pos) = pos {
            if pointer.button_pressed(PointerButton::Primary) && canvas_rect.contains(pos) {
                self.gesture_active = true;
                events.push(CanvasInput::Pointer(PointerEvent::Down(to_canvas(pos))));
            } else if Some(pos) != self.last_pointer_pos
                && (self.gesture_active || canvas_rect.contains(pos))
            {
                events.push(CanvasInput::Pointer(PointerEvent::Move(to_canvas(pos))));
            }

            if self.gesture_active && pointer.button_released(PointerButton::Primary) {
                self.gesture_active = false;
                events.push(CanvasInput::Pointer(PointerEvent::Up(to_canvas(pos))));
            }
        } else if self.gesture_active {
            // Pointer left the window mid-gesture
            self.gesture_active = false;
            if let Some(last) = self.last_pointer_pos {
                events.push(CanvasInput::Pointer(PointerEvent::Up(to_canvas(last))));
            }
        }
        self.last_pointer_pos = pos;

        if let Some(pos) = pos.filter(|p| canvas_rect.contains(*p)) {
            let factor = input.zoom_delta();
            if factor != 1.0 {
                events.push(CanvasInput::Zoom { focus: pos, factor });
            }
            if pointer.button_down(PointerButton::Middle) && pointer.delta() != Vec2::ZERO {
                events.push(CanvasInput::Pan(pointer.delta()));
            }
        }

        if input.modifiers.command && input.key_pressed(Key::Z) {
            events.push(CanvasInput::Undo);
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Event, Modifiers, RawInput, pos2, vec2};

    fn canvas() -> Rect {
        Rect::from_min_size(pos2(100.0, 50.0), vec2(200.0, 200.0))
    }

    fn frame(
        ctx: &Context,
        handler: &mut InputHandler,
        events: Vec<Event>,
    ) -> Vec<CanvasInput> {
        let raw = RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0))),
            events,
            ..Default::default()
        };
        let mut out = Vec::new();
        let _ = ctx.run(raw, |ctx| {
            out = handler.process_input(ctx, canvas(), &Viewport::default());
        });
        out
    }

    fn button(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn test_drag_on_canvas_maps_to_canvas_coordinates() {
        let ctx = Context::default();
        let mut handler = InputHandler::new();

        let down = frame(
            &ctx,
            &mut handler,
            vec![Event::PointerMoved(pos2(110.0, 60.0)), button(pos2(110.0, 60.0), true)],
        );
        assert_eq!(
            down,
            vec![CanvasInput::Pointer(PointerEvent::Down(pos2(10.0, 10.0)))]
        );

        let moved = frame(&ctx, &mut handler, vec![Event::PointerMoved(pos2(130.0, 80.0))]);
        assert_eq!(
            moved,
            vec![CanvasInput::Pointer(PointerEvent::Move(pos2(30.0, 30.0)))]
        );

        let up = frame(&ctx, &mut handler, vec![button(pos2(130.0, 80.0), false)]);
        assert_eq!(up, vec![CanvasInput::Pointer(PointerEvent::Up(pos2(30.0, 30.0)))]);
        assert!(!handler.is_gesture_active());
    }

    #[test]
    fn test_press_outside_canvas_is_ignored() {
        let ctx = Context::default();
        let mut handler = InputHandler::new();
        let events = frame(
            &ctx,
            &mut handler,
            vec![Event::PointerMoved(pos2(10.0, 10.0)), button(pos2(10.0, 10.0), true)],
        );
        assert!(events.is_empty());
        assert!(!handler.is_gesture_active());
    }

    #[test]
    fn test_hover_over_canvas_reports_moves() {
        let ctx = Context::default();
        let mut handler = InputHandler::new();

        let hover = frame(&ctx, &mut handler, vec![Event::PointerMoved(pos2(150.0, 100.0))]);
        assert_eq!(
            hover,
            vec![CanvasInput::Pointer(PointerEvent::Move(pos2(50.0, 50.0)))]
        );
        assert!(!handler.is_gesture_active());

        let outside = frame(&ctx, &mut handler, vec![Event::PointerMoved(pos2(20.0, 20.0))]);
        assert!(outside.is_empty());
    }
}
