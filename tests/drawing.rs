use eframe_sketch::config::{DEFAULT_STROKE_COLOR, FillMode, PersistedSettings, SketchConfig, StyleSettings};
use eframe_sketch::element::{DrawableObject, Element};
use eframe_sketch::input::{CanvasInput, InputHandler};
use eframe_sketch::shapes::ShapeKind;
use eframe_sketch::tool::ToolPreview;
use eframe_sketch::{PointerEvent, SketchContext, ToolKind, Viewport};
use egui::{Color32, Event, Modifiers, PointerButton, Pos2, RawInput, Rect, pos2, vec2};

fn ready_context() -> SketchContext {
    let mut ctx = SketchContext::new(SketchConfig::default(), PersistedSettings::default());
    ctx.resize(vec2(400.0, 400.0));
    ctx
}

fn drag(ctx: &mut SketchContext, points: &[Pos2]) {
    let (first, rest) = points.split_first().expect("at least one point");
    ctx.handle_pointer(PointerEvent::Down(*first));
    for point in rest {
        ctx.handle_pointer(PointerEvent::Move(*point));
    }
    ctx.handle_pointer(PointerEvent::Up(*points.last().unwrap_or(first)));
}

#[test]
fn test_freehand_stroke_appends_one_object() {
    let mut ctx = ready_context();
    ctx.set_style(StyleSettings {
        stroke_width: 2.0,
        stroke_color: Color32::BLACK,
        ..Default::default()
    });

    let samples: Vec<Pos2> = (0..=8)
        .map(|i| pos2(10.0 + i as f32 * 5.0, 10.0 + i as f32 * 5.0))
        .collect();
    drag(&mut ctx, &samples);

    assert_eq!(ctx.surface().len(), 1);
    assert_eq!(ctx.history().len(), 1);
    match &ctx.surface().objects()[0] {
        DrawableObject::Stroke(stroke) => {
            assert_eq!(stroke.thickness(), 2.0);
            assert_eq!(stroke.color(), Color32::BLACK);
            assert_eq!(stroke.points().first(), Some(&pos2(10.0, 10.0)));
            assert_eq!(stroke.points().last(), Some(&pos2(50.0, 50.0)));
        }
        other => panic!("expected a stroke, got {}", other.element_type()),
    }
}

#[test]
fn test_regular_rectangle_is_centered_outline() {
    let mut ctx = ready_context();
    let id = ctx.insert_shape(ShapeKind::Rectangle).unwrap();

    let Some(DrawableObject::Shape(shape)) = ctx.surface().find(id) else {
        panic!("expected a shape");
    };
    let style = shape.style();
    assert_eq!(style.fill_alpha(), 0);
    assert_eq!(style.stroke_color, DEFAULT_STROKE_COLOR);
    assert_eq!(style.stroke_width, 3.0);

    let center = shape.geometry_bounds().center();
    assert!((center - ctx.surface().center()).length() < 1e-3);
    assert_eq!(ctx.surface().center(), pos2(200.0, 200.0));
}

#[test]
fn test_solid_fill_mode_drops_outline() {
    let mut ctx = ready_context();
    ctx.set_style(StyleSettings {
        fill_mode: FillMode::Solid,
        ..Default::default()
    });

    for kind in [ShapeKind::Circle, ShapeKind::Star5, ShapeKind::Hexagon] {
        let id = ctx.insert_shape(kind).unwrap();
        let style = ctx.surface().find(id).unwrap().style();
        assert!(style.fill_alpha() > 0, "{kind:?} should be filled");
        assert_eq!(style.stroke_width, 0.0);
    }
}

#[test]
fn test_fill_mode_change_keeps_placed_shapes() {
    let mut ctx = ready_context();
    let outlined = ctx.insert_shape(ShapeKind::Rectangle).unwrap();

    ctx.set_style(StyleSettings {
        fill_mode: FillMode::Solid,
        ..Default::default()
    });
    let filled = ctx.insert_shape(ShapeKind::Circle).unwrap();

    let first = ctx.surface().find(outlined).unwrap().style();
    assert_eq!(first.fill_alpha(), 0);
    assert_eq!(first.stroke_width, 3.0);
    let second = ctx.surface().find(filled).unwrap().style();
    assert!(second.fill_alpha() > 0);
    assert_eq!(second.stroke_width, 0.0);
}

#[test]
fn test_undo_removes_only_latest_object() {
    let mut ctx = ready_context();
    drag(&mut ctx, &[pos2(10.0, 10.0), pos2(40.0, 40.0)]);
    let first = ctx.surface().objects()[0].id();
    ctx.insert_shape(ShapeKind::Triangle).unwrap();

    ctx.undo();
    let remaining: Vec<_> = ctx.surface().objects().iter().map(|o| o.id()).collect();
    assert_eq!(remaining, vec![first]);
}

#[test]
fn test_line_tool_places_segment_in_two_clicks() {
    let mut ctx = ready_context();
    ctx.switch_tool(ToolKind::Line);

    ctx.handle_pointer(PointerEvent::Down(pos2(20.0, 20.0)));
    ctx.handle_pointer(PointerEvent::Up(pos2(20.0, 20.0)));
    assert!(ctx.surface().is_empty());

    ctx.handle_pointer(PointerEvent::Down(pos2(120.0, 80.0)));
    ctx.handle_pointer(PointerEvent::Up(pos2(120.0, 80.0)));
    assert_eq!(ctx.surface().len(), 1);
    assert!(matches!(ctx.surface().objects()[0], DrawableObject::Line(_)));
}

/// Runs one egui frame over a canvas at the window origin and forwards the
/// pointer input to the sketch
fn input_frame(
    egui_ctx: &egui::Context,
    ctx: &mut SketchContext,
    handler: &mut InputHandler,
    events: Vec<Event>,
) {
    let canvas = Rect::from_min_size(Pos2::ZERO, ctx.surface().size());
    let raw = RawInput {
        screen_rect: Some(Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0))),
        events,
        ..Default::default()
    };
    let mut inputs = Vec::new();
    let _ = egui_ctx.run(raw, |egui_ctx| {
        inputs = handler.process_input(egui_ctx, canvas, &Viewport::default());
    });
    for input in inputs {
        if let CanvasInput::Pointer(event) = input {
            ctx.handle_pointer(event);
        }
    }
}

fn primary(pos: Pos2, pressed: bool) -> Event {
    Event::PointerButton {
        pos,
        button: PointerButton::Primary,
        pressed,
        modifiers: Modifiers::NONE,
    }
}

#[test]
fn test_line_preview_follows_hover_between_clicks() {
    let mut ctx = ready_context();
    ctx.switch_tool(ToolKind::Line);
    let mut handler = InputHandler::new();
    let egui_ctx = egui::Context::default();
    let start = pos2(20.0, 20.0);

    input_frame(
        &egui_ctx,
        &mut ctx,
        &mut handler,
        vec![Event::PointerMoved(start), primary(start, true)],
    );
    input_frame(&egui_ctx, &mut ctx, &mut handler, vec![primary(start, false)]);
    input_frame(
        &egui_ctx,
        &mut ctx,
        &mut handler,
        vec![Event::PointerMoved(pos2(200.0, 150.0))],
    );

    match ctx.tool_preview() {
        Some(ToolPreview::Segment { start: from, end, .. }) => {
            assert_eq!(from, start);
            assert_eq!(end, pos2(200.0, 150.0));
        }
        other => panic!("expected a segment preview, got {other:?}"),
    }
    assert!(ctx.surface().is_empty());
}

#[test]
fn test_canvas_is_square_for_any_container() {
    let mut ctx = SketchContext::new(SketchConfig::default(), PersistedSettings::default());
    for (w, h) in [(800.0, 600.0), (400.0, 900.0), (1.0, 1000.0), (333.5, 333.5)] {
        ctx.resize(vec2(w, h));
        let size = ctx.surface().size();
        assert_eq!(size.x, size.y);
        assert_eq!(size.x, f32::min(w, h));
    }
}

#[test]
fn test_container_resize_is_debounced() {
    let mut ctx = SketchContext::new(SketchConfig::default(), PersistedSettings::default());
    assert!(ctx.observe_container(vec2(800.0, 600.0), 0.0));
    assert_eq!(ctx.surface().side(), 600.0);

    assert!(!ctx.observe_container(vec2(400.0, 900.0), 1.0));
    assert_eq!(ctx.surface().side(), 600.0);
    assert!(ctx.is_resize_pending());

    assert!(ctx.observe_container(vec2(400.0, 900.0), 1.2));
    assert_eq!(ctx.surface().size(), vec2(400.0, 400.0));
}
