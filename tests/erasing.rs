use eframe_sketch::config::{DEFAULT_STROKE_COLOR, FillMode, PersistedSettings, SketchConfig};
use eframe_sketch::element::{DrawableObject, Element};
use eframe_sketch::geometry::union_rects;
use eframe_sketch::shapes::{ShapeKind, build_shape};
use eframe_sketch::{Command, PointerEvent, SketchContext, ToolKind};
use egui::{Pos2, pos2, vec2};

fn context_with_two_shapes() -> SketchContext {
    let mut ctx = SketchContext::new(SketchConfig::default(), PersistedSettings::default());
    ctx.resize(vec2(400.0, 400.0));
    for (kind, center) in [
        (ShapeKind::Rectangle, pos2(150.0, 200.0)),
        (ShapeKind::Circle, pos2(250.0, 200.0)),
    ] {
        let shape = build_shape(kind, FillMode::Solid, 3.0, DEFAULT_STROKE_COLOR, center, 160.0);
        ctx.execute(Command::AddObject {
            object: shape.into(),
            select: false,
        })
        .unwrap();
    }
    ctx
}

fn erase(ctx: &mut SketchContext, points: &[Pos2]) {
    ctx.switch_tool(ToolKind::Eraser);
    ctx.handle_pointer(PointerEvent::Down(points[0]));
    for point in &points[1..] {
        ctx.handle_pointer(PointerEvent::Move(*point));
    }
    ctx.handle_pointer(PointerEvent::Up(points[points.len() - 1]));
}

#[test]
fn test_erase_merges_touched_objects_into_one_raster() {
    let mut ctx = context_with_two_shapes();
    let union = union_rects(ctx.surface().objects().iter().map(|o| o.bounds()));
    let history = ctx.history().len();

    erase(&mut ctx, &[pos2(40.0, 200.0), pos2(200.0, 200.0), pos2(360.0, 200.0)]);
    assert!(ctx.is_erase_pending());
    assert!(ctx.surface().is_rendering_suspended());
    assert_eq!(ctx.surface().len(), 2);

    ctx.poll();
    assert!(!ctx.is_erase_pending());
    assert!(!ctx.surface().is_rendering_suspended());
    assert_eq!(ctx.surface().len(), 1);
    let composite = &ctx.surface().objects()[0];
    assert!(matches!(composite, DrawableObject::CompositeRaster(_)));
    assert_eq!(composite.bounds(), union);
    assert_eq!(ctx.history().len(), history + 1);
}

#[test]
fn test_erase_missing_everything_changes_nothing() {
    let mut ctx = context_with_two_shapes();
    let before: Vec<_> = ctx.surface().objects().to_vec();
    let history = ctx.history().len();

    erase(&mut ctx, &[pos2(5.0, 5.0), pos2(20.0, 8.0)]);
    ctx.poll();

    assert!(!ctx.is_erase_pending());
    assert_eq!(ctx.surface().objects(), before.as_slice());
    assert_eq!(ctx.history().len(), history);
}

#[test]
fn test_erase_only_replaces_touched_objects() {
    let mut ctx = context_with_two_shapes();
    let circle = ctx.surface().objects()[1].id();

    // Left edge of the rectangle only
    erase(&mut ctx, &[pos2(75.0, 150.0), pos2(75.0, 250.0)]);
    ctx.poll();

    assert_eq!(ctx.surface().len(), 2);
    assert!(ctx.surface().objects()[0].is_raster());
    assert_eq!(ctx.surface().objects()[1].id(), circle);
}

#[test]
fn test_undo_cancels_pending_erase() {
    let mut ctx = context_with_two_shapes();
    erase(&mut ctx, &[pos2(40.0, 200.0), pos2(360.0, 200.0)]);
    assert!(ctx.is_erase_pending());

    ctx.undo();
    ctx.poll();
    assert!(!ctx.is_erase_pending());
    assert!(!ctx.surface().is_rendering_suspended());
    assert_eq!(ctx.surface().len(), 1);
    assert!(matches!(ctx.surface().objects()[0], DrawableObject::Shape(_)));
}

#[test]
fn test_undo_after_erase_removes_composite() {
    let mut ctx = context_with_two_shapes();
    erase(&mut ctx, &[pos2(40.0, 200.0), pos2(360.0, 200.0)]);
    ctx.poll();
    let composite = ctx.surface().objects()[0].id();

    assert_eq!(ctx.undo(), Some(composite));
    assert!(ctx.surface().is_empty());
}
