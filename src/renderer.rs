use std::collections::HashSet;

use egui::{Color32, ColorImage, Painter, Pos2, Rect, Shape, Stroke, TextureId};

use crate::canvas::{CanvasSurface, Viewport};
use crate::element::{DrawableObject, Element, ObjectId};
use crate::error::TextureGenerationError;
use crate::raster;
use crate::texture_manager::TextureManager;
use crate::tool::ToolPreview;

const TEXTURE_CACHE_SIZE: usize = 256;
const SELECTION_COLOR: Color32 = Color32::from_rgb(33, 150, 243);
const ERASE_PREVIEW_COLOR: Color32 = Color32::from_rgba_premultiplied(120, 120, 120, 120);

/// One textured quad, in canvas coordinates
#[derive(Debug, Clone, Copy)]
struct DrawItem {
    id: ObjectId,
    texture: TextureId,
    rect: Rect,
}

/// Draws the canvas surface with egui.
///
/// Every object is rasterized once per texture version and cached. While the
/// surface has rendering suspended (an erase is in flight) the draw list of
/// the last live frame is reused, so the objects being replaced never vanish
/// before their composite arrives.
pub struct Renderer {
    textures: TextureManager,
    raster_scale: f32,
    frozen: Vec<DrawItem>,
}

impl Renderer {
    pub fn new(raster_scale: f32) -> Self {
        Self {
            textures: TextureManager::new(TEXTURE_CACHE_SIZE),
            raster_scale,
            frozen: Vec::new(),
        }
    }

    /// Number of quads drawn in the last frame
    pub fn drawn_count(&self) -> usize {
        self.frozen.len()
    }

    pub fn cached_textures(&self) -> usize {
        self.textures.cache_size()
    }

    /// Draw `surface` with its top-left corner at `origin` on screen
    pub fn render(
        &mut self,
        ctx: &egui::Context,
        painter: &Painter,
        origin: Pos2,
        surface: &CanvasSurface,
        preview: Option<&ToolPreview>,
    ) {
        self.textures.begin_frame();
        let viewport = *surface.viewport();
        let canvas_rect = Rect::from_min_size(origin, surface.size());
        let painter = painter.with_clip_rect(canvas_rect);
        painter.rect_filled(canvas_rect, 0.0, surface.background());

        if !surface.is_rendering_suspended() {
            self.frozen = self.build_draw_list(ctx, surface);
        }

        let drag = match preview {
            Some(ToolPreview::Drag { id, delta }) => Some((*id, *delta)),
            _ => None,
        };
        let uv = Rect::from_min_max(Pos2::ZERO, egui::pos2(1.0, 1.0));
        for item in &self.frozen {
            let rect = match drag {
                Some((id, delta)) if id == item.id => item.rect.translate(delta),
                _ => item.rect,
            };
            painter.image(
                item.texture,
                to_screen(&viewport, origin, rect),
                uv,
                Color32::WHITE,
            );
        }

        if let Some(object) = surface.selected().and_then(|id| surface.find(id)) {
            let bounds = match drag {
                Some((id, delta)) if id == object.id() => object.bounds().translate(delta),
                _ => object.bounds(),
            };
            painter.rect_stroke(
                to_screen(&viewport, origin, bounds).expand(2.0),
                2.0,
                Stroke::new(1.5, SELECTION_COLOR),
            );
        }

        if let Some(preview) = preview {
            draw_preview(&painter, &viewport, origin, preview);
        }
    }

    fn build_draw_list(&mut self, ctx: &egui::Context, surface: &CanvasSurface) -> Vec<DrawItem> {
        let scale = self.raster_scale;
        let mut items = Vec::with_capacity(surface.len());
        for object in surface.objects() {
            let texture = self.textures.get_or_create_texture(
                object.id(),
                object.texture_version(),
                || object_image(object, scale),
                ctx,
            );
            match texture {
                Ok(texture) => items.push(DrawItem {
                    id: object.id(),
                    texture,
                    rect: object.bounds(),
                }),
                Err(err) => log::debug!("Skipping {} {}: {err}", object.element_type(), object.id()),
            }
        }

        let live: HashSet<ObjectId> = surface.objects().iter().map(|o| o.id()).collect();
        self.textures.retain_objects(&live);
        items
    }
}

fn object_image(object: &DrawableObject, scale: f32) -> Result<ColorImage, TextureGenerationError> {
    let bounds = object.bounds();
    if !bounds.is_positive() {
        return Err(TextureGenerationError::EmptyBounds);
    }
    let pixmap = raster::render_object(object, scale)?;
    Ok(raster::to_color_image(&pixmap))
}

fn to_screen(viewport: &Viewport, origin: Pos2, rect: Rect) -> Rect {
    Rect::from_min_max(
        viewport.canvas_to_screen(origin, rect.min),
        viewport.canvas_to_screen(origin, rect.max),
    )
}

fn draw_polyline(
    painter: &Painter,
    viewport: &Viewport,
    origin: Pos2,
    points: &[Pos2],
    width: f32,
    color: Color32,
) {
    let width = width * viewport.scale();
    let screen: Vec<Pos2> = points
        .iter()
        .map(|p| viewport.canvas_to_screen(origin, *p))
        .collect();
    match screen.as_slice() {
        [] => {}
        [single] => {
            painter.circle_filled(*single, width / 2.0, color);
        }
        _ => {
            painter.add(Shape::line(screen, Stroke::new(width, color)));
        }
    }
}

fn draw_preview(painter: &Painter, viewport: &Viewport, origin: Pos2, preview: &ToolPreview) {
    match preview {
        ToolPreview::Stroke {
            points,
            width,
            color,
        } => draw_polyline(painter, viewport, origin, points, *width, *color),
        ToolPreview::Erase { points, width } => {
            draw_polyline(painter, viewport, origin, points, *width, ERASE_PREVIEW_COLOR)
        }
        ToolPreview::Segment {
            start,
            end,
            width,
            color,
        } => draw_polyline(painter, viewport, origin, &[*start, *end], *width, *color),
        // Drawn by offsetting the object itself
        ToolPreview::Drag { .. } => {}
    }
}
