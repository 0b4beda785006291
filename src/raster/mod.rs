//! CPU compositing of canvas objects into RGBA pixmaps.
//!
//! The same code path produces element textures, eraser composites and the
//! persisted raster snapshot, so what the user sees is what gets erased and
//! what gets saved.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use egui::{Color32, ColorImage, Pos2, Rect};
use tiny_skia::{
    BlendMode, FillRule, FilterQuality, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap,
    PixmapPaint, Transform,
};

use crate::element::{DrawableObject, Element, ObjectStyle, RasterData};
use crate::erase::ErasePath;
use crate::error::{RasterError, RasterResult};
use crate::geometry::{PathCommand, VectorPath};

/// Largest pixmap side we are willing to allocate
pub const MAX_RASTER_SIDE: u32 = 8192;

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Allocate a transparent pixmap covering `area` at `scale` pixels per unit
pub fn new_pixmap(area: Rect, scale: f32) -> RasterResult<Pixmap> {
    let width = (area.width() * scale).ceil();
    let height = (area.height() * scale).ceil();
    if !width.is_finite() || !height.is_finite() || width < 1.0 || height < 1.0 {
        return Err(RasterError::InvalidDimensions {
            width: width.max(0.0) as u32,
            height: height.max(0.0) as u32,
        });
    }
    let (width, height) = (width as u32, height as u32);
    if width > MAX_RASTER_SIDE || height > MAX_RASTER_SIDE {
        return Err(RasterError::InvalidDimensions { width, height });
    }
    Pixmap::new(width, height).ok_or(RasterError::InvalidDimensions { width, height })
}

/// Transform from canvas coordinates into pixmap pixels for `area`
pub fn canvas_transform(area: Rect, scale: f32) -> Transform {
    Transform::from_scale(scale, scale).pre_translate(-area.min.x, -area.min.y)
}

/// Render objects in order into a pixmap covering `area`
pub fn render_objects(
    objects: &[DrawableObject],
    area: Rect,
    scale: f32,
    background: Option<Color32>,
) -> RasterResult<Pixmap> {
    let mut pixmap = new_pixmap(area, scale)?;
    if let Some(color) = background {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
    }
    let transform = canvas_transform(area, scale);
    for object in objects {
        draw_object(&mut pixmap, object, transform)?;
    }
    Ok(pixmap)
}

/// Render a single object into a pixmap covering exactly its bounds
pub fn render_object(object: &DrawableObject, scale: f32) -> RasterResult<Pixmap> {
    render_objects(std::slice::from_ref(object), object.bounds(), scale, None)
}

/// Draw one object onto the pixmap using the canvas-to-pixel transform
pub fn draw_object(
    pixmap: &mut Pixmap,
    object: &DrawableObject,
    transform: Transform,
) -> RasterResult<()> {
    match object {
        DrawableObject::Stroke(stroke) => {
            draw_polyline(pixmap, stroke.points(), &stroke.style(), transform);
        }
        DrawableObject::Line(line) => {
            draw_polyline(pixmap, &[line.start(), line.end()], &line.style(), transform);
        }
        DrawableObject::Shape(shape) => {
            draw_vector(pixmap, &shape.canvas_path(), &shape.style(), transform);
        }
        DrawableObject::Icon(icon) => {
            draw_vector(pixmap, &icon.canvas_path(), &icon.style(), transform);
        }
        DrawableObject::Image(image) => {
            draw_raster(pixmap, image.raster(), image.bounds(), transform)?;
        }
        DrawableObject::CompositeRaster(composite) => {
            draw_raster(pixmap, composite.raster(), composite.bounds(), transform)?;
        }
    }
    Ok(())
}

/// Punch the erase paths out of whatever is already on the pixmap
pub fn subtract_erase_paths(pixmap: &mut Pixmap, paths: &[ErasePath], transform: Transform) {
    let mut paint = solid_paint(Color32::BLACK);
    paint.blend_mode = BlendMode::DestinationOut;
    for path in paths {
        stroke_points(pixmap, path.points(), path.width(), &paint, transform);
    }
}

/// Rasterize "objects − erase paths" over `area` and encode the result
pub fn composite_erase(
    objects: &[DrawableObject],
    paths: &[ErasePath],
    area: Rect,
    scale: f32,
) -> RasterResult<RasterData> {
    let mut pixmap = render_objects(objects, area, scale, None)?;
    subtract_erase_paths(&mut pixmap, paths, canvas_transform(area, scale));
    encode_png(&pixmap)
}

pub fn encode_png(pixmap: &Pixmap) -> RasterResult<RasterData> {
    let png = pixmap
        .encode_png()
        .map_err(|e| RasterError::Encode(e.to_string()))?;
    Ok(RasterData::new(png, pixmap.width(), pixmap.height()))
}

pub fn decode_png(png: &[u8]) -> RasterResult<Pixmap> {
    Pixmap::decode_png(png).map_err(|e| RasterError::Decode(e.to_string()))
}

/// Convert a premultiplied pixmap into an egui image for texture upload
pub fn to_color_image(pixmap: &Pixmap) -> ColorImage {
    ColorImage::from_rgba_premultiplied(
        [pixmap.width() as usize, pixmap.height() as usize],
        pixmap.data(),
    )
}

pub fn to_data_url(raster: &RasterData) -> String {
    format!("{PNG_DATA_URL_PREFIX}{}", STANDARD.encode(raster.png()))
}

/// Parse a PNG data URL back into raster data, validating the image
pub fn from_data_url(url: &str) -> RasterResult<RasterData> {
    let encoded = url
        .strip_prefix(PNG_DATA_URL_PREFIX)
        .ok_or_else(|| RasterError::DataUrl("expected a base64 PNG data URL".to_owned()))?;
    let png = STANDARD
        .decode(encoded.trim())
        .map_err(|e| RasterError::DataUrl(e.to_string()))?;
    let pixmap = decode_png(&png)?;
    Ok(RasterData::new(png, pixmap.width(), pixmap.height()))
}

fn solid_paint(color: Color32) -> Paint<'static> {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn draw_polyline(pixmap: &mut Pixmap, points: &[Pos2], style: &ObjectStyle, transform: Transform) {
    if !style.has_stroke() {
        return;
    }
    let paint = solid_paint(style.stroke_color);
    stroke_points(pixmap, points, style.stroke_width, &paint, transform);
}

/// Stroke a polyline with round caps; a lone point becomes a dot
fn stroke_points(
    pixmap: &mut Pixmap,
    points: &[Pos2],
    width: f32,
    paint: &Paint<'_>,
    transform: Transform,
) {
    match points {
        [] => {}
        [dot] => {
            if let Some(circle) = PathBuilder::from_circle(dot.x, dot.y, width / 2.0) {
                pixmap.fill_path(&circle, paint, FillRule::Winding, transform, None);
            }
        }
        [first, rest @ ..] => {
            let mut builder = PathBuilder::new();
            builder.move_to(first.x, first.y);
            for point in rest {
                builder.line_to(point.x, point.y);
            }
            if let Some(path) = builder.finish() {
                let stroke = tiny_skia::Stroke {
                    width,
                    line_cap: LineCap::Round,
                    line_join: LineJoin::Round,
                    ..tiny_skia::Stroke::default()
                };
                pixmap.stroke_path(&path, paint, &stroke, transform, None);
            }
        }
    }
}

fn draw_vector(pixmap: &mut Pixmap, path: &VectorPath, style: &ObjectStyle, transform: Transform) {
    let Some(path) = to_skia_path(path) else {
        log::debug!("Skipping vector object without drawable geometry");
        return;
    };
    if style.has_fill() {
        let paint = solid_paint(style.fill_color);
        pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
    }
    if style.has_stroke() {
        let paint = solid_paint(style.stroke_color);
        let stroke = tiny_skia::Stroke {
            width: style.stroke_width,
            line_join: LineJoin::Round,
            ..tiny_skia::Stroke::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, transform, None);
    }
}

fn draw_raster(
    pixmap: &mut Pixmap,
    raster: &RasterData,
    bounds: Rect,
    transform: Transform,
) -> RasterResult<()> {
    let image = decode_png(raster.png())?;
    let sx = bounds.width() / image.width() as f32;
    let sy = bounds.height() / image.height() as f32;
    let placed = transform
        .pre_translate(bounds.min.x, bounds.min.y)
        .pre_scale(sx, sy);
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    pixmap.draw_pixmap(0, 0, image.as_ref(), &paint, placed, None);
    Ok(())
}

fn to_skia_path(path: &VectorPath) -> Option<Path> {
    let mut builder = PathBuilder::new();
    for command in path.commands() {
        match *command {
            PathCommand::MoveTo { to } => builder.move_to(to.x, to.y),
            PathCommand::LineTo { to } => builder.line_to(to.x, to.y),
            PathCommand::QuadTo { ctrl, to } => builder.quad_to(ctrl.x, ctrl.y, to.x, to.y),
            PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                builder.cubic_to(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y)
            }
            PathCommand::Close => builder.close(),
        }
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Stroke;
    use egui::pos2;

    fn alpha_at(pixmap: &Pixmap, x: u32, y: u32) -> u8 {
        pixmap.pixel(x, y).map(|p| p.alpha()).unwrap_or(0)
    }

    #[test]
    fn test_pixmap_covers_scaled_area() {
        let area = Rect::from_min_max(pos2(10.0, 10.0), pos2(20.5, 15.0));
        let pixmap = new_pixmap(area, 2.0).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (21, 10));
    }

    #[test]
    fn test_empty_area_is_rejected() {
        assert!(new_pixmap(Rect::NOTHING, 1.0).is_err());
        assert!(new_pixmap(Rect::from_min_max(pos2(0.0, 0.0), pos2(0.0, 5.0)), 1.0).is_err());
    }

    #[test]
    fn test_erase_path_removes_pixels() {
        let stroke: DrawableObject = Stroke::new(
            vec![pos2(0.0, 10.0), pos2(40.0, 10.0)],
            10.0,
            Color32::BLACK,
        )
        .into();
        let area = stroke.bounds();
        let transform = canvas_transform(area, 1.0);

        let mut pixmap = render_objects(std::slice::from_ref(&stroke), area, 1.0, None).unwrap();
        let x = (20.0 - area.min.x) as u32;
        let y = (10.0 - area.min.y) as u32;
        assert_eq!(alpha_at(&pixmap, x, y), 255);

        let eraser = ErasePath::new(vec![pos2(20.0, -5.0), pos2(20.0, 25.0)], 8.0);
        subtract_erase_paths(&mut pixmap, &[eraser], transform);
        assert_eq!(alpha_at(&pixmap, x, y), 0);
        // Far from the eraser the stroke survives
        assert_eq!(alpha_at(&pixmap, (5.0 - area.min.x) as u32, y), 255);
    }

    #[test]
    fn test_data_url_round_trip() {
        let pixmap = new_pixmap(Rect::from_min_max(pos2(0.0, 0.0), pos2(3.0, 2.0)), 1.0).unwrap();
        let raster = encode_png(&pixmap).unwrap();
        let url = to_data_url(&raster);
        assert!(url.starts_with("data:image/png;base64,"));

        let back = from_data_url(&url).unwrap();
        assert_eq!((back.width(), back.height()), (3, 2));
    }

    #[test]
    fn test_bad_data_url() {
        assert!(matches!(
            from_data_url("data:text/plain,hello"),
            Err(RasterError::DataUrl(_))
        ));
        assert!(from_data_url("data:image/png;base64,AAAA").is_err());
    }
}
