use std::io::Cursor;

use egui::{Pos2, vec2};
use image::{DynamicImage, ImageFormat, imageops::FilterType};

use crate::element::{Image, RasterData};
use crate::error::ImportResult;

/// Decode a raster file, shrink it to fit `max_dimension` if either side is
/// larger (aspect preserved), and center it on `center`
pub fn import_image(bytes: &[u8], max_dimension: u32, center: Pos2) -> ImportResult<Image> {
    let mut decoded = image::load_from_memory(bytes)?;
    if decoded.width() > max_dimension || decoded.height() > max_dimension {
        log::debug!(
            "Downscaling {}x{} image to fit {max_dimension}",
            decoded.width(),
            decoded.height()
        );
        decoded = decoded.resize(max_dimension, max_dimension, FilterType::Triangle);
    }

    let rgba = DynamicImage::ImageRgba8(decoded.to_rgba8());
    let (width, height) = (rgba.width(), rgba.height());
    let mut png = Vec::new();
    rgba.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    let size = vec2(width as f32, height as f32);
    Ok(Image::new(
        RasterData::new(png, width, height),
        center - size / 2.0,
        size,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use egui::pos2;
    use image::RgbaImage;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = DynamicImage::ImageRgba8(RgbaImage::new(width, height));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_large_image_is_downscaled() {
        let image = import_image(&png_bytes(1024, 256), 512, pos2(200.0, 200.0)).unwrap();
        assert_eq!(image.raster().width(), 512);
        assert_eq!(image.raster().height(), 128);
        assert_eq!(image.bounds().center(), pos2(200.0, 200.0));
    }

    #[test]
    fn test_small_image_keeps_size() {
        let image = import_image(&png_bytes(64, 32), 512, pos2(100.0, 100.0)).unwrap();
        assert_eq!(image.size(), vec2(64.0, 32.0));
        assert!(image.is_selectable());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(import_image(b"not an image", 512, Pos2::ZERO).is_err());
    }
}
