use eframe::egui;

/// A dropped file that looked like an image, with its bytes loaded
#[derive(Debug, Clone)]
pub struct DroppedImage {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Collects image files dropped onto the window
#[derive(Debug, Default)]
pub struct FileHandler {
    hovering: bool,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether files are currently dragged over the window
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Take this frame's dropped files, keeping only readable images
    pub fn take_dropped_images(&mut self, ctx: &egui::Context) -> Vec<DroppedImage> {
        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.clone(),
            )
        });
        self.hovering = hovering;

        dropped
            .iter()
            .filter_map(|file| {
                let name = file_name(file);
                if !is_image_file(file) {
                    log::warn!("Dropped file is not a supported type: {name}");
                    return None;
                }
                let bytes = read_bytes(file, &name)?;
                log::info!("Dropped image {name} ({} bytes)", bytes.len());
                Some(DroppedImage { name, bytes })
            })
            .collect()
    }
}

fn file_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

/// Check MIME type first, then the extension
fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        return file.mime.starts_with("image/");
    }
    let extension = file
        .path
        .as_ref()
        .and_then(|path| path.extension())
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .or_else(|| {
            file.name
                .rsplit_once('.')
                .map(|(_, ext)| ext.to_lowercase())
        });
    matches!(
        extension.as_deref(),
        Some("png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp")
    )
}

fn read_bytes(file: &egui::DroppedFile, name: &str) -> Option<Vec<u8>> {
    if let Some(bytes) = &file.bytes {
        return Some(bytes.to_vec());
    }

    #[cfg(not(target_arch = "wasm32"))]
    if let Some(path) = &file.path {
        return match std::fs::read(path) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                log::error!("Failed to read image file {name}: {err}");
                None
            }
        };
    }

    log::warn!("Dropped file has no accessible data: {name}");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dropped(name: &str, mime: &str) -> egui::DroppedFile {
        egui::DroppedFile {
            name: name.to_owned(),
            mime: mime.to_owned(),
            bytes: Some(vec![1, 2, 3].into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_image_detection() {
        assert!(is_image_file(&dropped("a.bin", "image/png")));
        assert!(!is_image_file(&dropped("a.png", "text/plain")));
        assert!(is_image_file(&dropped("photo.JPG", "")));
        assert!(!is_image_file(&dropped("notes.txt", "")));
    }

    #[test]
    fn test_in_memory_bytes_are_used() {
        let file = dropped("a.png", "image/png");
        assert_eq!(read_bytes(&file, "a.png"), Some(vec![1, 2, 3]));
    }
}
