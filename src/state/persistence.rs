use serde::{Deserialize, Serialize};

use crate::canvas::CanvasSurface;
use crate::config::{GenerationSettings, PersistedSettings};
use crate::element::{DrawableObject, Image, RasterData};
use crate::error::{PersistenceError, PersistenceResult};
use crate::raster;
use crate::util::time::{self, Throttle};

/// PNG data URL of the rendered canvas
pub const RASTER_KEY: &str = "sketch.raster";
/// JSON object list, preferred on restore
pub const OBJECTS_KEY: &str = "sketch.objects";
pub const SETTINGS_KEY: &str = "sketch.settings";

/// Structured encoding of the canvas, stored under [`OBJECTS_KEY`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredSnapshot {
    pub objects: Vec<DrawableObject>,
    /// Seconds since the UNIX epoch when the snapshot was taken
    pub timestamp: u64,
    /// Version of the application when the snapshot was taken
    pub version: String,
}

impl StructuredSnapshot {
    pub fn new(surface: &CanvasSurface) -> Self {
        Self {
            objects: surface.objects().to_vec(),
            timestamp: time::timestamp_secs(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// What a restore found in storage
#[derive(Debug)]
pub enum RestoredCanvas {
    /// Editable objects from the structured entry
    Structured(Vec<DrawableObject>),
    /// Raster fallback, as a locked background image
    Raster(Image),
    Empty,
}

/// Payload handed to the image generation collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub image_data_url: String,
    pub settings: GenerationSettings,
}

impl GenerationRequest {
    pub fn new(surface: &CanvasSurface, settings: &GenerationSettings) -> PersistenceResult<Self> {
        let raster = raster_snapshot(surface)?;
        Ok(Self {
            image_data_url: raster::to_data_url(&raster),
            settings: settings.clone().clamped(),
        })
    }

    pub fn to_json(&self) -> PersistenceResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Render the canvas at one pixel per canvas unit over its background
pub fn raster_snapshot(surface: &CanvasSurface) -> PersistenceResult<RasterData> {
    let pixmap = raster::render_objects(
        surface.objects(),
        surface.rect(),
        1.0,
        Some(surface.background()),
    )?;
    Ok(raster::encode_png(&pixmap)?)
}

/// Writes both canvas encodings on a throttled cadence and reads them back
#[derive(Debug, Clone)]
pub struct CanvasPersistence {
    throttle: Throttle,
    dirty: bool,
}

impl CanvasPersistence {
    pub fn new(interval_secs: f64) -> Self {
        Self {
            throttle: Throttle::new(interval_secs),
            dirty: false,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Save if something changed and the interval elapsed. Returns whether
    /// a save happened.
    pub fn maybe_save(
        &mut self,
        storage: &mut dyn eframe::Storage,
        surface: &CanvasSurface,
        now: f64,
    ) -> PersistenceResult<bool> {
        if !self.dirty || !self.throttle.ready(now) {
            return Ok(false);
        }
        self.save(storage, surface)?;
        Ok(true)
    }

    /// Write the structured and raster encodings right away
    pub fn save(
        &mut self,
        storage: &mut dyn eframe::Storage,
        surface: &CanvasSurface,
    ) -> PersistenceResult<()> {
        let structured = serde_json::to_string(&StructuredSnapshot::new(surface))?;
        storage.set_string(OBJECTS_KEY, structured);

        // An unmounted canvas has no pixels to save
        if surface.is_ready() {
            let raster = raster_snapshot(surface)?;
            storage.set_string(RASTER_KEY, raster::to_data_url(&raster));
        }
        storage.flush();
        self.dirty = false;
        log::debug!("Persisted {} objects", surface.len());
        Ok(())
    }

    /// Prefer the structured entry; fall back to the raster as a background
    /// image. A structured entry that fails to parse is discarded.
    pub fn restore(&self, storage: &mut dyn eframe::Storage) -> RestoredCanvas {
        match Self::load_structured(storage) {
            Ok(Some(snapshot)) => {
                log::info!("Restored {} objects", snapshot.objects.len());
                return RestoredCanvas::Structured(snapshot.objects);
            }
            Ok(None) => {}
            Err(err) => {
                log::warn!("Discarding unreadable canvas snapshot: {err}");
                storage.set_string(OBJECTS_KEY, String::new());
                storage.flush();
            }
        }

        match Self::load_raster(storage) {
            Ok(Some(raster)) => {
                log::info!(
                    "Restored {}x{} raster as background",
                    raster.width(),
                    raster.height()
                );
                let size = egui::vec2(raster.width() as f32, raster.height() as f32);
                RestoredCanvas::Raster(Image::background(raster, egui::Pos2::ZERO, size))
            }
            Ok(None) => RestoredCanvas::Empty,
            Err(err) => {
                log::warn!("Ignoring unreadable canvas raster: {err}");
                RestoredCanvas::Empty
            }
        }
    }

    fn load_structured(storage: &dyn eframe::Storage) -> PersistenceResult<Option<StructuredSnapshot>> {
        match storage.get_string(OBJECTS_KEY) {
            Some(json) if !json.trim().is_empty() => Ok(Some(serde_json::from_str(&json)?)),
            _ => Ok(None),
        }
    }

    fn load_raster(storage: &dyn eframe::Storage) -> PersistenceResult<Option<RasterData>> {
        match storage.get_string(RASTER_KEY) {
            Some(url) if !url.trim().is_empty() => Ok(Some(raster::from_data_url(&url)?)),
            _ => Ok(None),
        }
    }

    pub fn save_settings(
        storage: &mut dyn eframe::Storage,
        settings: &PersistedSettings,
    ) -> PersistenceResult<()> {
        storage.set_string(SETTINGS_KEY, serde_json::to_string(settings)?);
        Ok(())
    }

    pub fn load_settings(storage: &dyn eframe::Storage) -> PersistenceResult<PersistedSettings> {
        match storage.get_string(SETTINGS_KEY) {
            Some(json) => serde_json::from_str(&json).map_err(|e| {
                PersistenceError::InvalidState(format!("settings entry is unreadable: {e}"))
            }),
            None => Ok(PersistedSettings::default()),
        }
    }
}

/// In-memory [`eframe::Storage`], for tests and headless use
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: std::collections::HashMap<String, String>,
    flushes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the storage was flushed
    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

impl eframe::Storage for MemoryStorage {
    fn get_string(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}
