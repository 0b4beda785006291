pub mod context;
mod persistence;

pub use context::SketchContext;
pub use persistence::{
    CanvasPersistence, GenerationRequest, MemoryStorage, OBJECTS_KEY, RASTER_KEY,
    RestoredCanvas, SETTINGS_KEY, StructuredSnapshot, raster_snapshot,
};
