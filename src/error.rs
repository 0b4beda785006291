use thiserror::Error;

use crate::element::ObjectId;

/// Errors raised by canvas mutations and the sketch context
#[derive(Debug, Error)]
pub enum SketchError {
    #[error("Object {0} not found on canvas")]
    ObjectNotFound(ObjectId),

    #[error("None of the {0} objects to replace are still on the canvas")]
    NothingToReplace(usize),

    #[error("Canvas is not ready (container not mounted)")]
    NotReady,

    #[error("Failed to spawn background task: {0}")]
    Spawn(String),

    #[error("Failed to serialize object list: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Raster(#[from] RasterError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl SketchError {
    /// An asset request is still in flight; the same call may succeed later
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Import(ImportError::Asset(err)) if err.is_pending())
    }
}

/// Result type for canvas and context operations
pub type SketchResult<T> = Result<T, SketchError>;

/// Errors that can occur while compositing objects into pixels
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Failed to encode PNG: {0}")]
    Encode(String),

    #[error("Failed to decode PNG: {0}")]
    Decode(String),

    #[error("Malformed data URL: {0}")]
    DataUrl(String),
}

/// Result type for rasterization
pub type RasterResult<T> = Result<T, RasterError>;

/// Errors that can occur while importing icons or images
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Icon is not valid UTF-8")]
    NotUtf8(#[from] std::str::Utf8Error),

    #[error("Icon contains no path data")]
    NoPaths,

    #[error("Invalid path data: {0}")]
    PathData(String),

    #[error("Icon has degenerate bounds")]
    DegenerateBounds,

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error(transparent)]
    Asset(#[from] AssetError),
}

/// Result type for import operations
pub type ImportResult<T> = Result<T, ImportError>;

/// Errors returned by icon asset sources
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Invalid listing response: {0}")]
    InvalidListing(#[from] serde_json::Error),

    #[error("Asset still loading: {0}")]
    Pending(String),
}

impl AssetError {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

/// Result type for asset lookups
pub type AssetResult<T> = Result<T, AssetError>;

/// Errors that can occur during canvas persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize state: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to rasterize canvas: {0}")]
    Raster(#[from] RasterError),

    #[error("Invalid state data: {0}")]
    InvalidState(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Errors that can occur during texture generation
#[derive(Debug, Error)]
pub enum TextureGenerationError {
    #[error("Failed to rasterize element: {0}")]
    Raster(#[from] RasterError),

    #[error("Element has no area to draw")]
    EmptyBounds,
}
