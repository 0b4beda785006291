#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod command;
pub mod components;
pub mod config;
pub mod element;
pub mod erase;
pub mod error;
pub mod event;
pub mod executor;
pub mod file_handler;
pub mod geometry;
pub mod import;
pub mod input;
pub mod panels;
pub mod raster;
pub mod renderer;
pub mod shapes;
pub mod state;
pub mod texture_manager;
pub mod tool;
pub mod util;

pub use app::SketchApp;
pub use canvas::{CanvasSurface, Viewport};
pub use command::{Command, SnapshotHistory};
pub use config::{PersistedSettings, SketchConfig, StyleSettings};
pub use element::{DrawableObject, Element, ObjectId};
pub use erase::{EraseEngine, ErasePath};
pub use error::{SketchError, SketchResult};
pub use event::{CanvasEvent, EventBus, EventHandler};
pub use renderer::Renderer;
pub use state::SketchContext;
pub use tool::{PointerEvent, ToolKind};
