//! Icon and image importers. Both produce a ready-to-insert object centered
//! on a given point; the sketch context adds and selects it.

mod asset;
mod icon;
mod image;

#[cfg(not(target_arch = "wasm32"))]
pub use asset::HttpAssetSource;
#[cfg(target_arch = "wasm32")]
pub use asset::WebAssetSource;
pub use asset::{AssetSource, ICON_PAGE_SIZE, IconQuery, MemoryAssetSource};
pub use icon::{ParsedIcon, build_icon, parse_svg_paths};
pub use image::import_image;
