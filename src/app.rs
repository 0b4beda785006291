use std::time::Duration;

use crate::config::{PersistedSettings, SketchConfig};
use crate::event::{CanvasEvent, EventHandler};
use crate::file_handler::FileHandler;
use crate::import::AssetSource;
use crate::input::InputHandler;
use crate::panels::{IconBrowser, central_panel, tools_panel};
use crate::renderer::Renderer;
use crate::state::SketchContext;
use crate::util::time::current_time_secs;

/// Repaints whenever the canvas content changes outside of user input,
/// e.g. when an erase composite lands.
struct RepaintOnChange {
    ctx: egui::Context,
}

impl EventHandler for RepaintOnChange {
    fn handle_event(&mut self, event: &CanvasEvent) {
        log::debug!("Canvas event: {event:?}");
        self.ctx.request_repaint();
    }
}

pub struct SketchApp {
    sketch: SketchContext,
    renderer: Renderer,
    input: InputHandler,
    files: FileHandler,
    assets: Box<dyn AssetSource>,
    icons: IconBrowser,
    /// Canvas restore needs mutable storage, which only `update` gets
    restored: bool,
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Engine config lives under the app key; the canvas has its own entries
        let config: SketchConfig = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        log::info!("Starting sketch editor with {config:?}");

        let assets = asset_source(&config);
        let sketch = SketchContext::new(config.clone(), PersistedSettings::default());
        sketch.event_bus().subscribe(Box::new(RepaintOnChange {
            ctx: cc.egui_ctx.clone(),
        }));

        Self {
            renderer: Renderer::new(config.raster_scale),
            sketch,
            input: InputHandler::new(),
            files: FileHandler::new(),
            assets,
            icons: IconBrowser::default(),
            restored: false,
        }
    }

    pub fn sketch(&self) -> &SketchContext {
        &self.sketch
    }
}

fn autosave_interval(config: &SketchConfig) -> Duration {
    Duration::from_secs_f64(config.autosave_interval_secs)
}

#[cfg(not(target_arch = "wasm32"))]
fn asset_source(config: &SketchConfig) -> Box<dyn AssetSource> {
    Box::new(crate::import::HttpAssetSource::new(config.asset_base_url.clone()))
}

#[cfg(target_arch = "wasm32")]
fn asset_source(config: &SketchConfig) -> Box<dyn AssetSource> {
    Box::new(crate::import::WebAssetSource::new(config.asset_base_url.clone()))
}

impl eframe::App for SketchApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self.sketch.config());
        self.sketch.save(storage);
    }

    fn auto_save_interval(&self) -> Duration {
        autosave_interval(self.sketch.config())
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        if !self.restored {
            if let Some(storage) = frame.storage_mut() {
                self.sketch.restore(storage);
            }
            self.restored = true;
        }

        self.sketch.poll();
        self.icons.poll(&mut self.sketch, self.assets.as_ref());

        for image in self.files.take_dropped_images(ctx) {
            if self.sketch.insert_image(&image.bytes).is_none() {
                log::warn!("Dropped image {} was not added", image.name);
            }
        }

        tools_panel(ctx, &mut self.sketch, &mut self.icons, self.assets.as_ref());
        central_panel(ctx, &mut self.sketch, &mut self.renderer, &mut self.input);

        if let Some(storage) = frame.storage_mut() {
            self.sketch.autosave(storage, current_time_secs());
        }

        if self.sketch.take_redraw()
            || self.sketch.is_erase_pending()
            || self.icons.is_waiting()
        {
            ctx.request_repaint();
        }
        if self.sketch.has_unsaved_changes() {
            ctx.request_repaint_after(autosave_interval(self.sketch.config()));
        }
    }
}
