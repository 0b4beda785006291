//! The sketch context owns everything an editing session needs and is the
//! single place where tool commands turn into canvas mutations.
//!
//! Every mutation goes through the surface, which queues a [`CanvasEvent`].
//! [`SketchContext::process_events`] drains that queue after each operation:
//! content events append a history snapshot and mark persistence dirty, then
//! every event is broadcast on the [`EventBus`].

use egui::Vec2;

use crate::canvas::{CanvasSurface, ResizeDebouncer};
use crate::command::{Command, SnapshotHistory};
use crate::config::{GenerationSettings, PersistedSettings, SketchConfig, StyleSettings};
use crate::element::{DrawableObject, Element, ObjectId};
use crate::erase::{EraseEngine, EraseOutcome};
use crate::error::{ImportError, SketchError, SketchResult};
use crate::event::{CanvasEvent, EventBus};
use crate::executor::TaskRunner;
use crate::import::{self, AssetSource};
use crate::shapes::{self, ShapeKind};
use crate::tool::{PointerEvent, ToolController, ToolKind, ToolPreview};

use super::persistence::{CanvasPersistence, GenerationRequest, RestoredCanvas};

pub struct SketchContext {
    config: SketchConfig,
    surface: CanvasSurface,
    tools: ToolController,
    history: SnapshotHistory,
    eraser: EraseEngine,
    runner: TaskRunner,
    persistence: CanvasPersistence,
    resize: ResizeDebouncer,
    generation: GenerationSettings,
    event_bus: EventBus,
}

impl SketchContext {
    pub fn new(config: SketchConfig, settings: PersistedSettings) -> Self {
        Self {
            surface: CanvasSurface::new(config.background),
            tools: ToolController::new(settings.style, config.eraser_width),
            history: SnapshotHistory::new(config.max_history),
            eraser: EraseEngine::new(config.raster_scale),
            runner: TaskRunner::new(),
            persistence: CanvasPersistence::new(config.autosave_interval_secs),
            resize: ResizeDebouncer::new(config.resize_debounce_secs),
            generation: settings.generation.clamped(),
            event_bus: EventBus::new(),
            config,
        }
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    pub fn surface(&self) -> &CanvasSurface {
        &self.surface
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn active_tool(&self) -> ToolKind {
        self.tools.active_kind()
    }

    pub fn style(&self) -> &StyleSettings {
        self.tools.style()
    }

    pub fn generation_settings(&self) -> &GenerationSettings {
        &self.generation
    }

    pub fn set_generation_settings(&mut self, settings: GenerationSettings) {
        self.generation = settings.clamped();
    }

    pub fn persisted_settings(&self) -> PersistedSettings {
        PersistedSettings {
            style: self.tools.style().clone(),
            generation: self.generation.clone(),
        }
    }

    pub fn set_style(&mut self, style: StyleSettings) {
        self.tools.set_style(style);
    }

    pub fn switch_tool(&mut self, kind: ToolKind) {
        self.tools.switch(kind);
    }

    pub fn tool_preview(&self) -> Option<ToolPreview> {
        self.tools.preview()
    }

    pub fn is_erase_pending(&self) -> bool {
        self.eraser.is_pending()
    }

    /// Feed the container size for this frame; applies it once stable.
    /// Returns whether the canvas was resized.
    pub fn observe_container(&mut self, available: Vec2, now: f64) -> bool {
        let resized = match self.resize.observe(available, now) {
            Some(size) => self.surface.resize(size),
            None => false,
        };
        self.process_events();
        resized
    }

    /// A container size change is waiting out the debounce interval
    pub fn is_resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    /// Resize immediately, bypassing the debouncer
    pub fn resize(&mut self, available: Vec2) -> bool {
        let resized = self.surface.resize(available);
        self.process_events();
        resized
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if matches!(event, PointerEvent::Move(_)) && self.tool_preview().is_some() {
            self.surface.request_redraw();
        }
        if let Some(command) = self.tools.handle_pointer(event, &self.surface) {
            if let Err(err) = self.execute(command) {
                log::warn!("Command failed: {err}");
            }
        }
    }

    pub fn execute(&mut self, command: Command) -> SketchResult<()> {
        log::debug!("Executing {}", command.name());
        let result = match command {
            Command::AddObject { object, select } => self.add_object(object, select).map(|_| ()),
            Command::MoveObject { id, delta } => {
                self.surface.modify(id, |object| object.translate(delta))
            }
            Command::RemoveObject { id } => self.surface.remove(id).map(|_| ()),
            Command::Erase(path) => {
                let outcome = self.eraser.begin(path, &mut self.surface, &self.runner)?;
                if let EraseOutcome::Started { targets } = outcome {
                    log::debug!("Erase scheduled for {targets} objects");
                }
                Ok(())
            }
            Command::Select(Some(id)) => self.surface.select(id),
            Command::Select(None) => {
                self.surface.clear_selection();
                Ok(())
            }
        };
        self.process_events();
        result
    }

    fn add_object(&mut self, object: DrawableObject, select: bool) -> SketchResult<ObjectId> {
        let id = self.surface.add(object);
        if select {
            self.surface.select(id)?;
        }
        Ok(id)
    }

    /// Generate `kind` at the canvas center with the current fill mode and
    /// select it
    pub fn insert_shape(&mut self, kind: ShapeKind) -> SketchResult<ObjectId> {
        if !self.surface.is_ready() {
            return Err(SketchError::NotReady);
        }
        let mut style = self.tools.style().clone();
        style.shape_kind = kind;
        self.tools.set_style(style);
        self.tools.switch(ToolKind::Shape);

        let style = self.tools.style();
        let shape = shapes::build_shape(
            kind,
            style.fill_mode,
            style.stroke_width,
            style.stroke_color,
            self.surface.center(),
            self.config.shape_target_size,
        );
        let id = self.add_object(shape.into(), true);
        self.process_events();
        id
    }

    /// Fetch, parse and place an icon. Failures are logged and leave the
    /// canvas unchanged.
    pub fn insert_icon(&mut self, source: &dyn AssetSource, path: &str) -> Option<ObjectId> {
        match self.try_insert_icon(source, path) {
            Ok(id) => Some(id),
            Err(err) => {
                log::warn!("Icon import of {path} failed: {err}");
                None
            }
        }
    }

    /// Like [`Self::insert_icon`] but hands the failure back. A source still
    /// loading the icon yields an error whose `is_pending` is true.
    pub fn try_insert_icon(
        &mut self,
        source: &dyn AssetSource,
        path: &str,
    ) -> SketchResult<ObjectId> {
        if !self.surface.is_ready() {
            return Err(SketchError::NotReady);
        }
        let bytes = source.fetch(path).map_err(ImportError::from)?;
        let svg = std::str::from_utf8(&bytes).map_err(ImportError::from)?;
        let parsed = import::parse_svg_paths(svg)?;
        let style = self.tools.style();
        let icon = import::build_icon(
            path,
            parsed,
            style.stroke_color,
            style.stroke_width,
            self.surface.center(),
            self.config.icon_target_width,
        )?;

        let mut style = style.clone();
        style.icon_path = Some(path.to_owned());
        self.tools.set_style(style);
        self.tools.switch(ToolKind::Icon);
        let id = self.add_object(icon.into(), true);
        self.process_events();
        id
    }

    /// Decode and place a raster image. Failures are logged and leave the
    /// canvas unchanged.
    pub fn insert_image(&mut self, bytes: &[u8]) -> Option<ObjectId> {
        match self.try_insert_image(bytes) {
            Ok(id) => Some(id),
            Err(err) => {
                log::warn!("Image import failed: {err}");
                None
            }
        }
    }

    fn try_insert_image(&mut self, bytes: &[u8]) -> SketchResult<ObjectId> {
        if !self.surface.is_ready() {
            return Err(SketchError::NotReady);
        }
        let image = import::import_image(
            bytes,
            self.config.max_image_dimension,
            self.surface.center(),
        )?;
        self.tools.switch(ToolKind::Image);
        let id = self.add_object(image.into(), true);
        self.process_events();
        id
    }

    /// Remove the most recently added object and pop the newest history entry
    pub fn undo(&mut self) -> Option<ObjectId> {
        self.eraser.cancel(&mut self.surface);
        let removed = self.surface.remove_last_added()?;
        self.history.pop();
        self.process_events();
        Some(removed.id())
    }

    pub fn clear(&mut self) {
        self.eraser.cancel(&mut self.surface);
        self.surface.clear();
        self.process_events();
    }

    /// Once per frame: drive background tasks and swap in finished erases
    pub fn poll(&mut self) {
        self.runner.run_until_stalled();
        match self.eraser.poll(&mut self.surface) {
            Ok(Some(id)) => log::debug!("Erase committed as {id}"),
            Ok(None) => {}
            Err(err) => log::warn!("Erase failed, canvas left unchanged: {err}"),
        }
        self.process_events();
    }

    /// Whether the canvas should be redrawn this frame
    pub fn take_redraw(&mut self) -> bool {
        self.surface.take_redraw()
    }

    pub fn viewport_mut(&mut self) -> &mut crate::canvas::Viewport {
        self.surface.viewport_mut()
    }

    /// Load the persisted canvas and settings. History starts over from the
    /// restored state.
    pub fn restore(&mut self, storage: &mut dyn eframe::Storage) {
        match CanvasPersistence::load_settings(storage) {
            Ok(settings) => {
                self.tools.set_style(settings.style);
                self.generation = settings.generation.clamped();
            }
            Err(err) => log::warn!("Using default settings: {err}"),
        }

        match self.persistence.restore(storage) {
            RestoredCanvas::Structured(objects) => self.surface.load(objects),
            RestoredCanvas::Raster(background) => self.surface.load(vec![background.into()]),
            RestoredCanvas::Empty => log::info!("No saved canvas, starting empty"),
        }
        self.history.clear();
        self.process_events();
    }

    /// Persist on the throttled cadence if anything changed
    pub fn autosave(&mut self, storage: &mut dyn eframe::Storage, now: f64) {
        if let Err(err) = self.persistence.maybe_save(storage, &self.surface, now) {
            log::error!("Autosave failed: {err}");
        }
    }

    /// Persist canvas and settings right away
    pub fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Err(err) = self.persistence.save(storage, &self.surface) {
            log::error!("Saving canvas failed: {err}");
        }
        if let Err(err) = CanvasPersistence::save_settings(storage, &self.persisted_settings()) {
            log::error!("Saving settings failed: {err}");
        }
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.persistence.is_dirty()
    }

    /// Bundle the rendered canvas with the generation settings
    pub fn generation_request(&self) -> SketchResult<GenerationRequest> {
        Ok(GenerationRequest::new(&self.surface, &self.generation)?)
    }

    fn process_events(&mut self) {
        for event in self.surface.drain_events() {
            self.record(&event);
            self.event_bus.emit(&event);
        }
    }

    fn record(&mut self, event: &CanvasEvent) {
        if event.records_snapshot() {
            if let Err(err) = self.history.record(self.surface.objects()) {
                log::error!("Failed to record history snapshot: {err}");
            }
        }
        if event.changes_content() {
            self.persistence.mark_dirty();
        }
    }
}
