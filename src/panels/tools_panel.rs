use egui::{Color32, Slider};

use crate::components::tool_button::ToolButton;
use crate::config::{ColorMode, FillMode, StyleType};
use crate::import::{AssetSource, IconQuery};
use crate::shapes::ShapeKind;
use crate::state::SketchContext;
use crate::tool::ToolKind;

/// Icon search state kept between frames.
///
/// Listings and icon bytes that are still loading are asked for again on
/// every [`IconBrowser::poll`] until the source answers.
#[derive(Debug, Default)]
pub struct IconBrowser {
    query: IconQuery,
    results: Vec<String>,
    loaded: bool,
    listing_pending: bool,
    /// Icon chosen before its bytes arrived
    pending_insert: Option<String>,
}

impl IconBrowser {
    pub fn results(&self) -> &[String] {
        &self.results
    }

    pub fn query_mut(&mut self) -> &mut IconQuery {
        &mut self.query
    }

    pub fn is_waiting(&self) -> bool {
        self.listing_pending || self.pending_insert.is_some()
    }

    /// Re-run the listing for the current query
    pub fn refresh(&mut self, assets: &dyn AssetSource) {
        self.loaded = true;
        self.listing_pending = false;
        match assets.list_icons(&self.query) {
            Ok(results) => self.results = results,
            Err(err) if err.is_pending() => self.listing_pending = true,
            Err(err) => {
                log::warn!("Icon listing failed: {err}");
                self.results.clear();
            }
        }
    }

    /// Place the icon at `path`, or hold on to it until its bytes arrive
    pub fn choose(&mut self, sketch: &mut SketchContext, assets: &dyn AssetSource, path: &str) {
        self.pending_insert = None;
        match sketch.try_insert_icon(assets, path) {
            Ok(id) => log::debug!("Placed icon {path} as {id}"),
            Err(err) if err.is_pending() => self.pending_insert = Some(path.to_owned()),
            Err(err) => log::warn!("Icon import of {path} failed: {err}"),
        }
    }

    /// Retry whatever was still loading on the previous frame
    pub fn poll(&mut self, sketch: &mut SketchContext, assets: &dyn AssetSource) {
        if self.listing_pending {
            self.refresh(assets);
        }
        if let Some(path) = self.pending_insert.take() {
            self.choose(sketch, assets, &path);
        }
    }

    fn show(&mut self, ui: &mut egui::Ui, sketch: &mut SketchContext, assets: &dyn AssetSource) {
        if !self.loaded {
            self.refresh(assets);
        }
        if self.is_waiting() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.weak("Loading…");
            });
        }

        let mut changed = false;
        ui.horizontal(|ui| {
            ui.label("Category:");
            changed |= ui.text_edit_singleline(&mut self.query.category).lost_focus();
        });
        ui.horizontal(|ui| {
            ui.label("Search:");
            changed |= ui.text_edit_singleline(&mut self.query.search).lost_focus();
        });
        ui.horizontal(|ui| {
            if ui
                .add_enabled(self.query.page > 0, egui::Button::new("◀"))
                .clicked()
            {
                self.query.page -= 1;
                changed = true;
            }
            ui.label(format!("Page {}", self.query.page + 1));
            if ui.button("▶").clicked() {
                self.query.page += 1;
                changed = true;
            }
        });
        if changed {
            self.refresh(assets);
        }

        if self.results.is_empty() {
            if !self.listing_pending {
                ui.weak("No icons");
            }
            return;
        }
        let mut chosen = None;
        egui::ScrollArea::vertical()
            .max_height(160.0)
            .show(ui, |ui| {
                for path in &self.results {
                    let name = path.rsplit('/').next().unwrap_or(path);
                    if ui.button(name).on_hover_text(path).clicked() {
                        chosen = Some(path.clone());
                    }
                }
            });
        if let Some(path) = chosen {
            self.choose(sketch, assets, &path);
        }
    }
}

/// Left side panel: tools, style, inserts, generation settings and history
pub fn tools_panel(
    ctx: &egui::Context,
    sketch: &mut SketchContext,
    icons: &mut IconBrowser,
    assets: &dyn AssetSource,
) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Tools");
                let active = sketch.active_tool();
                ui.horizontal_wrapped(|ui| {
                    for kind in ToolKind::ALL {
                        if ToolButton::new(kind, kind == active).show(ui).clicked() {
                            log::info!("Tool selected from UI: {}", kind.label());
                            sketch.switch_tool(kind);
                        }
                    }
                });
                ui.separator();

                style_section(ui, sketch);
                ui.separator();

                ui.collapsing("Shapes", |ui| shape_section(ui, sketch));
                ui.collapsing("Icons", |ui| icons.show(ui, sketch, assets));
                ui.weak("Drop an image file onto the window to import it.");
                ui.separator();

                ui.collapsing("Generation", |ui| generation_section(ui, sketch));
                ui.separator();

                history_section(ui, sketch);
            });
        });
}

fn style_section(ui: &mut egui::Ui, sketch: &mut SketchContext) {
    let mut style = sketch.style().clone();
    ui.horizontal(|ui| {
        ui.label("Color:");
        egui::color_picker::color_edit_button_srgba(
            ui,
            &mut style.stroke_color,
            egui::color_picker::Alpha::Opaque,
        );
    });
    ui.horizontal(|ui| {
        ui.label("Width:");
        ui.add(Slider::new(&mut style.stroke_width, 1.0..=40.0));
    });
    ui.horizontal(|ui| {
        ui.label("Smoothing:");
        ui.add(Slider::new(&mut style.decimation, 1..=8));
    });
    ui.horizontal(|ui| {
        ui.label("Fill:");
        ui.radio_value(&mut style.fill_mode, FillMode::Regular, "Outline");
        ui.radio_value(&mut style.fill_mode, FillMode::Solid, "Solid");
    });
    if &style != sketch.style() {
        sketch.set_style(style);
    }
}

fn shape_section(ui: &mut egui::Ui, sketch: &mut SketchContext) {
    let mut style = sketch.style().clone();
    egui::ComboBox::from_id_salt("shape_kind")
        .selected_text(style.shape_kind.label())
        .show_ui(ui, |ui| {
            for kind in ShapeKind::ALL {
                ui.selectable_value(&mut style.shape_kind, kind, kind.label());
            }
        });
    let kind = style.shape_kind;
    if &style != sketch.style() {
        sketch.set_style(style);
    }
    if ui.button("Add shape").clicked() {
        if let Err(err) = sketch.insert_shape(kind) {
            log::warn!("Could not add {}: {err}", kind.label());
        }
    }
}

fn generation_section(ui: &mut egui::Ui, sketch: &mut SketchContext) {
    let mut settings = sketch.generation_settings().clone();
    egui::ComboBox::from_label("Style")
        .selected_text(settings.style_type.label())
        .show_ui(ui, |ui| {
            for style in StyleType::ALL {
                ui.selectable_value(&mut settings.style_type, style, style.label());
            }
        });
    egui::ComboBox::from_label("Colors")
        .selected_text(settings.color_mode.label())
        .show_ui(ui, |ui| {
            for mode in ColorMode::ALL {
                ui.selectable_value(&mut settings.color_mode, mode, mode.label());
            }
        });
    ui.add(Slider::new(&mut settings.creativity, 0..=100).text("Creativity"));
    ui.add(Slider::new(&mut settings.detail, 0..=100).text("Detail"));
    if &settings != sketch.generation_settings() {
        sketch.set_generation_settings(settings);
    }

    if ui.button("Copy generation request").clicked() {
        match sketch.generation_request().and_then(|request| Ok(request.to_json()?)) {
            Ok(json) => {
                log::info!("Copied generation request ({} bytes)", json.len());
                ui.ctx().copy_text(json);
            }
            Err(err) => log::warn!("Could not build generation request: {err}"),
        }
    }
}

fn history_section(ui: &mut egui::Ui, sketch: &mut SketchContext) {
    ui.horizontal(|ui| {
        let has_objects = !sketch.surface().is_empty();
        if ui.add_enabled(has_objects, egui::Button::new("Undo")).clicked() {
            sketch.undo();
        }
        if ui
            .add_enabled(has_objects, egui::Button::new("Clear"))
            .clicked()
        {
            sketch.clear();
        }
    });
    ui.label(format!(
        "{} objects, {} snapshots",
        sketch.surface().len(),
        sketch.history().len()
    ));
    if sketch.is_erase_pending() {
        ui.colored_label(Color32::GRAY, "Erasing…");
    }
}
