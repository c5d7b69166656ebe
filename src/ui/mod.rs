//! egui host for the polygon editor.
//!
//! # Module Organization
//!
//! - `state` - The `PolygonEditorApp` struct and persisted settings
//! - `surface` - The egui implementation of the host surface
//! - `canvas` - Translation of egui input into editor events
//! - `rendering` - Painting polygons, vertices and previews

mod canvas;
mod rendering;
mod state;
mod surface;

pub use state::{AppSettings, PolygonEditorApp};
pub use surface::EguiSurface;

use self::state::SETTINGS_KEY;
use eframe::egui;

impl eframe::App for PolygonEditorApp {
    /// Persist UI settings between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.settings_json() {
            Ok(json) => storage.set_string(SETTINGS_KEY, json),
            Err(err) => log::warn!("failed to serialize app settings: {err}"),
        }
    }

    /// Main update function called by egui for each frame.
    ///
    /// Lays out the toolbar and hands the remaining space to the editor canvas.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let visuals = if self.settings.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);

        egui::TopBottomPanel::top("top_toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.draw_canvas(ui);
            });
    }
}

impl PolygonEditorApp {
    /// Draws the toolbar with lifecycle controls and counters.
    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if self.editor.is_destroyed() {
                if ui.button("Recreate").clicked() {
                    if let Err(err) = self.recreate_editor(ui.ctx()) {
                        log::error!("could not recreate editor: {err}");
                    }
                }
            } else {
                let label = if self.editor.is_active() { "Disable" } else { "Enable" };
                if ui.button(label).clicked() {
                    if self.editor.is_active() {
                        self.editor.disable();
                    } else {
                        self.editor.enable();
                    }
                }
                if ui.button("Reset").clicked() {
                    self.editor.reset();
                }
                let can_undo = self.editor.engine().can_undo();
                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    self.editor.undo();
                }
                if ui.button("Destroy").clicked() {
                    self.editor.destroy();
                }
            }

            ui.separator();
            ui.checkbox(&mut self.settings.dark_mode, "Dark mode");
            ui.checkbox(&mut self.settings.show_help, "Help");

            ui.separator();
            let engine = self.editor.engine();
            ui.label(format!(
                "{} polygons, {} pending points, {} undo steps",
                engine.model().polygons().len(),
                engine.model().current_points().len(),
                engine.history_len()
            ));
        });

        if self.settings.show_help {
            ui.weak(
                "Click to add points, double-click to close. Drag points to move them. \
                 Ctrl/Cmd-click an edge to insert a point. Right-click or Ctrl/Cmd+Z to undo.",
            );
        }
    }
}
