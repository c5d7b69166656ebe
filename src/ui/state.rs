//! Application state for the egui host.
//!
//! The app owns one [`PolygonEditor`] bound to an [`EguiSurface`] plus a few UI
//! settings that persist between runs.

use super::surface::EguiSurface;
use crate::editor::PolygonEditor;
use crate::error::EditorError;
use crate::types::{EditorOptions, Point};
use eframe::egui;
use serde::{Deserialize, Serialize};

/// Storage key for persisted UI settings.
pub(super) const SETTINGS_KEY: &str = "app_settings";

/// UI settings persisted through eframe storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Whether dark mode visuals are enabled
    pub dark_mode: bool,
    /// Whether the usage hint is shown under the toolbar
    pub show_help: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            dark_mode: true,
            show_help: true,
        }
    }
}

/// The demo application: a toolbar over a full-window polygon editor canvas.
pub struct PolygonEditorApp {
    /// The editor hosted on the canvas
    pub editor: PolygonEditor<EguiSurface>,
    /// Options used to (re)create the editor
    pub options: EditorOptions,
    /// Persisted UI settings
    pub settings: AppSettings,
    /// Screen rect of the canvas during the last frame
    pub canvas_rect: Option<egui::Rect>,
    /// Number of polygons reported by the last completion callback
    pub completed: std::rc::Rc<std::cell::Cell<usize>>,
}

impl PolygonEditorApp {
    /// Creates the app from eframe's creation context, restoring persisted settings.
    pub fn new(cc: &eframe::CreationContext<'_>, options: EditorOptions) -> Result<Self, EditorError> {
        let mut app = Self::with_context(&cc.egui_ctx, options)?;
        if let Some(json) = cc.storage.and_then(|storage| storage.get_string(SETTINGS_KEY)) {
            match serde_json::from_str(&json) {
                Ok(settings) => app.settings = settings,
                Err(err) => log::warn!("discarding stored settings: {err}"),
            }
        }
        Ok(app)
    }

    /// Creates the app on an existing egui context with default settings.
    pub fn with_context(ctx: &egui::Context, options: EditorOptions) -> Result<Self, EditorError> {
        let completed = std::rc::Rc::new(std::cell::Cell::new(0));
        let editor = Self::build_editor(ctx, &options, &completed)?;
        Ok(Self {
            editor,
            options,
            settings: AppSettings::default(),
            canvas_rect: None,
            completed,
        })
    }

    /// Replaces a destroyed editor with a fresh one.
    pub fn recreate_editor(&mut self, ctx: &egui::Context) -> Result<(), EditorError> {
        self.editor.destroy();
        self.editor = Self::build_editor(ctx, &self.options, &self.completed)?;
        self.completed.set(0);
        Ok(())
    }

    fn build_editor(
        ctx: &egui::Context,
        options: &EditorOptions,
        completed: &std::rc::Rc<std::cell::Cell<usize>>,
    ) -> Result<PolygonEditor<EguiSurface>, EditorError> {
        let mut editor = PolygonEditor::new(EguiSurface::new(ctx), options.clone())?;
        let completed = std::rc::Rc::clone(completed);
        editor.set_on_complete(move |polygons: Vec<Vec<Point>>| {
            completed.set(polygons.len());
            match serde_json::to_string(&polygons) {
                Ok(json) => log::info!("polygons: {json}"),
                Err(err) => log::warn!("failed to serialize polygons: {err}"),
            }
        });
        Ok(editor)
    }

    /// Serializes the persisted settings to JSON.
    pub fn settings_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.settings)
    }
}
