//! # Polygon Editor
//!
//! An interactive polygon drawing overlay. Users click to place vertices,
//! double-click to close a polygon, drag vertices of finished or in-progress
//! polygons, Ctrl/Cmd-click on an edge to insert a vertex, and undo with a right
//! click or Ctrl/Cmd+Z.
//!
//! ## Layers
//! - [`geometry`] and [`color`]: pure helpers (distances, segment projection,
//!   CSS color alpha adjustment)
//! - [`PolygonModel`] and [`History`]: polygons, the pending vertex sequence and
//!   bounded snapshot undo
//! - [`InteractionEngine`]: hit-testing, drag handling, ghost insertion points
//! - [`PolygonEditor`]: lifecycle and event dispatch over a host [`Surface`]
//! - `ui`: the egui host that paints the editor and feeds it input

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod color;
mod constants;
mod editor;
mod engine;
mod error;
pub mod geometry;
mod history;
mod model;
mod surface;
mod types;
mod ui;

// Re-export public types and functions
pub use color::adjust_alpha;
pub use editor::{EditorEvent, PolygonEditor};
pub use engine::{CompletionCallback, InteractionEngine};
pub use error::EditorError;
pub use geometry::{closest_point_on_segment, distance};
pub use history::{History, HistorySnapshot};
pub use model::{PolygonModel, MIN_POLYGON_POINTS};
pub use surface::Surface;
pub use types::*;
pub use ui::{AppSettings, EguiSurface, PolygonEditorApp};

/// Environment variable naming a JSON file with [`EditorOptions`].
pub const CONFIG_ENV_VAR: &str = "POLYGON_EDITOR_CONFIG";

/// Loads editor options from the file named by [`CONFIG_ENV_VAR`], if set.
///
/// Falls back to defaults (with a warning) when the file cannot be read or parsed.
pub fn options_from_env() -> EditorOptions {
    let Ok(path) = std::env::var(CONFIG_ENV_VAR) else {
        return EditorOptions::default();
    };
    let loaded = std::fs::read_to_string(&path)
        .map_err(|err| err.to_string())
        .and_then(|json| EditorOptions::from_json(&json).map_err(|err| err.to_string()));
    match loaded {
        Ok(options) => {
            log::info!("loaded editor options from {path}");
            options
        }
        Err(err) => {
            log::warn!("ignoring editor options in {path}: {err}");
            EditorOptions::default()
        }
    }
}

/// Runs the polygon editor demo application.
///
/// This function initializes the egui application window and starts the main event loop.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// use polygon_editor::{options_from_env, run_app};
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app(options_from_env())
/// }
/// ```
pub fn run_app(options: EditorOptions) -> Result<(), eframe::Error> {
    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Polygon Editor",
        native_options,
        Box::new(
            move |cc: &eframe::CreationContext<'_>| -> Result<Box<dyn eframe::App>, Box<dyn std::error::Error + Send + Sync>> {
                let app = PolygonEditorApp::new(cc, options)?;
                Ok(Box::new(app))
            },
        ),
    )
}
