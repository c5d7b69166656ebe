//! The public editor facade: an [`InteractionEngine`] bound to a host [`Surface`].
//!
//! The facade owns the lifecycle (enable, disable, reset, destroy) and dispatches
//! host input events to the engine. Destruction is terminal; afterwards every
//! call is a no-op and incoming events are dropped.

use crate::engine::InteractionEngine;
use crate::error::EditorError;
use crate::surface::Surface;
use crate::types::{EditorOptions, Point, Polygon};

/// Input delivered by the host, in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorEvent {
    /// Primary button pressed
    PointerDown {
        /// Press position
        pos: Point,
    },
    /// Pointer moved
    PointerMove {
        /// New pointer position
        pos: Point,
        /// Whether the insertion modifier (Ctrl, or Cmd on macOS) is held
        modifier: bool,
    },
    /// Primary button released
    PointerUp,
    /// Primary button clicked (delivered after `PointerUp`)
    Click {
        /// Click position
        pos: Point,
        /// Whether the insertion modifier is held
        modifier: bool,
    },
    /// Primary button double-clicked (delivered after the second `Click`)
    DoubleClick,
    /// Secondary button clicked; triggers undo
    SecondaryClick,
    /// Keyboard undo shortcut (Ctrl+Z / Cmd+Z)
    UndoShortcut,
}

/// Polygon editor overlaying a host surface.
pub struct PolygonEditor<S: Surface> {
    engine: InteractionEngine,
    /// `None` once destroyed
    surface: Option<S>,
}

impl<S: Surface> PolygonEditor<S> {
    /// Builds an editor on the surface the host acquired.
    ///
    /// Fails if the surface could not be obtained; this is the only fatal error
    /// the editor has. On success input is bound and the render loop started.
    pub fn new(surface: Result<S, EditorError>, options: EditorOptions) -> Result<Self, EditorError> {
        let mut surface = surface?;
        surface.bind_events();
        surface.show();
        surface.start_loop();
        log::debug!("polygon editor created");
        Ok(Self {
            engine: InteractionEngine::new(options),
            surface: Some(surface),
        })
    }

    /// Registers the single completion callback, invoked synchronously with all
    /// polygons (copied) each time one is finalized.
    pub fn set_on_complete(&mut self, callback: impl FnMut(Vec<Vec<Point>>) + 'static) {
        self.engine.set_on_complete(callback);
    }

    /// Read access to the engine, for painting and queries.
    pub fn engine(&self) -> &InteractionEngine {
        &self.engine
    }

    /// The host surface, unless the editor was destroyed.
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Copies of every polygon's points in creation order.
    pub fn polygons(&self) -> Vec<Vec<Point>> {
        self.engine.polygons()
    }

    /// Copies of the finalized polygons including their colors.
    pub fn styled_polygons(&self) -> Vec<Polygon> {
        self.engine.styled_polygons()
    }

    /// Whether the editor accepts input and renders.
    pub fn is_active(&self) -> bool {
        self.surface.is_some() && self.engine.is_active()
    }

    /// Whether [`destroy`](Self::destroy) has been called.
    pub fn is_destroyed(&self) -> bool {
        self.surface.is_none()
    }

    /// Shows the overlay and resumes rendering. No-op if already active or
    /// destroyed.
    pub fn enable(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if self.engine.is_active() {
            return;
        }
        self.engine.set_active(true);
        surface.show();
        surface.start_loop();
        log::debug!("editor enabled");
    }

    /// Like [`enable`](Self::enable) but reports use after destruction.
    pub fn try_enable(&mut self) -> Result<(), EditorError> {
        if self.is_destroyed() {
            return Err(EditorError::Destroyed);
        }
        self.enable();
        Ok(())
    }

    /// Hides the overlay and halts rendering, keeping all state. No-op if
    /// already inactive.
    pub fn disable(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if !self.engine.is_active() {
            return;
        }
        self.engine.set_active(false);
        surface.hide();
        surface.stop_loop();
        log::debug!("editor disabled");
    }

    /// Clears polygons, pending vertices and the cursor. History is kept.
    pub fn reset(&mut self) {
        if self.surface.is_some() {
            self.engine.reset();
        }
    }

    /// Undoes the last edit. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.surface.is_some() && self.engine.undo()
    }

    /// Tears the editor down: stops the render tick, unbinds input, then releases
    /// the surface. The editor cannot be used afterwards.
    pub fn destroy(&mut self) {
        let Some(mut surface) = self.surface.take() else {
            return;
        };
        surface.stop_loop();
        surface.unbind_events();
        surface.release();
        self.engine.set_active(false);
        self.engine.clear_on_complete();
        log::debug!("editor destroyed");
    }

    /// Forwards a host resize to the surface. Editor state is unaffected.
    pub fn on_resized(&mut self, width: f32, height: f32, pixels_per_point: f32) {
        if let Some(surface) = self.surface.as_mut() {
            surface.resized(width, height, pixels_per_point);
        }
    }

    /// Dispatches one input event to the engine.
    pub fn handle_event(&mut self, event: EditorEvent) {
        if self.surface.is_none() {
            return;
        }
        match event {
            EditorEvent::PointerDown { pos } => self.engine.pointer_down(pos),
            EditorEvent::PointerMove { pos, modifier } => self.engine.pointer_move(pos, modifier),
            EditorEvent::PointerUp => self.engine.pointer_up(),
            EditorEvent::Click { pos, modifier } => self.engine.click(pos, modifier),
            EditorEvent::DoubleClick => self.engine.double_click(),
            EditorEvent::SecondaryClick | EditorEvent::UndoShortcut => {
                self.engine.undo();
            }
        }
    }
}
