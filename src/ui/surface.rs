//! egui implementation of the host [`Surface`].
//!
//! egui repaints on input by itself; the render tick is the continuous
//! `request_repaint` the canvas issues every frame while the loop is running.
//! Visibility, binding and release are flags the canvas consults before routing
//! input or painting.

use crate::error::EditorError;
use crate::surface::Surface;
use eframe::egui;

/// Canvas surface backed by an egui context.
pub struct EguiSurface {
    ctx: egui::Context,
    visible: bool,
    looping: bool,
    bound: bool,
    released: bool,
    /// Last size reported by the host, in points
    size: egui::Vec2,
    pixels_per_point: f32,
}

impl EguiSurface {
    /// Acquires a surface on the given context.
    ///
    /// Fails when the context reports a pixel density that cannot be painted with.
    pub fn new(ctx: &egui::Context) -> Result<Self, EditorError> {
        let pixels_per_point = ctx.pixels_per_point();
        if !pixels_per_point.is_finite() || pixels_per_point <= 0.0 {
            return Err(EditorError::SurfaceUnavailable(format!(
                "unusable pixel density {pixels_per_point}"
            )));
        }
        Ok(Self {
            ctx: ctx.clone(),
            visible: false,
            looping: false,
            bound: false,
            released: false,
            size: egui::Vec2::ZERO,
            pixels_per_point,
        })
    }

    /// Whether the overlay should be painted.
    pub fn is_visible(&self) -> bool {
        self.visible && !self.released
    }

    /// Whether input should be routed to the editor.
    pub fn is_bound(&self) -> bool {
        self.bound && !self.released
    }

    /// Last size reported through [`Surface::resized`].
    pub fn size(&self) -> egui::Vec2 {
        self.size
    }

    /// Pixel density at the last resize.
    pub fn pixels_per_point(&self) -> f32 {
        self.pixels_per_point
    }
}

impl Surface for EguiSurface {
    fn bind_events(&mut self) {
        self.bound = true;
    }

    fn unbind_events(&mut self) {
        self.bound = false;
    }

    fn show(&mut self) {
        self.visible = true;
        self.ctx.request_repaint();
    }

    fn hide(&mut self) {
        self.visible = false;
        self.ctx.request_repaint();
    }

    fn start_loop(&mut self) {
        self.looping = true;
        self.ctx.request_repaint();
    }

    fn stop_loop(&mut self) {
        self.looping = false;
    }

    fn is_looping(&self) -> bool {
        self.looping && !self.released
    }

    fn resized(&mut self, width: f32, height: f32, pixels_per_point: f32) {
        log::debug!("surface resized to {width}x{height} @ {pixels_per_point}x");
        self.size = egui::vec2(width, height);
        self.pixels_per_point = pixels_per_point;
    }

    fn release(&mut self) {
        self.visible = false;
        self.released = true;
        self.ctx.request_repaint();
    }
}
