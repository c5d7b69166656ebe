//! Host surface abstraction.
//!
//! The editor paints onto a surface owned by the host environment and relies on
//! it for the periodic render tick and for delivering input. Hosts implement
//! [`Surface`]; the egui implementation lives in `ui::surface`.

/// Rendering surface and render-loop scheduler provided by the host.
pub trait Surface {
    /// Starts routing input from the host to the editor.
    fn bind_events(&mut self);

    /// Stops routing input. No events are delivered afterwards.
    fn unbind_events(&mut self);

    /// Makes the overlay visible.
    fn show(&mut self);

    /// Hides the overlay without discarding anything.
    fn hide(&mut self);

    /// Starts (or restarts) the periodic render tick.
    fn start_loop(&mut self);

    /// Stops the periodic render tick.
    fn stop_loop(&mut self);

    /// Whether the render tick is currently scheduled.
    fn is_looping(&self) -> bool;

    /// The host resized the surface. Only the painting transform depends on this.
    fn resized(&mut self, width: f32, height: f32, pixels_per_point: f32);

    /// Releases the surface. Called once, last, during destruction.
    fn release(&mut self);
}
