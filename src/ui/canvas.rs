//! Canvas input handling.
//!
//! Translates egui's raw input into [`EditorEvent`]s in canvas-local
//! coordinates, in the order a browser would deliver them: press, release,
//! click, and finally a double click after the click that completed it.

use super::state::PolygonEditorApp;
use crate::editor::EditorEvent;
use crate::surface::Surface;
use crate::types::{CursorAffordance, Point};
use eframe::egui;

impl PolygonEditorApp {
    /// Allocates the canvas, feeds this frame's input to the editor and paints it.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI to allocate the canvas in
    pub fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;
        self.canvas_rect = Some(rect);

        if self.editor.is_destroyed() {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Editor destroyed",
                egui::FontId::proportional(16.0),
                ui.visuals().weak_text_color(),
            );
            return;
        }

        self.notify_resize(ui.ctx(), rect);

        let bound = self.editor.surface().is_some_and(|s| s.is_bound());
        if bound {
            let events = ui.input(|input| translate_input(input, rect));
            for event in events {
                self.editor.handle_event(event);
            }
        }

        if response.hovered() && self.editor.is_active() {
            ui.ctx()
                .set_cursor_icon(cursor_icon(self.editor.engine().affordance()));
        }

        let (visible, looping) = self
            .editor
            .surface()
            .map_or((false, false), |s| (s.is_visible(), s.is_looping()));
        if visible {
            super::rendering::paint_editor(&painter, rect.min, self.editor.engine());
        }
        if looping {
            ui.ctx().request_repaint();
        }
    }

    /// Delivers a resize notification when the canvas size or pixel density changed.
    fn notify_resize(&mut self, ctx: &egui::Context, rect: egui::Rect) {
        let pixels_per_point = ctx.pixels_per_point();
        let changed = self.editor.surface().is_some_and(|s| {
            s.size() != rect.size() || s.pixels_per_point() != pixels_per_point
        });
        if changed {
            self.editor
                .on_resized(rect.width(), rect.height(), pixels_per_point);
        }
    }
}

fn cursor_icon(affordance: CursorAffordance) -> egui::CursorIcon {
    match affordance {
        CursorAffordance::Crosshair => egui::CursorIcon::Crosshair,
        CursorAffordance::Move => egui::CursorIcon::Move,
        CursorAffordance::Copy => egui::CursorIcon::Copy,
    }
}

fn to_local(pos: egui::Pos2, rect: egui::Rect) -> Point {
    Point::new(pos.x - rect.min.x, pos.y - rect.min.y)
}

/// Converts one frame of egui input into editor events for the canvas at `rect`.
///
/// Moves, presses and clicks only count inside the canvas. Primary releases always
/// produce `PointerUp` so a drag ends wherever the button is let go.
pub(super) fn translate_input(input: &egui::InputState, rect: egui::Rect) -> Vec<EditorEvent> {
    let mut events = Vec::new();

    for event in &input.events {
        match event {
            egui::Event::PointerMoved(pos) if rect.contains(*pos) => {
                events.push(EditorEvent::PointerMove {
                    pos: to_local(*pos, rect),
                    modifier: input.modifiers.command,
                });
            }
            egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed,
                modifiers,
            } => {
                let inside = rect.contains(*pos);
                if *pressed {
                    if inside {
                        events.push(EditorEvent::PointerDown {
                            pos: to_local(*pos, rect),
                        });
                    }
                } else {
                    events.push(EditorEvent::PointerUp);
                    if inside {
                        events.push(EditorEvent::Click {
                            pos: to_local(*pos, rect),
                            modifier: modifiers.command,
                        });
                    }
                }
            }
            egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Secondary,
                pressed: false,
                ..
            } if rect.contains(*pos) => {
                events.push(EditorEvent::SecondaryClick);
            }
            egui::Event::Key {
                key: egui::Key::Z,
                pressed: true,
                modifiers,
                ..
            } if modifiers.command && !modifiers.shift => {
                events.push(EditorEvent::UndoShortcut);
            }
            _ => {}
        }
    }

    let double_clicked = input.pointer.button_double_clicked(egui::PointerButton::Primary)
        && input
            .pointer
            .interact_pos()
            .is_some_and(|pos| rect.contains(pos));
    if double_clicked {
        events.push(EditorEvent::DoubleClick);
    }

    events
}
