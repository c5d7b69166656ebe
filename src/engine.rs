//! Interaction engine: turns raw pointer and keyboard input into model edits.
//!
//! The engine tracks a few orthogonal pieces of transient state on top of the
//! [`PolygonModel`]: the vertex being dragged, whether the current press turned
//! into a drag, the hovered vertex, and the ghost insertion candidate shown while
//! the modifier key is held over an edge.
//!
//! Event handling order mirrors what a browser-style host delivers for a single
//! primary click: pointer-down, pointer-up, click. A double click arrives as two
//! of those sequences followed by a double-click event.

use crate::geometry::{closest_point_on_segment, distance};
use crate::model::{PolygonModel, MIN_POLYGON_POINTS};
use crate::types::*;

/// Callback invoked with every polygon's points after a polygon is finalized.
pub type CompletionCallback = Box<dyn FnMut(Vec<Vec<Point>>)>;

/// Owns the polygon model and applies user input to it.
pub struct InteractionEngine {
    options: EditorOptions,
    model: PolygonModel,
    active: bool,
    /// Last known cursor position, cleared on finalize/undo/reset
    cursor: Option<Point>,
    /// Vertex grabbed by the current press
    dragging: Option<VertexRef>,
    /// Set once the grabbed vertex actually moved; swallows the next click
    drag_occurred: bool,
    /// Whether the current drag already recorded its undo step
    drag_state_saved: bool,
    hover: Option<VertexRef>,
    ghost: Option<GhostPoint>,
    on_complete: Option<CompletionCallback>,
}

impl InteractionEngine {
    /// Creates an active engine with an empty model.
    pub fn new(options: EditorOptions) -> Self {
        let options = options.sanitized();
        Self {
            model: PolygonModel::new(options.max_history_size),
            options,
            active: true,
            cursor: None,
            dragging: None,
            drag_occurred: false,
            drag_state_saved: false,
            hover: None,
            ghost: None,
            on_complete: None,
        }
    }

    /// Registers the completion callback, replacing any previous one.
    pub fn set_on_complete(&mut self, callback: impl FnMut(Vec<Vec<Point>>) + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    /// Removes the completion callback.
    pub fn clear_on_complete(&mut self) {
        self.on_complete = None;
    }

    // --- queries ---

    /// Configuration the engine was built with.
    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Read-only view of the model for painting.
    pub fn model(&self) -> &PolygonModel {
        &self.model
    }

    /// Copies of every finalized polygon's points, in creation order.
    pub fn polygons(&self) -> Vec<Vec<Point>> {
        self.model.point_arrays()
    }

    /// Copies of the finalized polygons including their colors.
    pub fn styled_polygons(&self) -> Vec<Polygon> {
        self.model.polygons().to_vec()
    }

    /// Copy of the in-progress vertex sequence.
    pub fn pending_points(&self) -> Vec<Point> {
        self.model.current_points().to_vec()
    }

    /// Whether input is currently accepted.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Last cursor position reported by a pointer-move.
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    /// Whether a vertex is currently grabbed.
    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    /// Current edge insertion candidate.
    pub fn ghost(&self) -> Option<GhostPoint> {
        self.ghost
    }

    /// Vertex under the cursor as of the last pointer-move.
    pub fn hover(&self) -> Option<VertexRef> {
        self.hover
    }

    /// Cursor icon the host should show.
    pub fn affordance(&self) -> CursorAffordance {
        if self.dragging.is_some() || self.hover.is_some() {
            CursorAffordance::Move
        } else if self.ghost.is_some() {
            CursorAffordance::Copy
        } else {
            CursorAffordance::Crosshair
        }
    }

    /// Number of undo steps available.
    pub fn history_len(&self) -> usize {
        self.model.history_len()
    }

    /// Returns true if [`undo`](Self::undo) would restore something.
    pub fn can_undo(&self) -> bool {
        self.model.history_len() > 0
    }

    /// Colors the next finalized polygon will receive, as `(stroke, fill)`.
    pub fn next_polygon_colors(&self) -> (String, String) {
        self.options.resolve_colors(self.model.polygons().len())
    }

    // --- lifecycle ---

    /// Accepts or ignores subsequent pointer input. State is kept either way.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Clears polygons, pending vertices, the cursor and any hover or ghost
    /// state. History is kept, and so is a drag in progress: its reference is
    /// stale from here on and further moves are ignored until pointer-up.
    pub fn reset(&mut self) {
        self.model.reset();
        self.cursor = None;
        self.ghost = None;
        self.hover = None;
        log::debug!("editor reset");
    }

    /// Restores the most recent snapshot. Returns false when history is empty.
    pub fn undo(&mut self) -> bool {
        if !self.model.undo() {
            log::debug!("undo requested with empty history");
            return false;
        }
        self.clear_transient();
        log::debug!("undo applied, {} steps left", self.model.history_len());
        true
    }

    fn clear_transient(&mut self) {
        self.cursor = None;
        self.ghost = None;
        self.dragging = None;
        self.hover = None;
    }

    // --- input ---

    /// Primary button pressed at `pos`. Grabs the vertex under the pointer, if any.
    pub fn pointer_down(&mut self, pos: Point) {
        if !self.active {
            return;
        }
        if let Some(vertex) = self.hit_test(pos) {
            log::debug!("drag start on {vertex:?}");
            self.dragging = Some(vertex);
            self.drag_occurred = false;
            self.drag_state_saved = false;
        }
    }

    /// Pointer moved to `pos`; `modifier` is the insertion modifier state.
    pub fn pointer_move(&mut self, pos: Point, modifier: bool) {
        if !self.active {
            return;
        }
        self.cursor = Some(pos);

        if let Some(vertex) = self.dragging {
            self.drag_occurred = true;
            if self.model.vertex(vertex).is_none() {
                log::warn!("ignoring drag of stale vertex reference {vertex:?}");
                return;
            }
            if !self.drag_state_saved {
                self.model.snapshot();
                self.drag_state_saved = true;
            }
            self.model.move_point(vertex, pos);
            return;
        }

        self.hover = self.hit_test(pos);
        self.ghost = if modifier && self.hover.is_none() {
            self.find_ghost(pos)
        } else {
            None
        };
    }

    /// Primary button released. Ends any drag.
    pub fn pointer_up(&mut self) {
        if let Some(vertex) = self.dragging.take() {
            log::debug!("drag end on {vertex:?}");
        }
    }

    /// A full click at `pos`.
    ///
    /// Inserts the ghost point when the modifier is held over an edge, swallows the
    /// click that ends a drag, and otherwise appends a pending vertex unless it
    /// repeats the last one exactly.
    pub fn click(&mut self, pos: Point, modifier: bool) {
        if !self.active {
            return;
        }

        if modifier {
            if let Some(ghost) = self.ghost.take() {
                self.insert_ghost(ghost);
                return;
            }
        }

        if self.drag_occurred {
            self.drag_occurred = false;
            return;
        }

        if self.model.current_points().last() == Some(&pos) {
            return;
        }
        self.model.snapshot();
        self.model.add_pending_point(pos);
    }

    /// Double click: closes the pending sequence into a polygon when it has at
    /// least three vertices.
    pub fn double_click(&mut self) {
        if !self.active || self.model.current_points().len() < MIN_POLYGON_POINTS {
            return;
        }

        self.model.snapshot();
        let (stroke, fill) = self.next_polygon_colors();
        if let Some(index) = self.model.finalize_polygon(stroke, fill) {
            self.cursor = None;
            log::debug!(
                "finalized polygon {index} with {} points",
                self.model.polygons()[index].points.len()
            );
            let polygons = self.model.point_arrays();
            if let Some(callback) = self.on_complete.as_mut() {
                callback(polygons);
            }
        }
    }

    fn insert_ghost(&mut self, ghost: GhostPoint) {
        let insertable = self
            .model
            .polygons()
            .get(ghost.polygon_index)
            .is_some_and(|p| ghost.insert_index <= p.points.len());
        if !insertable {
            log::warn!("ignoring stale insertion point {ghost:?}");
            return;
        }
        self.model.snapshot();
        self.model
            .insert_point(ghost.polygon_index, ghost.insert_index, ghost.point);
        log::debug!(
            "inserted vertex into polygon {} at {}",
            ghost.polygon_index,
            ghost.insert_index
        );
    }

    /// Finds the vertex within the hit threshold of `pos`. Pending vertices take
    /// priority over finalized polygons; earlier indices win within each.
    fn hit_test(&self, pos: Point) -> Option<VertexRef> {
        let threshold = self.options.hit_threshold();
        let within = |p: &Point| distance(pos, *p) <= threshold;

        if let Some(index) = self.model.current_points().iter().position(within) {
            return Some(VertexRef::Pending(index));
        }
        self.model
            .polygons()
            .iter()
            .enumerate()
            .find_map(|(polygon, p)| {
                p.points
                    .iter()
                    .position(within)
                    .map(|point| VertexRef::Polygon { polygon, point })
            })
    }

    /// First edge (polygon order, then edge order) passing within the hit
    /// threshold of `pos`. Edges wrap from the last vertex back to the first.
    fn find_ghost(&self, pos: Point) -> Option<GhostPoint> {
        let threshold = self.options.hit_threshold();
        for (polygon_index, polygon) in self.model.polygons().iter().enumerate() {
            let points = &polygon.points;
            for j in 0..points.len() {
                let a = points[j];
                let b = points[(j + 1) % points.len()];
                let closest = closest_point_on_segment(pos, a, b);
                if distance(pos, closest) <= threshold {
                    return Some(GhostPoint {
                        polygon_index,
                        insert_index: j + 1,
                        point: closest,
                    });
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    fn click_at(engine: &mut InteractionEngine, pos: Point) {
        engine.pointer_down(pos);
        engine.pointer_up();
        engine.click(pos, false);
    }

    fn engine_with_triangle() -> InteractionEngine {
        let mut engine = InteractionEngine::new(EditorOptions::default());
        for pos in [p(0.0, 0.0), p(100.0, 0.0), p(0.0, 100.0)] {
            click_at(&mut engine, pos);
        }
        engine.double_click();
        engine
    }

    #[test]
    fn test_clicks_then_finalize_produce_one_polygon() {
        let mut engine = InteractionEngine::new(EditorOptions::default());
        let clicked = vec![p(10.0, 10.0), p(200.0, 15.0), p(120.0, 180.0), p(30.0, 150.0)];
        for pos in &clicked {
            click_at(&mut engine, *pos);
        }
        engine.double_click();

        assert_eq!(engine.polygons(), vec![clicked]);
        assert!(engine.pending_points().is_empty());
        assert_eq!(engine.cursor(), None);
    }

    #[test]
    fn test_finalize_with_two_points_is_a_no_op() {
        let mut engine = InteractionEngine::new(EditorOptions::default());
        click_at(&mut engine, p(0.0, 0.0));
        click_at(&mut engine, p(50.0, 50.0));
        let history = engine.history_len();
        engine.double_click();
        assert!(engine.polygons().is_empty());
        assert_eq!(engine.pending_points().len(), 2);
        assert_eq!(engine.history_len(), history);
    }

    #[test]
    fn test_duplicate_click_adds_one_vertex() {
        let mut engine = InteractionEngine::new(EditorOptions::default());
        engine.click(p(40.0, 40.0), false);
        engine.click(p(40.0, 40.0), false);
        assert_eq!(engine.pending_points(), vec![p(40.0, 40.0)]);
        assert_eq!(engine.history_len(), 1);
    }

    #[test]
    fn test_revisiting_an_earlier_vertex_is_allowed() {
        let mut engine = InteractionEngine::new(EditorOptions::default());
        engine.click(p(40.0, 40.0), false);
        engine.click(p(90.0, 40.0), false);
        engine.click(p(40.0, 40.0), false);
        assert_eq!(engine.pending_points().len(), 3);
    }

    #[test]
    fn test_completion_callback_receives_all_polygons() {
        let received: Rc<RefCell<Vec<Vec<Vec<Point>>>>> = Rc::default();
        let sink = Rc::clone(&received);

        let mut engine = engine_with_triangle();
        engine.set_on_complete(move |polygons| sink.borrow_mut().push(polygons));
        for pos in [p(300.0, 300.0), p(400.0, 300.0), p(300.0, 400.0)] {
            click_at(&mut engine, pos);
        }
        engine.double_click();
        engine.double_click();

        let calls = received.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].len(), 2);
        assert_eq!(calls[0][1][0], p(300.0, 300.0));
    }

    #[test]
    fn test_colors_are_fixed_at_creation() {
        let options = EditorOptions {
            stroke_color: ColorSpec::from(vec!["#0000ff", "#00ff00"]),
            ..Default::default()
        };
        let mut engine = InteractionEngine::new(options);
        for offset in [0.0, 500.0] {
            for pos in [p(offset, 0.0), p(offset + 50.0, 0.0), p(offset, 50.0)] {
                click_at(&mut engine, pos);
            }
            engine.double_click();
        }

        let polygons = engine.styled_polygons();
        assert_eq!(polygons[0].stroke_color, "#0000ff");
        assert_eq!(polygons[0].fill_color, "rgba(0,0,255,0.2)");
        assert_eq!(polygons[1].stroke_color, "#00ff00");
        assert_eq!(engine.next_polygon_colors().0, "#0000ff");
    }

    #[test]
    fn test_undo_reverts_last_operation() {
        let mut engine = InteractionEngine::new(EditorOptions::default());
        click_at(&mut engine, p(1.0, 1.0));
        click_at(&mut engine, p(50.0, 1.0));
        let before = engine.pending_points();
        let history = engine.history_len();

        click_at(&mut engine, p(50.0, 50.0));
        assert_eq!(engine.history_len(), history + 1);
        assert!(engine.undo());
        assert_eq!(engine.pending_points(), before);
        assert_eq!(engine.history_len(), history);
    }

    #[test]
    fn test_undo_after_finalize_reopens_pending_path() {
        let mut engine = engine_with_triangle();
        assert!(engine.undo());
        assert!(engine.polygons().is_empty());
        assert_eq!(engine.pending_points().len(), 3);
    }

    #[test]
    fn test_undo_with_empty_history_reports_false() {
        let mut engine = InteractionEngine::new(EditorOptions::default());
        assert!(!engine.can_undo());
        assert!(!engine.undo());
    }

    #[test]
    fn test_history_is_bounded() {
        let options = EditorOptions {
            max_history_size: 5,
            ..Default::default()
        };
        let mut engine = InteractionEngine::new(options);
        for i in 0..10 {
            engine.click(p(i as f32 * 20.0, 0.0), false);
        }
        assert_eq!(engine.history_len(), 5);
        while engine.undo() {}
        // The oldest snapshots were evicted, so undo bottoms out at five points.
        assert_eq!(engine.pending_points().len(), 5);
    }

    #[test]
    fn test_drag_records_a_single_snapshot() {
        let mut engine = engine_with_triangle();
        let history = engine.history_len();

        engine.pointer_down(p(100.0, 0.0));
        assert!(engine.is_dragging());
        for step in 1..=5 {
            engine.pointer_move(p(100.0 + step as f32 * 10.0, 0.0), false);
        }
        engine.pointer_up();
        engine.click(p(150.0, 0.0), false);

        assert_eq!(engine.history_len(), history + 1);
        assert_eq!(engine.polygons()[0][1], p(150.0, 0.0));
        assert!(engine.pending_points().is_empty());
        assert!(!engine.is_dragging());

        assert!(engine.undo());
        assert_eq!(engine.polygons()[0][1], p(100.0, 0.0));
    }

    #[test]
    fn test_press_without_move_still_adds_a_vertex() {
        let mut engine = InteractionEngine::new(EditorOptions::default());
        click_at(&mut engine, p(20.0, 20.0));
        // Pressing on the existing vertex starts a drag, but nothing moves.
        engine.pointer_down(p(22.0, 20.0));
        engine.pointer_up();
        engine.click(p(22.0, 20.0), false);
        assert_eq!(engine.pending_points().len(), 2);
    }

    #[test]
    fn test_dragging_a_pending_vertex() {
        let mut engine = InteractionEngine::new(EditorOptions::default());
        click_at(&mut engine, p(20.0, 20.0));
        click_at(&mut engine, p(80.0, 20.0));

        engine.pointer_down(p(81.0, 21.0));
        engine.pointer_move(p(90.0, 60.0), false);
        engine.pointer_up();
        engine.click(p(90.0, 60.0), false);

        assert_eq!(engine.pending_points(), vec![p(20.0, 20.0), p(90.0, 60.0)]);
    }

    #[test]
    fn test_pending_points_win_hit_test() {
        let mut engine = engine_with_triangle();
        click_at(&mut engine, p(103.0, 0.0));
        engine.pointer_move(p(101.0, 0.0), false);
        assert_eq!(engine.hover(), Some(VertexRef::Pending(0)));
        assert_eq!(engine.affordance(), CursorAffordance::Move);
    }

    #[test]
    fn test_hit_threshold_is_inclusive() {
        let mut engine = engine_with_triangle();
        engine.pointer_move(p(8.0, 0.0), false);
        assert_eq!(engine.hover(), Some(VertexRef::Polygon { polygon: 0, point: 0 }));
        engine.pointer_move(p(0.0, -8.5), false);
        assert_eq!(engine.hover(), None);
    }

    #[test]
    fn test_stale_drag_reference_is_ignored() {
        let mut engine = engine_with_triangle();
        engine.pointer_down(p(0.0, 100.0));
        engine.reset();
        assert!(engine.is_dragging());
        let history = engine.history_len();

        engine.pointer_move(p(10.0, 10.0), false);
        assert!(engine.polygons().is_empty());
        assert!(engine.pending_points().is_empty());
        assert_eq!(engine.history_len(), history);
    }

    #[test]
    fn test_undo_after_stale_drag_restores_last_real_edit() {
        let mut engine = engine_with_triangle();
        engine.pointer_down(p(0.0, 100.0));
        engine.reset();
        engine.pointer_move(p(10.0, 10.0), false);
        engine.pointer_move(p(20.0, 20.0), false);
        engine.pointer_up();

        // The triangle's finalize is the newest snapshot: pending path reopens.
        assert!(engine.undo());
        assert!(engine.polygons().is_empty());
        assert_eq!(engine.pending_points().len(), 3);
    }

    #[test]
    fn test_undo_reverts_ghost_insertion() {
        let mut engine = engine_with_triangle();
        let before = engine.styled_polygons();
        let history = engine.history_len();

        engine.pointer_move(p(50.0, 0.0), true);
        engine.click(p(50.0, 0.0), true);
        assert_eq!(engine.polygons()[0].len(), 4);
        assert_eq!(engine.history_len(), history + 1);

        assert!(engine.undo());
        assert_eq!(engine.styled_polygons(), before);
        assert!(engine.pending_points().is_empty());
        assert_eq!(engine.history_len(), history);
    }

    #[test]
    fn test_ghost_insertion_at_edge_midpoint() {
        let mut engine = engine_with_triangle();
        let midpoint = p(50.0, 0.0);

        engine.pointer_move(midpoint, true);
        let ghost = engine.ghost().unwrap();
        assert_eq!(ghost.polygon_index, 0);
        assert_eq!(ghost.insert_index, 1);
        assert_eq!(ghost.point, midpoint);
        assert_eq!(engine.affordance(), CursorAffordance::Copy);

        engine.pointer_down(midpoint);
        engine.pointer_up();
        engine.click(midpoint, true);

        assert_eq!(
            engine.polygons()[0],
            vec![p(0.0, 0.0), midpoint, p(100.0, 0.0), p(0.0, 100.0)]
        );
        assert!(engine.pending_points().is_empty());
        assert_eq!(engine.ghost(), None);
    }

    #[test]
    fn test_ghost_on_closing_edge_appends_at_end() {
        let mut engine = engine_with_triangle();
        engine.pointer_move(p(0.0, 50.0), true);
        let ghost = engine.ghost().unwrap();
        assert_eq!(ghost.insert_index, 3);
        engine.click(p(0.0, 50.0), true);
        assert_eq!(engine.polygons()[0][3], p(0.0, 50.0));
    }

    #[test]
    fn test_ghost_requires_modifier_and_no_hover() {
        let mut engine = engine_with_triangle();
        engine.pointer_move(p(50.0, 2.0), false);
        assert_eq!(engine.ghost(), None);

        engine.pointer_move(p(2.0, 0.0), true);
        assert!(engine.hover().is_some());
        assert_eq!(engine.ghost(), None);

        engine.pointer_move(p(30.0, 30.0), true);
        assert_eq!(engine.ghost(), None);
    }

    #[test]
    fn test_modifier_click_without_ghost_adds_a_vertex() {
        let mut engine = engine_with_triangle();
        engine.pointer_move(p(300.0, 300.0), true);
        engine.click(p(300.0, 300.0), true);
        assert_eq!(engine.pending_points(), vec![p(300.0, 300.0)]);
    }

    #[test]
    fn test_inactive_engine_ignores_pointer_input_but_undoes() {
        let mut engine = InteractionEngine::new(EditorOptions::default());
        click_at(&mut engine, p(5.0, 5.0));
        engine.set_active(false);

        click_at(&mut engine, p(50.0, 5.0));
        engine.pointer_move(p(60.0, 60.0), false);
        assert_eq!(engine.pending_points().len(), 1);
        assert_eq!(engine.cursor(), None);

        assert!(engine.undo());
        assert!(engine.pending_points().is_empty());

        engine.set_active(true);
        click_at(&mut engine, p(50.0, 5.0));
        assert_eq!(engine.pending_points().len(), 1);
    }

    #[test]
    fn test_undo_clears_transient_state() {
        let mut engine = engine_with_triangle();
        engine.pointer_move(p(50.0, 0.0), true);
        assert!(engine.ghost().is_some());
        assert!(engine.undo());
        assert_eq!(engine.ghost(), None);
        assert_eq!(engine.cursor(), None);
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_reset_clears_model_but_not_history() {
        let mut engine = engine_with_triangle();
        click_at(&mut engine, p(300.0, 300.0));
        let history = engine.history_len();
        engine.reset();
        assert!(engine.polygons().is_empty());
        assert!(engine.pending_points().is_empty());
        assert_eq!(engine.cursor(), None);
        assert_eq!(engine.history_len(), history);
    }

    #[test]
    fn test_returned_polygons_are_defensive_copies() {
        let engine = engine_with_triangle();
        let mut copy = engine.polygons();
        copy[0].clear();
        let mut styled = engine.styled_polygons();
        styled[0].points.clear();
        assert_eq!(engine.polygons()[0].len(), 3);
    }
}
