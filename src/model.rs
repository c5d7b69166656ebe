//! Polygon model: finalized polygons, the in-progress vertex sequence and the
//! undo history.
//!
//! The model owns every collection exclusively. Callers receive copies or shared
//! borrows, never handles they could use to mutate state behind the model's back.

use crate::history::{History, HistorySnapshot};
use crate::types::{Point, Polygon, VertexRef};

/// Minimum number of vertices a finalized polygon has.
pub const MIN_POLYGON_POINTS: usize = 3;

/// Editable polygon state plus bounded undo history.
#[derive(Debug, Clone)]
pub struct PolygonModel {
    polygons: Vec<Polygon>,
    current_points: Vec<Point>,
    history: History,
}

impl PolygonModel {
    /// Creates an empty model keeping at most `max_history_size` undo steps.
    pub fn new(max_history_size: usize) -> Self {
        Self {
            polygons: Vec::new(),
            current_points: Vec::new(),
            history: History::new(max_history_size),
        }
    }

    /// Finalized polygons in creation order.
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// The in-progress vertex sequence.
    pub fn current_points(&self) -> &[Point] {
        &self.current_points
    }

    /// Copies of every polygon's point list.
    pub fn point_arrays(&self) -> Vec<Vec<Point>> {
        self.polygons.iter().map(|p| p.points.clone()).collect()
    }

    /// Number of undo steps available.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Looks up the vertex a reference points at, if it still exists.
    pub fn vertex(&self, vertex: VertexRef) -> Option<Point> {
        match vertex {
            VertexRef::Pending(index) => self.current_points.get(index).copied(),
            VertexRef::Polygon { polygon, point } => self
                .polygons
                .get(polygon)
                .and_then(|p| p.points.get(point))
                .copied(),
        }
    }

    /// Appends a vertex to the in-progress sequence.
    pub fn add_pending_point(&mut self, point: Point) {
        self.current_points.push(point);
    }

    /// Moves the pending sequence into a new polygon with the given colors.
    ///
    /// Returns the new polygon's index, or `None` (leaving state untouched) when
    /// fewer than three vertices are pending.
    pub fn finalize_polygon(&mut self, stroke_color: String, fill_color: String) -> Option<usize> {
        if self.current_points.len() < MIN_POLYGON_POINTS {
            return None;
        }
        let points = std::mem::take(&mut self.current_points);
        self.polygons.push(Polygon {
            points,
            fill_color,
            stroke_color,
        });
        Some(self.polygons.len() - 1)
    }

    /// Inserts `point` into polygon `polygon_index` at `insert_index`, shifting the
    /// following vertices. Out-of-range targets are ignored.
    pub fn insert_point(&mut self, polygon_index: usize, insert_index: usize, point: Point) -> bool {
        match self.polygons.get_mut(polygon_index) {
            Some(polygon) if insert_index <= polygon.points.len() => {
                polygon.points.insert(insert_index, point);
                true
            }
            _ => false,
        }
    }

    /// Moves the referenced vertex to `position`. Stale references are ignored.
    pub fn move_point(&mut self, vertex: VertexRef, position: Point) -> bool {
        let target = match vertex {
            VertexRef::Pending(index) => self.current_points.get_mut(index),
            VertexRef::Polygon { polygon, point } => self
                .polygons
                .get_mut(polygon)
                .and_then(|p| p.points.get_mut(point)),
        };
        match target {
            Some(slot) => {
                *slot = position;
                true
            }
            None => false,
        }
    }

    /// Clears polygons and pending vertices. History is kept.
    pub fn reset(&mut self) {
        self.polygons.clear();
        self.current_points.clear();
    }

    /// Records a deep copy of the current state as an undo step.
    pub fn snapshot(&mut self) {
        self.history.push(HistorySnapshot {
            polygons: self.polygons.clone(),
            current_points: self.current_points.clone(),
        });
    }

    /// Restores the most recent snapshot. Returns false when history is empty.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(snapshot) => {
                // Owned copy; shares no storage with the remaining entries.
                self.polygons = snapshot.polygons;
                self.current_points = snapshot.current_points;
                true
            }
            None => false,
        }
    }
}
