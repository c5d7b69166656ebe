//! Core data types for the polygon editor.
//!
//! This module defines the value types shared by the model, the interaction engine
//! and the egui host: points, finalized polygons, vertex references, ghost
//! insertion candidates, and the editor configuration.

use crate::color::adjust_alpha;
use crate::constants::*;
use serde::{Deserialize, Serialize};

/// A position in surface-local coordinates (pixels from the canvas origin).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f32,
    /// Vertical coordinate
    pub y: f32,
}

impl Point {
    /// Creates a point from its coordinates.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A closed polygon created by finalizing the pending vertex sequence.
///
/// Colors are resolved once, when the polygon is created, and never recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Vertices in drawing order. Always at least three.
    pub points: Vec<Point>,
    /// Resolved fill color string
    pub fill_color: String,
    /// Resolved stroke color string
    pub stroke_color: String,
}

/// Non-owning reference to a single vertex.
///
/// References are plain indices; they go stale whenever the target collection is
/// restructured, so every use must validate them against the live model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexRef {
    /// A vertex of the in-progress sequence
    Pending(usize),
    /// A vertex of a finalized polygon
    Polygon {
        /// Index into the polygon list
        polygon: usize,
        /// Index into that polygon's points
        point: usize,
    },
}

/// Candidate insertion location on an edge of a finalized polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostPoint {
    /// Index of the target polygon
    pub polygon_index: usize,
    /// Position in the polygon's point list the new vertex would take
    pub insert_index: usize,
    /// Closest point on the edge to the cursor
    pub point: Point,
}

/// Cursor affordance the host should display while hovering the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorAffordance {
    /// Nothing under the cursor; a click places a vertex
    #[default]
    Crosshair,
    /// A vertex is hovered and can be dragged
    Move,
    /// An edge insertion is available
    Copy,
}

/// Color configuration: either one color for every polygon or a palette cycled by
/// polygon index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Same color for every polygon
    Fixed(String),
    /// Palette indexed by `polygon_index % len`
    Cyclic(Vec<String>),
}

impl ColorSpec {
    /// Resolves the color for the polygon at `index`.
    ///
    /// Empty strings and empty palettes count as unset and resolve to `None`.
    pub fn resolve(&self, index: usize) -> Option<&str> {
        let color = match self {
            ColorSpec::Fixed(color) => color.as_str(),
            ColorSpec::Cyclic(colors) if colors.is_empty() => return None,
            ColorSpec::Cyclic(colors) => colors[index % colors.len()].as_str(),
        };
        (!color.is_empty()).then_some(color)
    }
}

impl Default for ColorSpec {
    fn default() -> Self {
        ColorSpec::Fixed(String::new())
    }
}

impl From<&str> for ColorSpec {
    fn from(color: &str) -> Self {
        ColorSpec::Fixed(color.to_owned())
    }
}

impl From<Vec<&str>> for ColorSpec {
    fn from(colors: Vec<&str>) -> Self {
        ColorSpec::Cyclic(colors.into_iter().map(str::to_owned).collect())
    }
}

/// Construction options for the editor. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    /// Polygon fill; empty means "derive from the stroke color at 20% alpha"
    #[serde(alias = "fillColor")]
    pub fill_color: ColorSpec,
    /// Polygon outline color
    #[serde(alias = "strokeColor")]
    pub stroke_color: ColorSpec,
    /// Radius of vertex dots
    #[serde(alias = "pointRadius")]
    pub point_radius: f32,
    /// Color of vertex dots
    #[serde(alias = "pointColor")]
    pub point_color: String,
    /// Dash pattern for the closing preview line
    #[serde(alias = "lineDash")]
    pub line_dash: Vec<f32>,
    /// Maximum number of undo steps
    #[serde(alias = "maxHistorySize")]
    pub max_history_size: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            fill_color: ColorSpec::default(),
            stroke_color: ColorSpec::from(DEFAULT_STROKE_COLOR),
            point_radius: DEFAULT_POINT_RADIUS,
            point_color: DEFAULT_POINT_COLOR.to_owned(),
            line_dash: DEFAULT_LINE_DASH.to_vec(),
            max_history_size: DEFAULT_MAX_HISTORY,
        }
    }
}

impl EditorOptions {
    /// Parses options from a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, crate::EditorError> {
        let options: Self = serde_json::from_str(json)?;
        Ok(options.sanitized())
    }

    /// Replaces values the editor cannot work with by usable ones.
    pub fn sanitized(mut self) -> Self {
        if !self.point_radius.is_finite() || self.point_radius <= 0.0 {
            log::warn!(
                "point radius {} is not usable, falling back to {}",
                self.point_radius,
                DEFAULT_POINT_RADIUS
            );
            self.point_radius = DEFAULT_POINT_RADIUS;
        }
        if self.max_history_size == 0 {
            log::warn!("max history size of 0 raised to 1");
            self.max_history_size = 1;
        }
        self
    }

    /// Distance within which the pointer counts as touching a vertex or edge.
    pub fn hit_threshold(&self) -> f32 {
        self.point_radius * 2.0
    }

    /// Resolves the `(stroke, fill)` colors for the polygon at `index`.
    pub fn resolve_colors(&self, index: usize) -> (String, String) {
        let stroke = self.stroke_color.resolve(index);
        let fill = match (self.fill_color.resolve(index), stroke) {
            (Some(fill), _) => fill.to_owned(),
            (None, Some(stroke)) => adjust_alpha(stroke, DERIVED_FILL_ALPHA),
            (None, None) => UNSET_COLOR.to_owned(),
        };
        let stroke = stroke.unwrap_or(UNSET_COLOR).to_owned();
        (stroke, fill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = EditorOptions::default();
        assert_eq!(options.fill_color.resolve(0), None);
        assert_eq!(options.stroke_color.resolve(0), Some("#ff0000"));
        assert_eq!(options.point_radius, 4.0);
        assert_eq!(options.point_color, "#ffffff");
        assert_eq!(options.line_dash, vec![5.0, 5.0]);
        assert_eq!(options.max_history_size, 20);
        assert_eq!(options.hit_threshold(), 8.0);
    }

    #[test]
    fn test_cyclic_color_resolution() {
        let spec = ColorSpec::from(vec!["#111111", "#222222", "#333333"]);
        assert_eq!(spec.resolve(0), Some("#111111"));
        assert_eq!(spec.resolve(2), Some("#333333"));
        assert_eq!(spec.resolve(4), Some("#222222"));
        assert_eq!(ColorSpec::Cyclic(Vec::new()).resolve(3), None);
    }

    #[test]
    fn test_fill_falls_back_to_stroke_with_alpha() {
        let options = EditorOptions::default();
        let (stroke, fill) = options.resolve_colors(0);
        assert_eq!(stroke, "#ff0000");
        assert_eq!(fill, "rgba(255,0,0,0.2)");
    }

    #[test]
    fn test_fill_without_stroke_uses_translucent_black() {
        let options = EditorOptions {
            stroke_color: ColorSpec::from(""),
            ..Default::default()
        };
        let (stroke, fill) = options.resolve_colors(1);
        assert_eq!(stroke, UNSET_COLOR);
        assert_eq!(fill, "rgba(0,0,0,0.2)");
    }

    #[test]
    fn test_explicit_fill_palette() {
        let options = EditorOptions {
            fill_color: ColorSpec::from(vec!["blue", "green"]),
            stroke_color: ColorSpec::from(vec!["#000", "#fff"]),
            ..Default::default()
        };
        assert_eq!(options.resolve_colors(0), ("#000".to_owned(), "blue".to_owned()));
        assert_eq!(options.resolve_colors(3), ("#fff".to_owned(), "green".to_owned()));
    }

    #[test]
    fn test_options_from_camel_case_json() {
        let options = EditorOptions::from_json(
            r##"{"strokeColor": ["#00ff00", "#0000ff"], "pointRadius": 6, "maxHistorySize": 5}"##,
        )
        .unwrap();
        assert_eq!(options.stroke_color.resolve(1), Some("#0000ff"));
        assert_eq!(options.point_radius, 6.0);
        assert_eq!(options.max_history_size, 5);
        assert_eq!(options.point_color, "#ffffff");
    }

    #[test]
    fn test_options_are_sanitized() {
        let options = EditorOptions::from_json(r#"{"point_radius": -1, "max_history_size": 0}"#)
            .unwrap();
        assert_eq!(options.point_radius, DEFAULT_POINT_RADIUS);
        assert_eq!(options.max_history_size, 1);
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let err = EditorOptions::from_json("{ not json").unwrap_err();
        assert!(matches!(err, crate::EditorError::InvalidConfig(_)));
    }
}
