//! Shared application-wide constants.
//! Centralizes default option values and painting tunables.

// Editor option defaults
/// Stroke color used when no stroke color is configured.
pub const DEFAULT_STROKE_COLOR: &str = "#ff0000";
/// Vertex dot color.
pub const DEFAULT_POINT_COLOR: &str = "#ffffff";
/// Vertex dot radius in surface pixels. Hit-testing uses twice this value.
pub const DEFAULT_POINT_RADIUS: f32 = 4.0;
/// Dash pattern (dash, gap) for the closing preview line.
pub const DEFAULT_LINE_DASH: [f32; 2] = [5.0, 5.0];
/// Maximum number of undo snapshots to retain.
pub const DEFAULT_MAX_HISTORY: usize = 20;

// Color fallbacks
/// Fill used when neither fill nor stroke color resolve to anything.
pub const UNSET_COLOR: &str = "rgba(0,0,0,0.2)";
/// Alpha applied to the stroke color when deriving a fill from it.
pub const DERIVED_FILL_ALPHA: f32 = 0.2;
/// Alpha of the ghost insertion point.
pub const GHOST_ALPHA: f32 = 0.5;

// Painting
/// Stroke width for polygon outlines.
pub const LINE_WIDTH: f32 = 2.0;
/// Stroke width for vertex dot outlines.
pub const POINT_OUTLINE_WIDTH: f32 = 1.0;
/// Dash pattern for the ghost point outline.
pub const GHOST_DASH: [f32; 2] = [2.0, 2.0];
/// Color of the dashed closing preview line.
pub const PREVIEW_LINE_COLOR: &str = "#888";
