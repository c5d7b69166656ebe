//! Painting of the editor state onto the egui canvas.
//!
//! Layers, back to front: finalized polygons, the pending path with its rubber
//! band, vertex dots, the ghost insertion point, and the dashed closing preview.

use crate::color::{adjust_alpha, parse_rgba};
use crate::constants::*;
use crate::engine::InteractionEngine;
use crate::types::Point;
use eframe::egui;
use lyon_tessellation::math::point;
use lyon_tessellation::path::Path;
use lyon_tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, VertexBuffers,
};

/// Color used for strings that cannot be parsed.
const FALLBACK_COLOR: egui::Color32 = egui::Color32::GRAY;

/// Segments used to approximate the ghost point's dashed outline.
const GHOST_OUTLINE_SEGMENTS: usize = 24;

/// Paints everything the engine exposes. `origin` is the canvas' top-left
/// corner in screen space.
pub(super) fn paint_editor(painter: &egui::Painter, origin: egui::Pos2, engine: &InteractionEngine) {
    let options = engine.options();
    let model = engine.model();
    let to_screen = |p: &Point| egui::pos2(origin.x + p.x, origin.y + p.y);
    let cursor = engine
        .cursor()
        .filter(|_| engine.is_active())
        .map(|p| to_screen(&p));

    // Completed polygons: tessellated fill, then the closed outline on top
    for polygon in model.polygons() {
        let points: Vec<egui::Pos2> = polygon.points.iter().map(to_screen).collect();
        if let Some(mesh) = fill_mesh(&points, to_color32(&polygon.fill_color)) {
            painter.add(egui::Shape::mesh(mesh));
        }
        painter.add(egui::Shape::closed_line(
            points,
            egui::Stroke::new(LINE_WIDTH, to_color32(&polygon.stroke_color)),
        ));
    }

    // Pending path, drawn with the colors the polygon will get once closed
    let pending = model.current_points();
    if !pending.is_empty() {
        let (stroke_color, _) = engine.next_polygon_colors();
        let mut path: Vec<egui::Pos2> = pending.iter().map(to_screen).collect();
        if let Some(cursor) = cursor {
            path.push(cursor);
        }
        if path.len() >= 2 {
            painter.add(egui::Shape::line(
                path,
                egui::Stroke::new(LINE_WIDTH, to_color32(&stroke_color)),
            ));
        }
    }

    // Vertices
    let point_fill = to_color32(&options.point_color);
    let point_outline = egui::Stroke::new(POINT_OUTLINE_WIDTH, egui::Color32::WHITE);
    let vertices = model
        .polygons()
        .iter()
        .flat_map(|polygon| polygon.points.iter())
        .chain(pending.iter());
    for vertex in vertices {
        painter.circle(to_screen(vertex), options.point_radius, point_fill, point_outline);
    }

    if let Some(ghost) = engine.ghost() {
        let center = to_screen(&ghost.point);
        let fill = to_color32(&adjust_alpha(&options.point_color, GHOST_ALPHA));
        painter.circle_filled(center, options.point_radius, fill);
        painter.extend(egui::Shape::dashed_line(
            &circle_outline(center, options.point_radius),
            point_outline,
            GHOST_DASH[0],
            GHOST_DASH[1],
        ));
    }

    // Closing preview from the first pending vertex to the cursor
    if let (Some(first), Some(cursor)) = (pending.first(), cursor) {
        if pending.len() > 1 {
            let stroke = egui::Stroke::new(LINE_WIDTH, to_color32(PREVIEW_LINE_COLOR));
            let segment = [to_screen(first), cursor];
            match dash_pattern(&options.line_dash) {
                Some((dash, gap)) => {
                    painter.extend(egui::Shape::dashed_line(&segment, stroke, dash, gap));
                }
                None => {
                    painter.line_segment(segment, stroke);
                }
            }
        }
    }
}

/// Triangulates a closed outline (concave or self-intersecting) with the
/// non-zero winding rule. Returns `None` for degenerate or invisible fills.
pub(super) fn fill_mesh(points: &[egui::Pos2], color: egui::Color32) -> Option<egui::Mesh> {
    let (first, rest) = points.split_first()?;
    if rest.len() < 2 || color.a() == 0 {
        return None;
    }

    let mut builder = Path::builder();
    builder.begin(point(first.x, first.y));
    for p in rest {
        builder.line_to(point(p.x, p.y));
    }
    builder.close();
    let path = builder.build();

    let mut buffers: VertexBuffers<egui::Pos2, u32> = VertexBuffers::new();
    let result = FillTessellator::new().tessellate_path(
        &path,
        &FillOptions::default().with_fill_rule(FillRule::NonZero),
        &mut BuffersBuilder::new(&mut buffers, |vertex: FillVertex| {
            egui::pos2(vertex.position().x, vertex.position().y)
        }),
    );
    if let Err(err) = result {
        log::warn!("failed to tessellate polygon fill: {err:?}");
        return None;
    }

    let mut mesh = egui::Mesh::default();
    for vertex in buffers.vertices {
        mesh.colored_vertex(vertex, color);
    }
    mesh.indices = buffers.indices;
    Some(mesh)
}

/// Converts a CSS-style color string, falling back to gray when unparseable.
pub(super) fn to_color32(color: &str) -> egui::Color32 {
    parse_rgba(color)
        .map(|[r, g, b, a]| egui::Color32::from_rgba_unmultiplied(r, g, b, a))
        .unwrap_or(FALLBACK_COLOR)
}

/// Reduces a dash list to the `(dash, gap)` pair egui can draw.
///
/// A single entry is used for both; an empty or non-positive pattern means a
/// solid line.
pub(super) fn dash_pattern(line_dash: &[f32]) -> Option<(f32, f32)> {
    let (dash, gap) = match line_dash {
        [] => return None,
        [single] => (*single, *single),
        [dash, gap, ..] => (*dash, *gap),
    };
    (dash > 0.0 && gap > 0.0).then_some((dash, gap))
}

fn circle_outline(center: egui::Pos2, radius: f32) -> Vec<egui::Pos2> {
    (0..=GHOST_OUTLINE_SEGMENTS)
        .map(|i| {
            let angle = i as f32 / GHOST_OUTLINE_SEGMENTS as f32 * std::f32::consts::TAU;
            center + radius * egui::vec2(angle.cos(), angle.sin())
        })
        .collect()
}
