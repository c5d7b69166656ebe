//! Pure geometry helpers used for hit-testing and edge insertion.

use crate::types::Point;

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Projects `p` onto the segment `[a, b]`.
///
/// The projection parameter is clamped to the segment: `a` is returned for
/// degenerate segments or when the projection falls before `a`, `b` when it falls
/// past `b`.
///
/// ```
/// use polygon_editor::{closest_point_on_segment, Point};
///
/// let p = closest_point_on_segment(Point::new(5.0, 1.0), Point::new(0.0, 0.0), Point::new(10.0, 0.0));
/// assert_eq!(p, Point::new(5.0, 0.0));
/// ```
pub fn closest_point_on_segment(p: Point, a: Point, b: Point) -> Point {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_sq = dx * dx + dy * dy;
    if length_sq <= 0.0 {
        return a;
    }

    let t = ((p.x - a.x) * dx + (p.y - a.y) * dy) / length_sq;
    if t < 0.0 {
        a
    } else if t > 1.0 {
        b
    } else {
        Point::new(a.x + t * dx, a.y + t * dy)
    }
}
