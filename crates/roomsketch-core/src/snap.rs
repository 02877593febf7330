//! Nearest-vertex snapping.

use crate::shapes::Line;
use kurbo::Point;

/// Distance threshold for vertex snapping (in world units).
pub const SNAP_THRESHOLD: f64 = 10.0;

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The snapped vertex, or the raw cursor when nothing was close enough.
    pub point: Point,
    /// Whether `point` is an existing vertex.
    pub snapped: bool,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            snapped: false,
        }
    }

    /// The vertex snapped onto, if any.
    pub fn snapped_point(&self) -> Option<Point> {
        self.snapped.then_some(self.point)
    }
}

/// Snap `cursor` onto the nearest candidate vertex closer than `threshold`.
///
/// Candidates are scanned in order and only a strictly closer vertex replaces
/// the current best, so the first of several equidistant vertices wins. A
/// vertex at exactly `threshold` does not snap.
pub fn snap(cursor: Point, candidates: impl IntoIterator<Item = Point>, threshold: f64) -> SnapResult {
    let mut best: Option<(Point, f64)> = None;

    for candidate in candidates {
        let dist = cursor.distance(candidate);
        if best.is_none_or(|(_, best_dist)| dist < best_dist) {
            best = Some((candidate, dist));
        }
    }

    match best {
        Some((point, dist)) if dist < threshold => SnapResult {
            point,
            snapped: true,
        },
        _ => SnapResult::none(cursor),
    }
}

/// Every vertex of every line, in stable scan order.
pub fn line_vertices(lines: &[Line]) -> impl Iterator<Item = Point> + '_ {
    lines.iter().flat_map(|line| line.points.points())
}
