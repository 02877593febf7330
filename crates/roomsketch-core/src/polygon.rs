//! Polyline drawing and room closure.
//!
//! A [`DrawingSession`] accumulates clicks into open line segments. It ends
//! when the user either clicks back onto the first vertex of the polyline
//! being pressed out (self-closure) or releases onto an existing vertex
//! (loop closure). Both produce a closed room in the store.

use crate::color::{generate_seed, room_fill};
use crate::geometry::VertexSequence;
use crate::shapes::{Line, ShapeId};
use crate::snap::SnapResult;
use crate::store::ShapeStore;
use kurbo::Point;

/// Minimum distinct vertices for a room.
pub const MIN_ROOM_VERTICES: usize = 3;

/// In-progress polyline drawing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawingSession {
    /// Current polyline; its last vertex follows the pointer while pressed.
    pub points: VertexSequence,
    /// Open lines committed by this session, in commit order.
    pub committed: Vec<ShapeId>,
    /// Whether the pointer is held down.
    pub pressed: bool,
    /// Uncommitted preview segment from the tail to the hovered position.
    pub preview: Option<(Point, Point)>,
}

/// Result of feeding an event into a session.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Drawing continues.
    Continue(DrawingSession),
    /// A room was created and the session is over.
    Closed(ShapeId),
}

impl DrawingSession {
    /// Start drawing at `point`, which becomes the sole vertex.
    pub fn start(point: Point) -> Self {
        Self {
            points: VertexSequence::from_points([point]),
            committed: Vec::new(),
            pressed: true,
            preview: None,
        }
    }

    /// Pointer-down at the (possibly snapped) `point`.
    ///
    /// Within `closure_tolerance` of the first vertex of a polyline with at
    /// least three distinct vertices this closes the polyline into a room.
    /// Anything else appends the point.
    pub fn press(mut self, point: Point, closure_tolerance: f64, store: &mut ShapeStore) -> Step {
        self.preview = None;

        let closes = self
            .points
            .first()
            .is_some_and(|first| first.distance(point) < closure_tolerance);
        if closes && self.points.distinct_count() >= MIN_ROOM_VERTICES {
            let room = Line::room(self.points, room_fill(generate_seed()));
            let id = store.push_line(room);
            log::info!("Closed polyline into room {id}");
            return Step::Closed(id);
        }

        self.points.push(point);
        self.pressed = true;
        Step::Continue(self)
    }

    /// Pointer-move. While pressed the last vertex follows `cursor`;
    /// otherwise only the preview segment to the snapped position changes.
    pub fn hover(&mut self, cursor: Point, snapped: SnapResult) {
        if self.pressed {
            self.points.set_last(cursor);
        } else {
            self.preview = self.points.last().map(|tail| (tail, snapped.point));
        }
    }

    /// Pointer-up. Commits the polyline as an open line, or closes the loop
    /// when the release snapped onto an existing vertex.
    pub fn release(mut self, snapped: SnapResult, store: &mut ShapeStore) -> Step {
        self.pressed = false;
        self.preview = None;

        let Some(tail) = self.points.last() else {
            return Step::Continue(self);
        };
        let end = snapped.snapped_point().unwrap_or(tail);
        let mut segment = self.points.clone();
        segment.set_last(end);

        if segment.distinct_count() < 2 {
            // Nothing drawn since the last release.
            self.points = VertexSequence::from_points([end]);
            return Step::Continue(self);
        }

        if snapped.snapped {
            let parts: Vec<&VertexSequence> = self
                .committed
                .iter()
                .filter_map(|id| store.line(*id))
                .map(|line| &line.points)
                .chain(std::iter::once(&segment))
                .collect();
            let outline = fold_loop(parts);
            if outline.distinct_count() >= MIN_ROOM_VERTICES {
                store.remove_lines(&self.committed);
                let id = store.push_line(Line::room(outline, room_fill(generate_seed())));
                log::info!(
                    "Closed loop of {} segments into room {id}",
                    self.committed.len() + 1
                );
                return Step::Closed(id);
            }
            log::debug!("Loop closure with fewer than {MIN_ROOM_VERTICES} vertices ignored");
        }

        let id = store.push_line(Line::open(segment));
        self.committed.push(id);
        self.points = VertexSequence::from_points([end]);
        Step::Continue(self)
    }
}

/// Join polyline parts into one closed outline.
///
/// Consecutive parts share their junction vertex, which is kept once. The
/// closing point duplicates the first vertex and is folded into the loop.
pub fn fold_loop<'a>(parts: impl IntoIterator<Item = &'a VertexSequence>) -> VertexSequence {
    let mut outline = VertexSequence::new();
    for point in parts.into_iter().flat_map(|part| part.points()) {
        if outline.last() != Some(point) {
            outline.push(point);
        }
    }
    if outline.len() > 1 && outline.first() == outline.last() {
        outline.pop();
    }
    outline
}
