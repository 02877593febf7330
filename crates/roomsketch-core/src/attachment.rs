//! Attachment of line endpoints to rectangles and other lines.
//!
//! Attachments are derived: they are recomputed from geometry whenever an
//! endpoint moves and never edited directly. On top of them sits closed-loop
//! detection, which finds chains of lines whose endpoints attach end to end
//! back to where they started.

use crate::geometry::VertexSequence;
use crate::polygon::MIN_ROOM_VERTICES;
use crate::shapes::{Endpoint, EntityId, Line, Rectangle, ShapeId};
use kurbo::Point;

/// Distance within which an endpoint attaches to another line's endpoint.
pub const ATTACH_TOLERANCE: f64 = 10.0;

/// Find what `point` attaches to.
///
/// Rectangles are tested first (inclusive containment, list order); then the
/// endpoints of every line other than `self_line`. The first match wins.
pub fn resolve_attachment(
    point: Point,
    rectangles: &[Rectangle],
    lines: &[Line],
    self_line: Option<ShapeId>,
    tolerance: f64,
) -> Option<EntityId> {
    if let Some(rect) = rectangles.iter().find(|r| r.contains(point)) {
        return Some(EntityId::Rectangle(rect.id()));
    }

    lines
        .iter()
        .filter(|line| Some(line.id()) != self_line)
        .find(|line| {
            Endpoint::BOTH
                .into_iter()
                .filter_map(|e| line.endpoint(e))
                .any(|end| end.distance(point) < tolerance)
        })
        .map(|line| EntityId::Line(line.id()))
}

/// A cycle of lines joined endpoint to endpoint by attachments.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentLoop {
    /// Member lines in walk order, starting with the origin.
    pub lines: Vec<ShapeId>,
    /// Junction points in walk order.
    pub vertices: VertexSequence,
}

/// Detect a closed loop through `origin`.
///
/// The walk leaves `origin` through its end, crosses each junction to the
/// linked line and leaves that line through its opposite endpoint. A loop is
/// found when the walk re-enters `origin` at its start after passing through
/// at least three lines. Rectangles end the walk.
pub fn find_loop(origin: ShapeId, lines: &[Line], tolerance: f64) -> Option<AttachmentLoop> {
    let mut current = lines.iter().find(|l| l.id() == origin && !l.is_closed())?;
    let mut exit = Endpoint::End;
    let mut members = vec![origin];
    let mut vertices = VertexSequence::new();

    for _ in 0..lines.len() {
        let junction = current.endpoint(exit)?;
        let (next, entry) = linked(current, exit, lines, tolerance)?;
        vertices.push(junction);

        if next.id() == origin {
            let closed = entry == Endpoint::Start
                && members.len() >= MIN_ROOM_VERTICES
                && vertices.distinct_count() >= MIN_ROOM_VERTICES;
            return closed.then_some(AttachmentLoop {
                lines: members,
                vertices,
            });
        }
        if members.contains(&next.id()) {
            return None;
        }
        members.push(next.id());
        current = next;
        exit = entry.other();
    }
    None
}

/// The line joined to `line` at `endpoint`, and which of its endpoints meets it.
///
/// A junction exists when `endpoint` is attached to another line, or when
/// another line has an endpoint attached back to `line`. Either way the two
/// endpoints must still lie within `tolerance` of each other; a stored
/// attachment whose target has since moved away is not a junction.
fn linked<'a>(
    line: &Line,
    endpoint: Endpoint,
    lines: &'a [Line],
    tolerance: f64,
) -> Option<(&'a Line, Endpoint)> {
    let point = line.endpoint(endpoint)?;

    if let Some(EntityId::Line(target)) = line.attachment(endpoint) {
        let forward = lines
            .iter()
            .find(|l| l.id() == target && !l.is_closed())
            .and_then(|target| {
                let entry = target.nearest_endpoint(point)?;
                let meets = target.endpoint(entry)?.distance(point) < tolerance;
                meets.then_some((target, entry))
            });
        if forward.is_some() {
            return forward;
        }
    }

    lines
        .iter()
        .filter(|other| other.id() != line.id() && !other.is_closed())
        .find_map(|other| {
            Endpoint::BOTH
                .into_iter()
                .find(|&e| {
                    other.attachment(e) == Some(EntityId::Line(line.id()))
                        && other.endpoint(e).is_some_and(|q| q.distance(point) < tolerance)
                })
                .map(|e| (other, e))
        })
}
