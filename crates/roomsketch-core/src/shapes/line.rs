//! Line shape: open polylines and closed rooms.

use super::{EntityId, ShapeId};
use crate::color::Rgba;
use crate::geometry::VertexSequence;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One end of an open line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    Start,
    End,
}

impl Endpoint {
    pub const BOTH: [Endpoint; 2] = [Endpoint::Start, Endpoint::End];

    pub fn other(self) -> Self {
        match self {
            Endpoint::Start => Endpoint::End,
            Endpoint::End => Endpoint::Start,
        }
    }

    fn slot(self) -> usize {
        match self {
            Endpoint::Start => 0,
            Endpoint::End => 1,
        }
    }
}

/// A polyline. With `closed` set it is a filled room.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub(crate) id: ShapeId,
    /// Vertices in drawing order.
    pub points: VertexSequence,
    /// Closed lines are rooms and are never re-opened.
    pub(crate) closed: bool,
    /// Fill color (rooms only).
    pub fill: Option<Rgba>,
    /// What each endpoint is attached to, recomputed on every endpoint drag.
    pub(crate) attachments: [Option<EntityId>; 2],
    /// Lines whose attachment loop produced this room (sorted, empty for drawn rooms).
    pub(crate) loop_members: Vec<ShapeId>,
}

impl Line {
    /// Create an open line.
    pub fn open(points: VertexSequence) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            closed: false,
            fill: None,
            attachments: [None, None],
            loop_members: Vec::new(),
        }
    }

    /// Create a straight two-point open line.
    pub fn segment(start: Point, end: Point) -> Self {
        Self::open(VertexSequence::from_points([start, end]))
    }

    /// Create a closed, filled room.
    pub fn room(points: VertexSequence, fill: Rgba) -> Self {
        Self {
            closed: true,
            fill: Some(fill),
            ..Self::open(points)
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Vertex index of an endpoint (`None` for an empty line).
    pub fn endpoint_index(&self, endpoint: Endpoint) -> Option<usize> {
        match endpoint {
            _ if self.points.is_empty() => None,
            Endpoint::Start => Some(0),
            Endpoint::End => Some(self.points.len() - 1),
        }
    }

    /// Position of an endpoint.
    pub fn endpoint(&self, endpoint: Endpoint) -> Option<Point> {
        self.endpoint_index(endpoint).and_then(|i| self.points.get(i))
    }

    /// Which endpoint sits at vertex `index`, if any. Rooms have no endpoints.
    pub fn endpoint_at(&self, index: usize) -> Option<Endpoint> {
        if self.closed || self.points.len() < 2 {
            return None;
        }
        Endpoint::BOTH
            .into_iter()
            .find(|&e| self.endpoint_index(e) == Some(index))
    }

    /// The endpoint nearest to `point`.
    pub fn nearest_endpoint(&self, point: Point) -> Option<Endpoint> {
        let start = self.endpoint(Endpoint::Start)?.distance(point);
        let end = self.endpoint(Endpoint::End)?.distance(point);
        Some(if end < start { Endpoint::End } else { Endpoint::Start })
    }

    /// What an endpoint is attached to.
    pub fn attachment(&self, endpoint: Endpoint) -> Option<EntityId> {
        self.attachments[endpoint.slot()]
    }

    pub fn set_attachment(&mut self, endpoint: Endpoint, target: Option<EntityId>) {
        self.attachments[endpoint.slot()] = target;
    }
}
