//! Authoritative shape store.
//!
//! All mutation goes through whole-entity operations keyed by id. Callers
//! never hold a handle into the store while changing it: they read a copy,
//! modify it and hand it back with one of the `replace_*` methods.

use crate::shapes::{EntityId, Line, Rectangle, ShapeId};

/// Every shape on the drawing surface, in paint (and scan) order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeStore {
    lines: Vec<Line>,
    rooms: Vec<Line>,
    rectangles: Vec<Rectangle>,
}

impl ShapeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open lines.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Closed, filled rooms.
    pub fn rooms(&self) -> &[Line] {
        &self.rooms
    }

    pub fn rectangles(&self) -> &[Rectangle] {
        &self.rectangles
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.rooms.is_empty() && self.rectangles.is_empty()
    }

    /// Add an open line. Closed lines are routed to the room set.
    pub fn push_line(&mut self, line: Line) -> ShapeId {
        let id = line.id();
        if line.is_closed() {
            self.rooms.push(line);
        } else {
            self.lines.push(line);
        }
        id
    }

    pub fn push_rectangle(&mut self, rect: Rectangle) -> ShapeId {
        let id = rect.id();
        self.rectangles.push(rect);
        id
    }

    pub fn rectangle(&self, id: ShapeId) -> Option<&Rectangle> {
        self.rectangles.iter().find(|r| r.id() == id)
    }

    /// Look up an open line or a room.
    pub fn line(&self, id: ShapeId) -> Option<&Line> {
        self.lines
            .iter()
            .chain(self.rooms.iter())
            .find(|l| l.id() == id)
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        match entity {
            EntityId::Rectangle(id) => self.rectangle(id).is_some(),
            EntityId::Line(id) => self.line(id).is_some(),
        }
    }

    /// Replace the rectangle with the same id. Returns false if it is unknown.
    pub fn replace_rectangle(&mut self, rect: Rectangle) -> bool {
        match self.rectangles.iter_mut().find(|r| r.id() == rect.id()) {
            Some(slot) => {
                *slot = rect;
                true
            }
            None => false,
        }
    }

    /// Replace the line or room with the same id. Returns false if it is unknown.
    ///
    /// The replacement keeps the stored `closed` flag, so rooms stay rooms
    /// and open lines cannot be closed through this path.
    pub fn replace_line(&mut self, mut line: Line) -> bool {
        let slot = self
            .lines
            .iter_mut()
            .chain(self.rooms.iter_mut())
            .find(|l| l.id() == line.id());
        match slot {
            Some(slot) => {
                line.closed = slot.closed;
                *slot = line;
                true
            }
            None => false,
        }
    }

    /// Remove open lines by id.
    pub fn remove_lines(&mut self, ids: &[ShapeId]) {
        self.lines.retain(|l| !ids.contains(&l.id()));
    }

    /// Whether a room was already formed from exactly these lines.
    pub fn has_loop_room(&self, members: &[ShapeId]) -> bool {
        let mut sorted = members.to_vec();
        sorted.sort();
        self.rooms.iter().any(|r| r.loop_members == sorted)
    }
}
