//! Shape definitions for the drawing surface.

mod line;
mod rectangle;

pub use line::{Endpoint, Line};
pub use rectangle::{Corner, MIN_RECT_SIZE, Rectangle};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// A reference to an attachable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityId {
    Rectangle(ShapeId),
    /// An open line or a room (rooms are closed lines).
    Line(ShapeId),
}
