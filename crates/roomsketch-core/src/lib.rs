//! RoomSketch Core Library
//!
//! Platform-agnostic geometry and interaction engine for the RoomSketch
//! floor-plan editor: vertex snapping, polygon closure, collision-aware
//! rectangle placement and the attachment graph between shapes.

pub mod attachment;
pub mod color;
pub mod config;
pub mod editor;
pub mod geometry;
pub mod interaction;
pub mod placement;
pub mod polygon;
pub mod scene;
pub mod shapes;
pub mod snap;
pub mod store;

pub use attachment::{AttachmentLoop, find_loop, resolve_attachment};
pub use color::{ROOM_FILL_OPACITY, Rgba, generate_seed, room_fill};
pub use config::{ConfigError, EngineConfig};
pub use editor::Editor;
pub use geometry::VertexSequence;
pub use interaction::{Effect, HandleTarget, InteractionState, PointerEvent, Transition, dispatch};
pub use placement::{Placement, drag_to, resize_corner};
pub use polygon::{DrawingSession, fold_loop};
pub use scene::{Frame, Primitive, Renderer, build_frame};
pub use shapes::{Corner, Endpoint, EntityId, Line, MIN_RECT_SIZE, Rectangle, ShapeId};
pub use snap::{SNAP_THRESHOLD, SnapResult, snap};
pub use store::ShapeStore;
