//! Drawable output for the rendering collaborator.
//!
//! Every state change produces a fresh [`Frame`]: an ordered list of
//! primitives painted back to front. Handles carry the [`HandleTarget`] they
//! stand for so a press on one can be routed back as a targeted pointer-down.

use crate::color::Rgba;
use crate::config::EngineConfig;
use crate::interaction::{HandleTarget, InteractionState};
use crate::shapes::{Corner, EntityId, Line};
use crate::store::ShapeStore;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// One drawable item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    /// Open polyline; `points` is flat `x0, y0, x1, y1, ...`.
    Polyline {
        points: Vec<f64>,
        stroke: Rgba,
        stroke_width: f64,
        selected: bool,
    },
    /// Closed, filled polygon.
    Polygon {
        points: Vec<f64>,
        fill: Rgba,
        stroke: Rgba,
        stroke_width: f64,
        selected: bool,
    },
    /// Circular handle or marker centered on `(x, y)`.
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        fill: Rgba,
        draggable: bool,
        target: Option<HandleTarget>,
    },
}

/// Primitives for one paint, back to front.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub primitives: Vec<Primitive>,
}

impl Frame {
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Draggable handles in paint order.
    pub fn handles(&self) -> impl Iterator<Item = (Point, f64, HandleTarget)> + '_ {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Circle {
                x,
                y,
                radius,
                draggable: true,
                target: Some(target),
                ..
            } => Some((Point::new(*x, *y), *radius, *target)),
            _ => None,
        })
    }
}

/// Consumer of frames.
pub trait Renderer {
    /// Paint a frame.
    fn build_scene(&mut self, frame: &Frame);
}

/// Build the frame for the current store and interaction state.
///
/// Paint order: rectangles with their corner handles, open lines with their
/// endpoint handles, the polyline being drawn, its preview segment, rooms with
/// one handle per vertex, and finally the snap highlight.
pub fn build_frame(
    store: &ShapeStore,
    state: &InteractionState,
    selection: Option<EntityId>,
    snapped: Option<Point>,
    config: &EngineConfig,
) -> Frame {
    let mut primitives = Vec::new();
    let stroke = config.stroke_color;
    let handle = |center: Point, target: HandleTarget| Primitive::Circle {
        x: center.x,
        y: center.y,
        radius: config.handle_radius,
        fill: stroke,
        draggable: true,
        target: Some(target),
    };

    for rect in store.rectangles() {
        primitives.push(Primitive::Polygon {
            points: flatten(rect.outline()),
            fill: rect.fill,
            stroke,
            stroke_width: config.room_stroke_width,
            selected: selection == Some(EntityId::Rectangle(rect.id())),
        });
        for corner in Corner::ALL {
            primitives.push(handle(
                rect.corner(corner),
                HandleTarget::RectangleCorner(rect.id(), corner),
            ));
        }
    }

    for line in store.lines() {
        primitives.push(Primitive::Polyline {
            points: line.points.as_flat().to_vec(),
            stroke,
            stroke_width: config.line_stroke_width,
            selected: selection == Some(EntityId::Line(line.id())),
        });
        for (index, point) in endpoint_vertices(line) {
            primitives.push(handle(point, HandleTarget::LineVertex { line: line.id(), index }));
        }
    }

    if let InteractionState::DrawingPolyline(session) = state {
        if session.points.len() >= 2 {
            primitives.push(Primitive::Polyline {
                points: session.points.as_flat().to_vec(),
                stroke,
                stroke_width: config.line_stroke_width,
                selected: false,
            });
        }
        if let Some((from, to)) = session.preview {
            primitives.push(Primitive::Polyline {
                points: flatten([from, to]),
                stroke,
                stroke_width: config.line_stroke_width,
                selected: false,
            });
        }
    }

    for room in store.rooms() {
        primitives.push(Primitive::Polygon {
            points: room.points.as_flat().to_vec(),
            fill: room.fill.unwrap_or(stroke),
            stroke,
            stroke_width: config.room_stroke_width,
            selected: selection == Some(EntityId::Line(room.id())),
        });
        for (index, point) in room.points.points().enumerate() {
            primitives.push(handle(point, HandleTarget::LineVertex { line: room.id(), index }));
        }
    }

    if let Some(center) = snapped {
        primitives.push(Primitive::Circle {
            x: center.x,
            y: center.y,
            radius: config.handle_radius * 1.5,
            fill: Rgba { a: 0.5, ..stroke },
            draggable: false,
            target: None,
        });
    }

    Frame { primitives }
}

fn flatten(points: impl IntoIterator<Item = Point>) -> Vec<f64> {
    points.into_iter().flat_map(|p| [p.x, p.y]).collect()
}

/// Start and end vertices of an open line with their indices.
fn endpoint_vertices(line: &Line) -> impl Iterator<Item = (usize, Point)> + '_ {
    line.points
        .points()
        .enumerate()
        .filter(|&(index, _)| line.endpoint_at(index).is_some())
}
