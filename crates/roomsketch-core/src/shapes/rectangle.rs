//! Axis-aligned rectangle shape.

use super::ShapeId;
use crate::color::Rgba;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Smallest allowed width or height.
pub const MIN_RECT_SIZE: f64 = 5.0;

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];
}

/// An axis-aligned, filled rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub fill: Rgba,
}

impl Rectangle {
    /// Create a new rectangle. Sizes below [`MIN_RECT_SIZE`] are clamped.
    pub fn new(position: Point, width: f64, height: f64, fill: Rgba) -> Self {
        let mut rect = Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            fill,
        };
        rect.clamp_size();
        rect
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Raise width and height to at least [`MIN_RECT_SIZE`]. NaN also clamps.
    pub fn clamp_size(&mut self) {
        self.width = self.width.max(MIN_RECT_SIZE);
        self.height = self.height.max(MIN_RECT_SIZE);
    }

    /// Get the rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    /// Strict AABB intersection; touching edges do not overlap.
    pub fn overlaps(&self, other: &Rectangle) -> bool {
        self.position.x < other.position.x + other.width
            && self.position.x + self.width > other.position.x
            && self.position.y < other.position.y + other.height
            && self.position.y + self.height > other.position.y
    }

    /// Inclusive containment: points on the border count as inside.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.position.x
            && point.x <= self.position.x + self.width
            && point.y >= self.position.y
            && point.y <= self.position.y + self.height
    }

    /// Position of a corner.
    pub fn corner(&self, corner: Corner) -> Point {
        let r = self.as_rect();
        match corner {
            Corner::TopLeft => Point::new(r.x0, r.y0),
            Corner::TopRight => Point::new(r.x1, r.y0),
            Corner::BottomLeft => Point::new(r.x0, r.y1),
            Corner::BottomRight => Point::new(r.x1, r.y1),
        }
    }

    /// Corners in outline order (clockwise from top-left).
    pub fn outline(&self) -> [Point; 4] {
        [
            self.corner(Corner::TopLeft),
            self.corner(Corner::TopRight),
            self.corner(Corner::BottomRight),
            self.corner(Corner::BottomLeft),
        ]
    }
}
