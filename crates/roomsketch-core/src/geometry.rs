//! Flat vertex storage for polylines and rooms.

use kurbo::Point;

/// Ordered polyline vertices stored as `x0, y0, x1, y1, ...`.
///
/// Only whole points can be pushed or removed, so the flat sequence always
/// has an even length. Duplicates are allowed and order is drawing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexSequence {
    coords: Vec<f64>,
}

impl VertexSequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sequence from points in drawing order.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        let mut seq = Self::new();
        for p in points {
            seq.push(p);
        }
        seq
    }

    /// Number of points (half the flat length).
    pub fn len(&self) -> usize {
        self.coords.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Append a point.
    pub fn push(&mut self, point: Point) {
        self.coords.push(point.x);
        self.coords.push(point.y);
    }

    /// Remove and return the last point.
    pub fn pop(&mut self) -> Option<Point> {
        let y = self.coords.pop()?;
        let x = self.coords.pop()?;
        Some(Point::new(x, y))
    }

    /// Get the point at `index`.
    pub fn get(&self, index: usize) -> Option<Point> {
        let x = *self.coords.get(index * 2)?;
        let y = *self.coords.get(index * 2 + 1)?;
        Some(Point::new(x, y))
    }

    /// Overwrite the point at `index`. Returns false if out of range.
    pub fn set(&mut self, index: usize, point: Point) -> bool {
        if index >= self.len() {
            return false;
        }
        self.coords[index * 2] = point.x;
        self.coords[index * 2 + 1] = point.y;
        true
    }

    pub fn first(&self) -> Option<Point> {
        self.get(0)
    }

    pub fn last(&self) -> Option<Point> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Overwrite the last point. Returns false if the sequence is empty.
    pub fn set_last(&mut self, point: Point) -> bool {
        match self.len().checked_sub(1) {
            Some(i) => self.set(i, point),
            None => false,
        }
    }

    /// Iterate over the points in order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.coords
            .chunks_exact(2)
            .map(|pair| Point::new(pair[0], pair[1]))
    }

    pub fn to_points(&self) -> Vec<Point> {
        self.points().collect()
    }

    /// The raw `x, y` pairs.
    pub fn as_flat(&self) -> &[f64] {
        &self.coords
    }

    /// Number of pairwise-distinct points.
    pub fn distinct_count(&self) -> usize {
        let pts = self.to_points();
        pts.iter()
            .enumerate()
            .filter(|(i, p)| !pts[..*i].contains(p))
            .count()
    }
}
