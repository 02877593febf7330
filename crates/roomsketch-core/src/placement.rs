//! Collision-aware rectangle dragging and corner resizing.

use crate::shapes::{Corner, MIN_RECT_SIZE, Rectangle};
use kurbo::Point;

/// Outcome of [`drag_to`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Resolved top-left position.
    pub position: Point,
    /// False when the pass budget ran out with an overlap remaining.
    pub converged: bool,
    /// Number of push-outs applied.
    pub pushes: usize,
}

/// Move `rect` to `proposed`, then push it out of every other rectangle.
///
/// Each pass walks `all` in order and pushes the moving rectangle out of any
/// rectangle it overlaps, along the axis with the larger top-left delta (x on
/// ties). Passes repeat until one finds no overlap, bounded by the squared
/// rectangle count; an exhausted budget returns the last position with
/// `converged == false`.
pub fn drag_to(rect: &Rectangle, proposed: Point, all: &[Rectangle]) -> Placement {
    let mut moving = rect.clone();
    moving.position = proposed;

    let max_passes = (all.len() * all.len()).max(1);
    let mut pushes = 0;

    for _ in 0..max_passes {
        let mut collided = false;
        for other in all.iter().filter(|o| o.id() != rect.id()) {
            if moving.overlaps(other) {
                push_out(&mut moving, other);
                collided = true;
                pushes += 1;
            }
        }
        if !collided {
            return Placement {
                position: moving.position,
                converged: true,
                pushes,
            };
        }
    }

    let converged = !all
        .iter()
        .any(|o| o.id() != rect.id() && moving.overlaps(o));
    if !converged {
        log::warn!(
            "Rectangle {} still overlaps after {} passes; keeping best effort position ({}, {})",
            rect.id(),
            max_passes,
            moving.position.x,
            moving.position.y
        );
    }
    Placement {
        position: moving.position,
        converged,
        pushes,
    }
}

fn push_out(moving: &mut Rectangle, other: &Rectangle) {
    let dx = moving.position.x - other.position.x;
    let dy = moving.position.y - other.position.y;

    if dx.abs() >= dy.abs() {
        moving.position.x = if dx > 0.0 {
            other.position.x + other.width
        } else {
            other.position.x - moving.width
        };
    } else {
        moving.position.y = if dy > 0.0 {
            other.position.y + other.height
        } else {
            other.position.y - moving.height
        };
    }
}

/// Resize by dragging one corner to `pointer` while the opposite corner stays put.
///
/// Width and height never drop below [`MIN_RECT_SIZE`]; a pointer dragged past
/// the opposite corner leaves the rectangle at the minimum size instead of
/// flipping it.
pub fn resize_corner(rect: &Rectangle, corner: Corner, pointer: Point) -> Rectangle {
    let bounds = rect.as_rect();
    let (width, height) = match corner {
        Corner::TopLeft => (bounds.x1 - pointer.x, bounds.y1 - pointer.y),
        Corner::TopRight => (pointer.x - bounds.x0, bounds.y1 - pointer.y),
        Corner::BottomLeft => (bounds.x1 - pointer.x, pointer.y - bounds.y0),
        Corner::BottomRight => (pointer.x - bounds.x0, pointer.y - bounds.y0),
    };
    let width = width.max(MIN_RECT_SIZE);
    let height = height.max(MIN_RECT_SIZE);

    let x = match corner {
        Corner::TopLeft | Corner::BottomLeft => bounds.x1 - width,
        Corner::TopRight | Corner::BottomRight => bounds.x0,
    };
    let y = match corner {
        Corner::TopLeft | Corner::TopRight => bounds.y1 - height,
        Corner::BottomLeft | Corner::BottomRight => bounds.y0,
    };

    let mut resized = rect.clone();
    resized.position = Point::new(x, y);
    resized.width = width;
    resized.height = height;
    resized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Rectangle {
        Rectangle::new(Point::new(x, y), w, h, Rgba::outline())
    }

    #[test]
    fn test_drag_without_collision() {
        let a = rect(0.0, 0.0, 50.0, 50.0);
        let b = rect(200.0, 200.0, 50.0, 50.0);
        let all = vec![a.clone(), b];
        let placement = drag_to(&a, Point::new(10.0, 20.0), &all);
        assert!(placement.converged);
        assert_eq!(placement.pushes, 0);
        assert_eq!(placement.position, Point::new(10.0, 20.0));
    }

    #[test]
    fn test_equal_deltas_push_along_x() {
        let first = rect(0.0, 0.0, 100.0, 100.0);
        let second = rect(0.0, 0.0, 100.0, 100.0);
        let all = vec![first, second.clone()];
        let placement = drag_to(&second, Point::new(50.0, 50.0), &all);
        assert!(placement.converged);
        assert!((placement.position.x - 100.0).abs() < f64::EPSILON);
        assert!((placement.position.y - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_larger_delta_axis_wins() {
        let fixed = rect(0.0, 0.0, 100.0, 100.0);
        let moving = rect(300.0, 300.0, 40.0, 40.0);
        let all = vec![fixed, moving.clone()];

        let down = drag_to(&moving, Point::new(10.0, 80.0), &all);
        assert_eq!(down.position, Point::new(10.0, 100.0));

        let left = drag_to(&moving, Point::new(-20.0, 10.0), &all);
        assert_eq!(left.position, Point::new(-40.0, 10.0));
    }

    #[test]
    fn test_resolution_is_overlap_free() {
        let all = vec![
            rect(0.0, 0.0, 100.0, 100.0),
            rect(150.0, 0.0, 60.0, 60.0),
            rect(300.0, 300.0, 30.0, 30.0),
        ];
        let moving = all[2].clone();
        for proposed in [Point::new(20.0, 30.0), Point::new(160.0, 5.0), Point::new(90.0, 90.0)] {
            let placement = drag_to(&moving, proposed, &all);
            assert!(placement.converged);
            let mut placed = moving.clone();
            placed.position = placement.position;
            assert!(all.iter().filter(|o| o.id() != moving.id()).all(|o| !placed.overlaps(o)));
        }
    }

    #[test]
    fn test_deadlock_terminates_best_effort() {
        // A 10-wide rectangle cannot fit in the 5-wide corridor between two
        // tall walls, and every push lands it back in the other wall.
        let left_wall = rect(0.0, 0.0, 50.0, 2000.0);
        let right_wall = rect(55.0, 0.0, 50.0, 2000.0);
        let moving = rect(500.0, 0.0, 10.0, 10.0);
        let all = vec![left_wall, right_wall, moving.clone()];

        let placement = drag_to(&moving, Point::new(45.0, 0.0), &all);
        assert!(!placement.converged);
        assert!(placement.pushes >= all.len() * all.len());
        assert!((placement.position.y - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_each_corner_keeps_opposite_fixed() {
        let r = rect(100.0, 100.0, 100.0, 100.0);

        let tl = resize_corner(&r, Corner::TopLeft, Point::new(50.0, 80.0));
        assert_eq!(tl.corner(Corner::BottomRight), Point::new(200.0, 200.0));
        assert_eq!(tl.position, Point::new(50.0, 80.0));

        let tr = resize_corner(&r, Corner::TopRight, Point::new(260.0, 90.0));
        assert_eq!(tr.corner(Corner::BottomLeft), Point::new(100.0, 200.0));
        assert!((tr.width - 160.0).abs() < f64::EPSILON);

        let bl = resize_corner(&r, Corner::BottomLeft, Point::new(120.0, 150.0));
        assert_eq!(bl.corner(Corner::TopRight), Point::new(200.0, 100.0));
        assert!((bl.height - 50.0).abs() < f64::EPSILON);

        let br = resize_corner(&r, Corner::BottomRight, Point::new(150.0, 300.0));
        assert_eq!(br.position, Point::new(100.0, 100.0));
        assert!((br.width - 50.0).abs() < f64::EPSILON);
        assert!((br.height - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_floor() {
        let r = rect(100.0, 100.0, 100.0, 100.0);
        for corner in Corner::ALL {
            // Drag far past the opposite corner.
            let pointer = match corner {
                Corner::TopLeft => Point::new(500.0, 500.0),
                Corner::TopRight => Point::new(-500.0, 500.0),
                Corner::BottomLeft => Point::new(500.0, -500.0),
                Corner::BottomRight => Point::new(-500.0, -500.0),
            };
            let resized = resize_corner(&r, corner, pointer);
            assert!((resized.width - MIN_RECT_SIZE).abs() < f64::EPSILON);
            assert!((resized.height - MIN_RECT_SIZE).abs() < f64::EPSILON);
        }

        let thin = resize_corner(&r, Corner::BottomRight, Point::new(102.0, 300.0));
        assert!((thin.width - MIN_RECT_SIZE).abs() < f64::EPSILON);
        assert!((thin.height - 200.0).abs() < f64::EPSILON);
    }
}
