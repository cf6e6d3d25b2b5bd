//! Core geometry types and primitives for sketchify.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! In JS you'd write: `const point = { x: 1.0, y: 2.0 }`
//! In Rust, we define a `struct` with explicit types.
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Debug` = like console.log, lets you print with `{:?}`
//! - `Clone` = can duplicate the value (like spread: `{...obj}`)
//! - `Copy` = can copy implicitly (small stack values only)
//! - `PartialEq` = can compare with `==`

use std::f64::consts::PI;

/// A 2D point with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A line segment defined by two endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// An axis-aligned rectangle: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Turn direction of an ordered point triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

// ============================================================================
// IMPLEMENTATIONS (methods)
// ============================================================================

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Squared distance to another point (no sqrt).
    #[inline]
    pub fn distance_sq(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Linear interpolation towards `other`; `t = 0` is self, `t = 1` is other.
    #[inline]
    pub fn lerp(&self, other: Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl Line {
    #[inline]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build a line from its two endpoints.
    #[inline]
    pub fn from_points(start: Point, end: Point) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    /// Get the start point of the line.
    #[inline]
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// Get the end point of the line.
    #[inline]
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Get the midpoint of the line.
    #[inline]
    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.x1 + self.x2) / 2.0,
            (self.y1 + self.y2) / 2.0,
        )
    }

    /// Length of the line segment.
    #[inline]
    pub fn length(&self) -> f64 {
        self.start().distance(self.end())
    }
}

impl Rectangle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Corners in drawing order: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.x + self.width, self.y),
            Point::new(self.x + self.width, self.y + self.height),
            Point::new(self.x, self.y + self.height),
        ]
    }
}

// ============================================================================
// ORIENTATION & INTERSECTION
// ============================================================================

/// Orientation of the ordered triple (p, q, r) from the cross-product sign.
#[inline]
pub fn orientation(p: Point, q: Point, r: Point) -> Orientation {
    let val = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
    if val == 0.0 {
        Orientation::Collinear
    } else if val > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// Check whether `q` lies inside the bounding box of segment `pr`.
///
/// Only meaningful when p, q, r are already known to be collinear.
#[inline]
pub fn on_segment(p: Point, q: Point, r: Point) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Check whether segment `p1q1` intersects segment `p2q2`.
///
/// Touching endpoints and collinear overlaps count as intersections.
pub fn segments_intersect(p1: Point, q1: Point, p2: Point, q2: Point) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    // Collinear special cases: an endpoint of one segment lies on the other
    (o1 == Orientation::Collinear && on_segment(p1, p2, q1))
        || (o2 == Orientation::Collinear && on_segment(p1, q2, q1))
        || (o3 == Orientation::Collinear && on_segment(p2, p1, q2))
        || (o4 == Orientation::Collinear && on_segment(p2, q1, q2))
}

/// Intersection of the infinite lines through `ab` and `cd`.
///
/// ## Rust Lesson #6: Option<T>
///
/// Parallel lines have no intersection, so we return `None`
/// instead of a sentinel value. Callers treat it as a no-op.
pub fn line_intersection(a: Point, b: Point, c: Point, d: Point) -> Option<Point> {
    let a1 = b.y - a.y;
    let b1 = a.x - b.x;
    let c1 = a1 * a.x + b1 * a.y;
    let a2 = d.y - c.y;
    let b2 = c.x - d.x;
    let c2 = a2 * c.x + b2 * c.y;
    let determinant = a1 * b2 - a2 * b1;

    if determinant == 0.0 {
        return None;
    }

    Some(Point::new(
        (b2 * c1 - b1 * c2) / determinant,
        (a1 * c2 - a2 * c1) / determinant,
    ))
}

// ============================================================================
// ROTATION
// ============================================================================

/// Rotate points in place about `center` by `degrees`.
pub fn rotate_points(points: &mut [Point], center: Point, degrees: f64) {
    if points.is_empty() {
        return;
    }

    let angle = degrees * PI / 180.0;
    let (sin, cos) = angle.sin_cos();

    for p in points.iter_mut() {
        let (x, y) = (p.x - center.x, p.y - center.y);
        p.x = x * cos - y * sin + center.x;
        p.y = x * sin + y * cos + center.y;
    }
}

/// Rotate both endpoints of every line in place about `center` by `degrees`.
pub fn rotate_lines(lines: &mut [Line], center: Point, degrees: f64) {
    for line in lines.iter_mut() {
        let mut ends = [line.start(), line.end()];
        rotate_points(&mut ends, center, degrees);
        *line = Line::from_points(ends[0], ends[1]);
    }
}

// ============================================================================
// TESTS
// ============================================================================
