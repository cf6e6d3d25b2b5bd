//! Elliptical arc to cubic bezier conversion.
//!
//! An SVG arc is given in "endpoint" form (start, end, radii, flags). We
//! recover the center form (center, start angle, end angle), split the sweep
//! into pieces of at most 120°, and approximate each piece with one cubic.

use std::f64::consts::PI;

use crate::geometry::Point;

/// Largest angular span one cubic is allowed to cover.
const MAX_PIECE: f64 = PI * 120.0 / 180.0;

/// Convert an elliptical arc into cubic bezier control tuples.
///
/// Each returned array is `[x1, y1, x2, y2, x, y]`: two control points and
/// the end point of one cubic. The start of the first cubic is `from`.
///
/// `radii` must be non-zero (the normalizer handles degenerate radii before
/// calling this). Radii too small to span the endpoints are scaled up.
pub fn arc_to_cubic_curves(
    from: Point,
    to: Point,
    radii: (f64, f64),
    x_axis_rotation: f64,
    large_arc: bool,
    sweep: bool,
) -> Vec<[f64; 6]> {
    let angle = x_axis_rotation.to_radians();

    // Work in the ellipse's own frame, undo the rotation at the end
    let p1 = rotate(from, -angle);
    let p2 = rotate(to, -angle);
    let (mut rx, mut ry) = radii;

    let hx = (p1.x - p2.x) / 2.0;
    let hy = (p1.y - p2.y) / 2.0;
    let lambda = (hx * hx) / (rx * rx) + (hy * hy) / (ry * ry);
    if lambda > 1.0 {
        let scale = lambda.sqrt();
        rx *= scale;
        ry *= scale;
    }

    let sign = if large_arc == sweep { -1.0 } else { 1.0 };
    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let left = rx2 * ry2 - rx2 * hy * hy - ry2 * hx * hx;
    let right = rx2 * hy * hy + ry2 * hx * hx;
    let k = sign * (left / right).abs().sqrt();

    let center = Point::new(
        k * rx * hy / ry + (p1.x + p2.x) / 2.0,
        k * -ry * hx / rx + (p1.y + p2.y) / 2.0,
    );

    let mut f1 = ellipse_angle(p1, center, ry);
    let mut f2 = ellipse_angle(p2, center, ry);
    if sweep && f1 > f2 {
        f1 -= 2.0 * PI;
    }
    if !sweep && f2 > f1 {
        f2 -= 2.0 * PI;
    }

    let mut controls = Vec::new();
    let ellipse = Ellipse { center, rx, ry };
    ellipse.pieces(p1, p2, f1, f2, sweep, &mut controls);

    let curves: Vec<[f64; 6]> = controls
        .chunks_exact(3)
        .map(|c| {
            let (a, b, e) = (rotate(c[0], angle), rotate(c[1], angle), rotate(c[2], angle));
            [a.x, a.y, b.x, b.y, e.x, e.y]
        })
        .collect();

    log::trace!("arc converted to {} cubic pieces", curves.len());
    curves
}

/// Center-form ellipse (in its own unrotated frame).
struct Ellipse {
    center: Point,
    rx: f64,
    ry: f64,
}

impl Ellipse {
    /// Point on the ellipse at parametric angle `f`.
    fn at(&self, f: f64) -> Point {
        Point::new(self.center.x + self.rx * f.cos(), self.center.y + self.ry * f.sin())
    }

    /// Append the control points (c1, c2, end) of the arc from `start` at
    /// angle `f1` to `end` at angle `f2`, splitting spans over 120°.
    ///
    /// Each recursion consumes 120° of the span, so depth is at most 3.
    fn pieces(&self, start: Point, end: Point, f1: f64, f2: f64, sweep: bool, out: &mut Vec<Point>) {
        if (f2 - f1).abs() > MAX_PIECE {
            let split = if sweep && f2 > f1 { f1 + MAX_PIECE } else { f1 - MAX_PIECE };
            let mid = self.at(split);
            self.piece(start, mid, f1, split, out);
            self.pieces(mid, end, split, f2, sweep, out);
        } else {
            self.piece(start, end, f1, f2, out);
        }
    }

    fn piece(&self, start: Point, end: Point, f1: f64, f2: f64, out: &mut Vec<Point>) {
        let t = ((f2 - f1) / 4.0).tan();
        let hx = 4.0 / 3.0 * self.rx * t;
        let hy = 4.0 / 3.0 * self.ry * t;
        let (s1, c1) = f1.sin_cos();
        let (s2, c2) = f2.sin_cos();

        out.push(Point::new(start.x - hx * s1, start.y + hy * c1));
        out.push(Point::new(end.x + hx * s2, end.y - hy * c2));
        out.push(end);
    }
}

/// Parametric angle of `p` on an ellipse around `center`, in `[0, 2π)`.
fn ellipse_angle(p: Point, center: Point, ry: f64) -> f64 {
    // Rounding can push the ratio a hair outside asin's domain
    let mut f = ((p.y - center.y) / ry).clamp(-1.0, 1.0).asin();
    if p.x < center.x {
        f = PI - f;
    }
    if f < 0.0 {
        f += 2.0 * PI;
    }
    f
}

#[inline]
fn rotate(p: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    Point::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos)
}
