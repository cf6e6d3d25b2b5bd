//! Reduce absolute segments to move, line, cubic and close.

use super::arc::arc_to_cubic_curves;
use super::{Command, Segment};
use crate::geometry::Point;

/// Normalize absolute segments so only `M`, `L`, `C` and `Z` remain.
///
/// Input must already be absolute (see [`super::absolutize`]).
///
/// - `H`/`V` become lines.
/// - `Q`/`T` are degree-elevated to cubics.
/// - `S`/`T` reflect the previous control point when the previous command
///   was of the same family, otherwise they use the current point.
/// - `A` becomes one or more cubics. A zero radius gives a straight cubic,
///   an arc ending where it starts gives nothing.
pub fn normalize(segments: &[Segment]) -> Vec<Segment> {
    let mut out = Vec::with_capacity(segments.len());
    let mut last: Option<Command> = None;
    let mut current = Point::default();
    let mut subpath = Point::default();
    // Last control point, for S/T reflection
    let mut control = Point::default();

    for segment in segments {
        let p = segment.params();
        match segment.command {
            Command::Move => {
                current = Point::new(p[0], p[1]);
                subpath = current;
                out.push(Segment::move_to(current.x, current.y));
            }
            Command::Line => {
                current = Point::new(p[0], p[1]);
                out.push(Segment::line_to(current.x, current.y));
            }
            Command::Horizontal => {
                current.x = p[0];
                out.push(Segment::line_to(current.x, current.y));
            }
            Command::Vertical => {
                current.y = p[0];
                out.push(Segment::line_to(current.x, current.y));
            }
            Command::Cubic => {
                out.push(Segment::cubic_to(p[0], p[1], p[2], p[3], p[4], p[5]));
                control = Point::new(p[2], p[3]);
                current = Point::new(p[4], p[5]);
            }
            Command::SmoothCubic => {
                let c1 = if matches!(last, Some(Command::Cubic | Command::SmoothCubic)) {
                    reflect(control, current)
                } else {
                    current
                };
                out.push(Segment::cubic_to(c1.x, c1.y, p[0], p[1], p[2], p[3]));
                control = Point::new(p[0], p[1]);
                current = Point::new(p[2], p[3]);
            }
            Command::Quadratic => {
                let q = Point::new(p[0], p[1]);
                let end = Point::new(p[2], p[3]);
                out.push(quadratic_to_cubic(current, q, end));
                control = q;
                current = end;
            }
            Command::SmoothQuadratic => {
                let q = if matches!(last, Some(Command::Quadratic | Command::SmoothQuadratic)) {
                    reflect(control, current)
                } else {
                    current
                };
                let end = Point::new(p[0], p[1]);
                out.push(quadratic_to_cubic(current, q, end));
                control = q;
                current = end;
            }
            Command::Arc => {
                let (rx, ry) = (p[0].abs(), p[1].abs());
                let large_arc = p[3] > 0.5;
                let sweep = p[4] > 0.5;
                let end = Point::new(p[5], p[6]);

                if rx == 0.0 || ry == 0.0 {
                    out.push(Segment::cubic_to(current.x, current.y, end.x, end.y, end.x, end.y));
                    current = end;
                } else if current != end {
                    for c in arc_to_cubic_curves(current, end, (rx, ry), p[2], large_arc, sweep) {
                        out.push(Segment::cubic_to(c[0], c[1], c[2], c[3], c[4], c[5]));
                    }
                    current = end;
                } else {
                    log::debug!("arc ends where it starts at ({}, {}), dropped", end.x, end.y);
                }
            }
            Command::Close => {
                out.push(Segment::close());
                current = subpath;
            }
        }
        last = Some(segment.command);
    }

    out
}

/// Reflect `control` through `about`.
#[inline]
fn reflect(control: Point, about: Point) -> Point {
    Point::new(2.0 * about.x - control.x, 2.0 * about.y - control.y)
}

/// Exact degree elevation of the quadratic `start, q, end`.
fn quadratic_to_cubic(start: Point, q: Point, end: Point) -> Segment {
    let c1 = start.lerp(q, 2.0 / 3.0);
    let c2 = end.lerp(q, 2.0 / 3.0);
    Segment::cubic_to(c1.x, c1.y, c2.x, c2.y, end.x, end.y)
}
