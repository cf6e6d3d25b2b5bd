//! Path data to polylines.
//!
//! Runs a path string through the whole path pipeline and flattens it into
//! one point list per subpath. The hachure filler works on these.

use crate::curve::{points_on_bezier_curves, simplify};
use crate::error::Result;
use crate::geometry::Point;
use crate::path::{Command, absolutize, normalize, parse_path};

/// Convert path data into polylines, one per subpath.
///
/// Curves are flattened with `tolerance` (see [`crate::curve::flatness`]).
/// When `distance` is positive every polyline is also simplified with
/// Ramer-Douglas-Peucker at that epsilon.
///
/// # Example
/// ```
/// use sketchify::points::points_on_path;
///
/// let sets = points_on_path("M0 0L10 0L10 10L0 10Z", 1.0, 0.0).unwrap();
/// assert_eq!(sets.len(), 1);
/// assert_eq!(sets[0].len(), 5);
/// ```
pub fn points_on_path(d: &str, tolerance: f64, distance: f64) -> Result<Vec<Vec<Point>>> {
    let segments = normalize(&absolutize(&parse_path(d)?));

    let mut flattener = Flattener {
        tolerance,
        sets: Vec::new(),
        current: Vec::new(),
        pending: Vec::new(),
    };
    let mut start = Point::default();

    for segment in &segments {
        let p = segment.params();
        match segment.command {
            Command::Move => {
                flattener.finish_subpath();
                start = Point::new(p[0], p[1]);
                flattener.current.push(start);
            }
            Command::Line => {
                flattener.flush_curve();
                flattener.current.push(Point::new(p[0], p[1]));
            }
            Command::Cubic => {
                if flattener.pending.is_empty() {
                    let from = flattener.current.last().copied().unwrap_or(start);
                    flattener.pending.push(from);
                }
                flattener.pending.extend([
                    Point::new(p[0], p[1]),
                    Point::new(p[2], p[3]),
                    Point::new(p[4], p[5]),
                ]);
            }
            Command::Close => {
                flattener.flush_curve();
                flattener.current.push(start);
            }
            // normalize() emits nothing else
            _ => {}
        }
    }
    flattener.finish_subpath();

    let sets = flattener.sets;
    log::trace!("{} segments flattened into {} point sets", segments.len(), sets.len());

    if distance > 0.0 {
        return Ok(sets
            .iter()
            .map(|set| simplify(set, distance))
            .filter(|set| !set.is_empty())
            .collect());
    }
    Ok(sets)
}

/// Accumulator for one conversion.
///
/// Consecutive cubics are collected into `pending` and flattened in one go
/// when something else interrupts the chain.
struct Flattener {
    tolerance: f64,
    sets: Vec<Vec<Point>>,
    current: Vec<Point>,
    pending: Vec<Point>,
}

impl Flattener {
    fn flush_curve(&mut self) {
        if self.pending.len() >= 4 {
            let flat = points_on_bezier_curves(&self.pending, self.tolerance, 0.0);
            self.current.extend(flat);
        }
        self.pending.clear();
    }

    fn finish_subpath(&mut self) {
        self.flush_curve();
        if !self.current.is_empty() {
            self.sets.push(std::mem::take(&mut self.current));
        }
    }
}
