//! Polygon containment and hachure connector clipping.
//!
//! Connectors are the short lines that join the end of one hachure line
//! to the start of the next, so a fill can be drawn in one zig-zag stroke.
//! A connector may cut across a concave notch of the polygon; the clipping
//! here keeps only the parts that run inside.

use crate::geometry::{Line, Orientation, Point, line_intersection, on_segment, orientation, segments_intersect};

/// x coordinate of the far end of the containment test ray.
///
/// Large enough to leave any drawing, small enough that orientation
/// products stay finite.
const RAY_FAR_X: f64 = 9_007_199_254_740_991.0;

// ============================================================================
// POINT IN POLYGON
// ============================================================================
//
// ## Rust Lesson #8: References & Slices
//
// `&[Point]` is a "slice" - a borrowed view into a contiguous sequence.
// It works with Vec<Point>, arrays, or any contiguous memory.

/// Test if a point is inside a polygon.
///
/// Casts a segment to the right and counts the edges it crosses: odd means
/// inside. A point lying exactly on a crossed edge counts as inside.
/// Fewer than three vertices is never inside.
pub fn point_in_polygon(polygon: &[Point], x: f64, y: f64) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let p = Point::new(x, y);
    let far = Point::new(RAY_FAR_X, y);
    let mut count = 0usize;

    for i in 0..n {
        let current = polygon[i];
        let next = polygon[(i + 1) % n];
        if segments_intersect(current, next, p, far) {
            if orientation(current, p, next) == Orientation::Collinear {
                return on_segment(current, p, next);
            }
            count += 1;
        }
    }

    count % 2 == 1
}

#[inline]
fn midpoint_in_polygon(polygon: &[Point], segment: &Line) -> bool {
    let mid = segment.midpoint();
    point_in_polygon(polygon, mid.x, mid.y)
}

// ============================================================================
// CONNECTORS
// ============================================================================

/// Connector lines between consecutive hachure lines, clipped to the polygon.
///
/// For each pair `(prev, current)` the connector runs from the start of
/// `current` to the end of `prev`. Pairs where `prev` is shorter than 3,
/// or the connector itself is 3 or shorter, are skipped.
pub fn connecting_lines(polygon: &[Point], lines: &[Line]) -> Vec<Line> {
    let mut result = Vec::new();

    for pair in lines.windows(2) {
        let (prev, current) = (&pair[0], &pair[1]);
        if prev.length() < 3.0 {
            continue;
        }
        let connector = Line::from_points(current.start(), prev.end());
        if connector.length() > 3.0 {
            result.extend(split_on_intersections(polygon, &connector));
        }
    }

    log::trace!("{} connectors for {} hachure lines", result.len(), lines.len());
    result
}

/// Clip `segment` against the polygon boundary.
///
/// Crossings closer than `max(5, len / 10)` to either end are ignored as
/// noise. With fewer than two usable crossings the segment is kept whole
/// if its midpoint is inside, otherwise dropped. With more, the segment is
/// cut at the crossings and the pieces whose midpoints are inside are
/// returned.
pub fn split_on_intersections(polygon: &[Point], segment: &Line) -> Vec<Line> {
    let (start, end) = (segment.start(), segment.end());
    let error = (segment.length() * 0.1).max(5.0);
    let n = polygon.len();

    // (distance from start, crossing point)
    let mut crossings: Vec<(f64, Point)> = Vec::new();
    for i in 0..n {
        let p1 = polygon[i];
        let p2 = polygon[(i + 1) % n];
        if !segments_intersect(p1, p2, start, end) {
            continue;
        }
        let Some(ip) = line_intersection(p1, p2, start, end) else {
            continue;
        };
        let d0 = ip.distance(start);
        let d1 = ip.distance(end);
        if d0 > error && d1 > error {
            crossings.push((d0, ip));
        }
    }

    if crossings.len() <= 1 {
        return keep_if_inside(polygon, segment);
    }

    crossings.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut cuts: Vec<Point> = crossings.into_iter().map(|(_, p)| p).collect();

    if !point_in_polygon(polygon, start.x, start.y) {
        cuts.remove(0);
    }
    if !point_in_polygon(polygon, end.x, end.y) {
        cuts.pop();
    }
    if cuts.len() <= 1 {
        return keep_if_inside(polygon, segment);
    }

    let mut stops = Vec::with_capacity(cuts.len() + 2);
    stops.push(start);
    stops.extend(cuts);
    stops.push(end);

    stops
        .chunks_exact(2)
        .map(|pair| Line::from_points(pair[0], pair[1]))
        .filter(|piece| midpoint_in_polygon(polygon, piece))
        .collect()
}

fn keep_if_inside(polygon: &[Point], segment: &Line) -> Vec<Line> {
    if midpoint_in_polygon(polygon, segment) {
        vec![*segment]
    } else {
        Vec::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    /// A "U" shape: 0..30 wide, with a notch from x=10..20 down to y=10.
    fn u_shape() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 20.0),
            Point::new(20.0, 20.0),
            Point::new(20.0, 0.0),
            Point::new(30.0, 0.0),
            Point::new(30.0, 30.0),
            Point::new(0.0, 30.0),
        ]
    }

    #[test]
    fn point_in_square() {
        let sq = square();
        assert!(point_in_polygon(&sq, 5.0, 5.0));
        assert!(!point_in_polygon(&sq, 15.0, 5.0));
        assert!(!point_in_polygon(&sq, -1.0, 5.0));
    }

    #[test]
    fn point_on_edge_is_inside() {
        let sq = square();
        assert!(point_in_polygon(&sq, 5.0, 0.0));
        assert!(point_in_polygon(&sq, 10.0, 5.0));
    }

    #[test]
    fn degenerate_polygon_contains_nothing() {
        let line = [Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
        assert!(!point_in_polygon(&line, 5.0, 5.0));
        assert!(!point_in_polygon(&[], 0.0, 0.0));
    }

    #[test]
    fn concave_notch_is_outside() {
        let u = u_shape();
        assert!(point_in_polygon(&u, 5.0, 5.0));
        assert!(point_in_polygon(&u, 25.0, 5.0));
        assert!(!point_in_polygon(&u, 15.0, 5.0));
        assert!(point_in_polygon(&u, 15.0, 25.0));
    }

    #[test]
    fn connector_inside_convex_polygon_is_kept() {
        let sq = square();
        let segment = Line::new(2.0, 2.0, 8.0, 8.0);
        assert_eq!(split_on_intersections(&sq, &segment), vec![segment]);
    }

    #[test]
    fn connector_outside_is_dropped() {
        let sq = square();
        let segment = Line::new(20.0, 0.0, 20.0, 10.0);
        assert!(split_on_intersections(&sq, &segment).is_empty());
    }

    #[test]
    fn connector_across_notch_is_split() {
        // Crosses the notch walls at x=10 and x=20; the middle piece is outside
        let u = u_shape();
        let segment = Line::new(1.0, 10.0, 29.0, 10.0);
        let pieces = split_on_intersections(&u, &segment);
        assert_eq!(
            pieces,
            vec![Line::new(1.0, 10.0, 10.0, 10.0), Line::new(20.0, 10.0, 29.0, 10.0)]
        );
    }

    #[test]
    fn connecting_lines_join_consecutive_hachures() {
        let sq = square();
        let lines = [Line::new(0.0, 2.0, 10.0, 2.0), Line::new(0.0, 6.0, 10.0, 6.0)];
        // Connector from (0, 6) to (10, 2), entirely inside
        assert_eq!(connecting_lines(&sq, &lines), vec![Line::new(0.0, 6.0, 10.0, 2.0)]);
    }

    #[test]
    fn short_lines_get_no_connector() {
        let sq = square();
        let short_prev = [Line::new(4.0, 2.0, 6.0, 2.0), Line::new(0.0, 6.0, 10.0, 6.0)];
        assert!(connecting_lines(&sq, &short_prev).is_empty());

        let short_gap = [Line::new(0.0, 2.0, 5.0, 2.0), Line::new(4.0, 3.0, 10.0, 3.0)];
        assert!(connecting_lines(&sq, &short_gap).is_empty());
    }
}
