//! Cubic bezier flattening and polyline simplification.
//!
//! Flattening is adaptive: a curve that is "flat enough" is replaced by its
//! chord, otherwise it's split in half (de Casteljau) and each half is
//! tried again. Simplification is Ramer-Douglas-Peucker.

use crate::geometry::Point;

/// Subdivision depth cap, so NaN input or a zero tolerance still terminates.
const MAX_SPLIT_DEPTH: u32 = 16;

/// Flatness measure of the cubic `p1, p2, p3, p4`.
///
/// Zero for a straight, evenly parameterized curve; grows with how far the
/// control points pull away from the chord. Compared against a tolerance,
/// not a distance.
pub fn flatness(p1: Point, p2: Point, p3: Point, p4: Point) -> f64 {
    let ux = 3.0 * p2.x - 2.0 * p1.x - p4.x;
    let uy = 3.0 * p2.y - 2.0 * p1.y - p4.y;
    let vx = 3.0 * p3.x - 2.0 * p4.x - p1.x;
    let vy = 3.0 * p3.y - 2.0 * p4.y - p1.y;

    (ux * ux).max(vx * vx) + (uy * uy).max(vy * vy)
}

/// Flatten a chain of cubics into one polyline.
///
/// `points` is `1 + 3n` control points: a start point, then three points
/// (two controls and an end) per cubic. Any trailing partial cubic is
/// ignored. When `distance` is positive the result is simplified with
/// [`simplify`].
///
/// ## Rust Lesson #26: Recursion with an Accumulator
///
/// Instead of each recursive call returning its own `Vec` and the caller
/// concatenating them, one `&mut Vec` is threaded through the recursion.
/// Every level pushes into the same buffer: no intermediate allocations.
pub fn points_on_bezier_curves(points: &[Point], tolerance: f64, distance: f64) -> Vec<Point> {
    let mut out = Vec::new();
    if points.len() < 4 {
        return out;
    }

    let segments = (points.len() - 1) / 3;
    for i in 0..segments {
        let c = &points[i * 3..i * 3 + 4];
        flatten_cubic([c[0], c[1], c[2], c[3]], tolerance, &mut out);
    }

    if distance > 0.0 {
        simplify(&out, distance)
    } else {
        out
    }
}

fn flatten_cubic(c: [Point; 4], tolerance: f64, out: &mut Vec<Point>) {
    subdivide(c, tolerance, 0, &mut |[p1, _, _, p4]| {
        // Skip the start point when it (nearly) repeats the previous end
        match out.last() {
            Some(last) if last.distance(p1) <= 1.0 => {}
            _ => out.push(p1),
        }
        out.push(p4);
    });
}

/// Split `c` until every piece is flatter than `tolerance`, handing each
/// accepted piece to `accept` in curve order.
///
/// Pieces at `MAX_SPLIT_DEPTH` are accepted as they are, flat or not.
fn subdivide<F: FnMut([Point; 4])>(c: [Point; 4], tolerance: f64, depth: u32, accept: &mut F) {
    let [p1, p2, p3, p4] = c;

    if depth >= MAX_SPLIT_DEPTH || flatness(p1, p2, p3, p4) < tolerance {
        accept(c);
        return;
    }

    let q1 = p1.lerp(p2, 0.5);
    let q2 = p2.lerp(p3, 0.5);
    let q3 = p3.lerp(p4, 0.5);
    let r1 = q1.lerp(q2, 0.5);
    let r2 = q2.lerp(q3, 0.5);
    let mid = r1.lerp(r2, 0.5);

    subdivide([p1, q1, r1, mid], tolerance, depth + 1, accept);
    subdivide([mid, r2, q3, p4], tolerance, depth + 1, accept);
}

/// Simplify a polyline with Ramer-Douglas-Peucker.
///
/// Points closer than `epsilon` to the simplified line are dropped. The
/// first and last points are always kept. `epsilon <= 0` or fewer than
/// three points returns the input unchanged.
pub fn simplify(points: &[Point], epsilon: f64) -> Vec<Point> {
    if epsilon <= 0.0 || points.len() < 3 {
        return points.to_vec();
    }

    let mut out = Vec::new();
    simplify_range(points, epsilon, &mut out);
    out
}

fn simplify_range(points: &[Point], epsilon: f64, out: &mut Vec<Point>) {
    let first = points[0];
    let last = points[points.len() - 1];

    let mut max_dist_sq = 0.0;
    let mut max_index = 0;
    for (i, &p) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let d = distance_to_segment_sq(p, first, last);
        if d > max_dist_sq {
            max_dist_sq = d;
            max_index = i;
        }
    }

    if max_dist_sq.sqrt() > epsilon {
        // Both halves share the split point; the second half skips it
        simplify_range(&points[..=max_index], epsilon, out);
        simplify_range(&points[max_index..], epsilon, out);
    } else {
        if out.is_empty() {
            out.push(first);
        }
        out.push(last);
    }
}

/// Squared distance from `p` to the segment `vw`.
fn distance_to_segment_sq(p: Point, v: Point, w: Point) -> f64 {
    let l2 = v.distance_sq(w);
    if l2 == 0.0 {
        return p.distance_sq(v);
    }
    let t = ((p.x - v.x) * (w.x - v.x) + (p.y - v.y) * (w.y - v.y)) / l2;
    p.distance_sq(v.lerp(w, t.clamp(0.0, 1.0)))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn s_curve() -> Vec<Point> {
        vec![pt(0.0, 0.0), pt(0.0, 100.0), pt(100.0, -100.0), pt(100.0, 0.0)]
    }

    #[test]
    fn straight_evenly_spaced_cubic_is_flat() {
        let f = flatness(pt(0.0, 0.0), pt(10.0, 0.0), pt(20.0, 0.0), pt(30.0, 0.0));
        assert_relative_eq!(f, 0.0);
    }

    #[test]
    fn straight_cubic_flattens_to_chord() {
        let points = points_on_bezier_curves(
            &[pt(0.0, 0.0), pt(10.0, 0.0), pt(20.0, 0.0), pt(30.0, 0.0)],
            1.0,
            0.0,
        );
        assert_eq!(points, vec![pt(0.0, 0.0), pt(30.0, 0.0)]);
    }

    #[test]
    fn flattened_points_lie_on_curve() {
        let c = s_curve();
        let points = points_on_bezier_curves(&c, 0.5, 0.0);
        assert!(points.len() > 4);

        // Every emitted point is a split point of the curve, so some t reproduces it
        let eval = |t: f64| {
            let mt = 1.0 - t;
            let a = mt * mt * mt;
            let b = 3.0 * mt * mt * t;
            let d = 3.0 * mt * t * t;
            let e = t * t * t;
            pt(
                a * c[0].x + b * c[1].x + d * c[2].x + e * c[3].x,
                a * c[0].y + b * c[1].y + d * c[2].y + e * c[3].y,
            )
        };
        let samples: Vec<Point> = (0..=1 << 12).map(|i| eval(i as f64 / 4096.0)).collect();
        for p in &points {
            let nearest = samples
                .iter()
                .map(|s| s.distance(*p))
                .fold(f64::INFINITY, f64::min);
            assert!(nearest < 1e-6, "{:?} is off the curve by {}", p, nearest);
        }
    }

    #[test]
    fn accepted_pieces_are_flatter_than_tolerance() {
        let c = s_curve();
        for tolerance in [0.5, 10.0, 1000.0] {
            let mut pieces = Vec::new();
            subdivide([c[0], c[1], c[2], c[3]], tolerance, 0, &mut |piece| pieces.push(piece));

            assert!(!pieces.is_empty());
            for [p1, p2, p3, p4] in &pieces {
                let f = flatness(*p1, *p2, *p3, *p4);
                assert!(f < tolerance, "piece flatness {} at tolerance {}", f, tolerance);
            }
            // Pieces tile the curve end to end
            assert_eq!(pieces[0][0], c[0]);
            assert_eq!(pieces[pieces.len() - 1][3], c[3]);
            for pair in pieces.windows(2) {
                assert_eq!(pair[0][3], pair[1][0]);
            }
        }
    }

    #[test]
    fn depth_cap_bounds_piece_count() {
        let c = s_curve();
        let mut count = 0usize;
        subdivide([c[0], c[1], c[2], c[3]], 0.0, 0, &mut |_| count += 1);
        assert_eq!(count, 1 << MAX_SPLIT_DEPTH);
    }

    #[test]
    fn looser_tolerance_never_adds_points() {
        let c = s_curve();
        let mut previous = usize::MAX;
        for tolerance in [0.1, 1.0, 10.0, 100.0, 1000.0] {
            let count = points_on_bezier_curves(&c, tolerance, 0.0).len();
            assert!(count <= previous, "tolerance {} gave {} points", tolerance, count);
            previous = count;
        }
    }

    #[test]
    fn chained_cubics_share_endpoints() {
        let chain = [
            pt(0.0, 0.0), pt(10.0, 20.0), pt(20.0, 20.0), pt(30.0, 0.0),
            pt(40.0, -20.0), pt(50.0, -20.0), pt(60.0, 0.0),
        ];
        let points = points_on_bezier_curves(&chain, 1.0, 0.0);
        assert_eq!(points.first(), Some(&pt(0.0, 0.0)));
        assert_eq!(points.last(), Some(&pt(60.0, 0.0)));
        assert_eq!(points.iter().filter(|p| **p == pt(30.0, 0.0)).count(), 1);
    }

    #[test]
    fn too_few_control_points_is_empty() {
        assert!(points_on_bezier_curves(&[pt(0.0, 0.0), pt(1.0, 1.0)], 1.0, 0.0).is_empty());
    }

    #[test]
    fn zero_tolerance_terminates() {
        let points = points_on_bezier_curves(&s_curve(), 0.0, 0.0);
        assert!(!points.is_empty());
    }

    #[test]
    fn simplify_straight_line_to_endpoints() {
        let line: Vec<Point> = (0..=10).map(|i| pt(i as f64, 2.0 * i as f64)).collect();
        assert_eq!(simplify(&line, 0.5), vec![pt(0.0, 0.0), pt(10.0, 20.0)]);
    }

    #[test]
    fn simplify_keeps_corners() {
        let points = vec![pt(0.0, 0.0), pt(5.0, 0.1), pt(10.0, 0.0), pt(10.0, 10.0)];
        assert_eq!(
            simplify(&points, 1.0),
            vec![pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0)]
        );
    }

    #[test]
    fn simplify_non_positive_epsilon_is_identity() {
        let points = vec![pt(0.0, 0.0), pt(1.0, 0.0), pt(2.0, 0.0)];
        assert_eq!(simplify(&points, 0.0), points);
        assert_eq!(simplify(&points, -1.0), points);
        assert_eq!(simplify(&points[..2], 5.0), points[..2].to_vec());
    }

    #[test]
    fn simplification_applied_when_distance_positive() {
        let c = s_curve();
        let raw = points_on_bezier_curves(&c, 0.1, 0.0);
        let simplified = points_on_bezier_curves(&c, 0.1, 2.0);
        assert!(simplified.len() < raw.len());
        assert_eq!(simplified.first(), raw.first());
        assert_eq!(simplified.last(), raw.last());
    }
}
