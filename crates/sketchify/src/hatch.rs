//! Scan-line hachure generation.
//!
//! Hachure lines are parallel strokes that fill a polygon. We rotate the
//! polygon so the lines become horizontal, sweep a scan line down it with
//! an active edge table, then rotate the resulting lines back.

use crate::config::SketchyConfig;
use crate::geometry::{Line, Point, rotate_lines, rotate_points};

/// One non-horizontal polygon edge in the edge table.
#[derive(Debug, Clone, Copy)]
struct Edge {
    ymin: f64,
    ymax: f64,
    /// x at the current scan line (starts at the ymin end)
    x: f64,
    /// dx/dy, how far x moves per unit of y
    islope: f64,
}

/// Generate hachure lines filling a polygon.
///
/// The lines run at `hachure_angle` and are `hachure_gap` apart (or
/// `4 * stroke_width` when the gap is negative, never below 0.1). Line
/// endpoints sit on the polygon boundary, x rounded to whole units in the
/// rotated frame.
///
/// Fewer than three distinct vertices gives no lines.
pub fn polygon_hachure_lines(points: &[Point], config: &SketchyConfig) -> Vec<Line> {
    let origin = Point::default();
    let angle = (config.hachure_angle + 90.0).round();

    let mut vertices = points.to_vec();
    if angle != 0.0 {
        rotate_points(&mut vertices, origin, angle);
    }

    let mut lines = straight_hachure_lines(vertices, config);

    if angle != 0.0 {
        rotate_lines(&mut lines, origin, -angle);
    }

    log::trace!("{} hachure lines for a {}-point polygon", lines.len(), points.len());
    lines
}

/// Horizontal hachure lines for an (already rotated) polygon.
///
/// ## Rust Lesson #29: Vec::retain and drain
///
/// The active edge table shrinks and grows every step. `retain` drops
/// entries in place without reallocating, and `drain(..k)` moves the
/// first `k` pending edges out of one Vec and into the other.
fn straight_hachure_lines(mut vertices: Vec<Point>, config: &SketchyConfig) -> Vec<Line> {
    let mut lines = Vec::new();

    let (Some(&first), Some(&last)) = (vertices.first(), vertices.last()) else {
        log::debug!("empty polygon, no hachure");
        return lines;
    };
    if first != last {
        vertices.push(first);
    }
    if vertices.len() <= 2 {
        log::debug!("polygon with {} vertices, no hachure", vertices.len());
        return lines;
    }
    if vertices.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        log::debug!("polygon with non-finite vertices, no hachure");
        return lines;
    }

    let gap = if config.hachure_gap < 0.0 {
        config.stroke_width * 4.0
    } else {
        config.hachure_gap
    };
    // Also catches NaN, which would otherwise never advance the scan line
    let gap = if gap >= 0.1 { gap } else { 0.1 };

    let mut edges: Vec<Edge> = vertices
        .windows(2)
        .filter(|w| w[0].y != w[1].y)
        .map(|w| {
            let (p1, p2) = (w[0], w[1]);
            let ymin = p1.y.min(p2.y);
            Edge {
                ymin,
                ymax: p1.y.max(p2.y),
                x: if ymin == p1.y { p1.x } else { p2.x },
                islope: (p2.x - p1.x) / (p2.y - p1.y),
            }
        })
        .collect();

    edges.sort_by(|a, b| {
        a.ymin
            .total_cmp(&b.ymin)
            .then(a.x.total_cmp(&b.x))
            .then(a.ymax.total_cmp(&b.ymax))
    });

    let Some(start) = edges.first() else {
        return lines;
    };
    let mut y = start.ymin;
    let mut active: Vec<Edge> = Vec::new();

    while !active.is_empty() || !edges.is_empty() {
        let ready = edges.iter().take_while(|e| e.ymin <= y).count();
        active.extend(edges.drain(..ready));

        active.retain(|e| e.ymax > y);
        active.sort_by(|a, b| a.x.total_cmp(&b.x));

        for pair in active.chunks_exact(2) {
            lines.push(Line::new(pair[0].x.round(), y, pair[1].x.round(), y));
        }

        // At large magnitudes adding the gap no longer moves y
        let next = y + gap;
        if next <= y {
            log::debug!("hachure scan line stuck at y = {}, stopping", y);
            break;
        }
        y = next;
        for edge in &mut active {
            edge.x += gap * edge.islope;
        }
    }

    lines
}

// ============================================================================
// TESTS
// ============================================================================
