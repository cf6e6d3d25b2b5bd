//! Sketchy/hand-drawn rendering.
//!
//! Provides RoughJS-style drawing primitives that give vector graphics a
//! hand-drawn appearance:
//! - Endpoint randomization (roughness)
//! - Line bowing (curvature)
//! - Double-stroke effect
//! - Wobbly ellipses and arcs drawn as splines
//! - Hachure fills
//!
//! Every primitive turns into `move_to` / `line_to` / `bezier_curve_to`
//! calls on a [`DrawSink`].
//!
//! # Example
//! ```
//! use sketchify::sketchy::Renderer;
//! use sketchify::sink::PathData;
//! use sketchify::SketchyConfig;
//!
//! let config = SketchyConfig::default().with_seed(42);
//! let mut renderer = Renderer::with_config(PathData::new(), &config);
//! renderer.line(0.0, 0.0, 100.0, 100.0, &config);
//! renderer.svg_path("M 10 10 C 20 20 40 20 50 10", &config).unwrap();
//! assert!(renderer.sink().as_str().starts_with('M'));
//! ```

use std::f64::consts::{PI, TAU};

use crate::config::SketchyConfig;
use crate::error::Result;
use crate::fill::HachureFiller;
use crate::geometry::{Point, Rectangle};
use crate::path::{Command, absolutize, normalize, parse_path};
use crate::points::points_on_path;
use crate::rng::{Random, Rng};
use crate::sink::DrawSink;

/// Smallest angular step for arc sampling, so a sliver of an arc can't
/// turn into millions of samples.
const MIN_ARC_INCREMENT: f64 = 1e-3;

/// Sampling parameters for one ellipse.
///
/// Computed once by [`Renderer::generate_ellipse_params`] and reusable
/// across the stroke and fill of the same ellipse so both agree on its
/// (randomized) radii.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseParams {
    /// Angle between samples (radians)
    pub increment: f64,
    pub rx: f64,
    pub ry: f64,
}

/// Hand-drawn renderer: one drawing session over a sink and a generator.
///
/// ## Rust Lesson #30: Generic Structs with Defaults
///
/// `Renderer<S, R = Rng>` is generic over where drawing goes (`S`) and
/// where randomness comes from (`R`). The `= Rng` default means most
/// code can just write `Renderer<PathData>`. Tests plug in scripted
/// generators to check exactly which numbers get drawn.
pub struct Renderer<S: DrawSink, R: Random = Rng> {
    sink: S,
    rng: R,
}

impl<S: DrawSink> Renderer<S, Rng> {
    /// Renderer seeded from `config.seed`, or from entropy when unseeded.
    pub fn with_config(sink: S, config: &SketchyConfig) -> Self {
        Self::new(sink, Rng::from_seed_or_entropy(config.seed))
    }
}

impl<S: DrawSink, R: Random> Renderer<S, R> {
    pub fn new(sink: S, rng: R) -> Self {
        Self { sink, rng }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Finish the session and take the sink back.
    pub fn into_sink(self) -> S {
        self.sink
    }

    // ========================================================================
    // RANDOM OFFSETS
    // ========================================================================

    #[inline]
    fn random(&mut self) -> f64 {
        self.rng.next_f64()
    }

    /// Random value in `[min, max)`, scaled by roughness and `gain`.
    #[inline]
    fn offset(&mut self, min: f64, max: f64, config: &SketchyConfig, gain: f64) -> f64 {
        config.roughness * gain * (self.random() * (max - min) + min)
    }

    /// Random value in `[-x, x)`, scaled by roughness and `gain`.
    #[inline]
    fn offset_opt_gain(&mut self, x: f64, config: &SketchyConfig, gain: f64) -> f64 {
        self.offset(-x, x, config, gain)
    }

    #[inline]
    fn offset_opt(&mut self, x: f64, config: &SketchyConfig) -> f64 {
        self.offset_opt_gain(x, config, 1.0)
    }

    // ========================================================================
    // LINES & POLYGONS
    // ========================================================================

    /// Draw a line.
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, config: &SketchyConfig) {
        self.double_line(x1, y1, x2, y2, config, false);
    }

    /// Draw a polyline, optionally closed.
    ///
    /// Two points draw a single line; fewer draw nothing.
    pub fn linear_path(&mut self, points: &[Point], close: bool, config: &SketchyConfig) {
        match points.len() {
            0 | 1 => log::debug!("linear path with {} points, nothing to draw", points.len()),
            2 => self.line(points[0].x, points[0].y, points[1].x, points[1].y, config),
            _ => {
                for w in points.windows(2) {
                    self.double_line(w[0].x, w[0].y, w[1].x, w[1].y, config, false);
                }
                if close {
                    let (last, first) = (points[points.len() - 1], points[0]);
                    self.double_line(last.x, last.y, first.x, first.y, config, false);
                }
            }
        }
    }

    pub fn polygon(&mut self, points: &[Point], config: &SketchyConfig) {
        self.linear_path(points, true, config);
    }

    pub fn rectangle(&mut self, rect: &Rectangle, config: &SketchyConfig) {
        self.polygon(&rect.corners(), config);
    }

    /// Line drawn with the fill stroke setting.
    ///
    /// Same as [`Self::line`], except the second pass is controlled by
    /// `disable_multi_stroke_fill`.
    pub fn double_line_fill_ops(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, config: &SketchyConfig) {
        self.double_line(x1, y1, x2, y2, config, true);
    }

    #[allow(clippy::too_many_arguments)]
    fn double_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, config: &SketchyConfig, filling: bool) {
        let single_stroke = if filling {
            config.disable_multi_stroke_fill
        } else {
            config.disable_multi_stroke
        };
        self.rough_line(x1, y1, x2, y2, config, false);
        if !single_stroke {
            self.rough_line(x1, y1, x2, y2, config, true);
        }
    }

    /// One pass of a rough line: a jittered start and one bowed cubic.
    ///
    /// The overlay pass (second stroke) uses half the endpoint jitter.
    /// Draws exactly 11 random numbers.
    #[allow(clippy::too_many_arguments)]
    fn rough_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, config: &SketchyConfig, overlay: bool) {
        let length_sq = (x1 - x2).powi(2) + (y1 - y2).powi(2);
        let length = length_sq.sqrt();

        // Long lines get proportionally less jitter
        let gain = if length < 200.0 {
            1.0
        } else if length > 500.0 {
            0.4
        } else {
            -0.0016668 * length + 1.233334
        };

        let mut offset = config.max_randomness_offset;
        if offset * offset * 100.0 > length_sq {
            offset = length / 10.0;
        }
        let jitter = if overlay { offset / 2.0 } else { offset };

        let diverge = 0.2 + self.random() * 0.2;
        let bow = config.bowing * config.max_randomness_offset / 200.0;
        let mid_dx = self.offset_opt_gain(bow * (y2 - y1), config, gain);
        let mid_dy = self.offset_opt_gain(bow * (x1 - x2), config, gain);

        let sx = x1 + self.offset_opt_gain(jitter, config, gain);
        let sy = y1 + self.offset_opt_gain(jitter, config, gain);
        self.sink.move_to(sx, sy);

        let c1x = mid_dx + x1 + (x2 - x1) * diverge + self.offset_opt_gain(jitter, config, gain);
        let c1y = mid_dy + y1 + (y2 - y1) * diverge + self.offset_opt_gain(jitter, config, gain);
        let c2x = mid_dx + x1 + 2.0 * (x2 - x1) * diverge + self.offset_opt_gain(jitter, config, gain);
        let c2y = mid_dy + y1 + 2.0 * (y2 - y1) * diverge + self.offset_opt_gain(jitter, config, gain);
        let ex = x2 + self.offset_opt_gain(jitter, config, gain);
        let ey = y2 + self.offset_opt_gain(jitter, config, gain);
        self.sink.bezier_curve_to(c1x, c1y, c2x, c2y, ex, ey);
    }

    // ========================================================================
    // CURVES
    // ========================================================================

    /// Draw a smooth curve through `points`.
    pub fn curve(&mut self, points: &[Point], config: &SketchyConfig) {
        self.curve_with_offset(points, 1.0 + config.roughness * 0.2, config);
        if !config.disable_multi_stroke {
            let second = config.with_advanced_seed();
            self.curve_with_offset(points, 1.5 * (1.0 + config.roughness * 0.22), &second);
        }
    }

    /// Jitter every point, repeat the first and last, and draw a spline.
    ///
    /// The repeated ends become the spline's outer control points, so the
    /// curve runs all the way to both ends.
    fn curve_with_offset(&mut self, points: &[Point], offset: f64, config: &SketchyConfig) {
        let Some((&first, rest)) = points.split_first() else {
            log::debug!("curve with no points, nothing to draw");
            return;
        };

        let mut jittered = Vec::with_capacity(points.len() + 2);
        jittered.push(self.jitter(first, offset, config));
        jittered.push(self.jitter(first, offset, config));
        for (i, &p) in rest.iter().enumerate() {
            jittered.push(self.jitter(p, offset, config));
            if i == rest.len() - 1 {
                jittered.push(self.jitter(p, offset, config));
            }
        }

        self.curve_points(&jittered, None, config);
    }

    #[inline]
    fn jitter(&mut self, p: Point, offset: f64, config: &SketchyConfig) -> Point {
        let x = p.x + self.offset_opt(offset, config);
        let y = p.y + self.offset_opt(offset, config);
        Point::new(x, y)
    }

    /// Catmull-Rom style spline through `points[1..len - 1]`.
    ///
    /// The first and last points only steer the end tangents. Three points
    /// draw a degenerate cubic, two points a rough line.
    fn curve_points(&mut self, points: &[Point], close: Option<Point>, config: &SketchyConfig) {
        let len = points.len();
        if len > 3 {
            let s = 1.0 - config.curve_tightness;
            self.sink.move_to(points[1].x, points[1].y);
            for i in 1..len - 2 {
                let (prev, cur, next, after) = (points[i - 1], points[i], points[i + 1], points[i + 2]);
                let b1 = Point::new(
                    cur.x + (s * next.x - s * prev.x) / 6.0,
                    cur.y + (s * next.y - s * prev.y) / 6.0,
                );
                let b2 = Point::new(
                    next.x + (s * cur.x - s * after.x) / 6.0,
                    next.y + (s * cur.y - s * after.y) / 6.0,
                );
                self.sink.bezier_curve_to(b1.x, b1.y, b2.x, b2.y, next.x, next.y);
            }
            if let Some(c) = close {
                let ro = config.max_randomness_offset;
                let x = c.x + self.offset_opt(ro, config);
                let y = c.y + self.offset_opt(ro, config);
                self.sink.line_to(x, y);
            }
        } else if len == 3 {
            self.sink.move_to(points[1].x, points[1].y);
            self.sink
                .bezier_curve_to(points[1].x, points[1].y, points[2].x, points[2].y, points[2].x, points[2].y);
        } else if len == 2 {
            self.double_line(points[0].x, points[0].y, points[1].x, points[1].y, config, false);
        }
    }

    // ========================================================================
    // ELLIPSES & ARCS
    // ========================================================================

    /// Draw an ellipse centered at `(x, y)`.
    pub fn ellipse(&mut self, x: f64, y: f64, width: f64, height: f64, config: &SketchyConfig) {
        let params = self.generate_ellipse_params(width, height, config);
        self.ellipse_with_params(x, y, &params, config);
    }

    /// Pick the sample count and the randomized radii for an ellipse.
    ///
    /// Bigger ellipses get more samples: `curve_step_count` is the minimum,
    /// scaled up with the square root of the perimeter estimate.
    pub fn generate_ellipse_params(&mut self, width: f64, height: f64, config: &SketchyConfig) -> EllipseParams {
        let psq = (TAU * (((width / 2.0).powi(2) + (height / 2.0).powi(2)) / 2.0).sqrt()).sqrt();
        let steps = config
            .curve_step_count
            .max(config.curve_step_count / 200f64.sqrt() * psq)
            .max(1.0);
        let increment = TAU / steps;

        let fit_randomness = 1.0 - config.curve_fitting;
        let mut rx = (width / 2.0).abs();
        let mut ry = (height / 2.0).abs();
        rx += self.offset_opt(rx * fit_randomness, config);
        ry += self.offset_opt(ry * fit_randomness, config);

        EllipseParams { increment, rx, ry }
    }

    /// Draw an ellipse with precomputed parameters.
    ///
    /// Returns the sample points of the first ring (without the overlap
    /// padding) so a fill can use the exact same outline.
    pub fn ellipse_with_params(&mut self, x: f64, y: f64, params: &EllipseParams, config: &SketchyConfig) -> Vec<Point> {
        let center = Point::new(x, y);

        let spread = self.offset(0.4, 1.0, config, 1.0);
        let overlap = params.increment * self.offset(0.1, spread, config, 1.0);
        let (ring, core) = self.ellipse_points(center, params, 1.0, overlap, config);
        self.curve_points(&ring, None, config);

        if !config.disable_multi_stroke {
            let (ring, _) = self.ellipse_points(center, params, 1.5, 0.0, config);
            self.curve_points(&ring, None, config);
        }

        core
    }

    /// Sample one jittered ring around an ellipse.
    ///
    /// Returns `(all, core)`: `core` is one point per step around the
    /// ellipse, `all` adds a lead-in point before and three overlap points
    /// after, so the spline through `all` passes through every core point
    /// and closes with a slight overshoot.
    fn ellipse_points(
        &mut self,
        center: Point,
        params: &EllipseParams,
        offset: f64,
        overlap: f64,
        config: &SketchyConfig,
    ) -> (Vec<Point>, Vec<Point>) {
        let EllipseParams { increment, rx, ry } = *params;
        let mut core = Vec::new();
        let mut all = Vec::new();

        let rad_offset = self.offset_opt(0.5, config) - PI / 2.0;

        all.push(self.ellipse_point(center, 0.9 * rx, 0.9 * ry, rad_offset - increment, offset, config));

        let end = TAU + rad_offset - 0.01;
        let mut angle = rad_offset;
        while angle < end {
            let p = self.ellipse_point(center, rx, ry, angle, offset, config);
            core.push(p);
            all.push(p);
            let next = angle + increment;
            if next <= angle {
                break;
            }
            angle = next;
        }

        all.push(self.ellipse_point(center, rx, ry, rad_offset + TAU + overlap * 0.5, offset, config));
        all.push(self.ellipse_point(center, 0.98 * rx, 0.98 * ry, rad_offset + overlap, offset, config));
        all.push(self.ellipse_point(center, 0.9 * rx, 0.9 * ry, rad_offset + overlap * 0.5, offset, config));

        (all, core)
    }

    #[inline]
    fn ellipse_point(&mut self, c: Point, rx: f64, ry: f64, angle: f64, offset: f64, config: &SketchyConfig) -> Point {
        let x = self.offset_opt(offset, config) + c.x + rx * angle.cos();
        let y = self.offset_opt(offset, config) + c.y + ry * angle.sin();
        Point::new(x, y)
    }

    /// Draw an elliptical arc from angle `start` to `stop` (radians).
    ///
    /// Angles are shifted into non-negative range and spans past a full
    /// turn are clamped to one. With `closed` the arc is closed through the
    /// center, with rough lines when `rough_closure` is set, plain
    /// `line_to`s otherwise.
    #[allow(clippy::too_many_arguments)]
    pub fn arc(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        start: f64,
        stop: f64,
        closed: bool,
        rough_closure: bool,
        config: &SketchyConfig,
    ) {
        let Some((start, stop)) = arc_range(start, stop) else {
            log::debug!("empty arc span, nothing to draw");
            return;
        };

        let mut rx = (width / 2.0).abs();
        let mut ry = (height / 2.0).abs();
        rx += self.offset_opt(rx * 0.01, config);
        ry += self.offset_opt(ry * 0.01, config);

        let ellipse_inc = TAU / config.curve_step_count.max(1.0);
        let arc_inc = (ellipse_inc / 2.0).min((stop - start) / 2.0).max(MIN_ARC_INCREMENT);
        let center = Point::new(x, y);
        let params = EllipseParams { increment: arc_inc, rx, ry };

        self.arc_ring(center, &params, start, stop, 1.0, config);
        if !config.disable_multi_stroke {
            self.arc_ring(center, &params, start, stop, 1.5, config);
        }

        if closed {
            let from = Point::new(x + rx * start.cos(), y + ry * start.sin());
            if rough_closure {
                let to = Point::new(x + rx * stop.cos(), y + ry * stop.sin());
                self.double_line(x, y, from.x, from.y, config, false);
                self.double_line(x, y, to.x, to.y, config, false);
            } else {
                self.sink.line_to(x, y);
                self.sink.line_to(from.x, from.y);
            }
        }
    }

    fn arc_ring(&mut self, center: Point, params: &EllipseParams, start: f64, stop: f64, offset: f64, config: &SketchyConfig) {
        let EllipseParams { increment, rx, ry } = *params;
        let rad_offset = start + self.offset_opt(0.1, config);

        let mut points = vec![self.ellipse_point(center, 0.9 * rx, 0.9 * ry, rad_offset - increment, offset, config)];
        let mut angle = rad_offset;
        while angle <= stop {
            points.push(self.ellipse_point(center, rx, ry, angle, offset, config));
            let next = angle + increment;
            if next <= angle {
                break;
            }
            angle = next;
        }

        let end = Point::new(center.x + rx * stop.cos(), center.y + ry * stop.sin());
        points.push(end);
        points.push(end);

        self.curve_points(&points, None, config);
    }

    // ========================================================================
    // PATHS
    // ========================================================================

    /// Draw SVG path data.
    ///
    /// Lines and the closing edge become rough lines, curves become one or
    /// two jittered cubics. Parse errors abort before anything is drawn.
    pub fn svg_path(&mut self, d: &str, config: &SketchyConfig) -> Result<()> {
        let segments = normalize(&absolutize(&parse_path(d)?));
        log::trace!("drawing path with {} segments", segments.len());

        let mut first = Point::default();
        let mut current = Point::default();

        for segment in &segments {
            let p = segment.params();
            match segment.command {
                Command::Move => {
                    let ro = config.max_randomness_offset;
                    let x = p[0] + self.offset_opt(ro, config);
                    let y = p[1] + self.offset_opt(ro, config);
                    self.sink.move_to(x, y);
                    current = Point::new(p[0], p[1]);
                    first = current;
                }
                Command::Line => {
                    self.double_line(current.x, current.y, p[0], p[1], config, false);
                    current = Point::new(p[0], p[1]);
                }
                Command::Cubic => {
                    let c1 = Point::new(p[0], p[1]);
                    let c2 = Point::new(p[2], p[3]);
                    let end = Point::new(p[4], p[5]);
                    self.bezier_to(c1, c2, end, current, config);
                    current = end;
                }
                Command::Close => {
                    self.double_line(current.x, current.y, first.x, first.y, config, false);
                    current = first;
                }
                // normalize() emits nothing else
                _ => {}
            }
        }

        Ok(())
    }

    /// Draw a cubic once or twice with jittered control and end points.
    ///
    /// The first pass starts exactly at `current`; the second starts from a
    /// jittered copy of it and uses a slightly larger offset.
    fn bezier_to(&mut self, c1: Point, c2: Point, end: Point, current: Point, config: &SketchyConfig) {
        let ros = [config.max_randomness_offset, config.max_randomness_offset + 0.3];
        let passes = if config.disable_multi_stroke { 1 } else { 2 };

        for (i, &ro) in ros.iter().enumerate().take(passes) {
            if i == 0 {
                self.sink.move_to(current.x, current.y);
            } else {
                let x = current.x + self.offset_opt(ros[0], config);
                let y = current.y + self.offset_opt(ros[0], config);
                self.sink.move_to(x, y);
            }
            let e = self.jitter(end, ro, config);
            let a = self.jitter(c1, ro, config);
            let b = self.jitter(c2, ro, config);
            self.sink.bezier_curve_to(a.x, a.y, b.x, b.y, e.x, e.y);
        }
    }

    // ========================================================================
    // FILLS
    // ========================================================================

    /// Outline a polygon for a solid fill: jittered vertices, straight edges.
    ///
    /// The sink is expected to fill the resulting outline itself.
    pub fn solid_fill_polygon(&mut self, points: &[Point], config: &SketchyConfig) {
        let [first, rest @ ..] = points else {
            return;
        };
        if rest.len() < 2 {
            log::debug!("solid fill needs 3 points, got {}", points.len());
            return;
        }

        let offset = config.max_randomness_offset;
        let p = self.jitter(*first, offset, config);
        self.sink.move_to(p.x, p.y);
        for &point in rest {
            let p = self.jitter(point, offset, config);
            self.sink.line_to(p.x, p.y);
        }
    }

    /// Hachure-fill a polygon.
    pub fn pattern_fill_polygon(&mut self, points: &[Point], config: &SketchyConfig) {
        HachureFiller::new(self).fill_polygon(points, config, false);
    }

    /// Hachure-fill a pie slice of an ellipse.
    #[allow(clippy::too_many_arguments)]
    pub fn pattern_fill_arc(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        start: f64,
        stop: f64,
        config: &SketchyConfig,
    ) {
        let Some((start, stop)) = arc_range(start, stop) else {
            log::debug!("empty arc span, nothing to fill");
            return;
        };

        let mut rx = (width / 2.0).abs();
        let mut ry = (height / 2.0).abs();
        rx += self.offset_opt(rx * 0.01, config);
        ry += self.offset_opt(ry * 0.01, config);

        let increment = ((stop - start) / config.curve_step_count.max(1.0)).max(MIN_ARC_INCREMENT);
        let mut points = Vec::new();
        let mut angle = start;
        while angle <= stop {
            points.push(Point::new(x + rx * angle.cos(), y + ry * angle.sin()));
            let next = angle + increment;
            if next <= angle {
                break;
            }
            angle = next;
        }
        points.push(Point::new(x + rx * stop.cos(), y + ry * stop.sin()));
        points.push(Point::new(x, y));

        self.pattern_fill_polygon(&points, config);
    }

    /// Hachure-fill the area of SVG path data.
    ///
    /// All subpaths are flattened and joined into one polygon.
    pub fn fill_path(&mut self, d: &str, config: &SketchyConfig) -> Result<()> {
        let sets = points_on_path(d, 1.0, (1.0 + config.roughness) / 2.0)?;
        let combined: Vec<Point> = sets.into_iter().flatten().collect();
        self.pattern_fill_polygon(&combined, config);
        Ok(())
    }
}

/// Normalize an arc's angle range.
///
/// Shifts `start` (and `stop` with it) by whole turns until it is
/// non-negative, and clamps spans beyond a full turn to `[0, 2π]`.
/// `None` when there is nothing to draw: an empty or reversed span, or
/// non-finite angles.
fn arc_range(start: f64, stop: f64) -> Option<(f64, f64)> {
    if !start.is_finite() || !stop.is_finite() {
        return None;
    }

    let (mut start, mut stop) = (start, stop);
    if start < 0.0 {
        let turns = (-start / TAU).ceil();
        start += turns * TAU;
        stop += turns * TAU;
        if start < 0.0 {
            start += TAU;
            stop += TAU;
        }
    }
    if stop - start > TAU {
        start = 0.0;
        stop = TAU;
    }

    (stop > start).then_some((start, stop))
}

// ============================================================================
// TESTS
// ============================================================================
