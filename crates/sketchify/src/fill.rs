//! Hachure fill: hachure lines drawn with the renderer's fill stroke.

use crate::clip::connecting_lines;
use crate::config::SketchyConfig;
use crate::geometry::{Line, Point};
use crate::hatch::polygon_hachure_lines;
use crate::rng::Random;
use crate::sink::DrawSink;
use crate::sketchy::Renderer;

/// Fills polygons with sketchy hachure lines.
///
/// Borrows the renderer for the duration of one fill, so the strokes go to
/// the same sink and draw from the same random sequence as the outline.
pub struct HachureFiller<'a, S: DrawSink, R: Random> {
    renderer: &'a mut Renderer<S, R>,
}

impl<'a, S: DrawSink, R: Random> HachureFiller<'a, S, R> {
    pub fn new(renderer: &'a mut Renderer<S, R>) -> Self {
        Self { renderer }
    }

    /// Hachure-fill `points`.
    ///
    /// With `connect_ends` the hachure lines are also joined end to start
    /// by connectors clipped to the polygon, for a zig-zag look.
    pub fn fill_polygon(&mut self, points: &[Point], config: &SketchyConfig, connect_ends: bool) {
        let mut lines = polygon_hachure_lines(points, config);
        if connect_ends {
            let connectors = connecting_lines(points, &lines);
            lines.extend(connectors);
        }
        self.render_lines(&lines, config);
    }

    fn render_lines(&mut self, lines: &[Line], config: &SketchyConfig) {
        for line in lines {
            self.renderer
                .double_line_fill_ops(line.x1, line.y1, line.x2, line.y2, config);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Rng;
    use crate::sink::Op;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ]
    }

    fn fill(config: &SketchyConfig, connect_ends: bool) -> Vec<Op> {
        let mut renderer = Renderer::new(Vec::new(), Rng::new(5));
        HachureFiller::new(&mut renderer).fill_polygon(&square(), config, connect_ends);
        renderer.into_sink()
    }

    #[test]
    fn each_hachure_line_is_a_double_stroke() {
        let config = SketchyConfig::default().with_hachure_angle(-90.0).with_hachure_gap(10.0);
        let ops = fill(&config, false);
        // 10 lines, 2 passes each, move + bezier per pass
        assert_eq!(ops.len(), 10 * 2 * 2);
    }

    #[test]
    fn single_stroke_fill() {
        let config = SketchyConfig::default()
            .with_hachure_angle(-90.0)
            .with_hachure_gap(10.0)
            .with_multi_stroke_fill(false);
        assert_eq!(fill(&config, false).len(), 10 * 2);
    }

    #[test]
    fn connectors_add_strokes() {
        let config = SketchyConfig::default().with_hachure_angle(-90.0).with_hachure_gap(10.0);
        let plain = fill(&config, false);
        let connected = fill(&config, true);
        assert!(connected.len() > plain.len());
    }

    #[test]
    fn degenerate_polygon_draws_nothing() {
        let mut renderer = Renderer::new(Vec::<Op>::new(), Rng::new(5));
        HachureFiller::new(&mut renderer).fill_polygon(&[], &SketchyConfig::default(), true);
        assert!(renderer.into_sink().is_empty());
    }
}
