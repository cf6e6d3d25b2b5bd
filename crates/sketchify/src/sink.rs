//! Drawing sinks: where the renderer's pen moves go.
//!
//! The renderer never builds geometry itself. It issues `move_to`,
//! `line_to` and `bezier_curve_to` calls against a [`DrawSink`], and the
//! sink decides what to do with them: record them, write SVG path data,
//! or forward them to a canvas.

/// Receiver of pen operations.
///
/// ## Rust Lesson #28: Traits Instead of Base Classes
///
/// Where an OOP renderer would take a `Graphics&` with virtual methods,
/// Rust takes "anything implementing `DrawSink`". The renderer is generic
/// over it, so calls are statically dispatched, and `&mut T` forwarding
/// (below) lets callers lend a sink instead of giving it away.
pub trait DrawSink {
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn bezier_curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64);
}

impl<T: DrawSink + ?Sized> DrawSink for &mut T {
    #[inline]
    fn move_to(&mut self, x: f64, y: f64) {
        (**self).move_to(x, y);
    }

    #[inline]
    fn line_to(&mut self, x: f64, y: f64) {
        (**self).line_to(x, y);
    }

    #[inline]
    fn bezier_curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
        (**self).bezier_curve_to(x1, y1, x2, y2, x, y);
    }
}

// ============================================================================
// OP RECORDER
// ============================================================================

/// One recorded pen operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    Move { x: f64, y: f64 },
    Line { x: f64, y: f64 },
    Bezier { x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64 },
}

impl DrawSink for Vec<Op> {
    fn move_to(&mut self, x: f64, y: f64) {
        self.push(Op::Move { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.push(Op::Line { x, y });
    }

    fn bezier_curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
        self.push(Op::Bezier { x1, y1, x2, y2, x, y });
    }
}

// ============================================================================
// SVG PATH DATA
// ============================================================================

/// Builds an SVG path `d` attribute from pen operations.
///
/// Coordinates are written with three decimals, e.g.
/// `M 1.000 2.000 C 3.000 4.000 5.000 6.000 7.000 8.000`.
///
/// # Example
/// ```
/// use sketchify::sink::{DrawSink, PathData};
///
/// let mut path = PathData::new();
/// path.move_to(0.0, 0.0);
/// path.line_to(10.0, 5.5);
/// assert_eq!(path.as_str(), "M 0.000 0.000 L 10.000 5.500");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathData {
    d: String,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    /// The path data written so far.
    pub fn as_str(&self) -> &str {
        &self.d
    }

    pub fn is_empty(&self) -> bool {
        self.d.is_empty()
    }

    /// Hand out the path data and start over with an empty one.
    ///
    /// Lets one renderer draw several shapes, one `<path>` each.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.d)
    }

    fn command(&mut self, letter: char, coords: &[f64]) {
        if !self.d.is_empty() {
            self.d.push(' ');
        }
        self.d.push(letter);
        for c in coords {
            self.d.push_str(&format!(" {:.3}", c));
        }
    }
}

impl DrawSink for PathData {
    fn move_to(&mut self, x: f64, y: f64) {
        self.command('M', &[x, y]);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.command('L', &[x, y]);
    }

    fn bezier_curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
        self.command('C', &[x1, y1, x2, y2, x, y]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_triangle(sink: &mut impl DrawSink) {
        sink.move_to(0.0, 0.0);
        sink.line_to(10.0, 0.0);
        sink.bezier_curve_to(10.0, 5.0, 5.0, 10.0, 0.0, 0.0);
    }

    #[test]
    fn vec_records_ops_in_order() {
        let mut ops: Vec<Op> = Vec::new();
        draw_triangle(&mut ops);
        assert_eq!(
            ops,
            vec![
                Op::Move { x: 0.0, y: 0.0 },
                Op::Line { x: 10.0, y: 0.0 },
                Op::Bezier { x1: 10.0, y1: 5.0, x2: 5.0, y2: 10.0, x: 0.0, y: 0.0 },
            ]
        );
    }

    #[test]
    fn path_data_formatting() {
        let mut path = PathData::new();
        draw_triangle(&mut path);
        assert_eq!(
            path.as_str(),
            "M 0.000 0.000 L 10.000 0.000 C 10.000 5.000 5.000 10.000 0.000 0.000"
        );
    }

    #[test]
    fn take_drains_the_buffer() {
        let mut path = PathData::new();
        path.move_to(1.0, 1.0);
        assert_eq!(path.take(), "M 1.000 1.000");
        assert!(path.is_empty());

        path.move_to(2.0, 2.0);
        assert_eq!(path.as_str(), "M 2.000 2.000");
    }

    #[test]
    fn mutable_reference_forwards() {
        let mut ops: Vec<Op> = Vec::new();
        {
            let mut borrowed = &mut ops;
            draw_triangle(&mut borrowed);
        }
        assert_eq!(ops.len(), 3);
    }
}
