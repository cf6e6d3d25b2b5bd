//! Rewrite relative path commands as absolute ones.

use super::{Command, Segment};

/// Convert every relative segment into its absolute equivalent.
///
/// Tracks the current point and the start of the current subpath (reset on
/// every move, restored on close). Command kinds are preserved; only
/// coordinates change.
pub fn absolutize(segments: &[Segment]) -> Vec<Segment> {
    let (mut cx, mut cy) = (0.0, 0.0);
    let (mut subx, mut suby) = (0.0, 0.0);
    let mut out = Vec::with_capacity(segments.len());

    for segment in segments {
        let p = segment.params();
        let (dx, dy) = if segment.relative { (cx, cy) } else { (0.0, 0.0) };

        let absolute = match segment.command {
            Command::Move => {
                cx = p[0] + dx;
                cy = p[1] + dy;
                subx = cx;
                suby = cy;
                Segment::absolute(Command::Move, [cx, cy])
            }
            Command::Line => {
                cx = p[0] + dx;
                cy = p[1] + dy;
                Segment::absolute(Command::Line, [cx, cy])
            }
            Command::SmoothQuadratic => {
                cx = p[0] + dx;
                cy = p[1] + dy;
                Segment::absolute(Command::SmoothQuadratic, [cx, cy])
            }
            Command::Horizontal => {
                cx = p[0] + dx;
                Segment::absolute(Command::Horizontal, [cx])
            }
            Command::Vertical => {
                cy = p[0] + dy;
                Segment::absolute(Command::Vertical, [cy])
            }
            Command::Cubic => {
                let params = [
                    p[0] + dx, p[1] + dy,
                    p[2] + dx, p[3] + dy,
                    p[4] + dx, p[5] + dy,
                ];
                cx = params[4];
                cy = params[5];
                Segment::absolute(Command::Cubic, params)
            }
            Command::SmoothCubic | Command::Quadratic => {
                let params = [p[0] + dx, p[1] + dy, p[2] + dx, p[3] + dy];
                cx = params[2];
                cy = params[3];
                Segment::absolute(segment.command, params)
            }
            Command::Arc => {
                // Radii, rotation and flags are not positions
                cx = p[5] + dx;
                cy = p[6] + dy;
                Segment::absolute(Command::Arc, [p[0], p[1], p[2], p[3], p[4], cx, cy])
            }
            Command::Close => {
                cx = subx;
                cy = suby;
                Segment::close()
            }
        };

        out.push(absolute);
    }

    out
}
