//! Property tests for the geometry pipeline.

use proptest::prelude::*;
use sketchify::clip::point_in_polygon;
use sketchify::curve::simplify;
use sketchify::hatch::polygon_hachure_lines;
use sketchify::path::{Command, absolutize, normalize};
use sketchify::{Op, Point, Renderer, Rng, SketchyConfig, parse_path};

const LETTERS: [char; 10] = ['M', 'L', 'H', 'V', 'C', 'S', 'Q', 'T', 'A', 'Z'];

/// Random path data: a leading move, then arbitrary commands.
fn path_data() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (0usize..LETTERS.len(), any::<bool>(), prop::array::uniform7(-100.0f64..100.0)),
        1..12,
    )
    .prop_map(|commands| {
        let mut d = String::from("M 0 0");
        for (index, relative, params) in commands {
            let upper = LETTERS[index];
            let letter = if relative { upper.to_ascii_lowercase() } else { upper };
            d.push(' ');
            d.push(letter);
            let values: Vec<f64> = match upper {
                'M' | 'L' | 'T' => params[..2].to_vec(),
                'H' | 'V' => params[..1].to_vec(),
                'C' => params[..6].to_vec(),
                'S' | 'Q' => params[..4].to_vec(),
                'A' => vec![
                    params[0],
                    params[1],
                    params[2],
                    if params[3] > 0.0 { 1.0 } else { 0.0 },
                    if params[4] > 0.0 { 1.0 } else { 0.0 },
                    params[5],
                    params[6],
                ],
                _ => Vec::new(),
            };
            for v in values {
                d.push_str(&format!(" {}", v));
            }
        }
        d
    })
}

fn point() -> impl Strategy<Value = Point> {
    (-500.0f64..500.0, -500.0f64..500.0).prop_map(|(x, y)| Point::new(x, y))
}

proptest! {
    #[test]
    fn normalized_paths_use_four_absolute_commands(d in path_data()) {
        let segments = normalize(&absolutize(&parse_path(&d).unwrap()));
        prop_assert!(!segments.is_empty());
        for segment in &segments {
            prop_assert!(!segment.relative);
            prop_assert!(matches!(
                segment.command,
                Command::Move | Command::Line | Command::Cubic | Command::Close
            ), "{} in {:?}", segment, d);
            prop_assert!(segment.params().iter().all(|v| v.is_finite()), "{} in {:?}", segment, d);
        }
    }

    #[test]
    fn simplify_keeps_endpoints(points in prop::collection::vec(point(), 3..60), epsilon in 0.1f64..50.0) {
        let simple = simplify(&points, epsilon);
        prop_assert!(simple.len() >= 2);
        prop_assert!(simple.len() <= points.len());
        prop_assert_eq!(simple.first(), points.first());
        prop_assert_eq!(simple.last(), points.last());
    }

    #[test]
    fn hachure_stays_inside_rectangle(
        w in 5.0f64..200.0,
        h in 5.0f64..200.0,
        angle in -90.0f64..90.0,
        gap in 1.0f64..20.0,
    ) {
        let rect = [Point::new(0.0, 0.0), Point::new(w, 0.0), Point::new(w, h), Point::new(0.0, h)];
        let config = SketchyConfig::default().with_hachure_angle(angle).with_hachure_gap(gap);
        // x is rounded in the rotated frame, so allow half a unit plus slack
        for line in polygon_hachure_lines(&rect, &config) {
            for p in [line.start(), line.end()] {
                prop_assert!(p.x >= -1.0 && p.x <= w + 1.0, "{:?}", p);
                prop_assert!(p.y >= -1.0 && p.y <= h + 1.0, "{:?}", p);
            }
        }
    }

    #[test]
    fn point_in_square_matches_bounds(x in -50.0f64..150.0, y in -50.0f64..150.0) {
        let near_edge = |v: f64| v.abs() < 1e-6 || (v - 100.0).abs() < 1e-6;
        prop_assume!(!near_edge(x) && !near_edge(y));

        let square = [Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(100.0, 100.0), Point::new(0.0, 100.0)];
        let inside = x > 0.0 && x < 100.0 && y > 0.0 && y < 100.0;
        prop_assert_eq!(point_in_polygon(&square, x, y), inside);
    }

    #[test]
    fn rough_lines_stay_finite(seed in any::<u64>(), a in point(), b in point()) {
        let config = SketchyConfig::default();
        let mut renderer = Renderer::new(Vec::<Op>::new(), Rng::new(seed));
        renderer.line(a.x, a.y, b.x, b.y, &config);
        let ops = renderer.into_sink();
        prop_assert_eq!(ops.len(), 4);
        for op in ops {
            let finite = match op {
                Op::Move { x, y } | Op::Line { x, y } => x.is_finite() && y.is_finite(),
                Op::Bezier { x1, y1, x2, y2, x, y } => [x1, y1, x2, y2, x, y].iter().all(|v| v.is_finite()),
            };
            prop_assert!(finite);
        }
    }
}
