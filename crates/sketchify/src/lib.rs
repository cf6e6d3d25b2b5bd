//! # sketchify
//!
//! Hand-drawn rendering of vector geometry: rough strokes, wobbly ellipses
//! and hachure fills, driven from SVG path data.
//!
//! ## Rust Lesson #7: Modules
//!
//! Rust modules are like ES6 modules but more explicit:
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level
//!
//! Unlike Node.js, you must explicitly declare every module.
//!
//! ## Layout
//!
//! - [`path`]: path data tokenizer, parser, absolutizer and normalizer
//! - [`curve`] / [`points`]: bezier flattening and polyline simplification
//! - [`hatch`] / [`clip`] / [`fill`]: scan-line hachure fills
//! - [`sketchy`]: the [`Renderer`] that turns shapes into rough strokes
//! - [`sink`]: where the strokes go ([`PathData`], `Vec<Op>`, your own)

pub mod clip;
pub mod config;
pub mod curve;
pub mod error;
pub mod fill;
pub mod geometry;
pub mod hatch;
pub mod path;
pub mod points;
pub mod rng;
pub mod sink;
pub mod sketchy;

// Re-export common types at crate root for convenience.
pub use config::SketchyConfig;
pub use error::ParseError;
pub use fill::HachureFiller;
pub use geometry::{Line, Point, Rectangle};
pub use path::parse_path;
pub use points::points_on_path;
pub use rng::{Random, Rng};
pub use sink::{DrawSink, Op, PathData};
pub use sketchy::{EllipseParams, Renderer};
