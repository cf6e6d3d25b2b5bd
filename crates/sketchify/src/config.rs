//! Rendering options.
//!
//! One [`SketchyConfig`] value describes how rough a drawing is. It is plain
//! data: every call takes it by reference and nothing in it changes while
//! drawing.
//!
//! ## Rust Lesson #27: Serde Defaults
//!
//! `#[serde(default)]` on the struct makes every missing field fall back
//! to `Default::default()`. A JSON document only needs the fields it wants
//! to change:
//!
//! ```
//! use sketchify::SketchyConfig;
//!
//! let config: SketchyConfig = serde_json::from_str(r#"{ "roughness": 2.5 }"#).unwrap();
//! assert_eq!(config.roughness, 2.5);
//! assert_eq!(config.bowing, SketchyConfig::default().bowing);
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for the hand-drawn renderer.
///
/// Based on RoughJS options: randomized endpoints, bowing, multi-stroke,
/// curve fitting and hachure fill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchyConfig {
    /// Upper bound for endpoint jitter (in pixels)
    pub max_randomness_offset: f64,
    /// Scales every random offset (0.0 = precise, 1.0+ = rough)
    pub roughness: f64,
    /// How far lines bend away from straight
    pub bowing: f64,
    /// Draw outlines with a single stroke instead of two
    pub disable_multi_stroke: bool,
    /// Draw fill lines with a single stroke instead of two
    pub disable_multi_stroke_fill: bool,
    /// Spline tightness for curves (0.0 = Catmull-Rom, 1.0 = straight)
    pub curve_tightness: f64,
    /// How closely ellipses keep their radii (1.0 = exact)
    pub curve_fitting: f64,
    /// Base number of samples around an ellipse
    pub curve_step_count: f64,
    /// Hachure line direction (degrees)
    pub hachure_angle: f64,
    /// Distance between hachure lines; negative means `4 * stroke_width`
    pub hachure_gap: f64,
    /// Nominal stroke width, only used to derive a default hachure gap
    pub stroke_width: f64,
    /// Seed for reproducible randomness (None = random each time)
    pub seed: Option<u64>,
}

impl Default for SketchyConfig {
    fn default() -> Self {
        Self {
            max_randomness_offset: 2.0,
            roughness: 1.0,
            bowing: 1.5,
            disable_multi_stroke: false,
            disable_multi_stroke_fill: false,
            curve_tightness: 0.0,
            curve_fitting: 0.95,
            curve_step_count: 9.0,
            hachure_angle: -41.0,
            hachure_gap: 3.0,
            stroke_width: 0.5,
            seed: None,
        }
    }
}

impl SketchyConfig {
    /// Create a new config with specified maximum randomness offset.
    pub fn with_max_randomness_offset(mut self, offset: f64) -> Self {
        self.max_randomness_offset = offset;
        self
    }

    /// Create a new config with specified roughness.
    pub fn with_roughness(mut self, roughness: f64) -> Self {
        self.roughness = roughness;
        self
    }

    /// Create a new config with specified bowing.
    pub fn with_bowing(mut self, bowing: f64) -> Self {
        self.bowing = bowing;
        self
    }

    /// Create a new config with outline multi-stroke enabled/disabled.
    pub fn with_multi_stroke(mut self, enabled: bool) -> Self {
        self.disable_multi_stroke = !enabled;
        self
    }

    /// Create a new config with fill multi-stroke enabled/disabled.
    pub fn with_multi_stroke_fill(mut self, enabled: bool) -> Self {
        self.disable_multi_stroke_fill = !enabled;
        self
    }

    pub fn with_curve_tightness(mut self, tightness: f64) -> Self {
        self.curve_tightness = tightness;
        self
    }

    pub fn with_curve_fitting(mut self, fitting: f64) -> Self {
        self.curve_fitting = fitting;
        self
    }

    pub fn with_curve_step_count(mut self, steps: f64) -> Self {
        self.curve_step_count = steps;
        self
    }

    /// Create a new config with specified hachure angle (degrees).
    pub fn with_hachure_angle(mut self, degrees: f64) -> Self {
        self.hachure_angle = degrees;
        self
    }

    /// Create a new config with specified hachure gap.
    pub fn with_hachure_gap(mut self, gap: f64) -> Self {
        self.hachure_gap = gap;
        self
    }

    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    /// Create a new config with a specific seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Copy of this config with the seed moved one step forward.
    ///
    /// Used for the second stroke of spline curves so the two passes
    /// aren't drawn from the same seed. An unseeded config stays unseeded.
    pub fn with_advanced_seed(&self) -> Self {
        Self {
            seed: self.seed.map(|s| s.wrapping_add(1)),
            ..self.clone()
        }
    }
}
