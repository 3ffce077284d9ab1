//! Synthetic digit confidences.
//!
//! A shape label picks a hand-written pattern of digit overrides on top of a
//! flat floor. The pattern is then perturbed with bounded uniform noise,
//! clamped and renormalized, and the arg-max becomes the predicted class.
//!
//! Every pattern in the table sets at least one digit to 0.2 or more, so as
//! long as the noise amplitude stays below 0.2 the clamped vector never sums
//! to zero. [`ConfidenceSynthesizer::new`] enforces that bound.

use crate::config::MAX_NOISE_AMPLITUDE;
use crate::error::ConfigError;
use crate::geometry::{
    bounding_box, center_density, has_loop, quadrant_occupancy, stroke_count, QuadrantOccupancy,
};
use crate::random::RandomSource;
use crate::types::{ConfidenceVector, Point, PredictionResult, ShapeLabel};

/// Confidence of a digit the rules say nothing about.
pub const FLOOR_CONFIDENCE: f64 = 0.05;

/// Default half-width of the noise added to every entry.
pub const DEFAULT_NOISE_AMPLITUDE: f64 = 0.075;

/// Override used when the label carries no usable information.
pub const FALLBACK_CONFIDENCE: f64 = 0.3;

const QUADRANT_BONUS: f64 = 0.2;
const CENTER_DENSITY_SPLIT: f64 = 0.3;

type DigitPattern = &'static [(usize, f64)];

/// Fixed overrides for labels that map directly to a pattern.
fn label_pattern(label: ShapeLabel) -> Option<DigitPattern> {
    match label {
        ShapeLabel::VerticalLine => Some(&[(1, 0.9), (7, 0.2)]),
        ShapeLabel::HorizontalLine => Some(&[(7, 0.5), (0, 0.1), (4, 0.1)]),
        ShapeLabel::Dot => Some(&[(1, 0.6)]),
        ShapeLabel::Cross => Some(&[(8, 0.6), (4, 0.5), (7, 0.2)]),
        ShapeLabel::Circle => Some(&[(0, 0.85), (6, 0.4), (8, 0.3), (9, 0.3)]),
        ShapeLabel::Zigzag => Some(&[(2, 0.5), (3, 0.4), (7, 0.6), (5, 0.3)]),
        ShapeLabel::Curved => Some(&[(2, 0.5), (3, 0.6), (5, 0.5), (8, 0.4), (9, 0.4)]),
        _ => None,
    }
}

/// Inputs to the `complex` sub-decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexTraits {
    pub has_loop: bool,
    pub center_density: f64,
    pub stroke_count: usize,
    pub quadrants: QuadrantOccupancy,
}

impl ComplexTraits {
    pub fn measure(points: &[Point]) -> Self {
        let (cx, cy) = bounding_box(points)
            .map(|b| b.center())
            .unwrap_or((0.0, 0.0));
        Self {
            has_loop: has_loop(points),
            center_density: center_density(points),
            stroke_count: stroke_count(points),
            quadrants: quadrant_occupancy(points, cx, cy),
        }
    }
}

type ComplexPredicate = fn(&ComplexTraits) -> bool;

/// Sub-patterns for `complex` drawings, first match wins. A density of
/// exactly 0.3 with a loop falls through to the angular/curved rows.
const COMPLEX_RULES: &[(ComplexPredicate, DigitPattern)] = &[
    // open loops: 6, 9
    (
        |t| t.has_loop && t.center_density < CENTER_DENSITY_SPLIT,
        &[(6, 0.7), (9, 0.7), (8, 0.4)],
    ),
    // closed loops: 8, 0
    (
        |t| t.has_loop && t.center_density > CENTER_DENSITY_SPLIT,
        &[(8, 0.7), (0, 0.6)],
    ),
    // angular: 4, 7
    (
        |t| t.stroke_count >= 2 && !t.has_loop,
        &[(4, 0.7), (7, 0.6), (2, 0.4)],
    ),
    // curved with straight parts: 2, 3, 5
    (|_| true, &[(2, 0.5), (3, 0.6), (5, 0.6)]),
];

/// Quadrant layouts (TL, TR, BL, BR) that nudge one digit upward.
const QUADRANT_NUDGES: &[((bool, bool, bool, bool), usize)] = &[
    ((true, true, false, true), 2),
    ((true, true, true, false), 5),
    ((false, true, true, true), 3),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceSynthesizer {
    noise_amplitude: f64,
}

impl Default for ConfidenceSynthesizer {
    fn default() -> Self {
        Self {
            noise_amplitude: DEFAULT_NOISE_AMPLITUDE,
        }
    }
}

impl ConfidenceSynthesizer {
    /// Fails unless `noise_amplitude` lies in `[0, MAX_NOISE_AMPLITUDE)`.
    pub fn new(noise_amplitude: f64) -> Result<Self, ConfigError> {
        if !(0.0..MAX_NOISE_AMPLITUDE).contains(&noise_amplitude) {
            return Err(ConfigError::NoiseAmplitude(noise_amplitude));
        }
        Ok(Self { noise_amplitude })
    }

    pub fn noise_amplitude(&self) -> f64 {
        self.noise_amplitude
    }

    /// Pre-noise confidences for `label`. `ellipse`, `unknown` and `none`
    /// draw one random digit to raise to the fallback value.
    pub fn rule_vector(
        &self,
        label: ShapeLabel,
        points: &[Point],
        rng: &mut impl RandomSource,
    ) -> ConfidenceVector {
        let mut conf = ConfidenceVector::filled(FLOOR_CONFIDENCE);

        if label == ShapeLabel::Complex {
            apply_complex(&mut conf, &ComplexTraits::measure(points));
        } else if let Some(pattern) = label_pattern(label) {
            apply_pattern(&mut conf, pattern);
        } else {
            conf.0[rng.next_digit()] = FALLBACK_CONFIDENCE;
        }
        conf
    }

    pub fn synthesize(
        &self,
        label: ShapeLabel,
        points: &[Point],
        rng: &mut impl RandomSource,
    ) -> PredictionResult {
        if label == ShapeLabel::None {
            return PredictionResult {
                predicted_class: rng.next_digit(),
                confidences: ConfidenceVector::filled(FLOOR_CONFIDENCE),
            };
        }

        let conf = self.rule_vector(label, points, rng);
        self.finalize(conf, rng)
    }

    /// Adds noise, clamps to `[0, 1]`, normalizes and picks the arg-max.
    pub fn finalize(
        &self,
        conf: ConfidenceVector,
        rng: &mut impl RandomSource,
    ) -> PredictionResult {
        let mut noisy = conf;
        for c in noisy.0.iter_mut() {
            *c = (*c + rng.next_noise(self.noise_amplitude)).clamp(0.0, 1.0);
        }

        let sum = noisy.sum();
        for c in noisy.0.iter_mut() {
            *c /= sum;
        }

        PredictionResult {
            predicted_class: noisy.argmax(),
            confidences: noisy,
        }
    }
}

fn apply_pattern(conf: &mut ConfidenceVector, pattern: &[(usize, f64)]) {
    for &(digit, value) in pattern {
        conf.0[digit] = value;
    }
}

fn apply_complex(conf: &mut ConfidenceVector, traits: &ComplexTraits) {
    if let Some((_, pattern)) = COMPLEX_RULES.iter().find(|(matches, _)| matches(traits)) {
        apply_pattern(conf, pattern);
    }

    let q = traits.quadrants;
    let layout = (q.top_left, q.top_right, q.bottom_left, q.bottom_right);
    for &(expected, digit) in QUADRANT_NUDGES {
        if layout == expected {
            conf.0[digit] += QUADRANT_BONUS;
        }
    }
}
