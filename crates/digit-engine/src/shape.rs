//! Shape classification: one [`ShapeLabel`] per stroke sequence.
//!
//! Rules are checked top to bottom and the first hit wins. Several rules
//! overlap (a short closed square stroke is both a `dot` and a `circle`), so
//! the order of [`SHAPE_RULES`] is load-bearing.

use crate::geometry::{
    bounding_box, center_of_mass, closure_distance, stroke_count, CLOSURE_THRESHOLD,
};
use crate::types::{Point, ShapeLabel};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const ZIGZAG_MIN_POINTS: usize = 20;
const ZIGZAG_MIN_STEP: f64 = 5.0;
const ZIGZAG_MIN_REVERSALS: usize = 2;

const ARC_MIN_POINTS: usize = 15;
const ARC_MIN_TURNING: f64 = PI * 1.5;

const COMPLEX_MIN_POINTS: usize = 100;
const COMPLEX_MIN_EXTENT: f64 = 50.0;
const DOT_MAX_EXTENT: f64 = 40.0;

/// How turn angles are accumulated by the arc test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArcMeasure {
    /// Sum `|angle2 - angle1|` as is. A heading crossing ±π counts as a
    /// turn of nearly 2π.
    #[default]
    Raw,
    /// Fold each difference into `[0, π]` before summing.
    Wrapped,
}

impl ArcMeasure {
    fn turn(self, from: f64, to: f64) -> f64 {
        let diff = (to - from).abs();
        match self {
            ArcMeasure::Raw => diff,
            ArcMeasure::Wrapped if diff > PI => 2.0 * PI - diff,
            ArcMeasure::Wrapped => diff,
        }
    }
}

/// Features of a non-empty stroke sequence.
#[derive(Debug, Clone)]
pub struct StrokeFeatures<'a> {
    pub points: &'a [Point],
    pub width: f64,
    pub height: f64,
    /// `None` when all points coincide.
    pub aspect_ratio: Option<f64>,
    pub stroke_count: usize,
    pub closure_distance: f64,
    pub is_closed: bool,
    pub center_of_mass: (f64, f64),
    arc_measure: ArcMeasure,
}

impl<'a> StrokeFeatures<'a> {
    pub fn extract(points: &'a [Point], arc_measure: ArcMeasure) -> Option<Self> {
        let bbox = bounding_box(points)?;
        let closure = closure_distance(points)?;
        let center_of_mass = center_of_mass(points)?;

        Some(Self {
            points,
            width: bbox.width(),
            height: bbox.height(),
            aspect_ratio: bbox.aspect_ratio(),
            stroke_count: stroke_count(points),
            closure_distance: closure,
            is_closed: closure < CLOSURE_THRESHOLD,
            center_of_mass,
            arc_measure,
        })
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    fn ratio_above(&self, bound: f64) -> bool {
        self.aspect_ratio.is_some_and(|r| r > bound)
    }

    fn ratio_below(&self, bound: f64) -> bool {
        self.aspect_ratio.is_some_and(|r| r < bound)
    }

    fn near_square(&self) -> bool {
        self.aspect_ratio.is_some_and(|r| (r - 1.0).abs() < 0.3)
    }

    /// Counts sharp reversals of horizontal direction.
    pub fn x_reversals(&self) -> usize {
        let xs: Vec<f64> = self.points.iter().map(|p| p.x).collect();
        let mut reversals = 0;
        for i in 2..xs.len() {
            let dx1 = xs[i - 1] - xs[i - 2];
            let dx2 = xs[i] - xs[i - 1];
            if dx1 * dx2 < 0.0 && dx1.abs() > ZIGZAG_MIN_STEP && dx2.abs() > ZIGZAG_MIN_STEP {
                reversals += 1;
            }
        }
        reversals
    }

    pub fn is_zigzag(&self) -> bool {
        self.point_count() >= ZIGZAG_MIN_POINTS && self.x_reversals() >= ZIGZAG_MIN_REVERSALS
    }

    /// Accumulated heading change over triples that lie entirely inside a
    /// stroke. Triples touching a pen-down are skipped.
    pub fn total_turning(&self) -> f64 {
        let mut total = 0.0;
        for w in self.points.windows(3) {
            let (p1, p2, p3) = (&w[0], &w[1], &w[2]);
            if p1.dragging && p2.dragging && p3.dragging {
                let angle1 = (p2.y - p1.y).atan2(p2.x - p1.x);
                let angle2 = (p3.y - p2.y).atan2(p3.x - p2.x);
                total += self.arc_measure.turn(angle1, angle2);
            }
        }
        total
    }

    pub fn has_arcs(&self) -> bool {
        self.point_count() >= ARC_MIN_POINTS && self.total_turning() > ARC_MIN_TURNING
    }
}

pub type ShapePredicate = fn(&StrokeFeatures) -> bool;

/// Ordered decision list. `unknown` is the fallthrough.
pub const SHAPE_RULES: &[(ShapeLabel, ShapePredicate)] = &[
    (ShapeLabel::HorizontalLine, |f| f.stroke_count == 1 && f.ratio_above(3.0)),
    (ShapeLabel::VerticalLine, |f| f.stroke_count == 1 && f.ratio_below(0.3)),
    (ShapeLabel::Dot, |f| {
        f.stroke_count == 1 && f.width < DOT_MAX_EXTENT && f.height < DOT_MAX_EXTENT
    }),
    (ShapeLabel::Cross, |f| f.stroke_count == 2 && f.near_square()),
    (ShapeLabel::Circle, |f| f.is_closed && f.near_square()),
    (ShapeLabel::Ellipse, |f| f.is_closed && f.ratio_above(1.5)),
    (ShapeLabel::Complex, |f| {
        f.point_count() > COMPLEX_MIN_POINTS
            && f.width > COMPLEX_MIN_EXTENT
            && f.height > COMPLEX_MIN_EXTENT
    }),
    (ShapeLabel::Zigzag, |f| f.is_zigzag()),
    (ShapeLabel::Curved, |f| f.has_arcs()),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeClassifier {
    arc_measure: ArcMeasure,
}

impl ShapeClassifier {
    pub fn new(arc_measure: ArcMeasure) -> Self {
        Self { arc_measure }
    }

    pub fn classify(&self, points: &[Point]) -> ShapeLabel {
        let Some(features) = StrokeFeatures::extract(points, self.arc_measure) else {
            return ShapeLabel::None;
        };

        let label = SHAPE_RULES
            .iter()
            .find(|(_, matches)| matches(&features))
            .map(|(label, _)| *label)
            .unwrap_or(ShapeLabel::Unknown);

        tracing::debug!(
            %label,
            points = features.point_count(),
            strokes = features.stroke_count,
            width = features.width,
            height = features.height,
            "classified stroke sequence"
        );
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke(coords: &[(f64, f64)]) -> Vec<Point> {
        coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| {
                if i == 0 {
                    Point::start(x, y)
                } else {
                    Point::drag(x, y)
                }
            })
            .collect()
    }

    fn line(from: (f64, f64), to: (f64, f64), n: usize) -> Vec<(f64, f64)> {
        (0..n)
            .map(|i| {
                let t = i as f64 / (n - 1) as f64;
                (from.0 + t * (to.0 - from.0), from.1 + t * (to.1 - from.1))
            })
            .collect()
    }

    fn ring(cx: f64, cy: f64, rx: f64, ry: f64, n: usize) -> Vec<(f64, f64)> {
        (0..n)
            .map(|i| {
                let a = 2.0 * PI * i as f64 / n as f64;
                (cx + rx * a.cos(), cy + ry * a.sin())
            })
            .collect()
    }

    fn classify(points: &[Point]) -> ShapeLabel {
        ShapeClassifier::default().classify(points)
    }

    #[test]
    fn test_empty_is_none() {
        assert_eq!(classify(&[]), ShapeLabel::None);
    }

    #[test]
    fn test_lines_and_dot() {
        let horizontal = stroke(&line((0.0, 75.0), (100.0, 75.0), 20));
        assert_eq!(classify(&horizontal), ShapeLabel::HorizontalLine);

        let vertical = stroke(&line((75.0, 0.0), (75.0, 100.0), 20));
        assert_eq!(classify(&vertical), ShapeLabel::VerticalLine);

        let dot = stroke(&[(50.0, 50.0), (60.0, 55.0), (55.0, 60.0), (52.0, 53.0)]);
        assert_eq!(classify(&dot), ShapeLabel::Dot);
    }

    #[test]
    fn test_single_tap_is_dot() {
        assert_eq!(classify(&[Point::start(20.0, 20.0)]), ShapeLabel::Dot);
    }

    #[test]
    fn test_two_strokes_form_cross() {
        let mut pts = stroke(&line((10.0, 10.0), (90.0, 90.0), 10));
        pts.extend(stroke(&line((90.0, 10.0), (10.0, 90.0), 10)));
        assert_eq!(classify(&pts), ShapeLabel::Cross);
    }

    #[test]
    fn test_closed_shapes() {
        let mut circle = ring(75.0, 75.0, 50.0, 50.0, 40);
        circle.push(circle[0]);
        assert_eq!(classify(&stroke(&circle)), ShapeLabel::Circle);

        let mut ellipse = ring(75.0, 75.0, 50.0, 20.0, 40);
        ellipse.push(ellipse[0]);
        assert_eq!(classify(&stroke(&ellipse)), ShapeLabel::Ellipse);
    }

    #[test]
    fn test_order_prefers_earlier_rule() {
        // Closed, near square and tiny: dot comes before circle.
        let mut small = ring(20.0, 20.0, 10.0, 10.0, 12);
        small.push(small[0]);
        assert_eq!(classify(&stroke(&small)), ShapeLabel::Dot);
    }

    #[test]
    fn test_complex_needs_many_points() {
        // Open spiral-ish scribble: 120 points, wide and tall, not closed.
        let mut pts: Vec<(f64, f64)> = line((0.0, 0.0), (100.0, 0.0), 40);
        pts.extend(line((100.0, 0.0), (0.0, 100.0), 40));
        pts.extend(line((0.0, 100.0), (100.0, 100.0), 40));
        assert_eq!(classify(&stroke(&pts)), ShapeLabel::Complex);

        pts.truncate(100);
        assert_ne!(classify(&stroke(&pts)), ShapeLabel::Complex);
    }

    #[test]
    fn test_zigzag() {
        // Two separate strokes keep the cross/line/dot rules out of the way.
        let mut pts = stroke(&[(0.0, 0.0), (20.0, 0.0), (40.0, 0.0)]);
        let mut zig = Vec::new();
        for i in 0..20 {
            let x = if i % 2 == 0 { 0.0 } else { 60.0 };
            zig.push((x, 10.0 + i as f64 * 5.0));
        }
        pts.extend(stroke(&zig));
        let features = StrokeFeatures::extract(&pts, ArcMeasure::Raw).unwrap();
        assert!(features.x_reversals() >= 2);
        assert_eq!(classify(&pts), ShapeLabel::Zigzag);
    }

    #[test]
    fn test_jitter_is_not_zigzag() {
        let coords: Vec<(f64, f64)> = (0..30)
            .map(|i| (50.0 + if i % 2 == 0 { 0.0 } else { 4.0 }, i as f64 * 3.0))
            .collect();
        let pts = stroke(&coords);
        let features = StrokeFeatures::extract(&pts, ArcMeasure::Raw).unwrap();
        assert_eq!(features.x_reversals(), 0);
        assert!(!features.is_zigzag());
    }

    #[test]
    fn test_open_arc_is_curved() {
        // Three-quarter arc, open, 60x60, one stroke. Steps are too short for
        // the zigzag test and the box is too large for a dot.
        let coords: Vec<(f64, f64)> = (0..=30)
            .map(|i| {
                let a = 1.5 * PI * i as f64 / 30.0;
                (75.0 + 30.0 * a.cos(), 75.0 + 30.0 * a.sin())
            })
            .collect();
        let pts = stroke(&coords);
        let features = StrokeFeatures::extract(&pts, ArcMeasure::Raw).unwrap();
        assert!(!features.is_closed);
        assert_eq!(classify(&pts), ShapeLabel::Curved);

        // Wrapped turning sees only the true 28 small turns, just under 1.5π.
        let wrapped = ShapeClassifier::new(ArcMeasure::Wrapped);
        assert_eq!(wrapped.classify(&pts), ShapeLabel::Unknown);
    }

    #[test]
    fn test_raw_measure_counts_heading_wrap() {
        // Heading flips from just under +π to just over -π: a tiny real turn.
        let pts = vec![
            Point::drag(10.0, 0.0),
            Point::drag(0.0, 0.001),
            Point::drag(-10.0, 0.0),
        ];
        let raw = StrokeFeatures::extract(&pts, ArcMeasure::Raw).unwrap().total_turning();
        let wrapped = StrokeFeatures::extract(&pts, ArcMeasure::Wrapped).unwrap().total_turning();
        assert!(raw > 6.0);
        assert!(wrapped < 0.01);
    }

    #[test]
    fn test_pen_down_breaks_turning() {
        let pts = vec![
            Point::start(0.0, 0.0),
            Point::drag(10.0, 0.0),
            Point::drag(10.0, 10.0),
        ];
        let features = StrokeFeatures::extract(&pts, ArcMeasure::Raw).unwrap();
        assert_eq!(features.total_turning(), 0.0);
    }

    #[test]
    fn test_classify_is_pure() {
        let pts = stroke(&ring(75.0, 75.0, 40.0, 25.0, 50));
        let classifier = ShapeClassifier::default();
        assert_eq!(classifier.classify(&pts), classifier.classify(&pts));
    }
}
