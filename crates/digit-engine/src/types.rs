use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Number of digit classes a prediction covers.
pub const DIGIT_COUNT: usize = 10;

/// One captured sample of a stroke, in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// `false` marks pen-down (first point of a stroke).
    pub dragging: bool,
}

impl Point {
    pub fn start(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            dragging: false,
        }
    }

    pub fn drag(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            dragging: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeLabel {
    None,
    HorizontalLine,
    VerticalLine,
    Dot,
    Cross,
    Circle,
    Ellipse,
    Complex,
    Zigzag,
    Curved,
    Unknown,
}

impl ShapeLabel {
    pub const ALL: [ShapeLabel; 11] = [
        ShapeLabel::None,
        ShapeLabel::HorizontalLine,
        ShapeLabel::VerticalLine,
        ShapeLabel::Dot,
        ShapeLabel::Cross,
        ShapeLabel::Circle,
        ShapeLabel::Ellipse,
        ShapeLabel::Complex,
        ShapeLabel::Zigzag,
        ShapeLabel::Curved,
        ShapeLabel::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeLabel::None => "none",
            ShapeLabel::HorizontalLine => "horizontal_line",
            ShapeLabel::VerticalLine => "vertical_line",
            ShapeLabel::Dot => "dot",
            ShapeLabel::Cross => "cross",
            ShapeLabel::Circle => "circle",
            ShapeLabel::Ellipse => "ellipse",
            ShapeLabel::Complex => "complex",
            ShapeLabel::Zigzag => "zigzag",
            ShapeLabel::Curved => "curved",
            ShapeLabel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ShapeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-digit confidences, index `i` standing for digit `i`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceVector(pub [f64; DIGIT_COUNT]);

impl ConfidenceVector {
    pub fn filled(value: f64) -> Self {
        Self([value; DIGIT_COUNT])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Index of the largest entry; the lowest index wins ties.
    pub fn argmax(&self) -> usize {
        let mut best = 0;
        for i in 1..DIGIT_COUNT {
            if self.0[i] > self.0[best] {
                best = i;
            }
        }
        best
    }
}

impl Index<usize> for ConfidenceVector {
    type Output = f64;

    fn index(&self, digit: usize) -> &f64 {
        &self.0[digit]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_class: usize,
    pub confidences: ConfidenceVector,
}
