//! Geometric features shared by the shape classifier and the confidence rules.
//!
//! All helpers are total over non-empty input. Coordinates are assumed finite.

use crate::types::Point;

/// Start and end points closer than this count as a closed drawing.
pub const CLOSURE_THRESHOLD: f64 = 30.0;

/// Minimum number of points before a closed drawing counts as a loop.
pub const MIN_LOOP_POINTS: usize = 20;

/// Aspect ratio reported for a zero-height bounding box with some width.
pub const FLAT_ASPECT_RATIO: f64 = f64::MAX;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Width over height. A box with no extent at all has no aspect ratio,
    /// so every ratio comparison against it fails.
    pub fn aspect_ratio(&self) -> Option<f64> {
        let (width, height) = (self.width(), self.height());
        if height > 0.0 {
            Some(width / height)
        } else if width > 0.0 {
            Some(FLAT_ASPECT_RATIO)
        } else {
            None
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuadrantOccupancy {
    pub top_left: bool,
    pub top_right: bool,
    pub bottom_left: bool,
    pub bottom_right: bool,
}

pub fn euclidean_dist(a: &Point, b: &Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

pub fn bounding_box(points: &[Point]) -> Option<BoundingBox> {
    if points.is_empty() {
        return None;
    }

    Some(BoundingBox {
        min_x: points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min),
        max_x: points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max),
        min_y: points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min),
        max_y: points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max),
    })
}

/// Counts pen-downs. The first point always opens a stroke, whatever its flag.
pub fn stroke_count(points: &[Point]) -> usize {
    points
        .iter()
        .enumerate()
        .filter(|(i, p)| *i == 0 || !p.dragging)
        .count()
}

pub fn closure_distance(points: &[Point]) -> Option<f64> {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => Some(euclidean_dist(first, last)),
        _ => None,
    }
}

pub fn is_closed(points: &[Point]) -> bool {
    closure_distance(points).is_some_and(|d| d < CLOSURE_THRESHOLD)
}

/// Same closure test as [`is_closed`], gated on a minimum point count.
pub fn has_loop(points: &[Point]) -> bool {
    points.len() >= MIN_LOOP_POINTS && is_closed(points)
}

pub fn center_of_mass(points: &[Point]) -> Option<(f64, f64)> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let cx = points.iter().map(|p| p.x).sum::<f64>() / n;
    let cy = points.iter().map(|p| p.y).sum::<f64>() / n;
    Some((cx, cy))
}

pub fn quadrant_occupancy(points: &[Point], center_x: f64, center_y: f64) -> QuadrantOccupancy {
    let mut q = QuadrantOccupancy::default();
    for p in points {
        let left = p.x < center_x;
        let top = p.y < center_y;
        match (left, top) {
            (true, true) => q.top_left = true,
            (false, true) => q.top_right = true,
            (true, false) => q.bottom_left = true,
            (false, false) => q.bottom_right = true,
        }
    }
    q
}

/// Fraction of points inside the central half-size box of the bounding box.
pub fn center_density(points: &[Point]) -> f64 {
    let Some(bbox) = bounding_box(points) else {
        return 0.0;
    };
    let (cx, cy) = bbox.center();
    let half_w = bbox.width() * 0.25;
    let half_h = bbox.height() * 0.25;
    let region = BoundingBox {
        min_x: cx - half_w,
        max_x: cx + half_w,
        min_y: cy - half_h,
        max_y: cy + half_h,
    };

    let inside = points.iter().filter(|p| region.contains(p)).count();
    inside as f64 / points.len() as f64
}
