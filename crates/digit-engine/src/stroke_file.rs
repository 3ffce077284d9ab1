//! Recorded drawings as JSON.
//!
//! Two layouts are accepted:
//! - a list of strokes, each a list of `[x, y]` pairs;
//! - a flat list of point objects `{"x": .., "y": .., "dragging": ..}`.

use crate::error::{EngineError, EngineResult};
use crate::types::Point;
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum StrokeFile {
    Strokes(Vec<Vec<[f64; 2]>>),
    Points(Vec<Point>),
}

/// Flattens strokes into one sequence, flagging the first point of each.
pub fn points_from_strokes(strokes: &[Vec<[f64; 2]>]) -> Vec<Point> {
    let mut points = Vec::with_capacity(strokes.iter().map(Vec::len).sum());
    for stroke in strokes {
        for (i, &[x, y]) in stroke.iter().enumerate() {
            points.push(if i == 0 {
                Point::start(x, y)
            } else {
                Point::drag(x, y)
            });
        }
    }
    points
}

/// A drawing always opens with a pen-down, so a leading `dragging: true`
/// in the point layout is cleared.
pub fn parse_points(json: &str) -> EngineResult<Vec<Point>> {
    let mut points = match serde_json::from_str::<StrokeFile>(json)? {
        StrokeFile::Strokes(strokes) => points_from_strokes(&strokes),
        StrokeFile::Points(points) => points,
    };
    let Some(first) = points.first_mut() else {
        return Err(EngineError::EmptyStrokes);
    };
    first.dragging = false;
    Ok(points)
}

pub fn load_points(path: impl AsRef<Path>) -> EngineResult<Vec<Point>> {
    let text = std::fs::read_to_string(path)?;
    parse_points(&text)
}
