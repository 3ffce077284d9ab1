//! Stroke capture for one drawing surface.
//!
//! Each surface owns a [`DrawingSession`]. Time is passed in by the caller so
//! the auto-clear schedule can be driven from a frame loop or from tests.

use crate::types::Point;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct DrawingSession {
    points: Vec<Point>,
    drawing: bool,
    auto_clear: Duration,
    clear_at: Option<Instant>,
}

impl DrawingSession {
    pub fn new(auto_clear: Duration) -> Self {
        Self {
            points: Vec::new(),
            drawing: false,
            auto_clear,
            clear_at: None,
        }
    }

    /// Snapshot of everything drawn since the last clear.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn pending_clear(&self) -> Option<Instant> {
        self.clear_at
    }

    /// Pen down. Cancels any scheduled clear so a new stroke joins the drawing.
    pub fn begin_stroke(&mut self, x: f64, y: f64) {
        self.drawing = true;
        self.clear_at = None;
        self.points.push(Point::start(x, y));
    }

    /// Pen moved. Ignored unless a stroke is in progress.
    pub fn extend_stroke(&mut self, x: f64, y: f64) -> bool {
        if !self.drawing {
            return false;
        }
        self.points.push(Point::drag(x, y));
        true
    }

    /// Pen up. Returns `true` when a stroke was actually in progress, which
    /// is the caller's cue to run a prediction.
    pub fn end_stroke(&mut self, now: Instant) -> bool {
        if !self.drawing {
            return false;
        }
        self.drawing = false;
        self.clear_at = Some(now + self.auto_clear);
        true
    }

    /// Clears the surface once the scheduled deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.clear_at {
            Some(deadline) if now >= deadline => {
                tracing::debug!(points = self.points.len(), "auto-clearing drawing session");
                self.clear();
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.drawing = false;
        self.clear_at = None;
    }
}

impl Default for DrawingSession {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_AUTO_CLEAR)
    }
}
