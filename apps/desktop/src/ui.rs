use digit_engine::{DrawingSession, Point, PredictionResult, ShapeLabel, DIGIT_COUNT};
use macroquad::prelude::*;
use std::collections::HashMap;
use std::time::{Duration, Instant};

pub const SURFACE_SIZE: f32 = 150.0;
const LINE_WIDTH: f32 = 10.0;
const SURFACE_GAP: f32 = 40.0;
const SURFACE_TOP: f32 = 60.0;
const BAR_MAX_WIDTH: f32 = 150.0;
const BAR_HEIGHT: f32 = 12.0;

pub trait Predictor {
    fn classify(&self, points: &[Point]) -> ShapeLabel;
    fn predict(&mut self, points: &[Point]) -> PredictionResult;
}

/// A drawing surface and the result slot it reports to.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceSpec {
    pub canvas_id: &'static str,
    pub result_id: &'static str,
    pub show_bars: bool,
}

pub const SURFACES: [SurfaceSpec; 3] = [
    SurfaceSpec {
        canvas_id: "drawing-canvas",
        result_id: "result",
        show_bars: false,
    },
    SurfaceSpec {
        canvas_id: "normalized-canvas",
        result_id: "normalized-result",
        show_bars: false,
    },
    SurfaceSpec {
        canvas_id: "bars-canvas",
        result_id: "bars-result",
        show_bars: true,
    },
];

struct Surface {
    spec: SurfaceSpec,
    origin: Vec2,
    session: DrawingSession,
    last_local: Option<(f64, f64)>,
}

#[derive(Debug, Clone, Default)]
pub struct ResultSlot {
    pub label: Option<ShapeLabel>,
    pub prediction: Option<PredictionResult>,
}

impl ResultSlot {
    pub fn text(&self) -> String {
        match (self.prediction, self.label) {
            (Some(p), Some(label)) => format!(
                "{}  ({label}, {:.0}%)",
                p.predicted_class,
                p.confidences[p.predicted_class] * 100.0
            ),
            (Some(p), None) => p.predicted_class.to_string(),
            _ => "-".to_string(),
        }
    }
}

/// Maps window coordinates into a surface's local space, or `None` when the
/// pointer is outside it.
pub fn to_local(origin: (f32, f32), pointer: (f32, f32)) -> Option<(f64, f64)> {
    let x = pointer.0 - origin.0;
    let y = pointer.1 - origin.1;
    if (0.0..SURFACE_SIZE).contains(&x) && (0.0..SURFACE_SIZE).contains(&y) {
        Some((x as f64, y as f64))
    } else {
        None
    }
}

/// Bar length for one digit: `confidence * 100` percent of the full width.
pub fn bar_width(confidence: f64, max_width: f32) -> f32 {
    (confidence.clamp(0.0, 1.0) as f32) * max_width
}

/// Runs one prediction and files it under `result_id`. A missing slot is
/// logged and skipped; the session keeps working.
pub fn process_drawing<P: Predictor>(
    predictor: &mut P,
    points: &[Point],
    result_id: &str,
    results: &mut HashMap<&'static str, ResultSlot>,
) -> bool {
    let Some(slot) = results.get_mut(result_id) else {
        tracing::error!("Result element with ID {result_id} not found");
        return false;
    };
    let label = predictor.classify(points);
    let prediction = predictor.predict(points);
    tracing::info!(
        result_id,
        %label,
        predicted = prediction.predicted_class,
        "prediction updated"
    );
    slot.label = Some(label);
    slot.prediction = Some(prediction);
    true
}

pub async fn run_app<P: Predictor>(
    mut predictor: P,
    auto_clear: Duration,
    result_ids: &[&'static str],
) {
    let mut surfaces: Vec<Surface> = SURFACES
        .iter()
        .enumerate()
        .map(|(i, spec)| Surface {
            spec: *spec,
            origin: vec2(SURFACE_GAP + i as f32 * (SURFACE_SIZE + SURFACE_GAP), SURFACE_TOP),
            session: DrawingSession::new(auto_clear),
            last_local: None,
        })
        .collect();

    let mut results: HashMap<&'static str, ResultSlot> = result_ids
        .iter()
        .map(|id| (*id, ResultSlot::default()))
        .collect();

    loop {
        clear_background(Color::from_rgba(30, 30, 35, 255));
        let now = Instant::now();
        let (mouse_x, mouse_y) = mouse_position();

        for surface in surfaces.iter_mut() {
            let local = to_local((surface.origin.x, surface.origin.y), (mouse_x, mouse_y));
            let mut finished = false;

            if is_mouse_button_pressed(MouseButton::Left) {
                if let Some((x, y)) = local {
                    surface.session.begin_stroke(x, y);
                    surface.last_local = local;
                }
            } else if surface.session.is_drawing() {
                match local {
                    Some(pos) if is_mouse_button_down(MouseButton::Left) => {
                        if surface.last_local != Some(pos) {
                            surface.session.extend_stroke(pos.0, pos.1);
                            surface.last_local = Some(pos);
                        }
                    }
                    // Button released, or the pointer left the surface.
                    _ => finished = surface.session.end_stroke(now),
                }
            }

            if finished {
                process_drawing(
                    &mut predictor,
                    surface.session.points(),
                    surface.spec.result_id,
                    &mut results,
                );
            }

            surface.session.poll(now);
        }

        if is_key_pressed(KeyCode::Space) {
            for surface in surfaces.iter_mut() {
                surface.session.clear();
            }
        }

        for surface in &surfaces {
            draw_surface(surface);
            draw_result(surface, results.get(surface.spec.result_id));
        }

        draw_text(
            "Draw a digit in any box | Space=clear",
            20.0,
            screen_height() - 20.0,
            18.0,
            GRAY,
        );

        next_frame().await
    }
}

fn draw_surface(surface: &Surface) {
    let Vec2 { x: ox, y: oy } = surface.origin;
    draw_rectangle(ox, oy, SURFACE_SIZE, SURFACE_SIZE, WHITE);
    let border = Color::from_rgba(80, 80, 100, 255);
    draw_rectangle_lines(ox, oy, SURFACE_SIZE, SURFACE_SIZE, 2.0, border);
    draw_text(surface.spec.canvas_id, ox, oy - 8.0, 16.0, GRAY);

    let points = surface.session.points();
    let radius = LINE_WIDTH / 2.0;
    for (i, p) in points.iter().enumerate() {
        let (x, y) = (ox + p.x as f32, oy + p.y as f32);
        if p.dragging && i > 0 {
            let prev = &points[i - 1];
            draw_line(ox + prev.x as f32, oy + prev.y as f32, x, y, LINE_WIDTH, BLACK);
        }
        // Round caps and joins.
        draw_circle(x, y, radius, BLACK);
    }
}

fn draw_result(surface: &Surface, slot: Option<&ResultSlot>) {
    let Vec2 { x: ox, y: oy } = surface.origin;
    let text_y = oy + SURFACE_SIZE + 24.0;

    let Some(slot) = slot else {
        draw_text("(no result slot)", ox, text_y, 16.0, Color::from_rgba(255, 150, 100, 255));
        return;
    };
    draw_text(&slot.text(), ox, text_y, 22.0, Color::from_rgba(100, 255, 150, 255));

    if !surface.spec.show_bars {
        return;
    }
    let Some(prediction) = slot.prediction else {
        return;
    };
    for digit in 0..DIGIT_COUNT {
        let y = text_y + 12.0 + digit as f32 * (BAR_HEIGHT + 4.0);
        let color = if digit == prediction.predicted_class {
            Color::from_rgba(100, 255, 150, 255)
        } else {
            Color::from_rgba(100, 150, 200, 200)
        };
        draw_text(&digit.to_string(), ox, y + BAR_HEIGHT - 2.0, 14.0, GRAY);
        draw_rectangle(
            ox + 14.0,
            y,
            bar_width(prediction.confidences[digit], BAR_MAX_WIDTH),
            BAR_HEIGHT,
            color,
        );
    }
}
