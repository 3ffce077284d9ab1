use super::ui::Predictor;
use digit_engine::{DigitEngine, EngineConfig, EngineResult, Point, PredictionResult, ShapeLabel};

pub struct HeuristicBackend {
    engine: DigitEngine,
}

impl HeuristicBackend {
    pub fn new(config: &EngineConfig) -> EngineResult<Self> {
        if let Some(seed) = config.seed {
            tracing::info!(seed, "using seeded confidence noise");
        }
        Ok(Self {
            engine: DigitEngine::from_config(config)?,
        })
    }
}

impl Default for HeuristicBackend {
    fn default() -> Self {
        Self {
            engine: DigitEngine::new(),
        }
    }
}

impl Predictor for HeuristicBackend {
    fn classify(&self, points: &[Point]) -> ShapeLabel {
        self.engine.classify(points)
    }

    fn predict(&mut self, points: &[Point]) -> PredictionResult {
        self.engine.predict(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use digit_engine::ArcMeasure;

    #[test]
    fn test_backend_predicts_a_distribution() {
        let config = EngineConfig {
            seed: Some(11),
            arc_measure: ArcMeasure::Wrapped,
            ..EngineConfig::default()
        };
        let mut backend = HeuristicBackend::new(&config).unwrap();
        let pts: Vec<Point> = (0..30)
            .map(|i| {
                let x = i as f64 * 4.0;
                if i == 0 {
                    Point::start(x, 70.0)
                } else {
                    Point::drag(x, 70.0)
                }
            })
            .collect();
        assert_eq!(backend.classify(&pts), ShapeLabel::HorizontalLine);
        let res = backend.predict(&pts);
        assert!((res.confidences.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_backend_rejects_bad_noise() {
        let config = EngineConfig {
            noise_amplitude: -0.1,
            ..EngineConfig::default()
        };
        assert!(HeuristicBackend::new(&config).is_err());
    }
}
