pub mod confidence;
pub mod config;
pub mod error;
pub mod geometry;
pub mod random;
pub mod session;
pub mod shape;
pub mod stroke_file;
pub mod types;

pub use confidence::ConfidenceSynthesizer;
pub use config::EngineConfig;
pub use error::{ConfigError, EngineError, EngineResult};
pub use random::{FixedSource, RandomSource, RngSource};
pub use session::DrawingSession;
pub use shape::{ArcMeasure, ShapeClassifier};
pub use types::{ConfidenceVector, Point, PredictionResult, ShapeLabel, DIGIT_COUNT};

use rand::rngs::StdRng;

/// Classifier and synthesizer bundled with the random source they draw from.
pub struct DigitEngine<R: RandomSource = RngSource<StdRng>> {
    classifier: ShapeClassifier,
    synthesizer: ConfidenceSynthesizer,
    rng: R,
}

impl DigitEngine {
    pub fn new() -> Self {
        Self::with_source(
            ShapeClassifier::default(),
            ConfidenceSynthesizer::default(),
            RngSource::from_entropy(),
        )
    }

    pub fn from_config(config: &EngineConfig) -> EngineResult<Self> {
        Ok(Self::with_source(
            ShapeClassifier::new(config.arc_measure),
            ConfidenceSynthesizer::new(config.noise_amplitude)?,
            RngSource::from_seed_option(config.seed),
        ))
    }
}

impl<R: RandomSource> DigitEngine<R> {
    pub fn with_source(
        classifier: ShapeClassifier,
        synthesizer: ConfidenceSynthesizer,
        rng: R,
    ) -> Self {
        Self {
            classifier,
            synthesizer,
            rng,
        }
    }

    pub fn synthesizer(&self) -> &ConfidenceSynthesizer {
        &self.synthesizer
    }

    /// Pure: the same points always give the same label.
    pub fn classify(&self, points: &[Point]) -> ShapeLabel {
        self.classifier.classify(points)
    }

    /// Stochastic: confidences, and sometimes the class, vary between calls.
    pub fn predict(&mut self, points: &[Point]) -> PredictionResult {
        let label = self.classifier.classify(points);
        let result = self.synthesizer.synthesize(label, points, &mut self.rng);
        tracing::debug!(
            %label,
            predicted = result.predicted_class,
            confidence = result.confidences[result.predicted_class],
            "prediction"
        );
        result
    }
}

impl Default for DigitEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_engine() -> DigitEngine<FixedSource> {
        DigitEngine::with_source(
            ShapeClassifier::default(),
            ConfidenceSynthesizer::default(),
            FixedSource::centered(),
        )
    }

    #[test]
    fn test_engine_creation() {
        let engine = DigitEngine::new();
        assert_eq!(engine.classify(&[]), ShapeLabel::None);
        assert_eq!(engine.synthesizer().noise_amplitude(), 0.075);
    }

    #[test]
    fn test_prediction() {
        let mut engine = fixed_engine();
        let pts: Vec<Point> = (0..20)
            .map(|i| {
                let y = i as f64 * 5.0;
                if i == 0 {
                    Point::start(75.0, y)
                } else {
                    Point::drag(75.0, y)
                }
            })
            .collect();
        let res = engine.predict(&pts);
        assert_eq!(engine.classify(&pts), ShapeLabel::VerticalLine);
        assert_eq!(res.predicted_class, 1);
        assert!((res.confidences.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_config_rejects_loud_noise() {
        let cfg = EngineConfig {
            noise_amplitude: 0.5,
            ..EngineConfig::default()
        };
        assert!(matches!(
            DigitEngine::from_config(&cfg),
            Err(EngineError::Config(ConfigError::NoiseAmplitude(_)))
        ));
    }

    #[test]
    fn test_seeded_engines_agree() {
        let cfg = EngineConfig {
            seed: Some(9),
            ..EngineConfig::default()
        };
        let mut a = DigitEngine::from_config(&cfg).unwrap();
        let mut b = DigitEngine::from_config(&cfg).unwrap();
        let pts = [Point::start(0.0, 0.0), Point::drag(30.0, 40.0)];
        for _ in 0..5 {
            assert_eq!(a.predict(&pts), b.predict(&pts));
        }
    }
}
