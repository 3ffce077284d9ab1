//! Engine configuration, read from `DIGIT_*` environment variables.
//!
//! Unset variables fall back to defaults; set but unparsable ones are errors.

use crate::confidence::{ConfidenceSynthesizer, DEFAULT_NOISE_AMPLITUDE};
use crate::error::ConfigError;
use crate::shape::ArcMeasure;
use std::time::Duration;

/// Noise at or above this could zero out every clamped entry.
pub const MAX_NOISE_AMPLITUDE: f64 = 0.2;

pub const DEFAULT_AUTO_CLEAR: Duration = Duration::from_millis(2200);

pub const ENV_NOISE_AMPLITUDE: &str = "DIGIT_NOISE_AMPLITUDE";
pub const ENV_SEED: &str = "DIGIT_SEED";
pub const ENV_AUTO_CLEAR_MS: &str = "DIGIT_AUTO_CLEAR_MS";
pub const ENV_ARC_MEASURE: &str = "DIGIT_ARC_MEASURE";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub noise_amplitude: f64,
    pub seed: Option<u64>,
    pub auto_clear: Duration,
    pub arc_measure: ArcMeasure,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            noise_amplitude: DEFAULT_NOISE_AMPLITUDE,
            seed: None,
            auto_clear: DEFAULT_AUTO_CLEAR,
            arc_measure: ArcMeasure::Raw,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(raw) = lookup(ENV_NOISE_AMPLITUDE) {
            cfg.noise_amplitude = parse(ENV_NOISE_AMPLITUDE, &raw, "a float")?;
        }
        if let Some(raw) = lookup(ENV_SEED) {
            cfg.seed = Some(parse(ENV_SEED, &raw, "an unsigned integer")?);
        }
        if let Some(raw) = lookup(ENV_AUTO_CLEAR_MS) {
            let ms: u64 = parse(ENV_AUTO_CLEAR_MS, &raw, "milliseconds")?;
            cfg.auto_clear = Duration::from_millis(ms);
        }
        if let Some(raw) = lookup(ENV_ARC_MEASURE) {
            cfg.arc_measure = match raw.trim().to_ascii_lowercase().as_str() {
                "raw" => ArcMeasure::Raw,
                "wrapped" => ArcMeasure::Wrapped,
                _ => {
                    return Err(ConfigError::Parse {
                        var: ENV_ARC_MEASURE,
                        value: raw,
                        expected: "`raw` or `wrapped`",
                    })
                }
            };
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfidenceSynthesizer::new(self.noise_amplitude)?;
        Ok(())
    }
}

fn parse<T: std::str::FromStr>(
    var: &'static str,
    raw: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    raw.trim().parse::<T>().map_err(|_| ConfigError::Parse {
        var,
        value: raw.to_string(),
        expected,
    })
}
