use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: cannot parse {value:?} as {expected}")]
    Parse {
        var: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("noise amplitude {0} outside [0, {max})", max = crate::config::MAX_NOISE_AMPLITUDE)]
    NoiseAmplitude(f64),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to read stroke file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed stroke data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("stroke data is empty")]
    EmptyStrokes,
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
