use digit_desktop::HeuristicBackend;
use digit_engine::{EngineConfig, EngineResult};

fn backend_from_env() -> EngineResult<(HeuristicBackend, EngineConfig)> {
    let config = EngineConfig::from_env()?;
    Ok((HeuristicBackend::new(&config)?, config))
}

#[macroquad::main("Digit Sketch")]
async fn main() {
    digit_desktop::init_tracing();

    let (predictor, config) = backend_from_env().unwrap_or_else(|err| {
        tracing::error!(%err, "invalid configuration, using defaults");
        (HeuristicBackend::default(), EngineConfig::default())
    });

    let result_ids: Vec<&'static str> =
        digit_desktop::SURFACES.iter().map(|s| s.result_id).collect();
    digit_desktop::run_app(predictor, config.auto_clear, &result_ids).await;
}
