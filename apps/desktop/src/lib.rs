pub mod heuristic_backend;
pub mod ui;

pub use heuristic_backend::HeuristicBackend;
pub use ui::{run_app, Predictor, SURFACES};

/// Installs the fmt subscriber; `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    // A second install (tests, repeated calls) is harmless.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
