use anyhow::{bail, Context, Result};
use digit_engine::{stroke_file, DigitEngine, EngineConfig};

fn main() -> Result<()> {
    digit_desktop::init_tracing();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        bail!("usage: digit-replay <strokes.json>...");
    }

    let config = EngineConfig::from_env().context("reading DIGIT_* environment")?;
    let mut engine = DigitEngine::from_config(&config)?;

    for path in &paths {
        let points = stroke_file::load_points(path).with_context(|| format!("loading {path}"))?;
        let label = engine.classify(&points);
        let res = engine.predict(&points);

        println!("{path}");
        println!("  points: {:<6} shape: {label}", points.len());
        println!("  predicted: {}", res.predicted_class);
        for (digit, conf) in res.confidences.iter().enumerate() {
            let marker = if digit == res.predicted_class { '*' } else { ' ' };
            let bar = "#".repeat((conf * 50.0).round() as usize);
            println!("  {marker}{digit}  {conf:>6.3}  {bar}");
        }
        println!();
    }
    Ok(())
}
