//! `chipline`: one generator thread, one worker thread, one LIFO storage.

mod config;
mod telemetry;

use chipline::Pipeline;
use clap::Parser;
use config::{AppConfig, CliArgs};
use telemetry::init_telemetry;

// Using mimalloc for cheaper allocation on the hot push/pop path, especially
// in musl environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = AppConfig::try_from(args)?;

    init_telemetry()?;
    log_startup_info(&config);

    let report = Pipeline::new(config.pipeline)?.run()?;

    tracing::info!(
        produced = report.produced,
        soldered = report.soldered,
        worker_waits = report.worker_waits,
        "all chips soldered in {:.1}s",
        report.elapsed.as_secs_f64()
    );
    Ok(())
}

fn log_startup_info(config: &AppConfig) {
    if cfg!(debug_assertions) {
        tracing::info!("Starting chipline with full config: {:#?}", config);
    } else {
        let generator = &config.pipeline.generator;
        tracing::info!(
            "Starting chipline: producing for {:?}, one chip every {:?}",
            generator.run_for,
            generator.interval
        );
    }
}
