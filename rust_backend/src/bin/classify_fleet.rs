//! Fleet behavior classification binary.
//!
//! Reads the fleet metrics summary, labels every satellite and writes the
//! augmented summary next to it.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin classify-fleet
//! ```
//!
//! Artifact locations and rules come from `netra.toml` when one is found in
//! the working directory, `rust_backend/` or the parent directory.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log filter directives, e.g. `netra_orb=debug` (default: info)

use std::env;
use std::process::ExitCode;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use netra_orb::config::PipelineConfig;
use netra_orb::core::error::PipelineError;
use netra_orb::preprocessing::{ClassificationPipeline, ClassificationReport};

/// Build the log filter from `RUST_LOG`, falling back to `info` when unset or invalid
fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn run() -> anyhow::Result<ClassificationReport> {
    let config = PipelineConfig::load_or_default().context("Failed to load configuration")?;
    info!(
        "Classifying {} -> {}",
        config.input_path().display(),
        config.output_path().display()
    );
    let report = ClassificationPipeline::run_configured(&config)?;
    Ok(report)
}

fn main() -> ExitCode {
    FmtSubscriber::builder()
        .with_env_filter(env_filter(env::var("RUST_LOG").ok().as_deref()))
        .with_target(true)
        .init();

    match run() {
        Ok(report) => {
            println!("Behavior classification completed.");
            println!("Output: {}", report.output.display());
            for (class, count) in &report.distribution.counts {
                println!("  {:<18} {}", class, count);
            }
            println!("  {:<18} {}", "TOTAL", report.distribution.total);
            ExitCode::SUCCESS
        }
        Err(err) => {
            match err.downcast_ref::<PipelineError>() {
                Some(PipelineError::NotFound { path }) => error!(
                    "{} does not exist; run the upstream producer first",
                    path.display()
                ),
                _ => error!("{:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}
