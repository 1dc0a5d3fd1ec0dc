//! StaySense batch runner
//!
//! Usage: `staysense [TRAINING_JSON] [INPUT_JSON]`; everything else comes
//! from `config/staysense.*` and `STAYSENSE_*` environment variables.

use anyhow::Result;
use staysense_cli::runner::write_report;
use staysense_cli::{run, CliConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load configuration
    let mut config = CliConfig::load()?;
    let mut args = std::env::args().skip(1);
    if let Some(path) = args.next() {
        config.training_path = Some(PathBuf::from(path));
    }
    if let Some(path) = args.next() {
        config.input_path = Some(PathBuf::from(path));
    }

    // Initialize tracing
    init_tracing(&config)?;
    info!("Loaded configuration: {:?}", config);

    let report = run(&config)?;
    info!(
        rows = report.features.n_rows(),
        features = report.features.n_features(),
        "Run complete"
    );
    write_report(&report, config.output_path.as_deref())?;

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing(config: &CliConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "staysense_cli={level},staysense_sdk={level},staysense_features={level}",
            level = config.log_level
        )
        .into()
    });

    // logs go to stderr so the report can be piped from stdout
    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
