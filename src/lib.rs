//! Shared setup for the StaySense demos in `demos/`

/// Initialize tracing for logging, `RUST_LOG` overriding the info default
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();
}
