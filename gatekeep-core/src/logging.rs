use tracing_subscriber::EnvFilter;

/// Initialize a `tracing` subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over `default_directive`.
pub fn init_tracing(default_directive: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .init();
}
