use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::EnvFilter;

/// Installs a compact stderr subscriber. `RUST_LOG` wins over `default_level`.
pub fn init_logging(default_level: &str) -> Result<(), SetGlobalDefaultError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}
