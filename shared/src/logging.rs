//! Tracing subscriber initialisation

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Error returned when the global subscriber cannot be installed
pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides `config.level` when present. Fails if a global
/// subscriber has already been set.
pub fn init(config: &LoggingConfig) -> Result<(), InitError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    }
}
