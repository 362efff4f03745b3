//! Tracing subscriber setup shared by both binaries.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;
use crate::errors::ImportError;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "legacy_import=info,legacy_import_repository=info";

/// Initialize tracing/logging.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(format: LogFormat, service_name: &'static str) -> Result<(), ImportError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .try_init(),
    }
    .map_err(|e| ImportError::config(format!("Failed to initialize tracing: {}", e)))?;

    info!(
        service_name = service_name,
        service_version = env!("CARGO_PKG_VERSION"),
        log_format = ?format,
        "Tracing initialized"
    );

    Ok(())
}
