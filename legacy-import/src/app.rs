//! Shared entry point of the import binaries.

use dotenv::dotenv;
use tracing::{error, info, warn};

use crate::config::{Dependencies, LogFormat};
use crate::errors::ImportError;
use crate::processor::ImportProfile;
use crate::summary::ImportSummary;
use crate::telemetry::init_tracing;

/// Load `.env`, set up logging and run one import with `profile`.
pub async fn run(
    profile: ImportProfile,
    service_name: &'static str,
) -> Result<ImportSummary, ImportError> {
    dotenv().ok();

    let (log_format, invalid_log_format) = LogFormat::from_env();
    init_tracing(log_format, service_name)?;
    if let Some(value) = invalid_log_format {
        warn!(value = %value, "Invalid LOG_FORMAT, defaulting to 'pretty'");
    }

    info!(profile = %profile, "Starting legacy import");

    let mut deps = Dependencies::new(profile);

    match deps.orchestrator.run().await {
        Ok(summary) => {
            info!(
                run_id = %summary.run_id,
                inserted = summary.total_inserted(),
                failed = summary.total_failed(),
                "Legacy import completed"
            );
            Ok(summary)
        }
        Err(e) => {
            error!(error = %e, "Legacy import failed");
            Err(e)
        }
    }
}
