//! Full import entry point.
//!
//! Imports every recognized table of the legacy snapshot, including order,
//! rider and notification history.

use legacy_import::{app, ImportError, ImportProfile};

#[tokio::main]
async fn main() -> Result<(), ImportError> {
    app::run(ImportProfile::Full, "convert-legacy-data").await?;
    Ok(())
}
