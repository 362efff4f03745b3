//! Essential import entry point.
//!
//! Imports only the reference data a fresh store needs to serve the
//! catalog: geography, accounts, products, menus, offers and settings.

use legacy_import::{app, ImportError, ImportProfile};

#[tokio::main]
async fn main() -> Result<(), ImportError> {
    app::run(ImportProfile::Essential, "import-essential-data").await?;
    Ok(())
}
