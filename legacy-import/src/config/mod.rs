//! Configuration and dependency wiring for the legacy import.

mod dependencies;

use std::env;
use std::path::PathBuf;

use legacy_import_repository::config::{DEFAULT_DATABASE_NAME, DEFAULT_MONGODB_URI};
use legacy_import_repository::StoreConfig;
use tracing::warn;

pub use dependencies::Dependencies;

/// Default snapshot file, relative to the working directory.
pub const DEFAULT_SNAPSHOT_PATH: &str = "legacy-data.json";

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable multi-line console output.
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parse the log format from `LOG_FORMAT`.
    ///
    /// Valid values: "pretty" or "json" (case-insensitive).
    /// Defaults to "pretty" if not set or invalid. An invalid value is
    /// handed back next to the fallback: this runs before any subscriber
    /// exists, so the caller reports it once tracing is initialized.
    pub fn from_env() -> (Self, Option<String>) {
        match env::var("LOG_FORMAT") {
            Ok(value) => match Self::parse(&value) {
                Some(format) => (format, None),
                None => (Self::Pretty, Some(value)),
            },
            Err(_) => (Self::Pretty, None),
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "pretty" | "console" | "" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Settings for one import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    pub store: StoreConfig,
    pub snapshot_path: PathBuf,
    /// Write to the in-memory store instead of MongoDB.
    pub dry_run: bool,
    pub log_format: LogFormat,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            dry_run: false,
            log_format: LogFormat::Pretty,
        }
    }
}

impl ImportConfig {
    /// Read the configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `MONGODB_URI`: store connection string (default: mongodb://localhost:27017)
    /// - `MONGODB_DATABASE`: target database (default: grocery_store)
    /// - `LEGACY_SNAPSHOT_PATH`: snapshot file (default: legacy-data.json)
    /// - `IMPORT_DRY_RUN`: "true"/"1" to use the in-memory store (default: false)
    /// - `LOG_FORMAT`: "pretty" or "json" (default: pretty)
    pub fn from_env() -> Self {
        let uri = non_empty_var("MONGODB_URI").unwrap_or_else(|| DEFAULT_MONGODB_URI.to_string());
        let database =
            non_empty_var("MONGODB_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string());
        let snapshot_path = non_empty_var("LEGACY_SNAPSHOT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH));

        let dry_run = match non_empty_var("IMPORT_DRY_RUN") {
            None => false,
            Some(value) => match value.to_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    warn!(value = %value, "Invalid IMPORT_DRY_RUN, defaulting to 'false'");
                    false
                }
            },
        };

        Self {
            store: StoreConfig::new(uri, database),
            snapshot_path,
            dry_run,
            log_format: LogFormat::from_env().0,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = [
        "MONGODB_URI",
        "MONGODB_DATABASE",
        "LEGACY_SNAPSHOT_PATH",
        "IMPORT_DRY_RUN",
        "LOG_FORMAT",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_when_unset() {
        clear_env();
        assert_eq!(ImportConfig::from_env(), ImportConfig::default());
    }

    #[test]
    #[serial]
    fn test_reads_every_variable() {
        clear_env();
        env::set_var("MONGODB_URI", "mongodb://db:27017");
        env::set_var("MONGODB_DATABASE", "shop");
        env::set_var("LEGACY_SNAPSHOT_PATH", "/data/export.json");
        env::set_var("IMPORT_DRY_RUN", "TRUE");
        env::set_var("LOG_FORMAT", "json");

        let config = ImportConfig::from_env();
        clear_env();

        assert_eq!(config.store, StoreConfig::new("mongodb://db:27017", "shop"));
        assert_eq!(config.snapshot_path, PathBuf::from("/data/export.json"));
        assert!(config.dry_run);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    #[serial]
    fn test_invalid_values_fall_back() {
        clear_env();
        env::set_var("IMPORT_DRY_RUN", "sometimes");
        env::set_var("LOG_FORMAT", "xml");
        env::set_var("MONGODB_DATABASE", "   ");

        let config = ImportConfig::from_env();
        clear_env();

        assert!(!config.dry_run);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.store.database, "grocery_store");
    }

    #[test]
    #[serial]
    fn test_invalid_log_format_is_handed_back() {
        clear_env();
        env::set_var("LOG_FORMAT", "xml");
        let invalid = LogFormat::from_env();
        env::set_var("LOG_FORMAT", "JSON");
        let json = LogFormat::from_env();
        clear_env();

        assert_eq!(invalid, (LogFormat::Pretty, Some("xml".to_string())));
        assert_eq!(json, (LogFormat::Json, None));
        assert_eq!(LogFormat::from_env(), (LogFormat::Pretty, None));
    }
}
