//! Per-table accounting and the end-of-run summary table.

use std::fmt;
use std::time::Duration;

use uuid::Uuid;

use crate::processor::{ImportProfile, Phase};

/// What happened to one legacy table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableReport {
    pub legacy_table: String,
    pub collection: String,
    pub phase: Phase,
    /// Rows in the snapshot.
    pub source_rows: usize,
    /// Rows the transform dropped.
    pub skipped: usize,
    /// Rows that could not be encoded.
    pub rejected: usize,
    /// Documents submitted to the store.
    pub attempted: usize,
    /// Documents the store reports as written.
    pub inserted: usize,
    /// Documents the store rejected.
    pub failed: usize,
    /// Foreign keys whose parent row was never imported.
    pub dangling: usize,
    /// Set when the whole batch failed.
    pub error: Option<String>,
}

/// Outcome of a complete run.
#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub run_id: Uuid,
    pub profile: ImportProfile,
    pub tables: Vec<TableReport>,
    /// Snapshot tables no transform recognizes.
    pub unrecognized: Vec<String>,
    pub elapsed: Duration,
}

impl ImportSummary {
    /// Tables ranked by inserted documents, most first; ties by collection.
    pub fn ranked(&self) -> Vec<&TableReport> {
        let mut ranked: Vec<&TableReport> = self.tables.iter().collect();
        ranked.sort_by(|a, b| {
            b.inserted
                .cmp(&a.inserted)
                .then_with(|| a.collection.cmp(&b.collection))
        });
        ranked
    }

    pub fn table(&self, collection: &str) -> Option<&TableReport> {
        self.tables.iter().find(|t| t.collection == collection)
    }

    pub fn total_source_rows(&self) -> usize {
        self.tables.iter().map(|t| t.source_rows).sum()
    }

    pub fn total_inserted(&self) -> usize {
        self.tables.iter().map(|t| t.inserted).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.tables.iter().map(|t| t.failed).sum()
    }

    pub fn total_skipped(&self) -> usize {
        self.tables.iter().map(|t| t.skipped + t.rejected).sum()
    }

    pub fn total_dangling(&self) -> usize {
        self.tables.iter().map(|t| t.dangling).sum()
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .tables
            .iter()
            .map(|t| t.collection.len())
            .max()
            .unwrap_or(0)
            .max("collection".len());

        writeln!(
            f,
            "{:<width$}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}",
            "collection", "rows", "inserted", "failed", "skipped", "dangling"
        )?;
        for table in self.ranked() {
            write!(
                f,
                "{:<width$}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}",
                table.collection,
                table.source_rows,
                table.inserted,
                table.failed,
                table.skipped + table.rejected,
                table.dangling,
            )?;
            if let Some(error) = &table.error {
                write!(f, "  ({})", error)?;
            }
            writeln!(f)?;
        }
        writeln!(
            f,
            "{:<width$}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}",
            "total",
            self.total_source_rows(),
            self.total_inserted(),
            self.total_failed(),
            self.total_skipped(),
            self.total_dangling(),
        )?;

        if !self.unrecognized.is_empty() {
            writeln!(f, "unrecognized tables: {}", self.unrecognized.join(", "))?;
        }
        write!(
            f,
            "{} profile, {} tables in {:.1}s",
            self.profile,
            self.tables.len(),
            self.elapsed.as_secs_f64()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(collection: &str, inserted: usize) -> TableReport {
        TableReport {
            legacy_table: collection.to_lowercase(),
            collection: collection.to_string(),
            phase: Phase::Catalog,
            source_rows: inserted + 1,
            skipped: 1,
            rejected: 0,
            attempted: inserted,
            inserted,
            failed: 0,
            dangling: 0,
            error: None,
        }
    }

    fn summary() -> ImportSummary {
        ImportSummary {
            run_id: Uuid::new_v4(),
            profile: ImportProfile::Full,
            tables: vec![
                report("variants", 4),
                TableReport {
                    dangling: 2,
                    ..report("products", 10)
                },
                TableReport {
                    dangling: 1,
                    ..report("banners", 4)
                },
            ],
            unrecognized: vec!["migrations".to_string()],
            elapsed: Duration::from_millis(1500),
        }
    }

    #[test]
    fn test_ranked_by_inserted_then_collection() {
        let summary = summary();
        let order: Vec<&str> = summary
            .ranked()
            .iter()
            .map(|t| t.collection.as_str())
            .collect();
        assert_eq!(order, vec!["products", "banners", "variants"]);
    }

    #[test]
    fn test_totals() {
        let summary = summary();
        assert_eq!(summary.total_inserted(), 18);
        assert_eq!(summary.total_source_rows(), 21);
        assert_eq!(summary.total_skipped(), 3);
        assert_eq!(summary.total_failed(), 0);
        assert_eq!(summary.total_dangling(), 3);
    }

    #[test]
    fn test_display_lists_tables_and_totals() {
        let mut summary = summary();
        summary.tables[0].error = Some("Insert error: boom".to_string());
        let rendered = summary.to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert!(lines[0].starts_with("collection"));
        assert!(lines[1].starts_with("products"));
        assert!(lines[3].contains("(Insert error: boom)"));
        assert!(lines[4].starts_with("total"));
        assert_eq!(
            lines[4].split_whitespace().collect::<Vec<_>>(),
            vec!["total", "21", "18", "0", "3", "3"]
        );
        assert!(rendered.contains("unrecognized tables: migrations"));
        assert!(rendered.ends_with("full profile, 3 tables in 1.5s"));
    }
}
