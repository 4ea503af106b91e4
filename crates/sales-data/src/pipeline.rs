//! End-to-end ingestion run: discover → read → normalize → write.
//!
//! No artifact is written unless every step succeeds.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{debug, info};

use sales_core::error::Result;
use sales_core::models::{RowErrorPolicy, SalesRecord};

use crate::artifact::write_artifact;
use crate::normalizer::{normalize, Normalized};
use crate::reader::{find_sales_files, read_sales_files};

/// Inputs of one ingestion run.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub data_dir: PathBuf,
    /// File-name glob, e.g. `daily_sales_data_*.csv`.
    pub pattern: String,
    pub product: String,
    pub output: PathBuf,
    pub policy: RowErrorPolicy,
}

/// What an ingestion run did.
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub files: Vec<PathBuf>,
    /// Rows read across all files, before product filtering.
    pub rows_read: usize,
    pub rows_matched: usize,
    pub rows_skipped: usize,
    pub records: Vec<SalesRecord>,
    pub output: PathBuf,
    pub elapsed_seconds: f64,
}

/// Read `files` in order, concatenate them and normalize the result.
pub fn normalize_files(files: &[PathBuf], product: &str, policy: RowErrorPolicy) -> Result<(usize, Normalized)> {
    let rows = read_sales_files(files)?;
    let rows_read = rows.len();
    let normalized = normalize(&rows, product, policy)?;
    Ok((rows_read, normalized))
}

/// Run a full ingestion and persist the artifact.
pub fn run_ingestion(config: &IngestConfig) -> Result<IngestReport> {
    let start = Instant::now();

    let files = find_sales_files(&config.data_dir, &config.pattern)?;
    info!(
        "Ingesting {} file(s) from {}",
        files.len(),
        config.data_dir.display()
    );
    for file in &files {
        debug!("  {}", file.display());
    }

    let (rows_read, normalized) = normalize_files(&files, &config.product, config.policy)?;
    write_artifact(&config.output, &normalized.records)?;

    let report = IngestReport {
        files,
        rows_read,
        rows_matched: normalized.rows_matched,
        rows_skipped: normalized.rows_skipped,
        records: normalized.records,
        output: config.output.clone(),
        elapsed_seconds: start.elapsed().as_secs_f64(),
    };

    info!(
        "Ingestion complete: {} rows read, {} matched {:?}, {} skipped, {} written to {}",
        report.rows_read,
        report.rows_matched,
        config.product,
        report.rows_skipped,
        report.records.len(),
        report.output.display()
    );

    Ok(report)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::before_after_summary;
    use crate::artifact::load_artifact;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use sales_core::error::SalesError;
    use sales_core::models::Region;
    use tempfile::TempDir;

    const HEADER: &str = "product,price,quantity,date,region\n";

    fn config(tmp: &TempDir, policy: RowErrorPolicy) -> IngestConfig {
        IngestConfig {
            data_dir: tmp.path().join("data"),
            pattern: "daily_sales_data_*.csv".to_string(),
            product: "pink morsel".to_string(),
            output: tmp.path().join("data").join("output.csv"),
            policy,
        }
    }

    fn write_extract(tmp: &TempDir, name: &str, body: &str) {
        let dir = tmp.path().join("data");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(name), format!("{HEADER}{body}")).unwrap();
    }

    #[test]
    fn test_worked_example_end_to_end() {
        let tmp = TempDir::new().unwrap();
        write_extract(
            &tmp,
            "daily_sales_data_0.csv",
            "Pink Morsel,$3.00,10,2021-01-10,north\n\
             pink morsel,$3.00,5,2021-01-20,north\n\
             Other,$1.00,99,2021-01-20,north\n",
        );

        let report = run_ingestion(&config(&tmp, RowErrorPolicy::Fail)).unwrap();
        assert_eq!(report.rows_read, 3);
        assert_eq!(report.rows_matched, 2);

        let records = load_artifact(&report.output).unwrap();
        let sales: Vec<Decimal> = records.iter().map(|r| r.sales).collect();
        assert_eq!(sales, vec![Decimal::new(3000, 2), Decimal::new(1500, 2)]);

        let cutoff = NaiveDate::from_ymd_opt(2021, 1, 15).unwrap();
        let summary = before_after_summary(&records, cutoff).unwrap();
        assert_eq!(summary.before, Decimal::new(3000, 2));
        assert_eq!(summary.after, Decimal::new(1500, 2));
        assert_eq!(summary.percent_change, Decimal::new(-5000, 2));
    }

    #[test]
    fn test_two_files_merge_with_overlapping_dates() {
        let tmp = TempDir::new().unwrap();
        write_extract(
            &tmp,
            "daily_sales_data_0.csv",
            "pink morsel,$3.00,1,2021-01-01,north\n\
             pink morsel,$3.00,2,2021-01-02,north\n\
             gold morsel,$5.00,9,2021-01-02,north\n",
        );
        write_extract(
            &tmp,
            "daily_sales_data_1.csv",
            "PINK MORSEL,$3.00,3,2021-01-01,south\n\
             Pink Morsel,$3.00,4,2021-01-02,south\n",
        );
        write_extract(&tmp, "unrelated.csv", "pink morsel,$3.00,100,2021-01-01,east\n");

        let report = run_ingestion(&config(&tmp, RowErrorPolicy::Fail)).unwrap();
        assert_eq!(report.files.len(), 2);
        assert_eq!(report.rows_read, 5);
        assert_eq!(report.records.len(), 4);

        let loaded = load_artifact(&report.output).unwrap();
        assert_eq!(loaded, report.records);
        let order: Vec<(u32, Region)> = loaded
            .iter()
            .map(|r| (chrono::Datelike::day(&r.date), r.region))
            .collect();
        assert_eq!(
            order,
            vec![
                (1, Region::North),
                (1, Region::South),
                (2, Region::North),
                (2, Region::South),
            ]
        );
    }

    #[test]
    fn test_bad_row_fails_run_without_output() {
        let tmp = TempDir::new().unwrap();
        write_extract(&tmp, "daily_sales_data_0.csv", "pink morsel,$x,1,2021-01-01,north\n");

        let cfg = config(&tmp, RowErrorPolicy::Fail);
        let err = run_ingestion(&cfg).unwrap_err();
        assert!(matches!(err, SalesError::InvalidRow { line: 2, .. }), "{err:?}");
        assert!(!cfg.output.exists());
    }

    #[test]
    fn test_bad_row_skipped_under_skip_policy() {
        let tmp = TempDir::new().unwrap();
        write_extract(
            &tmp,
            "daily_sales_data_0.csv",
            "pink morsel,$x,1,2021-01-01,north\npink morsel,$2.00,1,2021-01-02,north\n",
        );

        let report = run_ingestion(&config(&tmp, RowErrorPolicy::Skip)).unwrap();
        assert_eq!(report.rows_skipped, 1);
        assert_eq!(report.records.len(), 1);
        assert!(report.output.exists());
    }

    #[test]
    fn test_unparseable_file_fails_whole_run() {
        let tmp = TempDir::new().unwrap();
        write_extract(&tmp, "daily_sales_data_0.csv", "pink morsel,$3.00,1,2021-01-01,north\n");
        let dir = tmp.path().join("data");
        std::fs::write(dir.join("daily_sales_data_1.csv"), "product,quantity\nx,1\n").unwrap();

        let cfg = config(&tmp, RowErrorPolicy::Skip);
        let err = run_ingestion(&cfg).unwrap_err();
        assert!(matches!(err, SalesError::Ingestion { .. }), "{err:?}");
        assert!(!cfg.output.exists());
    }

    #[test]
    fn test_no_matching_files() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("data")).unwrap();
        let err = run_ingestion(&config(&tmp, RowErrorPolicy::Fail)).unwrap_err();
        assert!(matches!(err, SalesError::NoInputFiles { .. }));
    }
}
