//! The normalized artifact: a flat `sales,date,region` CSV, date ascending.
//!
//! This file is the only contract between ingestion and the dashboard, so the
//! header is checked exactly on load.

use std::fs::File;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::debug;

use sales_core::error::{Result, SalesError};
use sales_core::models::SalesRecord;

/// Artifact header, in order.
pub const ARTIFACT_COLUMNS: [&str; 3] = ["sales", "date", "region"];

fn artifact_error(path: &Path, reason: impl Into<String>) -> SalesError {
    SalesError::Artifact {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

/// Atomically write `records` to `path`, creating parent directories.
///
/// The header is always written, even for an empty record set.
pub fn write_artifact(path: &Path, records: &[SalesRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| artifact_error(path, format!("cannot create directory: {e}")))?;
    }

    let tmp = path.with_extension("csv.tmp");
    let write = || -> std::result::Result<(), csv::Error> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp)?;
        writer.write_record(ARTIFACT_COLUMNS)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    };
    let result = write()
        .map_err(|e| artifact_error(path, format!("cannot write: {e}")))
        .and_then(|()| {
            std::fs::rename(&tmp, path)
                .map_err(|e| artifact_error(path, format!("cannot move into place: {e}")))
        });
    if let Err(e) = result {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }

    debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Load the artifact, checking its header and every row, and return the
/// records stably sorted by date.
pub fn load_artifact(path: &Path) -> Result<Vec<SalesRecord>> {
    let file = File::open(path).map_err(|e| artifact_error(path, format!("cannot open: {e}")))?;
    let mut reader = csv::ReaderBuilder::new().from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| artifact_error(path, format!("cannot read header: {e}")))?
        .clone();
    let found: Vec<String> = headers.iter().map(|h| h.trim().to_ascii_lowercase()).collect();
    if found != ARTIFACT_COLUMNS {
        return Err(artifact_error(
            path,
            format!(
                "unexpected header [{}], expected [{}]",
                found.join(", "),
                ARTIFACT_COLUMNS.join(", ")
            ),
        ));
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| artifact_error(path, format!("CSV parse error: {e}")))?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let record: SalesRecord = row
            .deserialize(None)
            .map_err(|e| artifact_error(path, format!("line {line}: {e}")))?;
        if record.sales < Decimal::ZERO {
            return Err(artifact_error(path, format!("line {line}: negative sales")));
        }
        records.push(record);
    }

    records.sort_by_key(|r| r.date);
    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}
