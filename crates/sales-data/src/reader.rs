//! Discovery and loading of the raw daily sales extracts.
//!
//! Files are selected by a file-name glob inside one data directory and read
//! as CSV with a header row. A file that cannot be read as a whole fails the
//! run; row contents are not validated here.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use regex::Regex;
use tracing::{debug, warn};

use sales_core::error::{Result, SalesError};
use sales_core::models::{RawRow, RawSalesRecord, RowOrigin};

/// Columns every raw extract must provide.
pub const REQUIRED_COLUMNS: [&str; 5] = ["product", "quantity", "price", "date", "region"];

// ── Discovery ─────────────────────────────────────────────────────────────────

/// Compile a file-name glob (`*` and `?` wildcards) into an anchored regex.
pub fn glob_to_regex(pattern: &str) -> Result<Regex> {
    let mut expr = String::with_capacity(pattern.len() + 8);
    expr.push('^');
    for c in pattern.chars() {
        match c {
            '*' => expr.push_str(".*"),
            '?' => expr.push('.'),
            other => expr.push_str(&regex::escape(&other.to_string())),
        }
    }
    expr.push('$');
    Regex::new(&expr).map_err(|e| SalesError::Config(format!("invalid pattern {pattern:?}: {e}")))
}

/// Find the files directly inside `data_dir` whose names match `pattern`,
/// sorted by path.
pub fn find_sales_files(data_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = glob_to_regex(pattern)?;

    if !data_dir.is_dir() {
        warn!("Data directory does not exist: {}", data_dir.display());
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .file_name()
                    .to_str()
                    .map(|name| matcher.is_match(name))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    if files.is_empty() {
        return Err(SalesError::NoInputFiles {
            dir: data_dir.to_path_buf(),
            pattern: pattern.to_string(),
        });
    }

    files.sort();
    Ok(files)
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Read every row of one extract.
pub fn read_sales_file(path: &Path) -> Result<Vec<RawRow>> {
    let ingestion = |reason: String| SalesError::Ingestion {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|e| ingestion(format!("cannot open file: {e}")))?;
    let mut reader = csv::ReaderBuilder::new().from_reader(file);

    let headers: StringRecord = reader
        .headers()
        .map_err(|e| ingestion(format!("cannot read header: {e}")))?
        .iter()
        .map(normalize_header_name)
        .collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| format!("`{col}`"))
        .collect();
    if !missing.is_empty() {
        return Err(ingestion(format!("missing column(s): {}", missing.join(", "))));
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| ingestion(format!("CSV parse error: {e}")))?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or_default();
        let raw: RawSalesRecord = record
            .deserialize(Some(&headers))
            .map_err(|e| ingestion(format!("line {line}: {e}")))?;
        rows.push(RawRow {
            origin: RowOrigin {
                path: path.to_path_buf(),
                line,
            },
            record: raw,
        });
    }

    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Read and concatenate several extracts, in the order given.
pub fn read_sales_files(paths: &[PathBuf]) -> Result<Vec<RawRow>> {
    let mut all_rows = Vec::new();
    for path in paths {
        all_rows.extend(read_sales_file(path)?);
    }
    Ok(all_rows)
}

/// Spreadsheet exports sometimes carry a BOM or stray spaces on headers.
fn normalize_header_name(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').to_ascii_lowercase()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
