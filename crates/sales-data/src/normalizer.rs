//! Product filtering, field cleaning and sales derivation.
//!
//! Only rows whose product matches the target are cleaned; everything else is
//! dropped before validation. The result is stably sorted by date.

use tracing::warn;

use sales_core::error::{Result, RowError, SalesError};
use sales_core::models::{RawRow, RawSalesRecord, RowErrorPolicy, SalesRecord};
use sales_core::pricing::{parse_price, parse_quantity, sales_amount};
use sales_core::time_utils::parse_date;

/// Outcome of normalizing a batch of raw rows.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    /// Cleaned records, ascending by date.
    pub records: Vec<SalesRecord>,
    /// Rows whose product matched the target.
    pub rows_matched: usize,
    /// Matching rows dropped under [`RowErrorPolicy::Skip`].
    pub rows_skipped: usize,
}

/// Case-insensitive exact product match. No trimming.
pub fn matches_product(product: &str, target: &str) -> bool {
    product.to_lowercase() == target.to_lowercase()
}

/// Clean one raw row into a [`SalesRecord`].
pub fn normalize_record(raw: &RawSalesRecord) -> std::result::Result<SalesRecord, RowError> {
    let price = parse_price(&raw.price)?;
    let quantity = parse_quantity(&raw.quantity)?;
    let date = parse_date(&raw.date)?;
    let region = raw.region.parse()?;

    Ok(SalesRecord {
        sales: sales_amount(price, quantity)?,
        date,
        region,
    })
}

/// Filter `rows` to `target_product`, clean the survivors and sort them by
/// date.
///
/// Under [`RowErrorPolicy::Fail`] the first bad row aborts with
/// [`SalesError::InvalidRow`]; under [`RowErrorPolicy::Skip`] it is logged and
/// counted.
pub fn normalize(rows: &[RawRow], target_product: &str, policy: RowErrorPolicy) -> Result<Normalized> {
    let mut out = Normalized::default();

    for row in rows
        .iter()
        .filter(|row| matches_product(&row.record.product, target_product))
    {
        out.rows_matched += 1;
        match normalize_record(&row.record) {
            Ok(record) => out.records.push(record),
            Err(error) => match policy {
                RowErrorPolicy::Fail => {
                    return Err(SalesError::InvalidRow {
                        path: row.origin.path.clone(),
                        line: row.origin.line,
                        error,
                    });
                }
                RowErrorPolicy::Skip => {
                    warn!("Skipping row {}: {}", row.origin, error);
                    out.rows_skipped += 1;
                }
            },
        }
    }

    out.records.sort_by_key(|r| r.date);
    Ok(out)
}
