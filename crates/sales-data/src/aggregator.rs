//! Grouping and filtering over a normalized record snapshot.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use sales_core::error::{Result, SalesError};
use sales_core::models::{DailyTotal, Region, RegionFilter, SalesRecord};

// ── RegionSeries ──────────────────────────────────────────────────────────────

/// Date-ordered sales for one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSeries {
    pub region: Region,
    /// `(date, sales)` pairs in date order, one per record.
    pub points: Vec<(NaiveDate, Decimal)>,
}

// ── SalesAggregator ───────────────────────────────────────────────────────────

/// Stateless helper that groups and filters sales records.
pub struct SalesAggregator;

impl SalesAggregator {
    /// Total sales per date across all regions, ascending by date.
    ///
    /// Fails with [`SalesError::Overflow`] when a day's total does not fit in
    /// a decimal.
    pub fn daily_totals(records: &[SalesRecord]) -> Result<Vec<DailyTotal>> {
        let mut map: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
        for record in records {
            let total = map.entry(record.date).or_default();
            *total = total
                .checked_add(record.sales)
                .ok_or_else(|| SalesError::Overflow(format!("daily total for {}", record.date)))?;
        }
        Ok(map
            .into_iter()
            .map(|(date, total_sales)| DailyTotal { date, total_sales })
            .collect())
    }

    /// One series per region present, regions ordered by name.
    pub fn series_by_region(records: &[SalesRecord]) -> Vec<RegionSeries> {
        let mut series: Vec<RegionSeries> = Vec::new();
        for record in records {
            let point = (record.date, record.sales);
            match series.iter_mut().find(|s| s.region == record.region) {
                Some(existing) => existing.points.push(point),
                None => series.push(RegionSeries {
                    region: record.region,
                    points: vec![point],
                }),
            }
        }

        for s in &mut series {
            s.points.sort_by_key(|(date, _)| *date);
        }
        series.sort_by_key(|s| s.region.as_str());
        series
    }

    /// Apply a region selector. `"all"` keeps everything; an unknown value
    /// selects nothing rather than failing.
    pub fn filter_by_region(records: &[SalesRecord], selector: &str) -> Vec<SalesRecord> {
        Self::filter(records, &RegionFilter::parse(selector))
    }

    /// Apply an already-parsed region filter.
    pub fn filter(records: &[SalesRecord], filter: &RegionFilter) -> Vec<SalesRecord> {
        if let RegionFilter::Unmatched(value) = filter {
            debug!("Region selector {value:?} matches no region");
        }
        records
            .iter()
            .filter(|r| filter.matches(r.region))
            .copied()
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
