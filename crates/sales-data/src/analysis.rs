//! Before/after comparison and the dashboard view model.
//!
//! [`dashboard_view`] is the whole per-request computation: the UI passes the
//! loaded snapshot and its current selector and gets back everything it
//! draws. Nothing is cached between calls.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use sales_core::error::{Result, SalesError};
use sales_core::models::{BeforeAfterSummary, DailyTotal, RegionFilter, SalesPoint, SalesRecord};

use crate::aggregator::{RegionSeries, SalesAggregator};

// ── Before/after ──────────────────────────────────────────────────────────────

/// Mean sales strictly before `cutoff` against mean sales on or after it.
///
/// Fails with [`SalesError::InsufficientData`] when either side is empty or
/// the baseline mean is zero, and with [`SalesError::Overflow`] when a sum or
/// the percentage does not fit in a decimal.
pub fn before_after_summary<P: SalesPoint>(points: &[P], cutoff: NaiveDate) -> Result<BeforeAfterSummary> {
    let (before, after): (Vec<&P>, Vec<&P>) = points.iter().partition(|p| p.date() < cutoff);

    let before = mean(&before)?
        .ok_or_else(|| SalesError::InsufficientData(format!("no sales before {cutoff}")))?;
    let after = mean(&after)?
        .ok_or_else(|| SalesError::InsufficientData(format!("no sales on or after {cutoff}")))?;

    if before.is_zero() {
        return Err(SalesError::InsufficientData(format!(
            "average sales before {cutoff} is zero"
        )));
    }

    let percent_change = after
        .checked_sub(before)
        .and_then(|delta| delta.checked_div(before))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| {
            SalesError::Overflow(format!("percent change from {before} to {after}"))
        })?;

    Ok(BeforeAfterSummary {
        before,
        after,
        percent_change,
    })
}

/// `None` for an empty side.
fn mean<P: SalesPoint>(points: &[&P]) -> Result<Option<Decimal>> {
    if points.is_empty() {
        return Ok(None);
    }
    let sum = points
        .iter()
        .try_fold(Decimal::ZERO, |acc, p| acc.checked_add(p.sales()))
        .ok_or_else(|| SalesError::Overflow("sum of sales".to_string()))?;
    Ok(Some(sum / Decimal::from(points.len())))
}

// ── Dashboard view ────────────────────────────────────────────────────────────

/// Everything the dashboard shows for one selector value.
#[derive(Debug)]
pub struct DashboardView {
    pub filter: RegionFilter,
    /// Daily totals of the selected region(s).
    pub totals: Vec<DailyTotal>,
    /// Per-region breakdown of the full snapshot.
    pub regions: Vec<RegionSeries>,
    /// Average daily sales before/after the cutoff for the selection.
    pub summary: Result<BeforeAfterSummary>,
}

/// Recompute the dashboard for `filter` from `snapshot`.
pub fn dashboard_view(snapshot: &[SalesRecord], filter: &RegionFilter, cutoff: NaiveDate) -> DashboardView {
    let selected = SalesAggregator::filter(snapshot, filter);
    let (totals, summary) = match SalesAggregator::daily_totals(&selected) {
        Ok(totals) => {
            let summary = before_after_summary(&totals, cutoff);
            (totals, summary)
        }
        Err(e) => (Vec::new(), Err(e)),
    };

    DashboardView {
        filter: filter.clone(),
        totals,
        regions: SalesAggregator::series_by_region(snapshot),
        summary,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
