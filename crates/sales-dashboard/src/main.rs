mod bootstrap;

use std::fmt::Write as _;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use sales_core::formatting::{format_currency, format_percent_change};
use sales_core::models::{RegionFilter, SalesRecord};
use sales_core::settings::{LastUsedParams, Settings};
use sales_core::time_utils::format_long_date;
use sales_data::analysis::{dashboard_view, DashboardView};
use sales_data::artifact::load_artifact;
use sales_data::pipeline::{run_ingestion, IngestConfig, IngestReport};
use sales_ui::app::App;

/// Rows echoed after a `process` run.
const PREVIEW_ROWS: usize = 10;

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    let log_file = bootstrap::resolve_log_file(&settings.view, settings.log_file.as_deref());
    bootstrap::setup_logging(&settings.log_level, log_file.as_deref())?;

    tracing::info!("Sales Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "View: {}, Product: {}, Cutoff: {}, Region: {}",
        settings.view,
        settings.product,
        settings.cutoff,
        settings.region
    );

    match settings.view.as_str() {
        "process" => {
            let config = IngestConfig {
                data_dir: settings.data_dir.clone(),
                pattern: settings.pattern.clone(),
                product: settings.product.clone(),
                output: settings.output.clone(),
                policy: settings.row_error_policy(),
            };
            let report = run_ingestion(&config)?;
            print!("{}", process_report(&report));
        }

        "summary" => {
            let snapshot = load_snapshot(&settings)?;
            let view = dashboard_view(&snapshot, &settings.region_filter(), settings.cutoff);
            print!("{}", summary_report(&view, &settings.product, settings.cutoff));
        }

        "dashboard" => {
            let snapshot = load_snapshot(&settings)?;
            let app = App::new(
                &settings.theme,
                settings.product.clone(),
                settings.cutoff,
                snapshot,
                &settings.region_filter(),
            );

            let final_filter = app.run()?;
            remember_region(&final_filter);
        }

        unknown => {
            eprintln!("Unknown view mode: {}", unknown);
        }
    }

    Ok(())
}

fn load_snapshot(settings: &Settings) -> Result<Vec<SalesRecord>> {
    load_artifact(&settings.output).with_context(|| {
        format!(
            "could not load {}; run with `--view process` first",
            settings.output.display()
        )
    })
}

/// Persist the region the dashboard was left on.
fn remember_region(filter: &RegionFilter) {
    let path = LastUsedParams::config_path();
    let mut last = LastUsedParams::load_from(&path);
    last.region = Some(filter.to_string());
    if let Err(e) = last.save_to(&path) {
        tracing::warn!("Failed to persist {}: {}", path.display(), e);
    }
}

fn process_report(report: &IngestReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Processed {} file(s):", report.files.len());
    for file in &report.files {
        let _ = writeln!(out, "  {}", file.display());
    }
    let _ = writeln!(
        out,
        "Rows read: {}, matched: {}, skipped: {}",
        report.rows_read, report.rows_matched, report.rows_skipped
    );
    let _ = writeln!(
        out,
        "Wrote {} record(s) to {} in {:.2}s",
        report.records.len(),
        report.output.display(),
        report.elapsed_seconds
    );

    if !report.records.is_empty() {
        let _ = writeln!(out, "\n{:>12}  {:<10}  region", "sales", "date");
        for record in report.records.iter().take(PREVIEW_ROWS) {
            let _ = writeln!(
                out,
                "{:>12}  {:<10}  {}",
                format_currency(record.sales),
                record.date,
                record.region
            );
        }
        if report.records.len() > PREVIEW_ROWS {
            let _ = writeln!(out, "  ... {} more", report.records.len() - PREVIEW_ROWS);
        }
    }
    out
}

fn summary_report(view: &DashboardView, product: &str, cutoff: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} sales, {}", product.to_uppercase(), view.filter.label());
    let _ = writeln!(out, "Price increase: {}", format_long_date(cutoff));

    match &view.summary {
        Ok(s) => {
            let _ = writeln!(out, "Average daily sales before: {}", format_currency(s.before));
            let _ = writeln!(out, "Average daily sales after:  {}", format_currency(s.after));
            let _ = writeln!(out, "Change:                     {}", format_percent_change(s.percent_change));
        }
        Err(e) if e.is_insufficient_data() => {
            let _ = writeln!(out, "Not enough data on both sides of the cutoff ({e})");
        }
        Err(e) => {
            let _ = writeln!(out, "Error: {e}");
        }
    }
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────
