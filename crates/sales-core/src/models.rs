use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::RowError;

/// Sales region. The set is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    North,
    South,
    East,
    West,
}

impl Region {
    /// All regions in selector order.
    pub const ALL: [Region; 4] = [Region::North, Region::South, Region::East, Region::West];

    /// Lower-case name used in the artifact and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::North => "north",
            Region::South => "south",
            Region::East => "east",
            Region::West => "west",
        }
    }

    /// Capitalised label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Region::North => "North",
            Region::South => "South",
            Region::East => "East",
            Region::West => "West",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = RowError;

    /// Case-insensitive; surrounding whitespace is not accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| RowError::UnknownRegion(s.to_string()))
    }
}

// ── Raw input ────────────────────────────────────────────────────────────────

/// One row of a daily sales extract, fields kept as the text found in the
/// file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSalesRecord {
    pub product: String,
    pub quantity: String,
    pub price: String,
    pub date: String,
    pub region: String,
}

/// Where a raw row came from, for error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOrigin {
    pub path: PathBuf,
    /// 1-based line number, the header being line 1.
    pub line: usize,
}

impl fmt::Display for RowOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path.display(), self.line)
    }
}

/// A raw row together with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub origin: RowOrigin,
    pub record: RawSalesRecord,
}

// ── Normalized data ──────────────────────────────────────────────────────────

/// A cleaned sales row. Field order is the artifact column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// `price * quantity`, never negative.
    #[serde(with = "rust_decimal::serde::str")]
    pub sales: Decimal,
    pub date: NaiveDate,
    pub region: Region,
}

/// Sum of sales across all regions for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total_sales: Decimal,
}

/// Anything that carries a sales amount on a date.
pub trait SalesPoint {
    fn date(&self) -> NaiveDate;
    fn sales(&self) -> Decimal;
}

impl SalesPoint for SalesRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn sales(&self) -> Decimal {
        self.sales
    }
}

impl SalesPoint for DailyTotal {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn sales(&self) -> Decimal {
        self.total_sales
    }
}

// ── Region selector ──────────────────────────────────────────────────────────

/// Sentinel selector value meaning "no region restriction".
pub const ALL_REGIONS: &str = "all";

/// The five selector values offered by the dashboard, default first.
pub const SELECTOR_OPTIONS: [&str; 5] = [ALL_REGIONS, "north", "south", "east", "west"];

/// A parsed region selector.
///
/// Unknown selector values are kept as [`RegionFilter::Unmatched`] rather than
/// rejected; they simply select nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionFilter {
    All,
    Only(Region),
    Unmatched(String),
}

impl RegionFilter {
    /// Parse a selector value, case-insensitively.
    pub fn parse(selector: &str) -> Self {
        if selector.eq_ignore_ascii_case(ALL_REGIONS) {
            return RegionFilter::All;
        }
        match selector.parse::<Region>() {
            Ok(region) => RegionFilter::Only(region),
            Err(_) => RegionFilter::Unmatched(selector.to_string()),
        }
    }

    /// Whether `region` passes this filter.
    pub fn matches(&self, region: Region) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Only(r) => *r == region,
            RegionFilter::Unmatched(_) => false,
        }
    }

    /// Display label, e.g. `"All Regions"` or `"North"`.
    pub fn label(&self) -> String {
        match self {
            RegionFilter::All => "All Regions".to_string(),
            RegionFilter::Only(r) => r.label().to_string(),
            RegionFilter::Unmatched(s) => s.clone(),
        }
    }
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionFilter::All => f.write_str(ALL_REGIONS),
            RegionFilter::Only(r) => write!(f, "{r}"),
            RegionFilter::Unmatched(s) => f.write_str(s),
        }
    }
}

// ── Summary ──────────────────────────────────────────────────────────────────

/// Mean sales before and after a cutoff date, and the relative change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeforeAfterSummary {
    pub before: Decimal,
    pub after: Decimal,
    /// `(after - before) / before * 100`.
    pub percent_change: Decimal,
}

impl BeforeAfterSummary {
    pub fn is_increase(&self) -> bool {
        self.percent_change > Decimal::ZERO
    }
}

// ── Row error policy ─────────────────────────────────────────────────────────

/// What ingestion does with a row that fails cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowErrorPolicy {
    /// Abort the whole run on the first bad row.
    #[default]
    Fail,
    /// Drop the row, log it and keep going.
    Skip,
}

impl FromStr for RowErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fail" => Ok(RowErrorPolicy::Fail),
            "skip" => Ok(RowErrorPolicy::Skip),
            other => Err(format!("unknown row error policy: {other}")),
        }
    }
}
