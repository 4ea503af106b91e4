use std::path::PathBuf;
use thiserror::Error;

/// A single raw row that could not be cleaned into a [`SalesRecord`].
///
/// [`SalesRecord`]: crate::models::SalesRecord
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    /// The price was not a `$`-prefixed non-negative decimal.
    #[error("Malformed price: {0:?}")]
    MalformedPrice(String),

    /// The quantity was negative or not an integer.
    #[error("Invalid quantity: {0:?}")]
    InvalidQuantity(String),

    /// The date was not in `YYYY-MM-DD` form.
    #[error("Malformed date: {0:?}")]
    MalformedDate(String),

    /// The region is not one of north/south/east/west.
    #[error("Unknown region: {0:?}")]
    UnknownRegion(String),

    /// `price * quantity` does not fit in a decimal.
    #[error("Sales amount overflows: {0}")]
    SalesOverflow(String),
}

/// All errors produced by the sales pipeline and dashboard.
#[derive(Error, Debug)]
pub enum SalesError {
    /// A source extract could not be opened or parsed as a whole.
    #[error("Failed to ingest {path}: {reason}")]
    Ingestion { path: PathBuf, reason: String },

    /// File discovery matched nothing.
    #[error("No files matching {pattern:?} found in {dir}")]
    NoInputFiles { dir: PathBuf, pattern: String },

    /// A row failed cleaning and the run is configured to fail on row errors.
    #[error("Invalid row at {path}:{line}: {error}")]
    InvalidRow {
        path: PathBuf,
        line: usize,
        #[source]
        error: RowError,
    },

    /// A before/after comparison has an empty side or a zero baseline.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// The normalized artifact is missing, unreadable, unwritable or has the
    /// wrong schema.
    #[error("Artifact error at {path}: {reason}")]
    Artifact { path: PathBuf, reason: String },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A sum or ratio over valid sales does not fit in a decimal.
    #[error("Arithmetic overflow: {0}")]
    Overflow(String),
}

impl SalesError {
    /// Whether this error means "not enough data to compare" rather than a
    /// genuine failure.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, SalesError::InsufficientData(_))
    }
}

/// Convenience alias used throughout the sales crates.
pub type Result<T> = std::result::Result<T, SalesError>;
