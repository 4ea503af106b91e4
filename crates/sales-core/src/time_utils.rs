use chrono::NaiveDate;

use crate::error::RowError;

/// Date format used by the raw extracts and the artifact.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, RowError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| RowError::MalformedDate(raw.to_string()))
}

/// Long human form, e.g. `"January 15, 2021"`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Short human form, e.g. `"Jan 15, 2021"`.
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Day index used as a chart x coordinate.
pub fn day_number(date: NaiveDate) -> f64 {
    use chrono::Datelike;
    f64::from(date.num_days_from_ce())
}

/// Inverse of [`day_number`], for axis labels.
pub fn date_from_day_number(day: f64) -> Option<NaiveDate> {
    let day = day.round();
    if !day.is_finite() || day < f64::from(i32::MIN) || day > f64::from(i32::MAX) {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(day as i32)
}
