//! Presentation-time formatting. Monetary values stay [`Decimal`] until they
//! reach one of these helpers.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format a decimal with thousands separators and a fixed number of decimal
/// places (midpoints round away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use sales_core::formatting::format_decimal;
///
/// assert_eq!(format_decimal(Decimal::new(12345, 1), 1), "1,234.5");
/// assert_eq!(format_decimal(Decimal::from(1234567), 0), "1,234,567");
/// assert_eq!(format_decimal(Decimal::ZERO, 2), "0.00");
/// assert_eq!(format_decimal(Decimal::new(-98765, 1), 1), "-9,876.5");
/// ```
pub fn format_decimal(value: Decimal, decimals: u32) -> String {
    let mut rounded =
        value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(decimals);

    let negative = rounded < Decimal::ZERO;
    let text = rounded.abs().to_string();
    let body = match text.split_once('.') {
        Some((int_part, frac_part)) => format!("{}.{}", group_thousands(int_part), frac_part),
        None => group_thousands(&text),
    };

    if negative {
        format!("-{body}")
    } else {
        body
    }
}

/// Format a monetary amount as USD with two decimal places.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use sales_core::formatting::format_currency;
///
/// assert_eq!(format_currency(Decimal::new(123456, 2)), "$1,234.56");
/// assert_eq!(format_currency(Decimal::ZERO), "$0.00");
/// assert_eq!(format_currency(Decimal::new(-999, 2)), "$-9.99");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    format!("${}", format_decimal(amount, 2))
}

/// Format a percentage change with an explicit sign, e.g. `"+12.34%"`.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use sales_core::formatting::format_percent_change;
///
/// assert_eq!(format_percent_change(Decimal::from(-50)), "-50.00%");
/// assert_eq!(format_percent_change(Decimal::new(1234, 2)), "+12.34%");
/// ```
pub fn format_percent_change(percent: Decimal) -> String {
    let text = format_decimal(percent, 2);
    if text.starts_with('-') {
        format!("{text}%")
    } else {
        format!("+{text}%")
    }
}

/// Lossy conversion for chart coordinates.
pub fn chart_value(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}
