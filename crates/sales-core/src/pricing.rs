//! Validated parsing of the monetary and quantity fields of a raw row.
//!
//! All currency handling lives here so that callers never do string surgery
//! on prices themselves.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::RowError;

/// Currency symbol stripped from the front of a raw price.
pub const CURRENCY_SYMBOL: char = '$';

/// Parse a currency-formatted price such as `"$3.50"`.
///
/// One leading `$` is stripped if present; the remainder must be a
/// non-negative decimal.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use sales_core::pricing::parse_price;
///
/// assert_eq!(parse_price("$3.50").unwrap(), Decimal::new(350, 2));
/// assert_eq!(parse_price("3").unwrap(), Decimal::from(3));
/// assert!(parse_price("$abc").is_err());
/// ```
pub fn parse_price(raw: &str) -> Result<Decimal, RowError> {
    let amount = raw.strip_prefix(CURRENCY_SYMBOL).unwrap_or(raw);
    let price =
        Decimal::from_str(amount).map_err(|_| RowError::MalformedPrice(raw.to_string()))?;
    if price < Decimal::ZERO {
        return Err(RowError::MalformedPrice(raw.to_string()));
    }
    Ok(price)
}

/// Parse a quantity, which must be a non-negative integer.
pub fn parse_quantity(raw: &str) -> Result<u64, RowError> {
    let quantity: i64 = raw
        .parse()
        .map_err(|_| RowError::InvalidQuantity(raw.to_string()))?;
    u64::try_from(quantity).map_err(|_| RowError::InvalidQuantity(raw.to_string()))
}

/// Derived sales amount for one row.
pub fn sales_amount(price: Decimal, quantity: u64) -> Result<Decimal, RowError> {
    price
        .checked_mul(Decimal::from(quantity))
        .ok_or_else(|| RowError::SalesOverflow(format!("{price} x {quantity}")))
}
