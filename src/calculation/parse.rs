//! Lenient numeric parsing for payroll figures.
//!
//! Payroll values arrive as JSON numbers, Italian-locale strings
//! (`"1.234,56"`), plain decimal strings (`"1234.56"`), empty strings,
//! `null`, or not at all. Everything here degrades to zero instead of
//! failing.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde_json::Value;

/// Parses a payroll amount written by hand or exported from a spreadsheet.
///
/// When a comma is present it is the decimal separator and dots are
/// thousands separators (Italian locale), unless the dot comes last, in
/// which case the roles swap. Without a comma a single dot is a decimal
/// point and repeated dots are thousands separators. Apostrophes are
/// Swiss-style thousands separators (`"1'234.50"`) and are dropped along
/// with whitespace and the euro sign.
///
/// Anything unparseable yields zero.
///
/// # Examples
///
/// ```
/// use ferie_engine::calculation::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount("1.234,56"), Decimal::new(123456, 2));
/// assert_eq!(parse_amount("1234.56"), Decimal::new(123456, 2));
/// assert_eq!(parse_amount(""), Decimal::ZERO);
/// assert_eq!(parse_amount("n/d"), Decimal::ZERO);
/// ```
pub fn parse_amount(raw: &str) -> Decimal {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '€' && *c != '\'')
        .collect();

    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    let last_comma = cleaned.rfind(',');
    let last_dot = cleaned.rfind('.');

    let normalized = match (last_comma, last_dot) {
        (Some(comma), Some(dot)) if dot > comma => cleaned.replace(',', ""),
        (Some(_), _) => cleaned.replace('.', "").replace(',', "."),
        (None, Some(_)) if cleaned.matches('.').count() > 1 => cleaned.replace('.', ""),
        _ => cleaned,
    };

    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .unwrap_or(Decimal::ZERO)
}

/// Converts an arbitrary JSON value into an amount.
///
/// Numbers convert exactly where their textual form allows, strings go
/// through [`parse_amount`], and every other shape is zero.
pub fn amount_from_value(value: &Value) -> Decimal {
    match value {
        Value::Number(number) => {
            let text = number.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
                .or_else(|| number.as_f64().and_then(Decimal::from_f64))
                .unwrap_or(Decimal::ZERO)
        }
        Value::String(text) => parse_amount(text),
        _ => Decimal::ZERO,
    }
}
