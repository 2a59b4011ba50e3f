//! Monthly payroll record model.
//!
//! A [`MonthRecord`] is one row of a worker's payroll history: the days
//! worked and taken as vacation in a month, the per-day coefficients, and
//! a variable set of pay-code columns whose keys depend on the employer
//! profile.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::calculation::amount_from_value;

use super::lenient;

/// Keys that live next to the pay codes but are never variable pay.
const FIXED_COLUMNS: &[&str] = &[
    "month",
    "total",
    "daysworked",
    "daysvacation",
    "ticket",
    "coeffpercepito",
    "coeffticket",
    "note",
    "arretrati",
];

/// Prefixes of derived columns (totals, arrears) kept out of variable pay.
const FIXED_COLUMN_PREFIXES: &[&str] = &["total", "arretrati"];

/// Returns true if a column key holds a variable-pay amount.
///
/// # Examples
///
/// ```
/// use ferie_engine::models::is_pay_code_column;
///
/// assert!(is_pay_code_column("0152"));
/// assert!(!is_pay_code_column("daysWorked"));
/// assert!(!is_pay_code_column("totaleVoci"));
/// assert!(!is_pay_code_column("arretrati2019"));
/// ```
pub fn is_pay_code_column(key: &str) -> bool {
    let key = key.trim().to_lowercase();
    !FIXED_COLUMNS.contains(&key.as_str())
        && !FIXED_COLUMN_PREFIXES
            .iter()
            .any(|prefix| key.starts_with(prefix))
}

/// One month of a worker's payroll history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthRecord {
    /// Calendar year.
    #[serde(default, deserialize_with = "lenient::year")]
    pub year: i32,
    /// Month of the year, 0 for January through 11 for December.
    #[serde(default, deserialize_with = "lenient::month_index")]
    pub month_index: u32,
    /// Display label for the month (e.g. "Gennaio").
    #[serde(default, deserialize_with = "lenient::text")]
    pub month: String,
    /// Days actually worked in the month.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub days_worked: Decimal,
    /// Vacation days taken in the month.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub days_vacation: Decimal,
    /// Per-day amount already paid as ordinary vacation pay.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub coeff_percepito: Decimal,
    /// Per-day meal-ticket value.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub coeff_ticket: Decimal,
    /// Free-form ticket notes, carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket: Option<Value>,
    /// Free-form notes, carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<Value>,
    /// Pay-code columns and any other extra keys, stored as received.
    #[serde(flatten)]
    pub columns: BTreeMap<String, Value>,
}

impl MonthRecord {
    /// Creates an empty record for the given month.
    pub fn blank(year: i32, month_index: u32) -> Self {
        Self {
            year,
            month_index,
            month: month_label(month_index).to_string(),
            days_worked: Decimal::ZERO,
            days_vacation: Decimal::ZERO,
            coeff_percepito: Decimal::ZERO,
            coeff_ticket: Decimal::ZERO,
            ticket: None,
            note: None,
            columns: BTreeMap::new(),
        }
    }

    /// Sets a pay-code column, returning the record for chaining.
    pub fn with_column(mut self, code: impl Into<String>, amount: Value) -> Self {
        self.columns.insert(code.into(), amount);
        self
    }

    /// Sum of the variable-pay columns of this month.
    ///
    /// Fixed columns such as totals and arrears are excluded; each value
    /// is parsed leniently. The sum saturates at the decimal bounds.
    pub fn variable_pay(&self) -> Decimal {
        self.columns
            .iter()
            .filter(|(key, _)| is_pay_code_column(key))
            .map(|(_, value)| amount_from_value(value))
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}

/// Italian label for a zero-based month index.
pub fn month_label(month_index: u32) -> &'static str {
    match month_index {
        0 => "Gennaio",
        1 => "Febbraio",
        2 => "Marzo",
        3 => "Aprile",
        4 => "Maggio",
        5 => "Giugno",
        6 => "Luglio",
        7 => "Agosto",
        8 => "Settembre",
        9 => "Ottobre",
        10 => "Novembre",
        11 => "Dicembre",
        _ => "",
    }
}
