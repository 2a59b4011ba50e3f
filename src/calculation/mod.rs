//! Calculation logic for the Ferie Engine.
//!
//! This module contains lenient parsing of payroll figures, yearly
//! daily-rate resolution, the capped vacation-pay entitlement calculation,
//! and the fleet-wide aggregation built on top of it.

mod entitlement;
mod fleet;
mod parse;
mod yearly_rate;

pub use entitlement::{calculate_entitlement, calculate_records};
pub use fleet::calculate_fleet;
pub use parse::{amount_from_value, parse_amount};
pub use yearly_rate::{
    YearlyRate, average_daily_variable_pay, group_by_year, resolve_yearly_rate,
};
