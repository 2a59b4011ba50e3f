//! Entitlement result models.
//!
//! These types carry the output of the entitlement calculator at three
//! levels of detail: per month, per year and per worker, plus the
//! fleet-wide summary shown on the dashboard. All amounts are plain
//! decimals; formatting is left to the caller.

use std::collections::BTreeMap;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Profile, WorkerConfig, WorkerStatus};

/// Where a year's daily variable-pay rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    /// Averaged over the previous year's worked months.
    PreviousYear,
    /// The previous year had no usable data; averaged over the year itself.
    SameYear,
    /// Neither year had days worked; the rate is zero.
    Unavailable,
}

/// The calculation for a single month record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthEntitlement {
    /// Zero-based month index.
    pub month_index: u32,
    /// Vacation days reported for the month.
    pub days_vacation: Decimal,
    /// Vacation days taken earlier in the same year.
    pub cumulative_before: Decimal,
    /// Vacation days taken up to and including this month.
    pub cumulative_after: Decimal,
    /// Vacation days that fit under the annual ceiling.
    pub useful_days: Decimal,
    /// `useful_days * daily_rate`.
    pub gross: Decimal,
    /// `useful_days * coeff_percepito`.
    pub already_received: Decimal,
    /// `useful_days * coeff_ticket`.
    pub ticket_value: Decimal,
}

/// Aggregated amounts, summed across months, years or workers.
///
/// Addition saturates at the decimal bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementTotals {
    /// Vacation days counted under the ceiling.
    pub useful_days: Decimal,
    /// Variable pay attributable to the useful days.
    pub gross: Decimal,
    /// Amount already paid for the useful days.
    pub already_received: Decimal,
    /// Net amount owed, including ticket value when enabled.
    pub net_owed: Decimal,
    /// Ticket value folded into `net_owed`.
    pub liquidated_ticket: Decimal,
    /// Ticket value that would be owed if tickets were included.
    pub potential_ticket: Decimal,
}

impl Add for EntitlementTotals {
    type Output = EntitlementTotals;

    fn add(mut self, other: EntitlementTotals) -> EntitlementTotals {
        self += other;
        self
    }
}

impl AddAssign for EntitlementTotals {
    fn add_assign(&mut self, other: EntitlementTotals) {
        self.useful_days = self.useful_days.saturating_add(other.useful_days);
        self.gross = self.gross.saturating_add(other.gross);
        self.already_received = self.already_received.saturating_add(other.already_received);
        self.net_owed = self.net_owed.saturating_add(other.net_owed);
        self.liquidated_ticket = self.liquidated_ticket.saturating_add(other.liquidated_ticket);
        self.potential_ticket = self.potential_ticket.saturating_add(other.potential_ticket);
    }
}

impl Sum for EntitlementTotals {
    fn sum<I: Iterator<Item = EntitlementTotals>>(iter: I) -> Self {
        iter.fold(EntitlementTotals::default(), Add::add)
    }
}

/// The calculation for one calendar year of one worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearEntitlement {
    /// Calendar year.
    pub year: i32,
    /// Daily variable-pay rate applied to this year's vacation days.
    pub daily_rate: Decimal,
    /// Which year the rate was averaged over.
    pub rate_source: RateSource,
    /// Vacation days actually taken in the year, uncapped.
    pub vacation_days: Decimal,
    /// Amounts for the year.
    pub totals: EntitlementTotals,
    /// Per-month detail in chronological order.
    pub months: Vec<MonthEntitlement>,
}

/// The full entitlement of one worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerEntitlement {
    /// The worker's id.
    pub worker_id: u64,
    /// The profile used to select pay-code columns.
    pub profile: Profile,
    /// The flags the calculation ran with.
    pub config: WorkerConfig,
    /// Included years in ascending order.
    pub years: Vec<YearEntitlement>,
    /// Sum over all included years.
    pub totals: EntitlementTotals,
}

impl WorkerEntitlement {
    /// Returns the breakdown for a given year, if it was included.
    pub fn year(&self, year: i32) -> Option<&YearEntitlement> {
        self.years.iter().find(|y| y.year == year)
    }
}

/// Dashboard figures across all workers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetSummary {
    /// Number of workers included.
    pub worker_count: usize,
    /// Number of workers per workflow status.
    pub status_counts: BTreeMap<String, usize>,
    /// Sum of every worker's totals.
    pub totals: EntitlementTotals,
    /// Each worker's entitlement, ordered by worker id.
    pub workers: Vec<WorkerEntitlement>,
}

impl FleetSummary {
    /// The key a status is counted under in `status_counts`.
    pub(crate) fn status_key(status: WorkerStatus) -> String {
        match serde_json::to_value(status) {
            Ok(serde_json::Value::String(key)) => key,
            _ => "none".to_string(),
        }
    }
}
