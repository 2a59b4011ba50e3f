//! Capped vacation-pay entitlement calculation.
//!
//! This is the single implementation every consumer goes through: worker
//! detail, per-year breakdown and the fleet dashboard. It reads its
//! inputs only and never fails.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{
    EntitlementTotals, MonthEntitlement, MonthRecord, Profile, Worker, WorkerConfig,
    WorkerEntitlement, YearEntitlement,
};

use super::yearly_rate::{YearlyRate, group_by_year, resolve_yearly_rate};

fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Calculates the entitlement of a worker under the given flags.
///
/// # Examples
///
/// ```
/// use ferie_engine::calculation::calculate_entitlement;
/// use ferie_engine::models::{MonthRecord, Profile, Worker, WorkerConfig, WorkerStatus};
/// use rust_decimal::Decimal;
/// use serde_json::json;
///
/// let mut reference = MonthRecord::blank(2008, 0).with_column("0152", json!(2000));
/// reference.days_worked = Decimal::from(25);
///
/// let mut vacation = MonthRecord::blank(2009, 7);
/// vacation.days_vacation = Decimal::from(10);
///
/// let worker = Worker {
///     id: 1,
///     first_name: "Mario".to_string(),
///     last_name: "Rossi".to_string(),
///     role: String::new(),
///     grade: String::new(),
///     profile: Profile::Rfi,
///     accent_color: None,
///     status: WorkerStatus::None,
///     months: vec![reference, vacation],
/// };
///
/// let result = calculate_entitlement(&worker, &WorkerConfig::default());
/// assert_eq!(result.totals.gross, Decimal::from(800));
/// ```
pub fn calculate_entitlement(worker: &Worker, config: &WorkerConfig) -> WorkerEntitlement {
    calculate_records(worker.id, &worker.months, worker.profile, config)
}

/// Calculates the entitlement for a bare set of month records.
///
/// Records may be in any order and are never modified.
pub fn calculate_records(
    worker_id: u64,
    records: &[MonthRecord],
    profile: Profile,
    config: &WorkerConfig,
) -> WorkerEntitlement {
    let by_year = group_by_year(records);
    let ceiling = config.vacation_ceiling_days();

    let years: Vec<YearEntitlement> = by_year
        .iter()
        .filter(|(year, _)| **year >= config.start_claim_year)
        .map(|(year, months)| {
            let rate = resolve_yearly_rate(&by_year, *year, profile);
            calculate_year(*year, months, rate, ceiling, config.include_tickets)
        })
        .collect();

    let totals: EntitlementTotals = years.iter().map(|year| year.totals).sum();

    debug!(
        worker_id,
        profile = %profile,
        years = years.len(),
        useful_days = %totals.useful_days,
        net_owed = %totals.net_owed,
        "Entitlement calculated"
    );

    WorkerEntitlement {
        worker_id,
        profile,
        config: *config,
        years,
        totals,
    }
}

/// Walks one year's months in order, applying the annual ceiling.
///
/// The cumulative counter starts at zero and advances by the raw vacation
/// days reported, so once the ceiling is exhausted later months count
/// nothing.
fn calculate_year(
    year: i32,
    months: &[&MonthRecord],
    rate: YearlyRate,
    ceiling: Decimal,
    include_tickets: bool,
) -> YearEntitlement {
    let mut cumulative = Decimal::ZERO;
    let mut totals = EntitlementTotals::default();
    let mut details = Vec::with_capacity(months.len());

    for record in months {
        let days_vacation = non_negative(record.days_vacation);
        let remaining = non_negative(ceiling.saturating_sub(cumulative));
        let useful_days = days_vacation.min(remaining);
        let cumulative_before = cumulative;
        cumulative = cumulative.saturating_add(days_vacation);

        let mut month = MonthEntitlement {
            month_index: record.month_index,
            days_vacation,
            cumulative_before,
            cumulative_after: cumulative,
            useful_days,
            gross: Decimal::ZERO,
            already_received: Decimal::ZERO,
            ticket_value: Decimal::ZERO,
        };

        if useful_days > Decimal::ZERO {
            month.gross = useful_days.saturating_mul(rate.rate);
            month.already_received =
                useful_days.saturating_mul(non_negative(record.coeff_percepito));
            month.ticket_value = useful_days.saturating_mul(non_negative(record.coeff_ticket));

            let owed = month.gross.saturating_sub(month.already_received);
            totals.useful_days = totals.useful_days.saturating_add(useful_days);
            totals.gross = totals.gross.saturating_add(month.gross);
            totals.already_received = totals.already_received.saturating_add(month.already_received);
            totals.potential_ticket = totals.potential_ticket.saturating_add(month.ticket_value);

            if include_tickets {
                totals.net_owed = totals
                    .net_owed
                    .saturating_add(owed.saturating_add(month.ticket_value));
                totals.liquidated_ticket =
                    totals.liquidated_ticket.saturating_add(month.ticket_value);
            } else {
                totals.net_owed = totals.net_owed.saturating_add(owed);
            }
        }

        details.push(month);
    }

    YearEntitlement {
        year,
        daily_rate: rate.rate,
        rate_source: rate.source,
        vacation_days: cumulative,
        totals,
        months: details,
    }
}
