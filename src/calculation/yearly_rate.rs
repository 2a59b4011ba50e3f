//! Daily variable-pay rate resolution.
//!
//! Variable pay reaches the payslip a month late, so the money a vacation
//! day in year Y should have carried is anchored to the average daily
//! variable pay of year Y-1. When Y-1 has nothing usable the year's own
//! average is used instead.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{MonthRecord, Profile, RateSource};

/// The daily rate applied to one year's vacation days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearlyRate {
    /// Variable pay per day worked.
    pub rate: Decimal,
    /// Which year the average came from.
    pub source: RateSource,
}

/// Groups records by year, each year sorted by month index.
///
/// The sort is stable, so duplicate months keep their input order.
pub fn group_by_year(records: &[MonthRecord]) -> BTreeMap<i32, Vec<&MonthRecord>> {
    let mut by_year: BTreeMap<i32, Vec<&MonthRecord>> = BTreeMap::new();
    for record in records {
        by_year.entry(record.year).or_default().push(record);
    }
    for months in by_year.values_mut() {
        months.sort_by_key(|record| record.month_index);
    }
    by_year
}

/// Average variable pay per day worked across the months of one year.
///
/// Only months with `days_worked > 0` contribute to either sum. Returns
/// zero when no day was worked or the profile is not recognised.
pub fn average_daily_variable_pay(months: &[&MonthRecord], profile: Profile) -> Decimal {
    if !profile.is_known() {
        return Decimal::ZERO;
    }

    let (pay, days) = months
        .iter()
        .filter(|record| record.days_worked > Decimal::ZERO)
        .fold((Decimal::ZERO, Decimal::ZERO), |(pay, days), record| {
            (
                pay.saturating_add(record.variable_pay()),
                days.saturating_add(record.days_worked),
            )
        });

    if days.is_zero() {
        return Decimal::ZERO;
    }

    pay.checked_div(days).unwrap_or(Decimal::ZERO)
}

/// Resolves the daily rate for `year`.
///
/// # Examples
///
/// ```
/// use ferie_engine::calculation::{group_by_year, resolve_yearly_rate};
/// use ferie_engine::models::{MonthRecord, Profile, RateSource};
/// use rust_decimal::Decimal;
/// use serde_json::json;
///
/// let mut previous = MonthRecord::blank(2008, 0).with_column("0152", json!(2000));
/// previous.days_worked = Decimal::from(25);
/// let records = vec![previous, MonthRecord::blank(2009, 0)];
///
/// let by_year = group_by_year(&records);
/// let rate = resolve_yearly_rate(&by_year, 2009, Profile::Rfi);
/// assert_eq!(rate.rate, Decimal::from(80));
/// assert_eq!(rate.source, RateSource::PreviousYear);
/// ```
pub fn resolve_yearly_rate(
    by_year: &BTreeMap<i32, Vec<&MonthRecord>>,
    year: i32,
    profile: Profile,
) -> YearlyRate {
    let previous = year
        .checked_sub(1)
        .and_then(|previous_year| by_year.get(&previous_year))
        .map(|months| average_daily_variable_pay(months, profile))
        .unwrap_or(Decimal::ZERO);

    if !previous.is_zero() {
        return YearlyRate {
            rate: previous,
            source: RateSource::PreviousYear,
        };
    }

    let own = by_year
        .get(&year)
        .map(|months| average_daily_variable_pay(months, profile))
        .unwrap_or(Decimal::ZERO);

    if !own.is_zero() {
        return YearlyRate {
            rate: own,
            source: RateSource::SameYear,
        };
    }

    YearlyRate {
        rate: Decimal::ZERO,
        source: RateSource::Unavailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn month(year: i32, index: u32, worked: &str, pay: i64) -> MonthRecord {
        let mut record = MonthRecord::blank(year, index).with_column("0152", json!(pay));
        record.days_worked = dec(worked);
        record
    }

    #[test]
    fn test_group_by_year_sorts_months() {
        let records = vec![
            month(2010, 5, "20", 0),
            month(2009, 11, "20", 0),
            month(2010, 0, "20", 0),
            month(2010, 3, "20", 0),
        ];

        let by_year = group_by_year(&records);
        assert_eq!(by_year.keys().copied().collect::<Vec<_>>(), vec![2009, 2010]);
        let indexes: Vec<u32> = by_year[&2010].iter().map(|r| r.month_index).collect();
        assert_eq!(indexes, vec![0, 3, 5]);
    }

    #[test]
    fn test_average_skips_months_without_days_worked() {
        let records = vec![
            month(2010, 0, "20", 1000),
            month(2010, 1, "0", 5000),
            month(2010, 2, "30", 1500),
        ];
        let refs: Vec<&MonthRecord> = records.iter().collect();

        // (1000 + 1500) / (20 + 30)
        assert_eq!(average_daily_variable_pay(&refs, Profile::Rfi), dec("50"));
    }

    #[test]
    fn test_average_is_zero_without_days_worked() {
        let records = vec![month(2010, 0, "0", 1000)];
        let refs: Vec<&MonthRecord> = records.iter().collect();
        assert_eq!(average_daily_variable_pay(&refs, Profile::Rfi), Decimal::ZERO);
    }

    #[test]
    fn test_average_is_zero_for_unknown_profile() {
        let records = vec![month(2010, 0, "20", 1000)];
        let refs: Vec<&MonthRecord> = records.iter().collect();
        assert_eq!(
            average_daily_variable_pay(&refs, Profile::Unknown),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_rate_uses_previous_year() {
        let records = vec![month(2008, 0, "25", 2000), month(2009, 0, "20", 2000)];
        let by_year = group_by_year(&records);

        let rate = resolve_yearly_rate(&by_year, 2009, Profile::Rfi);
        assert_eq!(rate.rate, dec("80"));
        assert_eq!(rate.source, RateSource::PreviousYear);
    }

    #[test]
    fn test_rate_falls_back_to_same_year_when_previous_missing() {
        let records = vec![month(2009, 0, "20", 2000)];
        let by_year = group_by_year(&records);

        let rate = resolve_yearly_rate(&by_year, 2009, Profile::Rfi);
        assert_eq!(rate.rate, dec("100"));
        assert_eq!(rate.source, RateSource::SameYear);
    }

    #[test]
    fn test_rate_falls_back_to_same_year_when_previous_is_zero() {
        let records = vec![month(2008, 0, "0", 2000), month(2009, 0, "20", 2000)];
        let by_year = group_by_year(&records);

        let rate = resolve_yearly_rate(&by_year, 2009, Profile::Rfi);
        assert_eq!(rate.rate, dec("100"));
        assert_eq!(rate.source, RateSource::SameYear);
    }

    #[test]
    fn test_rate_unavailable_when_no_days_worked_anywhere() {
        let records = vec![month(2009, 0, "0", 2000)];
        let by_year = group_by_year(&records);

        let rate = resolve_yearly_rate(&by_year, 2009, Profile::Rfi);
        assert_eq!(rate.rate, Decimal::ZERO);
        assert_eq!(rate.source, RateSource::Unavailable);
    }
}
