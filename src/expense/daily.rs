use chrono::{Datelike, NaiveDate};
use tracing::warn;

use super::calendar::{day_key, split_iso_date, MonthKey};
use super::record::ExpenseRecord;
use super::recurrence::{normalize, Frequency, Recurrence};

/// Nominal per-day share of a recurrence for the month containing `on`,
/// before any override. No rounding happens at the daily level.
pub fn base_daily_amount(record: &ExpenseRecord, on: NaiveDate) -> f64 {
    let recurrence = normalize(record);
    daily_share(record.amount, &recurrence, MonthKey::from(on))
}

/// The month-agnostic "distributed evenly" notion used by projections that
/// have no particular calendar month in hand. The formulas intentionally
/// match [`base_daily_amount`] for the month of `as_of`; the two names exist
/// because callers mean different things by them, not because the numbers
/// differ.
pub fn average_daily_amount(record: &ExpenseRecord, as_of: NaiveDate) -> f64 {
    let recurrence = normalize(record);
    daily_share(record.amount, &recurrence, MonthKey::from(as_of))
}

pub(crate) fn daily_share(amount: f64, recurrence: &Recurrence, month: MonthKey) -> f64 {
    match recurrence.frequency {
        Frequency::Daily => amount,
        Frequency::Weekly => amount / 7.0,
        Frequency::Monthly => amount / month.days() as f64,
        Frequency::Yearly => amount / 365.0,
        Frequency::Custom => amount / recurrence.interval.max(1) as f64,
        // Unknown frequencies take the monthly formula.
        Frequency::Other(_) => amount / month.days() as f64,
    }
}

/// Per-day amount with the month-scoped override applied.
///
/// The month and day are read from the ISO string by substring; constructing
/// a date from a date-only string and reading the day back can shift it by a
/// local-timezone offset. A malformed date contributes `0.0`.
pub fn adjusted_amount_for_date(record: &ExpenseRecord, iso_date: &str) -> f64 {
    let Some((month, day_token)) = split_iso_date(iso_date) else {
        warn!(date = iso_date, "unparseable date, contributing nothing");
        return 0.0;
    };
    let recurrence = normalize(record);
    adjusted_share(record.amount, &recurrence, month, &day_token)
}

/// Typed sibling of [`adjusted_amount_for_date`], used by day iteration.
pub fn adjusted_amount_on(record: &ExpenseRecord, date: NaiveDate) -> f64 {
    let recurrence = normalize(record);
    adjusted_share(
        record.amount,
        &recurrence,
        MonthKey::from(date),
        &day_key(date.day()),
    )
}

pub(crate) fn adjusted_share(
    amount: f64,
    recurrence: &Recurrence,
    month: MonthKey,
    day_token: &str,
) -> f64 {
    let base = daily_share(amount, recurrence, month);
    match recurrence.adjustment_for(month, day_token) {
        // Deltas add to the base and can never push a day below zero.
        Some(delta) => (base + delta).max(0.0),
        None => base,
    }
}
