use chrono::{Datelike, Duration, NaiveDate, Utc};
use tracing::warn;

use super::calendar::{day_key, parse_iso_date, MonthKey};
use super::daily::adjusted_share;
use super::record::ExpenseRecord;
use super::recurrence::{normalize, Frequency, Recurrence};

/// Calendar-month total for one record, rounded to whole currency units.
///
/// A month that carries overrides is summed day by day over its true day
/// count; any other month takes the closed-form estimate for the frequency.
pub fn monthly_amount(record: &ExpenseRecord, month: MonthKey) -> f64 {
    let recurrence = normalize(record);
    let total = if recurrence.adjustments_month == Some(month)
        && !recurrence.daily_adjustments.is_empty()
    {
        sum_month_days(record.amount, &recurrence, month)
    } else {
        standard_monthly_estimate(record.amount, &recurrence, month)
    };
    total.round()
}

/// Convenience that resolves the wall clock exactly once and delegates.
/// Callers that need reproducible output pass the month explicitly instead.
pub fn monthly_amount_current(record: &ExpenseRecord) -> f64 {
    monthly_amount(record, MonthKey::from(Utc::now().date_naive()))
}

fn sum_month_days(amount: f64, recurrence: &Recurrence, month: MonthKey) -> f64 {
    (1..=month.days())
        .map(|day| adjusted_share(amount, recurrence, month, &day_key(day)))
        .sum()
}

fn standard_monthly_estimate(amount: f64, recurrence: &Recurrence, month: MonthKey) -> f64 {
    let days = month.days() as f64;
    let interval = recurrence.interval.max(1) as f64;
    match recurrence.frequency {
        Frequency::Daily => amount * (days / interval).floor(),
        Frequency::Weekly => amount * ((days / 7.0).floor() / interval).floor(),
        Frequency::Monthly => {
            if recurrence.interval == 1 {
                amount
            } else {
                amount / interval
            }
        }
        Frequency::Yearly => amount / (12.0 * interval),
        Frequency::Custom => (amount / interval) * days,
        // Unknown frequencies take the monthly estimate.
        Frequency::Other(_) => {
            if recurrence.interval == 1 {
                amount
            } else {
                amount / interval
            }
        }
    }
}

/// Date-range total over ISO date strings, as the reporting layer supplies
/// them. Malformed bounds contribute nothing rather than poisoning the
/// surrounding aggregation.
pub fn range_amount(
    record: &ExpenseRecord,
    start: &str,
    end: &str,
    worked_days: Option<&[NaiveDate]>,
) -> f64 {
    let (Some(from), Some(to)) = (parse_iso_date(start), parse_iso_date(end)) else {
        warn!(start, end, "unparseable range bounds, contributing nothing");
        return 0.0;
    };
    range_amount_between(record, from, to, worked_days)
}

/// Typed date-range total, rounded to whole currency units.
///
/// The effective start clamps to the record's creation date so a recurring
/// cost never accrues into periods before the expense existed. When
/// `worked_days` is supplied only those dates, intersected with the clamped
/// range, contribute; otherwise every calendar day from the clamped start to
/// `end` inclusive does.
pub fn range_amount_between(
    record: &ExpenseRecord,
    start: NaiveDate,
    end: NaiveDate,
    worked_days: Option<&[NaiveDate]>,
) -> f64 {
    if end < start {
        return 0.0;
    }
    let effective_start = match record.created_on() {
        Some(created) if created > start => created,
        Some(_) => start,
        None => {
            if record.created_at.is_some() {
                warn!("unparseable creation date, skipping backward clamp");
            }
            start
        }
    };
    if end < effective_start {
        return 0.0;
    }

    let recurrence = normalize(record);
    let total: f64 = match worked_days {
        Some(days) => days
            .iter()
            .filter(|day| (effective_start..=end).contains(*day))
            .map(|day| {
                adjusted_share(
                    record.amount,
                    &recurrence,
                    MonthKey::from(*day),
                    &day_key(day.day()),
                )
            })
            .sum(),
        None => {
            let mut sum = 0.0;
            let mut cursor = effective_start;
            while cursor <= end {
                sum += adjusted_share(
                    record.amount,
                    &recurrence,
                    MonthKey::from(cursor),
                    &day_key(cursor.day()),
                );
                cursor += Duration::days(1);
            }
            sum
        }
    };
    total.round()
}
