//! Expense domain models, recurrence normalization, and amount calculators.

pub mod aggregate;
pub mod calendar;
pub mod daily;
pub mod record;
pub mod recurrence;

pub use aggregate::{monthly_amount, monthly_amount_current, range_amount, range_amount_between};
pub use calendar::{day_key, days_in_month, parse_iso_date, split_iso_date, MonthKey};
pub use daily::{
    adjusted_amount_for_date, adjusted_amount_on, average_daily_amount, base_daily_amount,
};
pub use record::{
    DailyAdjustment, ExpenseKind, ExpenseRecord, FrequencyInput, RawInterval, RecurrenceInput,
};
pub use recurrence::{describe, normalize, Frequency, Recurrence};
