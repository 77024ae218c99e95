use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::ExpenseError;

/// A calendar month token in the persisted `"YYYY-MM"` form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<MonthKey> {
        if (1..=12).contains(&month) {
            Some(MonthKey { year, month })
        } else {
            None
        }
    }

    /// True day count of the month, 28 through 31.
    pub fn days(&self) -> u32 {
        days_in_month(self.year, self.month)
    }
}

impl From<NaiveDate> for MonthKey {
    fn from(date: NaiveDate) -> Self {
        MonthKey {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = ExpenseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || ExpenseError::InvalidMonthKey(raw.to_string());
        let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        MonthKey::new(year, month).ok_or_else(invalid)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = ExpenseError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

/// Two-digit day-of-month token used as the override map key.
pub fn day_key(day: u32) -> String {
    format!("{day:02}")
}

/// Splits an ISO `"YYYY-MM-DD"` string into its month key and day token by
/// substring alone. Reading the day back from a constructed date can land on
/// the neighboring calendar day under a local-timezone offset, so the string
/// is the source of truth here.
pub fn split_iso_date(raw: &str) -> Option<(MonthKey, String)> {
    let bytes = raw.as_bytes();
    if bytes.len() < 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes[..4]
        .iter()
        .chain(&bytes[5..7])
        .chain(&bytes[8..10])
        .all(u8::is_ascii_digit);
    if !digits_ok {
        return None;
    }
    let month: MonthKey = raw[..7].parse().ok()?;
    let day: u32 = raw[8..10].parse().ok()?;
    if !(1..=31).contains(&day) {
        return None;
    }
    Some((month, raw[8..10].to_string()))
}

/// Lenient ISO date parsing: tolerates a trailing time component and returns
/// `None` on anything unparseable.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    (first_next - Duration::days(1)).day()
}
