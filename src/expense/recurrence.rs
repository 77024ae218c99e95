use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::calendar::{parse_iso_date, MonthKey};
use super::record::{DailyAdjustment, ExpenseRecord, FrequencyInput, RawInterval, RecurrenceInput};

/// Canonical recurrence frequency. `Custom` means "every `interval` days",
/// independent of calendar week or month boundaries. `Other` carries unknown
/// tokens through normalization; every calculator treats those with the
/// monthly fallback.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Custom,
    #[serde(untagged)]
    Other(String),
}

static FREQUENCY_TOKENS: Lazy<HashMap<&'static str, Frequency>> = Lazy::new(|| {
    HashMap::from([
        ("daily", Frequency::Daily),
        ("weekly", Frequency::Weekly),
        ("monthly", Frequency::Monthly),
        ("yearly", Frequency::Yearly),
        ("annual", Frequency::Yearly),
        ("custom", Frequency::Custom),
    ])
});

impl Frequency {
    fn from_token(token: &str) -> Frequency {
        let trimmed = token.trim();
        FREQUENCY_TOKENS
            .get(trimmed.to_ascii_lowercase().as_str())
            .cloned()
            .unwrap_or_else(|| Frequency::Other(trimmed.to_string()))
    }

    /// Lowercase token used on the wire and by [`describe`].
    pub fn token(&self) -> &str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
            Frequency::Custom => "custom",
            Frequency::Other(token) => token,
        }
    }
}

/// The single normalized recurrence shape every calculator consumes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recurrence {
    pub frequency: Frequency,
    /// Always at least 1.
    pub interval: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub daily_adjustments: BTreeMap<String, DailyAdjustment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjustments_month: Option<MonthKey>,
}

impl Default for Recurrence {
    /// Hard default for records carrying no recurrence information at all.
    fn default() -> Self {
        Recurrence {
            frequency: Frequency::Monthly,
            interval: 1,
            start_date: None,
            end_date: None,
            is_active: false,
            daily_adjustments: BTreeMap::new(),
            adjustments_month: None,
        }
    }
}

impl Recurrence {
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Activity window check: strictly before `start_date` or strictly after
    /// `end_date` is outside. Missing bounds never exclude. Filtering on
    /// this is the caller's responsibility; the calculators ignore it.
    pub fn in_window(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start_date {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if date > end {
                return false;
            }
        }
        true
    }

    /// Delta for one day of the given month, if an override is scoped there.
    /// Any other month sees no override at all.
    pub fn adjustment_for(&self, month: MonthKey, day_token: &str) -> Option<f64> {
        if self.adjustments_month != Some(month) {
            return None;
        }
        self.daily_adjustments.get(day_token).map(|adj| adj.amount)
    }

    /// Canonical descriptor rendered back into the persisted input shape,
    /// preserving the override map and sibling month exactly.
    pub fn to_input(&self) -> RecurrenceInput {
        RecurrenceInput {
            frequency: Some(FrequencyInput::Name(self.frequency.token().to_string())),
            pattern: None,
            interval: Some(RawInterval::Number(self.interval as f64)),
            start_date: self.start_date.map(|d| d.format("%Y-%m-%d").to_string()),
            end_date: self.end_date.map(|d| d.format("%Y-%m-%d").to_string()),
            is_active: Some(self.is_active),
            daily_adjustments: if self.daily_adjustments.is_empty() {
                None
            } else {
                Some(self.daily_adjustments.clone())
            },
            adjustments_month: self.adjustments_month.map(|m| m.to_string()),
        }
    }
}

/// Folds whichever recurrence shape a record carries into the canonical one.
///
/// Precedence: `recurrence`, then the deprecated `recurringConfig`, then the
/// flat legacy fields on the record itself, then the hard default. Never
/// fails; each malformed member falls back to its own default.
pub fn normalize(record: &ExpenseRecord) -> Recurrence {
    if let Some(input) = record
        .recurrence
        .as_ref()
        .or(record.recurring_config.as_ref())
    {
        return normalize_input(input);
    }
    if record.frequency.is_some() || record.interval.is_some() {
        let flat = RecurrenceInput {
            frequency: record.frequency.clone(),
            interval: record.interval.clone(),
            is_active: Some(record.kind.is_recurring()),
            ..RecurrenceInput::default()
        };
        return normalize_input(&flat);
    }
    Recurrence::default()
}

fn normalize_input(input: &RecurrenceInput) -> Recurrence {
    let raw_token = input
        .frequency
        .as_ref()
        .and_then(|f| f.token())
        .map(str::to_string)
        .or_else(|| input.pattern.clone());

    let interval_source = input
        .interval
        .as_ref()
        .or_else(|| input.frequency.as_ref().and_then(|f| f.nested_interval()));
    let mut interval = interval_source.map(RawInterval::canonical).unwrap_or(1);

    let mut frequency = match raw_token.as_deref() {
        Some(token) => Frequency::from_token(token),
        None => Frequency::Monthly,
    };

    // Legacy shapes collapse onto the day-based custom frequency.
    let is_biweekly = raw_token
        .as_deref()
        .is_some_and(|t| t.trim().eq_ignore_ascii_case("biweekly"));
    if is_biweekly || (frequency == Frequency::Weekly && interval == 2) {
        frequency = Frequency::Custom;
        interval = 14;
    } else if frequency == Frequency::Daily && interval > 1 {
        frequency = Frequency::Custom;
    } else if frequency == Frequency::Monthly && interval == 15 {
        frequency = Frequency::Custom;
    }

    Recurrence {
        frequency,
        interval: interval.max(1),
        start_date: input.start_date.as_deref().and_then(parse_iso_date),
        end_date: input.end_date.as_deref().and_then(parse_iso_date),
        is_active: input.is_active.unwrap_or(true),
        daily_adjustments: input.daily_adjustments.clone().unwrap_or_default(),
        adjustments_month: input
            .adjustments_month
            .as_deref()
            .and_then(|raw| raw.parse::<MonthKey>().ok()),
    }
}

/// Human-readable phrasing shared by every collaborator that renders a
/// recurrence: "Monthly", "Every 15 days", "Every 2 years".
pub fn describe(record: &ExpenseRecord) -> String {
    let recurrence = normalize(record);
    let n = recurrence.interval;
    let plural = if n > 1 { "s" } else { "" };
    match &recurrence.frequency {
        Frequency::Daily if n == 1 => "Daily".into(),
        Frequency::Weekly if n == 1 => "Weekly".into(),
        Frequency::Monthly if n == 1 => "Monthly".into(),
        Frequency::Yearly if n == 1 => "Yearly".into(),
        Frequency::Daily | Frequency::Custom => format!("Every {n} day{plural}"),
        Frequency::Weekly => format!("Every {n} week{plural}"),
        Frequency::Monthly => format!("Every {n} month{plural}"),
        Frequency::Yearly => format!("Every {n} year{plural}"),
        Frequency::Other(token) => token.clone(),
    }
}
