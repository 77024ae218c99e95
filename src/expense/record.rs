use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::parse_iso_date;
use crate::errors::ExpenseError;

/// Discriminates one-off costs from the recurring family. The recurring
/// variants are written by different backend code paths but are equivalent
/// for calculation purposes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ExpenseKind {
    #[serde(rename = "one-time")]
    #[default]
    OneTime,
    #[serde(rename = "recurring")]
    Recurring,
    #[serde(rename = "recurring-template")]
    RecurringTemplate,
    #[serde(rename = "recurring-instance")]
    RecurringInstance,
    #[serde(other)]
    Unknown,
}

impl ExpenseKind {
    pub fn is_recurring(&self) -> bool {
        matches!(
            self,
            ExpenseKind::Recurring | ExpenseKind::RecurringTemplate | ExpenseKind::RecurringInstance
        )
    }
}

/// Signed delta applied on top of the base daily amount for one day. The
/// wire shape `{ "amount": <number> }` must survive round-trips untouched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DailyAdjustment {
    pub amount: f64,
}

/// Frequency as it actually appears in persisted documents: either a plain
/// string or a nested object whose `type`/`value`/`code` member carries the
/// token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FrequencyInput {
    Name(String),
    Nested {
        #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        interval: Option<RawInterval>,
    },
}

impl FrequencyInput {
    /// The frequency token, wherever the document hid it.
    pub fn token(&self) -> Option<&str> {
        match self {
            FrequencyInput::Name(name) => Some(name.as_str()),
            FrequencyInput::Nested {
                kind, value, code, ..
            } => kind.as_deref().or(value.as_deref()).or(code.as_deref()),
        }
    }

    /// Interval carried inside a nested frequency object, if any.
    pub fn nested_interval(&self) -> Option<&RawInterval> {
        match self {
            FrequencyInput::Name(_) => None,
            FrequencyInput::Nested { interval, .. } => interval.as_ref(),
        }
    }
}

/// Interval exactly as persisted: a number, a numeric string, `null`, and
/// `""` all occur in legacy documents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawInterval {
    Number(f64),
    Text(String),
}

impl RawInterval {
    /// Folds any raw shape into a usable interval. Zero, negative, and
    /// unparseable values all land on 1.
    pub fn canonical(&self) -> u32 {
        let value = match self {
            RawInterval::Number(n) => *n,
            RawInterval::Text(raw) => raw.trim().parse::<f64>().unwrap_or(1.0),
        };
        if value.is_finite() && value >= 1.0 {
            value as u32
        } else {
            1
        }
    }
}

/// Raw recurrence descriptor exactly as persisted. Every field is optional;
/// the normalizer resolves shape questions, nothing downstream does.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RecurrenceInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<FrequencyInput>,
    /// Legacy frequency key (`daily`/`weekly`/`biweekly`/`monthly`/`yearly`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<RawInterval>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_adjustments: Option<BTreeMap<String, DailyAdjustment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustments_month: Option<String>,
}

/// Persisted expense document, consumed read-only by the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpenseRecord {
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: ExpenseKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Canonical recurrence slot; wins over everything below.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrenceInput>,
    /// Deprecated alias still present on older documents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_config: Option<RecurrenceInput>,
    /// Flat legacy properties from the oldest document generation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<FrequencyInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<RawInterval>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl ExpenseRecord {
    /// Convenience for building a recurring record around one descriptor.
    pub fn recurring(amount: f64, recurrence: RecurrenceInput) -> Self {
        ExpenseRecord {
            amount,
            kind: ExpenseKind::Recurring,
            recurrence: Some(recurrence),
            ..ExpenseRecord::default()
        }
    }

    /// Parses a persisted document. Unknown fields are ignored, which keeps
    /// the engine tolerant of whatever else the backend stores on expenses.
    pub fn from_json(raw: &str) -> Result<ExpenseRecord, ExpenseError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Creation date used to clamp backward projection; `None` when the
    /// timestamp is missing or unparseable.
    pub fn created_on(&self) -> Option<NaiveDate> {
        self.created_at.as_deref().and_then(parse_iso_date)
    }
}
