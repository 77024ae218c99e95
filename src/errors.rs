use thiserror::Error;

/// Error type for the fallible seams around the calculation engine. The
/// calculators themselves never return errors; they degrade to defined
/// numbers instead.
#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid month key: {0}")]
    InvalidMonthKey(String),
    #[error("Invalid reference: {0}")]
    InvalidRef(String),
}
