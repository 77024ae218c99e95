#![doc(test(attr(deny(warnings))))]

//! Expense Core provides the recurrence normalization and amount calculation
//! primitives behind expense dashboards and period breakdowns: one canonical
//! recurrence shape, per-day amounts with month-scoped overrides, and
//! month/range aggregation.

pub mod errors;
pub mod expense;
pub mod payment;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
