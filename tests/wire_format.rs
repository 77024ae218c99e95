use expense_core::expense::{normalize, ExpenseKind, ExpenseRecord, Frequency, RecurrenceInput};
use serde_json::json;

#[test]
fn test_parses_full_persisted_document() {
    let record = ExpenseRecord::from_json(
        &json!({
            "amount": 450000,
            "type": "recurring-template",
            "category": "rent",
            "paymentMethod": "transfer",
            "description": "Shop rent",
            "recurrence": {
                "frequency": "monthly",
                "interval": 1,
                "startDate": "2025-01-01",
                "isActive": true
            },
            "createdAt": "2025-01-01T09:00:00.000Z",
            "updatedAt": "2025-02-01T09:00:00.000Z",
            "someFutureField": { "ignored": true }
        })
        .to_string(),
    )
    .unwrap();

    assert!(record.kind.is_recurring());
    assert_eq!(record.payment_method.as_deref(), Some("transfer"));
    let canonical = normalize(&record);
    assert_eq!(canonical.frequency, Frequency::Monthly);
    assert!(canonical.is_active());
}

#[test]
fn test_parses_legacy_recurring_config_document() {
    let record = ExpenseRecord::from_json(
        &json!({
            "amount": 120000,
            "type": "recurring",
            "recurringConfig": { "pattern": "biweekly" }
        })
        .to_string(),
    )
    .unwrap();

    let canonical = normalize(&record);
    assert_eq!(canonical.frequency, Frequency::Custom);
    assert_eq!(canonical.interval, 14);
}

#[test]
fn test_unknown_expense_type_is_tolerated() {
    let record = ExpenseRecord::from_json(
        &json!({ "amount": 100, "type": "someday-maybe" }).to_string(),
    )
    .unwrap();
    assert_eq!(record.kind, ExpenseKind::Unknown);
    assert!(!record.kind.is_recurring());
}

#[test]
fn test_override_shape_round_trips_exactly() {
    let wire = json!({
        "frequency": "daily",
        "interval": 1.0,
        "isActive": true,
        "dailyAdjustments": { "12": { "amount": -5000.0 } },
        "adjustmentsMonth": "2025-09"
    });

    let input: RecurrenceInput = serde_json::from_value(wire.clone()).unwrap();
    assert_eq!(serde_json::to_value(&input).unwrap(), wire);
}

#[test]
fn test_canonical_descriptor_serializes_back_to_input_shape() {
    let record = ExpenseRecord::from_json(
        &json!({
            "amount": 10000,
            "type": "recurring",
            "recurrence": {
                "frequency": "daily",
                "dailyAdjustments": { "05": { "amount": -2000.0 } },
                "adjustmentsMonth": "2025-03"
            }
        })
        .to_string(),
    )
    .unwrap();

    let rendered = serde_json::to_value(normalize(&record).to_input()).unwrap();
    assert_eq!(
        rendered["dailyAdjustments"],
        json!({ "05": { "amount": -2000.0 } })
    );
    assert_eq!(rendered["adjustmentsMonth"], json!("2025-03"));
}
