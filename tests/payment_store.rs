use expense_core::errors::ExpenseError;
use expense_core::payment::{InMemoryPaymentMethodStore, PaymentMethod, PaymentMethodStore};
use uuid::Uuid;

#[test]
fn test_add_list_update_remove() {
    let mut store = InMemoryPaymentMethodStore::default();
    let mut cash = PaymentMethod::new("Cash");
    let card = PaymentMethod::new("Card");

    store.add(cash.clone()).unwrap();
    store.add(card.clone()).unwrap();
    assert_eq!(store.list().len(), 2);

    cash.active = false;
    store.update(cash.clone()).unwrap();
    let listed = store.list();
    let stored_cash = listed.iter().find(|m| m.id == cash.id).unwrap();
    assert!(!stored_cash.active);

    store.remove(card.id).unwrap();
    assert_eq!(store.list().len(), 1);
}

#[test]
fn test_duplicate_add_is_rejected() {
    let mut store = InMemoryPaymentMethodStore::default();
    let cash = PaymentMethod::new("Cash");
    store.add(cash.clone()).unwrap();
    assert!(matches!(
        store.add(cash),
        Err(ExpenseError::InvalidRef(_))
    ));
}

#[test]
fn test_unknown_references_are_rejected() {
    let mut store = InMemoryPaymentMethodStore::default();
    assert!(store.update(PaymentMethod::new("Ghost")).is_err());
    assert!(store.remove(Uuid::new_v4()).is_err());
}
