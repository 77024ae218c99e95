//! Injected payment-method registry.
//!
//! Reporting collaborators depend on this interface rather than on a
//! process-global registry, so tests and offline tools can hand them a
//! local store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ExpenseError;

pub type Result<T> = std::result::Result<T, ExpenseError>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentMethod {
    pub id: Uuid,
    pub name: String,
    pub active: bool,
}

impl PaymentMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            active: true,
        }
    }
}

/// Abstraction over wherever payment methods live.
pub trait PaymentMethodStore: Send + Sync {
    fn list(&self) -> Vec<PaymentMethod>;
    fn add(&mut self, method: PaymentMethod) -> Result<()>;
    fn update(&mut self, method: PaymentMethod) -> Result<()>;
    fn remove(&mut self, id: Uuid) -> Result<()>;
}

/// Process-local store backed by a plain vector.
#[derive(Debug, Default)]
pub struct InMemoryPaymentMethodStore {
    methods: Vec<PaymentMethod>,
}

impl PaymentMethodStore for InMemoryPaymentMethodStore {
    fn list(&self) -> Vec<PaymentMethod> {
        self.methods.clone()
    }

    fn add(&mut self, method: PaymentMethod) -> Result<()> {
        if self.methods.iter().any(|m| m.id == method.id) {
            return Err(ExpenseError::InvalidRef(format!(
                "duplicate payment method {}",
                method.id
            )));
        }
        self.methods.push(method);
        Ok(())
    }

    fn update(&mut self, method: PaymentMethod) -> Result<()> {
        match self.methods.iter_mut().find(|m| m.id == method.id) {
            Some(slot) => {
                *slot = method;
                Ok(())
            }
            None => Err(ExpenseError::InvalidRef(format!(
                "unknown payment method {}",
                method.id
            ))),
        }
    }

    fn remove(&mut self, id: Uuid) -> Result<()> {
        let before = self.methods.len();
        self.methods.retain(|m| m.id != id);
        if self.methods.len() == before {
            return Err(ExpenseError::InvalidRef(format!(
                "unknown payment method {id}"
            )));
        }
        Ok(())
    }
}
