//! Transaction model
//!
//! An expense recorded in the ledger. Transactions are immutable once
//! created; the only lifecycle event after creation is deletion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::TransactionId;
use super::money::Money;

/// An expense entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// What the money was spent on
    pub description: String,

    /// Amount spent, always positive
    pub amount: Money,

    /// Kakebo envelope
    pub category: Category,

    /// When the entry was recorded
    pub created_at: DateTime<Utc>,

    /// Always true on the expense path; reserved for income entries
    pub is_expense: bool,
}

impl Transaction {
    /// Create a validated expense
    pub fn expense(
        description: impl Into<String>,
        amount: Money,
        category: Category,
    ) -> Result<Self, TransactionValidationError> {
        let description = description.into().trim().to_string();
        validate_entry(&description, amount)?;

        Ok(Self {
            id: TransactionId::new(),
            description,
            amount,
            category,
            created_at: Utc::now(),
            is_expense: true,
        })
    }

    pub fn is_survival(&self) -> bool {
        self.category == Category::Survival
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.description, self.category, self.amount)
    }
}

/// Shared validation for ledger entries
pub(crate) fn validate_entry(
    description: &str,
    amount: Money,
) -> Result<(), TransactionValidationError> {
    if description.trim().is_empty() {
        return Err(TransactionValidationError::EmptyDescription);
    }
    if !amount.is_positive() {
        return Err(TransactionValidationError::NonPositiveAmount(amount));
    }
    Ok(())
}

/// Validation errors for ledger entries
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionValidationError {
    #[error("Description cannot be empty")]
    EmptyDescription,

    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(Money),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_expense() {
        let txn = Transaction::expense("  Rent ", Money::from_cents(320000), Category::Survival)
            .unwrap();
        assert_eq!(txn.description, "Rent");
        assert!(txn.is_expense);
        assert!(txn.is_survival());
    }

    #[test]
    fn test_rejects_empty_description() {
        let err = Transaction::expense("   ", Money::from_cents(100), Category::Leisure).unwrap_err();
        assert_eq!(err, TransactionValidationError::EmptyDescription);
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        assert!(Transaction::expense("Coffee", Money::zero(), Category::Leisure).is_err());
        assert!(Transaction::expense("Coffee", Money::from_cents(-5), Category::Leisure).is_err());
    }

    #[test]
    fn test_display() {
        let txn = Transaction::expense("Coffee", Money::from_cents(1500), Category::Leisure).unwrap();
        assert_eq!(txn.to_string(), "Coffee (Leisure & Vices): 15.00");
    }
}
