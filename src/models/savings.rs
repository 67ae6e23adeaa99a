//! Savings log model
//!
//! Money the user diverted away from spending, e.g. by renegotiating a bill.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::SavingsId;
use super::money::Money;
use super::transaction::{validate_entry, TransactionValidationError};

/// Default provenance marker prepended to savings descriptions
pub const DEFAULT_SAVINGS_PREFIX: &str = "Savings: ";

/// A savings event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsLogEntry {
    pub id: SavingsId,
    pub amount: Money,
    /// Description including the provenance prefix
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl SavingsLogEntry {
    /// Create a validated entry, prefixing the description with `prefix`
    pub fn new(
        description: &str,
        amount: Money,
        prefix: &str,
    ) -> Result<Self, TransactionValidationError> {
        let description = description.trim();
        validate_entry(description, amount)?;

        Ok(Self {
            id: SavingsId::new(),
            amount,
            description: format!("{}{}", prefix, description),
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_marks_provenance() {
        let entry = SavingsLogEntry::new("Internet renegotiated", Money::from_cents(5000), DEFAULT_SAVINGS_PREFIX)
            .unwrap();
        assert_eq!(entry.description, "Savings: Internet renegotiated");
    }

    #[test]
    fn test_invalid_entries() {
        assert!(SavingsLogEntry::new("", Money::from_cents(100), DEFAULT_SAVINGS_PREFIX).is_err());
        assert!(SavingsLogEntry::new("Gym", Money::zero(), DEFAULT_SAVINGS_PREFIX).is_err());
    }
}
