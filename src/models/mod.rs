//! Core data models for Kakebo
//!
//! This module contains the data structures of the budgeting domain:
//! categories, expenses, savings events, money and identifiers.

pub mod category;
pub mod ids;
pub mod money;
pub mod savings;
pub mod transaction;

pub use category::Category;
pub use ids::{SavingsId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use savings::{SavingsLogEntry, DEFAULT_SAVINGS_PREFIX};
pub use transaction::{Transaction, TransactionValidationError};
