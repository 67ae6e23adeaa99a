//! The budget ledger
//!
//! Owns the declared revenue, the expense list and the savings log. Both lists
//! are kept most-recent-first: the newest entry is always at index 0.
//!
//! Every operation is total. Invalid input (empty description, non-positive
//! amount) leaves the ledger untouched instead of returning an error.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::models::{
    Category, Money, SavingsLogEntry, Transaction, TransactionId, DEFAULT_SAVINGS_PREFIX,
};

/// Revenue, expenses and savings for the current budgeting cycle
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    revenue: Money,
    transactions: Vec<Transaction>,
    savings: Vec<SavingsLogEntry>,
    savings_prefix: String,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Create an empty, unconfigured ledger
    pub fn new() -> Self {
        Self::with_savings_prefix(DEFAULT_SAVINGS_PREFIX)
    }

    /// Create an empty ledger that marks savings descriptions with `prefix`
    pub fn with_savings_prefix(prefix: impl Into<String>) -> Self {
        Self {
            revenue: Money::zero(),
            transactions: Vec::new(),
            savings: Vec::new(),
            savings_prefix: prefix.into(),
        }
    }

    /// Declared monthly revenue; zero while unconfigured
    pub fn revenue(&self) -> Money {
        self.revenue
    }

    /// Whether revenue has been declared
    pub fn is_configured(&self) -> bool {
        self.revenue.is_positive()
    }

    /// Expenses, newest first
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Savings log, newest first
    pub fn savings(&self) -> &[SavingsLogEntry] {
        &self.savings
    }

    /// The most recently added expense
    pub fn latest_transaction(&self) -> Option<&Transaction> {
        self.transactions.first()
    }

    /// Expenses in the survival envelope, newest first
    pub fn survival_transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(|t| t.is_survival())
    }

    /// Look up an expense by ID
    pub fn get_transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Resolve a user-typed reference (short ID, UUID or UUID prefix)
    ///
    /// Returns `None` when nothing matches or the reference is ambiguous.
    pub fn find_transaction(&self, reference: &str) -> Option<&Transaction> {
        let mut matches = self
            .transactions
            .iter()
            .filter(|t| t.id.matches_reference(reference));
        let first = matches.next()?;
        if matches.next().is_some() {
            return None;
        }
        Some(first)
    }

    /// Declare the monthly revenue
    ///
    /// Accepted only while the ledger is unconfigured and only for a positive
    /// value; otherwise this is a no-op. Returns whether the value was taken.
    pub fn set_revenue(&mut self, value: Money) -> bool {
        if !value.is_positive() {
            debug!(%value, "Ignoring non-positive revenue");
            return false;
        }
        if self.is_configured() {
            debug!(current = %self.revenue, "Revenue already set; reset first");
            return false;
        }
        self.revenue = value;
        debug!(revenue = %value, "Revenue set");
        true
    }

    /// Record an expense at the head of the list
    ///
    /// Returns the created transaction, or `None` if the input was invalid.
    pub fn add_transaction(
        &mut self,
        description: &str,
        amount: Money,
        category: Category,
    ) -> Option<Transaction> {
        match Transaction::expense(description, amount, category) {
            Ok(txn) => {
                debug!(id = %txn.id, %amount, %category, "Expense recorded");
                self.transactions.insert(0, txn.clone());
                Some(txn)
            }
            Err(e) => {
                debug!(error = %e, "Ignoring invalid expense");
                None
            }
        }
    }

    /// Remove an expense; absent IDs are not an error
    pub fn delete_transaction(&mut self, id: TransactionId) -> Option<Transaction> {
        let position = self.transactions.iter().position(|t| t.id == id)?;
        let removed = self.transactions.remove(position);
        debug!(id = %removed.id, "Expense deleted");
        Some(removed)
    }

    /// Record a savings event at the head of the log
    pub fn add_savings(&mut self, description: &str, amount: Money) -> Option<SavingsLogEntry> {
        match SavingsLogEntry::new(description, amount, &self.savings_prefix) {
            Ok(entry) => {
                debug!(id = %entry.id, %amount, "Savings recorded");
                self.savings.insert(0, entry.clone());
                Some(entry)
            }
            Err(e) => {
                debug!(error = %e, "Ignoring invalid savings entry");
                None
            }
        }
    }

    /// Clear revenue and both lists
    pub fn reset(&mut self) {
        self.revenue = Money::zero();
        self.transactions.clear();
        self.savings.clear();
        debug!("Ledger reset");
    }

    /// Derive the aggregate view of the current state
    pub fn snapshot(&self) -> BudgetSnapshot {
        let mut category_totals: BTreeMap<Category, Money> =
            Category::ALL.iter().map(|c| (*c, Money::zero())).collect();

        for txn in &self.transactions {
            if let Some(total) = category_totals.get_mut(&txn.category) {
                *total += txn.amount;
            }
        }

        let total_expenses: Money = self.transactions.iter().map(|t| t.amount).sum();
        let total_savings: Money = self.savings.iter().map(|s| s.amount).sum();
        let survival_total = category_totals
            .get(&Category::Survival)
            .copied()
            .unwrap_or_default();

        let survival_ratio = if self.revenue.is_positive() {
            survival_total.cents() as f64 / self.revenue.cents() as f64
        } else {
            0.0
        };

        BudgetSnapshot {
            revenue: self.revenue,
            total_expenses,
            total_savings,
            category_totals,
            survival_total,
            survival_ratio,
            available_balance: self.revenue - total_expenses + total_savings,
            transaction_count: self.transactions.len(),
            savings_count: self.savings.len(),
        }
    }
}

/// Aggregate statistics derived from a [`Ledger`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetSnapshot {
    pub revenue: Money,
    pub total_expenses: Money,
    pub total_savings: Money,
    /// Every category is present, unused ones at zero
    pub category_totals: BTreeMap<Category, Money>,
    pub survival_total: Money,
    /// survival_total / revenue, 0 when revenue is unset
    pub survival_ratio: f64,
    /// revenue - expenses + savings
    pub available_balance: Money,
    pub transaction_count: usize,
    pub savings_count: usize,
}

impl BudgetSnapshot {
    /// Total for a single category
    pub fn category_total(&self, category: Category) -> Money {
        self.category_totals
            .get(&category)
            .copied()
            .unwrap_or_default()
    }

    /// Survival ratio as a percentage
    pub fn survival_percentage(&self) -> f64 {
        self.survival_ratio * 100.0
    }

    /// Total expenses as a percentage of revenue, 0 when revenue is unset
    pub fn expense_percentage(&self) -> f64 {
        if self.revenue.is_positive() {
            self.total_expenses.cents() as f64 / self.revenue.cents() as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Whether survival spending is at or above `percent` of revenue
    ///
    /// Uses integer arithmetic so that exactly-at-threshold is never lost to
    /// floating-point rounding.
    pub fn survival_at_least(&self, percent: u32) -> bool {
        if !self.revenue.is_positive() {
            return false;
        }
        let survival = self.survival_total.cents() as i128 * 100;
        let threshold = percent as i128 * self.revenue.cents() as i128;
        survival >= threshold
    }
}
