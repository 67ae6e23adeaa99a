//! Report and advice input assembly
//!
//! Packages ledger state into the structures the advice and report
//! collaborators consume. The assembler only reads the ledger.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Category, Money};
use crate::services::Ledger;

/// Section headings a generated report is expected to contain
///
/// The headings are a prompt convention; generated text is never parsed or
/// validated against them.
pub const REPORT_SECTIONS: [&str; 4] = [
    "Overall Diagnosis",
    "Category Breakdown",
    "Points of Attention",
    "Verdict and Action Plan",
];

/// One survival expense as seen by the advice collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceLine {
    pub description: String,
    pub amount: Money,
}

/// Input of the advice collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceInput {
    /// Survival expenses, newest first
    pub survival_expenses: Vec<AdviceLine>,
    pub revenue: Money,
    pub threshold_percent: u32,
}

impl AdviceInput {
    pub fn survival_total(&self) -> Money {
        self.survival_expenses.iter().map(|l| l.amount).sum()
    }

    /// Survival expenses sorted by amount, largest first
    pub fn largest_expenses(&self) -> Vec<&AdviceLine> {
        let mut lines: Vec<&AdviceLine> = self.survival_expenses.iter().collect();
        lines.sort_by(|a, b| b.amount.cmp(&a.amount));
        lines
    }
}

/// One expense row in a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportExpense {
    pub date: DateTime<Utc>,
    pub category: Category,
    pub description: String,
    pub amount: Money,
}

/// One savings row in a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSavings {
    pub date: DateTime<Utc>,
    pub description: String,
    pub amount: Money,
}

/// Derived totals shipped with a report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportTotals {
    pub expenses: Money,
    pub savings: Money,
    pub balance: Money,
}

/// Input of the report collaborator: the full state of the cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportInput {
    pub assembled_at: DateTime<Utc>,
    pub revenue: Money,
    pub totals: ReportTotals,
    pub category_totals: BTreeMap<Category, Money>,
    /// Expenses, newest first
    pub expenses: Vec<ReportExpense>,
    /// Savings events, newest first
    pub savings: Vec<ReportSavings>,
}

impl ReportInput {
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty() && self.savings.is_empty()
    }

    /// Category with the largest spend, if anything was spent
    pub fn dominant_category(&self) -> Option<(Category, Money)> {
        self.category_totals
            .iter()
            .filter(|(_, total)| total.is_positive())
            .max_by_key(|(_, total)| **total)
            .map(|(category, total)| (*category, *total))
    }
}

/// Assemble the advice collaborator input from the ledger
pub fn assemble_advice(ledger: &Ledger, threshold_percent: u32) -> AdviceInput {
    AdviceInput {
        survival_expenses: ledger
            .survival_transactions()
            .map(|t| AdviceLine {
                description: t.description.clone(),
                amount: t.amount,
            })
            .collect(),
        revenue: ledger.revenue(),
        threshold_percent,
    }
}

/// Assemble the report collaborator input from the ledger
pub fn assemble_report(ledger: &Ledger) -> ReportInput {
    let snapshot = ledger.snapshot();

    ReportInput {
        assembled_at: Utc::now(),
        revenue: snapshot.revenue,
        totals: ReportTotals {
            expenses: snapshot.total_expenses,
            savings: snapshot.total_savings,
            balance: snapshot.available_balance,
        },
        category_totals: snapshot.category_totals,
        expenses: ledger
            .transactions()
            .iter()
            .map(|t| ReportExpense {
                date: t.created_at,
                category: t.category,
                description: t.description.clone(),
                amount: t.amount,
            })
            .collect(),
        savings: ledger
            .savings()
            .iter()
            .map(|s| ReportSavings {
                date: s.created_at,
                description: s.description.clone(),
                amount: s.amount,
            })
            .collect(),
    }
}
