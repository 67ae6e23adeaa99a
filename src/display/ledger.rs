//! Ledger display formatting
//!
//! Tables for the transaction history and the savings log.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{SavingsLogEntry, Transaction};
use crate::reports::PromptStyle;

use super::summary::truncate;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Tabled)]
struct SavingsRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format the transaction history, newest first
///
/// `limit` caps the number of rows; a footer notes how many were hidden.
pub fn format_transaction_list(
    transactions: &[Transaction],
    limit: Option<usize>,
    style: &PromptStyle,
) -> String {
    if transactions.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let shown = limit.unwrap_or(transactions.len()).min(transactions.len());
    let rows = transactions[..shown].iter().map(|txn| TransactionRow {
        id: txn.id.to_string(),
        date: txn.created_at.format(&style.date_format).to_string(),
        description: truncate(&txn.description, 32),
        category: txn.category.display_name().to_string(),
        amount: txn.amount.format_with_symbol(&style.currency_symbol),
    });

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');

    let hidden = transactions.len() - shown;
    if hidden > 0 {
        output.push_str(&format!("... {} older expense(s) not shown\n", hidden));
    }
    output
}

/// Format the savings log, newest first
pub fn format_savings_list(entries: &[SavingsLogEntry], style: &PromptStyle) -> String {
    if entries.is_empty() {
        return "No savings recorded.\n".to_string();
    }

    let rows = entries.iter().map(|entry| SavingsRow {
        date: entry.created_at.format(&style.date_format).to_string(),
        description: truncate(&entry.description, 40),
        amount: entry.amount.format_with_symbol(&style.currency_symbol),
    });

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');
    output
}

/// One-line confirmation for a recorded expense
pub fn format_transaction_short(txn: &Transaction, style: &PromptStyle) -> String {
    format!(
        "{} {} [{}] {}",
        txn.id,
        txn.description,
        txn.category.display_name(),
        txn.amount.format_with_symbol(&style.currency_symbol)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money};

    fn expense(description: &str, cents: i64, category: Category) -> Transaction {
        Transaction::expense(description, Money::from_cents(cents), category).unwrap()
    }

    #[test]
    fn test_empty_lists() {
        let style = PromptStyle::default();
        assert!(format_transaction_list(&[], None, &style).contains("No expenses"));
        assert!(format_savings_list(&[], &style).contains("No savings"));
    }

    #[test]
    fn test_transaction_table() {
        let txns = vec![
            expense("Rent", 320_000, Category::Survival),
            expense("Coffee", 1_500, Category::Leisure),
        ];
        let output = format_transaction_list(&txns, None, &PromptStyle::default());

        assert!(output.contains("Description"));
        assert!(output.contains("Rent"));
        assert!(output.contains("$3200.00"));
        assert!(output.contains("Leisure & Vices"));
        assert!(!output.contains("not shown"));
    }

    #[test]
    fn test_transaction_limit() {
        let txns = vec![
            expense("Rent", 320_000, Category::Survival),
            expense("Coffee", 1_500, Category::Leisure),
            expense("Books", 4_000, Category::Culture),
        ];
        let output = format_transaction_list(&txns, Some(1), &PromptStyle::default());

        assert!(output.contains("Rent"));
        assert!(!output.contains("Coffee"));
        assert!(output.contains("2 older expense(s) not shown"));
    }

    #[test]
    fn test_short_format() {
        let txn = expense("Coffee", 1_550, Category::Leisure);
        let line = format_transaction_short(&txn, &PromptStyle::default());
        assert!(line.starts_with("txn-"));
        assert!(line.contains("Coffee [Leisure & Vices] $15.50"));
    }
}
