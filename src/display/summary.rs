//! Budget summary formatting
//!
//! Renders a [`BudgetSnapshot`] as the headline figures, the survival meter
//! and a per-category breakdown.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Category, Money};
use crate::reports::PromptStyle;
use crate::services::BudgetSnapshot;

const METER_WIDTH: usize = 30;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "")]
    bar: String,
}

/// Format the full budget summary
pub fn format_snapshot(snapshot: &BudgetSnapshot, threshold_percent: u32, style: &PromptStyle) -> String {
    let money = |amount: Money| amount.format_with_symbol(&style.currency_symbol);
    let mut output = String::new();

    if snapshot.revenue.is_zero() {
        output.push_str("Revenue:    (not set, use `revenue <amount>`)\n");
    } else {
        output.push_str(&format!("Revenue:    {}\n", money(snapshot.revenue)));
    }
    output.push_str(&format!(
        "Spent:      {} ({})\n",
        money(snapshot.total_expenses),
        format_percentage(snapshot.expense_percentage())
    ));
    output.push_str(&format!("Saved:      {}\n", money(snapshot.total_savings)));
    output.push_str(&format!("Available:  {}\n", money(snapshot.available_balance)));
    output.push('\n');
    output.push_str(&format_survival_meter(snapshot, threshold_percent));
    output.push('\n');

    let max = snapshot
        .category_totals
        .values()
        .map(|m| m.cents())
        .max()
        .unwrap_or(0) as f64;

    let rows = snapshot
        .category_totals
        .iter()
        .filter(|(category, total)| category.is_classifiable() || !total.is_zero())
        .map(|(category, total)| CategoryRow {
            category: category.display_name().to_string(),
            spent: money(*total),
            share: category_share(snapshot, *total),
            bar: format_bar(total.cents() as f64, max, 12),
        });

    output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
    output.push('\n');
    output
}

/// Survival spending against the threshold
///
/// The `|` marker on the bar sits at the threshold.
pub fn format_survival_meter(snapshot: &BudgetSnapshot, threshold_percent: u32) -> String {
    let pct = snapshot.survival_percentage();
    let mut bar: Vec<char> = format_bar(pct.min(100.0), 100.0, METER_WIDTH).chars().collect();
    let marker = (threshold_percent as usize * METER_WIDTH / 100).min(METER_WIDTH - 1);
    bar[marker] = '|';
    let bar: String = bar.into_iter().collect();

    let status = if snapshot.survival_at_least(threshold_percent) {
        "ALERT"
    } else {
        "ok"
    };

    format!(
        "{} [{}] {} of revenue (limit {}%) {}\n",
        Category::Survival.display_name(),
        bar,
        format_percentage(pct),
        threshold_percent,
        status
    )
}

fn category_share(snapshot: &BudgetSnapshot, total: Money) -> String {
    if snapshot.revenue.is_positive() {
        format_percentage(total.cents() as f64 / snapshot.revenue.cents() as f64 * 100.0)
    } else {
        "-".to_string()
    }
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct > 0.0 && pct < 0.1 {
        format!("{:.2}%", pct)
    } else {
        format!("{:.1}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Truncate a string to at most `max_len` characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
