//! Offline collaborators
//!
//! Deterministic stand-ins for the text-generation services: keyword rules
//! for classification and templates for advice and reports. They let the
//! assistant work without any network access.

use std::fmt::Write;

use async_trait::async_trait;

use super::{Advisor, Classifier, CollaboratorError, Reporter};
use crate::models::{Category, Money};
use crate::reports::{AdviceInput, PromptStyle, ReportInput, REPORT_SECTIONS};

/// Keyword rules, checked in order; the first hit wins
const KEYWORD_RULES: &[(Category, &[&str])] = &[
    (
        Category::Survival,
        &[
            "rent", "mortgage", "aluguel", "electric", "power", "energy", "water", "gas bill",
            "internet", "phone", "grocer", "supermarket", "mercado", "pharmacy", "medicine",
            "insurance", "condo", "tax", "bus", "fuel", "daycare", "school fee",
        ],
    ),
    (
        Category::Culture,
        &[
            "book", "course", "class", "tuition", "workshop", "museum", "theater", "theatre",
            "software", "license", "subscription to", "magazine", "livro", "curso",
        ],
    ),
    (
        Category::Leisure,
        &[
            "coffee", "cafe", "restaurant", "bar", "beer", "pizza", "burger", "delivery",
            "netflix", "spotify", "streaming", "cinema", "movie", "game", "concert", "snack",
            "candy", "cigarette", "lazer",
        ],
    ),
];

/// Classifies expenses by matching keywords in the description
#[derive(Debug, Clone, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous classification used by the async trait impl
    pub fn classify_description(&self, description: &str) -> Category {
        let description = description.to_lowercase();
        KEYWORD_RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| description.contains(k)))
            .map(|(category, _)| *category)
            .unwrap_or(Category::Extras)
    }
}

#[async_trait]
impl Classifier for KeywordClassifier {
    async fn classify(&self, description: &str, _amount: Money) -> Result<String, CollaboratorError> {
        Ok(self.classify_description(description).label().to_string())
    }
}

/// Writes advice from a fixed template
#[derive(Debug, Clone, Default)]
pub struct TemplateAdvisor {
    style: PromptStyle,
}

impl TemplateAdvisor {
    pub fn new(style: PromptStyle) -> Self {
        Self { style }
    }
}

#[async_trait]
impl Advisor for TemplateAdvisor {
    async fn advise(&self, input: &AdviceInput) -> Result<String, CollaboratorError> {
        let symbol = &self.style.currency_symbol;
        let total = input.survival_total();
        let mut text = String::new();

        let _ = writeln!(
            text,
            "Essential costs now take {} of your {} revenue, above the {}% line.",
            total.format_with_symbol(symbol),
            input.revenue.format_with_symbol(symbol),
            input.threshold_percent
        );
        text.push('\n');

        let largest = input.largest_expenses();
        for line in largest.iter().take(3) {
            let _ = writeln!(
                text,
                "{} costs {}. Is this price still the best you can get? When did you last compare it?",
                line.description,
                line.amount.format_with_symbol(symbol)
            );
        }

        text.push('\n');
        match largest.first() {
            Some(top) => {
                let _ = write!(
                    text,
                    "Immediate action: this week, call about \"{}\" and ask for a cheaper plan or a discount.",
                    top.description
                );
            }
            None => text.push_str("Immediate action: list every fixed bill and mark the ones you can renegotiate."),
        }

        Ok(text)
    }
}

/// Writes the cycle report from a fixed template
#[derive(Debug, Clone, Default)]
pub struct TemplateReporter {
    style: PromptStyle,
}

impl TemplateReporter {
    pub fn new(style: PromptStyle) -> Self {
        Self { style }
    }

    fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.style.currency_symbol)
    }
}

#[async_trait]
impl Reporter for TemplateReporter {
    async fn report(&self, input: &ReportInput) -> Result<String, CollaboratorError> {
        let mut text = String::from("KAKEBO GUARDIAN REPORT\n\n");

        // Overall diagnosis
        let _ = writeln!(text, "1. {}", REPORT_SECTIONS[0].to_uppercase());
        let verdict = if input.totals.savings >= input.totals.expenses && input.totals.savings.is_positive() {
            "You are feeding your savings more than your spending."
        } else if input.totals.balance.is_negative() {
            "Spending has outgrown the projected revenue."
        } else {
            "Spending is under control, but savings can still grow."
        };
        let _ = writeln!(
            text,
            "Revenue {}, spent {}, saved {}, balance {}. {}\n",
            self.money(input.revenue),
            self.money(input.totals.expenses),
            self.money(input.totals.savings),
            self.money(input.totals.balance),
            verdict
        );

        // Category breakdown
        let _ = writeln!(text, "2. {}", REPORT_SECTIONS[1].to_uppercase());
        for (category, total) in &input.category_totals {
            if !category.is_classifiable() && total.is_zero() {
                continue;
            }
            let share = if input.revenue.is_positive() {
                total.cents() as f64 / input.revenue.cents() as f64 * 100.0
            } else {
                0.0
            };
            let _ = writeln!(text, "- {}: {} ({:.1}% of revenue)", category, self.money(*total), share);
        }
        text.push('\n');

        // Points of attention
        let _ = writeln!(text, "3. {}", REPORT_SECTIONS[2].to_uppercase());
        let mut expenses: Vec<_> = input
            .expenses
            .iter()
            .filter(|e| e.category != Category::Survival)
            .collect();
        expenses.sort_by(|a, b| b.amount.cmp(&a.amount));
        if expenses.is_empty() {
            text.push_str("- No avoidable expenses recorded.\n");
        }
        for expense in expenses.iter().take(3) {
            let _ = writeln!(
                text,
                "- {} ({}, {}) could be reduced or avoided.",
                expense.description,
                expense.category,
                self.money(expense.amount)
            );
        }
        text.push('\n');

        // Verdict and action plan
        let _ = writeln!(text, "4. {}", REPORT_SECTIONS[3].to_uppercase());
        if let Some((category, total)) = input.dominant_category() {
            let _ = writeln!(text, "- Set a ceiling for {} next cycle; it took {}.", category, self.money(total));
        }
        text.push_str("- Record every expense on the day it happens.\n");
        text.push_str("- Move any renegotiated amount straight into savings.\n");
        text.push_str("\nEvery coin you keep is a lesson you teach yourself.");

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{assemble_advice, assemble_report};
    use crate::services::Ledger;

    #[test]
    fn test_keyword_classification() {
        let classifier = KeywordClassifier::new();
        assert_eq!(classifier.classify_description("Monthly RENT"), Category::Survival);
        assert_eq!(classifier.classify_description("Coffee with Ana"), Category::Leisure);
        assert_eq!(classifier.classify_description("Rust book"), Category::Culture);
        assert_eq!(classifier.classify_description("Birthday gift"), Category::Extras);
    }

    #[tokio::test]
    async fn test_classifier_returns_labels() {
        let label = KeywordClassifier::new()
            .classify("Electric bill", Money::from_cents(100))
            .await
            .unwrap();
        assert_eq!(label, "SURVIVAL");
    }

    #[tokio::test]
    async fn test_template_advice_names_largest_item() {
        let mut ledger = Ledger::new();
        ledger.set_revenue(Money::from_units(5000, 0));
        ledger.add_transaction("Power", Money::from_units(300, 0), Category::Survival);
        ledger.add_transaction("Rent", Money::from_units(2900, 0), Category::Survival);

        let text = TemplateAdvisor::default()
            .advise(&assemble_advice(&ledger, 60))
            .await
            .unwrap();
        assert!(text.contains("$3200.00"));
        assert!(text.contains("call about \"Rent\""));
    }

    #[tokio::test]
    async fn test_template_report_has_all_sections() {
        let mut ledger = Ledger::new();
        ledger.set_revenue(Money::from_units(2000, 0));
        ledger.add_transaction("Pizza", Money::from_units(80, 0), Category::Leisure);
        ledger.add_savings("Gym", Money::from_units(40, 0));

        let text = TemplateReporter::default()
            .report(&assemble_report(&ledger))
            .await
            .unwrap();
        for section in REPORT_SECTIONS {
            assert!(text.contains(&section.to_uppercase()));
        }
        assert!(text.contains("Pizza"));
    }
}
