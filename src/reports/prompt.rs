//! Prompt rendering for text-generation collaborators
//!
//! Collaborators that forward work to a language model receive these prompts.
//! The persona is a patient financial mentor who speaks plainly and firmly
//! about waste but kindly about the person.

use std::fmt::Write;

use super::assembler::{AdviceInput, ReportInput, REPORT_SECTIONS};
use crate::models::{Category, Money};

const PERSONA: &str = "You are the Kakebo Guardian, a financial mentor. \
Your voice is pedagogical, empathetic and focused on results. \
You classify expenses with the Kakebo method and help the user save.\n\
Categories:\n\
1. SURVIVAL (essentials, fixed bills, rent, utilities, groceries)\n\
2. LEISURE (restaurants, streaming, hobbies, non-essentials)\n\
3. CULTURE (books, courses, work software)\n\
4. EXTRAS (repairs, emergencies, gifts)\n";

/// Formatting preferences applied to amounts and dates in prompts
#[derive(Debug, Clone)]
pub struct PromptStyle {
    pub currency_symbol: String,
    pub date_format: String,
}

impl Default for PromptStyle {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl PromptStyle {
    fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }
}

/// Prompt asking for a single classification label
pub fn classification_prompt(description: &str, amount: Money, style: &PromptStyle) -> String {
    let labels: Vec<&str> = Category::ALL
        .iter()
        .filter(|c| c.is_classifiable())
        .map(|c| c.label())
        .collect();

    format!(
        "{PERSONA}\nClassify the following expense: \"{description}\" costing {amount}.\n\
         Answer ONLY with JSON of the form {{\"category\": \"<LABEL>\"}} where LABEL is one of: {labels}.\n",
        amount = style.money(amount),
        labels = labels.join(", "),
    )
}

/// Prompt asking for guidance once survival spending crossed the threshold
pub fn advice_prompt(input: &AdviceInput, style: &PromptStyle) -> String {
    let mut prompt = String::from(PERSONA);
    let _ = writeln!(
        prompt,
        "\nThe SURVIVAL category has reached {}% or more of the projected revenue ({}).",
        input.threshold_percent,
        style.money(input.revenue)
    );
    prompt.push_str("Current survival expenses:\n");
    for line in &input.survival_expenses {
        let _ = writeln!(prompt, "- {}: {}", line.description, style.money(line.amount));
    }
    prompt.push_str(
        "\nAnalyze the list above.\n\
         1. Point out 2 or 3 items that look high or negotiable.\n\
         2. Ask direct, reflective questions about those items to encourage saving.\n\
         3. Be brief and empathetic, but firm.\n\
         4. Suggest one immediate action.\n\
         Use plain text with line breaks, no Markdown.\n",
    );
    prompt
}

/// Prompt asking for the full narrative report
pub fn report_prompt(input: &ReportInput, style: &PromptStyle) -> String {
    let mut prompt = String::from(PERSONA);
    prompt.push_str("\nWrite the official Kakebo Guardian report, pedagogical and strategic.\n\n");

    prompt.push_str("FINANCIAL DATA:\n");
    let _ = writeln!(prompt, "- Projected revenue: {}", style.money(input.revenue));
    let _ = writeln!(prompt, "- Total spent: {}", style.money(input.totals.expenses));
    let _ = writeln!(prompt, "- Total saved: {}", style.money(input.totals.savings));
    let _ = writeln!(prompt, "- Real balance: {}", style.money(input.totals.balance));

    prompt.push_str("\nEXPENSE HISTORY:\n");
    if input.expenses.is_empty() {
        prompt.push_str("No expenses recorded.\n");
    }
    for expense in &input.expenses {
        let _ = writeln!(
            prompt,
            "- {} | {}: {} ({})",
            expense.date.format(&style.date_format),
            expense.category.display_name(),
            expense.description,
            style.money(expense.amount)
        );
    }

    prompt.push_str("\nSAVINGS HISTORY:\n");
    if input.savings.is_empty() {
        prompt.push_str("No savings recorded.\n");
    }
    for saving in &input.savings {
        let _ = writeln!(
            prompt,
            "- {} | {} ({})",
            saving.date.format(&style.date_format),
            saving.description,
            style.money(saving.amount)
        );
    }

    prompt.push_str("\nREQUIRED STRUCTURE:\n");
    for (index, section) in REPORT_SECTIONS.iter().enumerate() {
        let _ = writeln!(prompt, "{}. {}", index + 1, section.to_uppercase());
    }
    prompt.push_str(
        "\nBe strict about waste but kind to the person. \
         Do not use Markdown bold; use CAPITALS for emphasis, the report is shown as plain text.\n",
    );
    prompt
}
