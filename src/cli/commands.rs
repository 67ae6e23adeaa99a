//! Session command grammar
//!
//! Each shell line is split with `shell-words` and parsed with clap, so
//! quoting and `--flag` handling match a regular command line.

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};

use crate::error::{KakeboError, KakeboResult};
use crate::export::ExportFormat;

#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_help_subcommand = true, disable_help_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

/// Commands accepted by the Kakebo shell
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// Declare the monthly revenue (once per cycle)
    Revenue {
        /// Amount, e.g. 5000 or 5000,00
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Record an expense; the Guardian picks the category
    #[command(alias = "add")]
    Expense {
        /// Description followed by the amount, e.g. `expense Monthly rent 3200`
        #[arg(required = true, num_args = 2.., allow_hyphen_values = true, value_name = "DESCRIPTION... AMOUNT")]
        words: Vec<String>,
    },
    /// Record money you avoided spending
    Save {
        /// Description followed by the amount
        #[arg(required = true, num_args = 2.., allow_hyphen_values = true, value_name = "DESCRIPTION... AMOUNT")]
        words: Vec<String>,
    },
    /// Delete an expense by ID (see `list`)
    #[command(alias = "rm")]
    Delete {
        id: String,
        /// Confirm the deletion
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the expense history, newest first
    #[command(alias = "ls")]
    List {
        /// Number of expenses to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show the savings log
    Savings,
    /// Show revenue, totals, balance and the survival meter
    #[command(alias = "status")]
    Stats,
    /// Show the diagnosis dialog
    Diagnosis,
    /// Acknowledge the diagnosis dialog
    Ack,
    /// Generate the Guardian report for this cycle
    Report,
    /// Close the report dialog
    CloseReport,
    /// Export the report or ledger to a file
    Export {
        #[arg(value_enum)]
        format: ExportFormat,
        path: PathBuf,
    },
    /// Clear revenue, expenses and savings
    Reset {
        /// Confirm the reset
        #[arg(short, long)]
        yes: bool,
    },
    /// List the available commands
    Help,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// Split `words` into description and trailing amount
pub fn split_amount(words: &[String]) -> (String, &str) {
    match words.split_last() {
        Some((amount, description)) => (description.join(" "), amount.as_str()),
        None => (String::new(), ""),
    }
}

/// Parse one shell line
///
/// Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_line(line: &str) -> KakeboResult<Option<SessionCommand>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let tokens = shell_words::split(trimmed).map_err(|e| KakeboError::Command(e.to_string()))?;
    let parsed = SessionLine::try_parse_from(tokens)
        .map_err(|e| KakeboError::Command(e.render().to_string().trim_end().to_string()))?;
    Ok(Some(parsed.command))
}

/// One line per command with its description
pub fn help_text() -> String {
    let command = SessionLine::command();
    let mut output = String::from("Commands:\n");
    for sub in command.get_subcommands() {
        let about = sub.get_about().map(|a| a.to_string()).unwrap_or_default();
        output.push_str(&format!("  {:<14} {}\n", sub.get_name(), about));
    }
    output
}
