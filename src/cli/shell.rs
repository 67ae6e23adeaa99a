//! Interactive and scripted Kakebo shell
//!
//! The shell is a thin front end over [`BudgetSession`]: it parses a line,
//! performs the matching session operation and renders the result. All
//! confirmation prompts (`--yes`) live here, not in the session.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use super::commands::{help_text, parse_line, split_amount, SessionCommand};
use crate::config::Settings;
use crate::display::{
    format_dialog, format_savings_list, format_snapshot, format_survival_meter,
    format_transaction_list, format_transaction_short,
};
use crate::error::{KakeboError, KakeboResult};
use crate::export::export_to_file;
use crate::reports::PromptStyle;
use crate::services::{parse_amount, BudgetSession};

const PROMPT: &str = "kakebo> ";

/// Whether the read loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// A session bound to an output stream
pub struct Shell<W: Write> {
    session: BudgetSession,
    style: PromptStyle,
    out: W,
}

impl<W: Write> Shell<W> {
    pub fn new(session: BudgetSession, settings: &Settings, out: W) -> Self {
        Self {
            session,
            style: settings.prompt_style(),
            out,
        }
    }

    pub fn session(&self) -> &BudgetSession {
        &self.session
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Parse and execute one line
    pub async fn execute_line(&mut self, line: &str) -> KakeboResult<LoopControl> {
        match parse_line(line)? {
            Some(command) => self.execute(command).await,
            None => Ok(LoopControl::Continue),
        }
    }

    /// Execute a parsed command
    pub async fn execute(&mut self, command: SessionCommand) -> KakeboResult<LoopControl> {
        debug!(?command, "Executing shell command");

        match command {
            SessionCommand::Revenue { amount } => self.revenue(&amount).await?,
            SessionCommand::Expense { words } => {
                let (description, amount) = split_amount(&words);
                self.expense(&description, amount).await?;
            }
            SessionCommand::Save { words } => {
                let (description, amount) = split_amount(&words);
                self.save(&description, amount)?;
            }
            SessionCommand::Delete { id, yes } => self.delete(&id, yes).await?,
            SessionCommand::List { limit } => {
                let list = format_transaction_list(self.session.ledger().transactions(), limit, &self.style);
                write!(self.out, "{}", list)?;
            }
            SessionCommand::Savings => {
                write!(self.out, "{}", format_savings_list(self.session.ledger().savings(), &self.style))?;
            }
            SessionCommand::Stats => {
                let snapshot = self.session.snapshot();
                let threshold = self.session.threshold_percent();
                write!(self.out, "{}", format_snapshot(&snapshot, threshold, &self.style))?;
            }
            SessionCommand::Diagnosis => {
                write!(self.out, "{}", format_dialog(self.session.diagnosis()))?;
            }
            SessionCommand::Ack => {
                if self.session.acknowledge_diagnosis() {
                    writeln!(self.out, "Diagnosis acknowledged.")?;
                } else {
                    writeln!(self.out, "No diagnosis is open.")?;
                }
            }
            SessionCommand::Report => {
                self.session.generate_report().await;
                write!(self.out, "{}", format_dialog(self.session.report_dialog()))?;
            }
            SessionCommand::CloseReport => {
                if self.session.close_report() {
                    writeln!(self.out, "Report closed.")?;
                } else {
                    writeln!(self.out, "No report is open.")?;
                }
            }
            SessionCommand::Export { format, path } => {
                let narrative = self.session.report_dialog().content();
                export_to_file(format, self.session.ledger(), narrative, &path)?;
                writeln!(self.out, "Exported {} to {}", format.extension(), path.display())?;
            }
            SessionCommand::Reset { yes } => {
                if !yes {
                    writeln!(
                        self.out,
                        "This clears revenue, all expenses and all savings. Re-run with `reset --yes` to confirm."
                    )?;
                } else {
                    self.session.reset();
                    writeln!(self.out, "Session cleared.")?;
                }
            }
            SessionCommand::Help => write!(self.out, "{}", help_text())?,
            SessionCommand::Quit => return Ok(LoopControl::Exit),
        }

        Ok(LoopControl::Continue)
    }

    async fn revenue(&mut self, amount: &str) -> KakeboResult<()> {
        if self.session.ledger().is_configured() {
            let current = self.money_text(self.session.ledger().revenue());
            writeln!(
                self.out,
                "Revenue is already set to {}. Use `reset --yes` to start a new cycle.",
                current
            )?;
            return Ok(());
        }

        let update = self.session.declare_revenue(amount).await;
        if !update.value {
            return Err(KakeboError::Validation(format!(
                "Revenue must be a positive amount, got '{}'",
                amount
            )));
        }

        let revenue = self.money_text(update.snapshot.revenue);
        writeln!(self.out, "Revenue set to {}.", revenue)?;
        if update.diagnosis_triggered {
            self.show_diagnosis()?;
        }
        Ok(())
    }

    async fn expense(&mut self, description: &str, amount: &str) -> KakeboResult<()> {
        validate_entry(description, amount)?;

        let update = self.session.add_expense(description, amount).await;
        let transaction = update
            .value
            .ok_or_else(|| KakeboError::Validation("Expense was not recorded".into()))?;

        writeln!(self.out, "Recorded {}", format_transaction_short(&transaction, &self.style))?;
        if update.snapshot.revenue.is_positive() {
            write!(
                self.out,
                "{}",
                format_survival_meter(&update.snapshot, self.session.threshold_percent())
            )?;
        }
        if update.diagnosis_triggered {
            self.show_diagnosis()?;
        }
        Ok(())
    }

    fn save(&mut self, description: &str, amount: &str) -> KakeboResult<()> {
        validate_entry(description, amount)?;

        let update = self.session.save_money(description, amount);
        let entry = update
            .value
            .ok_or_else(|| KakeboError::Validation("Savings were not recorded".into()))?;

        let amount = self.money_text(entry.amount);
        let available = self.money_text(update.snapshot.available_balance);
        writeln!(self.out, "{} {}. Available: {}", entry.description, amount, available)?;
        Ok(())
    }

    async fn delete(&mut self, reference: &str, confirmed: bool) -> KakeboResult<()> {
        let transaction = self
            .session
            .ledger()
            .find_transaction(reference)
            .cloned()
            .ok_or_else(|| KakeboError::transaction_not_found(reference))?;

        if !confirmed {
            writeln!(
                self.out,
                "About to delete {}. Re-run with `delete {} --yes` to confirm.",
                format_transaction_short(&transaction, &self.style),
                transaction.id
            )?;
            return Ok(());
        }

        let update = self.session.remove_expense(transaction.id).await;
        if let Some(removed) = update.value {
            writeln!(self.out, "Deleted {}", format_transaction_short(&removed, &self.style))?;
        }
        if update.diagnosis_triggered {
            self.show_diagnosis()?;
        }
        Ok(())
    }

    fn show_diagnosis(&mut self) -> KakeboResult<()> {
        write!(self.out, "{}", format_dialog(self.session.diagnosis()))?;
        Ok(())
    }

    fn money_text(&self, amount: crate::models::Money) -> String {
        amount.format_with_symbol(&self.style.currency_symbol)
    }

    /// Print an error without ending the loop
    fn report_error(&mut self, err: &KakeboError) -> KakeboResult<()> {
        warn!(error = %err, "Shell command failed");
        writeln!(self.out, "error: {}", err)?;
        Ok(())
    }

    /// Execute a whole script, echoing each command
    ///
    /// Failing lines are reported and skipped. Returns the number of
    /// failures.
    pub async fn run_script(&mut self, script: &str) -> KakeboResult<usize> {
        let mut failures = 0;

        for line in script.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            writeln!(self.out, "> {}", trimmed)?;

            match self.execute_line(trimmed).await {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Exit) => break,
                Err(err) => {
                    failures += 1;
                    self.report_error(&err)?;
                }
            }
        }

        self.out.flush()?;
        Ok(failures)
    }

    /// Read commands from `input` until `quit` or end of input
    pub async fn run_interactive<R>(&mut self, input: R) -> KakeboResult<()>
    where
        R: AsyncBufRead + Unpin,
    {
        writeln!(self.out, "Kakebo Guardian. Type `help` for commands.")?;
        let mut lines = input.lines();

        loop {
            write!(self.out, "{}", PROMPT)?;
            self.out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(self.out)?;
                break;
            };

            match self.execute_line(&line).await {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Exit) => break,
                Err(err) => self.report_error(&err)?,
            }
        }

        self.out.flush()?;
        Ok(())
    }
}

/// Reject input the session would silently ignore
fn validate_entry(description: &str, amount: &str) -> KakeboResult<()> {
    if description.trim().is_empty() {
        return Err(KakeboError::Validation("Description cannot be empty".into()));
    }
    if parse_amount(amount).is_none() {
        return Err(KakeboError::Validation(format!(
            "Amount must be a positive number, got '{}'",
            amount
        )));
    }
    Ok(())
}
