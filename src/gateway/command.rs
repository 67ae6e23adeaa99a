//! External command collaborator
//!
//! Forwards rendered prompts to a user-configured program (for example a
//! language-model CLI) on stdin and reads the answer from stdout. The
//! collaborator owns its timeout; the budget engine never waits on it.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use super::{Advisor, Classifier, CollaboratorError, Reporter};
use crate::models::Money;
use crate::reports::{advice_prompt, classification_prompt, report_prompt, AdviceInput, PromptStyle, ReportInput};

/// Runs an external program once per collaborator call
#[derive(Debug, Clone)]
pub struct CommandCollaborator {
    program: String,
    args: Vec<String>,
    timeout: Duration,
    style: PromptStyle,
}

#[derive(Deserialize)]
struct ClassificationReply {
    category: String,
}

impl CommandCollaborator {
    /// Build from an argv list; the first element is the program
    pub fn from_argv(argv: &[String], timeout: Duration, style: PromptStyle) -> Result<Self, CollaboratorError> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| CollaboratorError::Unavailable("no collaborator command configured".into()))?;

        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            timeout,
            style,
        })
    }

    /// Send `prompt` on stdin and return stdout
    async fn run(&self, prompt: &str) -> Result<String, CollaboratorError> {
        debug!(program = %self.program, bytes = prompt.len(), "Invoking collaborator command");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CollaboratorError::Unavailable(format!("{}: {}", self.program, e)))?;

        // Stdin is fed alongside the wait; both run under the timeout
        let stdin = child.stdin.take();
        let feed = async move {
            if let Some(mut stdin) = stdin {
                if let Err(e) = stdin.write_all(prompt.as_bytes()).await {
                    debug!(error = %e, "Collaborator closed stdin early");
                    return;
                }
                let _ = stdin.shutdown().await;
            }
        };
        let exchange = async move {
            let ((), output) = tokio::join!(feed, child.wait_with_output());
            output
        };

        let output = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| CollaboratorError::Timeout(self.timeout.as_secs()))??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CollaboratorError::Process(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| CollaboratorError::Malformed(format!("output is not UTF-8: {}", e)))
    }
}

/// Extract a label from either `{"category": "..."}` or a bare word
fn parse_label(output: &str) -> Result<String, CollaboratorError> {
    let trimmed = output.trim();
    if let Ok(reply) = serde_json::from_str::<ClassificationReply>(trimmed) {
        return Ok(reply.category);
    }

    trimmed
        .lines()
        .next()
        .map(|line| line.trim().trim_matches('"').to_string())
        .filter(|line| !line.is_empty())
        .ok_or_else(|| CollaboratorError::Malformed("empty classification".into()))
}

#[async_trait]
impl Classifier for CommandCollaborator {
    async fn classify(&self, description: &str, amount: Money) -> Result<String, CollaboratorError> {
        let output = self.run(&classification_prompt(description, amount, &self.style)).await?;
        parse_label(&output)
    }
}

#[async_trait]
impl Advisor for CommandCollaborator {
    async fn advise(&self, input: &AdviceInput) -> Result<String, CollaboratorError> {
        self.run(&advice_prompt(input, &self.style)).await
    }
}

#[async_trait]
impl Reporter for CommandCollaborator {
    async fn report(&self, input: &ReportInput) -> Result<String, CollaboratorError> {
        self.run(&report_prompt(input, &self.style)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::AdviceLine;

    #[test]
    fn test_parse_label_json() {
        assert_eq!(parse_label("{\"category\": \"LEISURE\"}\n").unwrap(), "LEISURE");
    }

    #[test]
    fn test_parse_label_bare_word() {
        assert_eq!(parse_label("  \"CULTURE\"\nbecause books").unwrap(), "CULTURE");
        assert!(parse_label("   ").is_err());
    }

    #[test]
    fn test_from_argv_requires_program() {
        let err = CommandCollaborator::from_argv(&[], Duration::from_secs(1), PromptStyle::default())
            .unwrap_err();
        assert!(matches!(err, CollaboratorError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_missing_program_is_unavailable() {
        let collaborator = CommandCollaborator::from_argv(
            &["kakebo-no-such-program".to_string()],
            Duration::from_secs(1),
            PromptStyle::default(),
        )
        .unwrap();
        let err = collaborator.classify("Rent", Money::from_cents(100)).await.unwrap_err();
        assert!(matches!(err, CollaboratorError::Unavailable(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_echoes_through_cat() {
        let collaborator = CommandCollaborator::from_argv(
            &["cat".to_string()],
            Duration::from_secs(5),
            PromptStyle::default(),
        )
        .unwrap();
        let input = AdviceInput {
            survival_expenses: Vec::new(),
            revenue: Money::from_units(1000, 0),
            threshold_percent: 60,
        };
        let text = collaborator.advise(&input).await.unwrap();
        assert!(text.contains("SURVIVAL category has reached 60%"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_program_is_process_error() {
        let collaborator = CommandCollaborator::from_argv(
            &["false".to_string()],
            Duration::from_secs(5),
            PromptStyle::default(),
        )
        .unwrap();
        let input = AdviceInput {
            survival_expenses: Vec::new(),
            revenue: Money::from_units(1000, 0),
            threshold_percent: 60,
        };
        let err = collaborator.advise(&input).await.unwrap_err();
        assert!(matches!(err, CollaboratorError::Process(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_covers_large_prompt_to_idle_child() {
        let collaborator = CommandCollaborator::from_argv(
            &["sleep".to_string(), "6".to_string()],
            Duration::from_secs(1),
            PromptStyle::default(),
        )
        .unwrap();
        let input = AdviceInput {
            survival_expenses: (0..4000)
                .map(|i| AdviceLine {
                    description: format!("Utility bill number {}", i),
                    amount: Money::from_units(10, 0),
                })
                .collect(),
            revenue: Money::from_units(1000, 0),
            threshold_percent: 60,
        };

        let started = std::time::Instant::now();
        let err = collaborator.advise(&input).await.unwrap_err();
        assert!(matches!(err, CollaboratorError::Timeout(1)));
        assert!(started.elapsed() < Duration::from_secs(3));
    }
}
