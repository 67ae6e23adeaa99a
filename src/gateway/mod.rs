//! Collaborator gateway
//!
//! Classification, advice and report generation are delegated to external,
//! fallible services. Backends implement the traits below and report failures
//! as [`CollaboratorError`]; the [`CollaboratorGateway`] converts every failure
//! into a fixed fallback so callers never see an error.

pub mod command;
pub mod fallback;
pub mod offline;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Money;
use crate::reports::{AdviceInput, ReportInput};

pub use command::CommandCollaborator;
pub use fallback::{CollaboratorGateway, FallbackTexts};
pub use offline::{KeywordClassifier, TemplateAdvisor, TemplateReporter};

/// Failure reported by a collaborator backend
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("Collaborator unavailable: {0}")]
    Unavailable(String),

    #[error("Collaborator timed out after {0} seconds")]
    Timeout(u64),

    #[error("Malformed collaborator response: {0}")]
    Malformed(String),

    #[error("Collaborator process failed: {0}")]
    Process(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Assigns a Kakebo label to an expense
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Return the raw classification label (e.g. `"SURVIVAL"`)
    async fn classify(&self, description: &str, amount: Money) -> Result<String, CollaboratorError>;
}

/// Writes guidance when survival spending crosses the threshold
#[async_trait]
pub trait Advisor: Send + Sync {
    async fn advise(&self, input: &AdviceInput) -> Result<String, CollaboratorError>;
}

/// Writes the narrative report for the whole cycle
#[async_trait]
pub trait Reporter: Send + Sync {
    async fn report(&self, input: &ReportInput) -> Result<String, CollaboratorError>;
}
