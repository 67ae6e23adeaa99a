//! Fallback-on-failure wrapper around the collaborator backends

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{
    Advisor, Classifier, CollaboratorError, CommandCollaborator, KeywordClassifier, Reporter,
    TemplateAdvisor, TemplateReporter,
};
use crate::config::{CollaboratorBackend, Settings};
use crate::models::{Category, Money};
use crate::reports::{AdviceInput, ReportInput};

/// Fixed texts returned when a text collaborator fails or says nothing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackTexts {
    /// Reassurance shown in the diagnosis dialog when the advisor fails
    #[serde(default = "default_advice_fallback")]
    pub advice: String,

    /// Shown in the diagnosis dialog when the advisor answers with no text
    #[serde(default = "default_empty_advice")]
    pub empty_advice: String,

    /// Apology shown in the report dialog when the reporter fails
    #[serde(default = "default_report_fallback")]
    pub report: String,

    /// Shown in the report dialog when the reporter answers with no text
    #[serde(default = "default_empty_report")]
    pub empty_report: String,
}

fn default_advice_fallback() -> String {
    "We detected an imbalance. Review your essential expenses.".to_string()
}

fn default_empty_advice() -> String {
    "The Wolf has grown too big! Review your fixed bills right away.".to_string()
}

fn default_report_fallback() -> String {
    "Could not reach the Guardian right now. Please try again later.".to_string()
}

fn default_empty_report() -> String {
    "The report could not be generated at the moment.".to_string()
}

impl Default for FallbackTexts {
    fn default() -> Self {
        Self {
            advice: default_advice_fallback(),
            empty_advice: default_empty_advice(),
            report: default_report_fallback(),
            empty_report: default_empty_report(),
        }
    }
}

/// The single boundary through which the budget engine talks to collaborators
///
/// Every method is infallible: failures are logged and replaced by the
/// documented fallback value.
#[derive(Clone)]
pub struct CollaboratorGateway {
    classifier: Arc<dyn Classifier>,
    advisor: Arc<dyn Advisor>,
    reporter: Arc<dyn Reporter>,
    fallbacks: FallbackTexts,
}

impl CollaboratorGateway {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        advisor: Arc<dyn Advisor>,
        reporter: Arc<dyn Reporter>,
        fallbacks: FallbackTexts,
    ) -> Self {
        Self {
            classifier,
            advisor,
            reporter,
            fallbacks,
        }
    }

    /// Build the gateway for the backend selected in `settings`
    pub fn from_settings(settings: &Settings) -> Result<Self, CollaboratorError> {
        let style = settings.prompt_style();
        let fallbacks = settings.fallbacks.clone();

        match settings.collaborator.backend {
            CollaboratorBackend::Offline => Ok(Self::new(
                Arc::new(KeywordClassifier::new()),
                Arc::new(TemplateAdvisor::new(style.clone())),
                Arc::new(TemplateReporter::new(style)),
                fallbacks,
            )),
            CollaboratorBackend::Command => {
                let command = Arc::new(CommandCollaborator::from_argv(
                    &settings.collaborator.command,
                    Duration::from_secs(settings.collaborator.timeout_secs),
                    style,
                )?);
                Ok(Self::new(command.clone(), command.clone(), command, fallbacks))
            }
        }
    }

    pub fn fallbacks(&self) -> &FallbackTexts {
        &self.fallbacks
    }

    /// Classify an expense, falling back to [`Category::FALLBACK`]
    pub async fn classify(&self, description: &str, amount: Money) -> Category {
        match self.classifier.classify(description, amount).await {
            Ok(label) => match Category::parse_label(&label) {
                Some(category) => {
                    debug!(description, %category, "Expense classified");
                    category
                }
                None => {
                    warn!(description, label = %label.trim(), "Unexpected classification label");
                    Category::FALLBACK
                }
            },
            Err(e) => {
                warn!(description, error = %e, "Classification failed");
                Category::FALLBACK
            }
        }
    }

    /// Ask for guidance, falling back to the reassurance text
    pub async fn advise(&self, input: &AdviceInput) -> String {
        let result = self.advisor.advise(input).await;
        text_or_fallback(
            "advice",
            result,
            &self.fallbacks.empty_advice,
            &self.fallbacks.advice,
        )
    }

    /// Ask for the narrative report, falling back to the apology text
    pub async fn report(&self, input: &ReportInput) -> String {
        let result = self.reporter.report(input).await;
        text_or_fallback(
            "report",
            result,
            &self.fallbacks.empty_report,
            &self.fallbacks.report,
        )
    }
}

fn text_or_fallback(
    collaborator: &'static str,
    result: Result<String, CollaboratorError>,
    when_empty: &str,
    when_failed: &str,
) -> String {
    match result {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            warn!(collaborator, "Collaborator returned empty text");
            when_empty.to_string()
        }
        Err(e) => {
            warn!(collaborator, error = %e, "Collaborator failed");
            when_failed.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedLabel(&'static str);

    #[async_trait]
    impl Classifier for FixedLabel {
        async fn classify(&self, _: &str, _: Money) -> Result<String, CollaboratorError> {
            Ok(self.0.to_string())
        }
    }

    struct Broken;

    #[async_trait]
    impl Classifier for Broken {
        async fn classify(&self, _: &str, _: Money) -> Result<String, CollaboratorError> {
            Err(CollaboratorError::Unavailable("offline".into()))
        }
    }

    #[async_trait]
    impl Advisor for Broken {
        async fn advise(&self, _: &AdviceInput) -> Result<String, CollaboratorError> {
            Err(CollaboratorError::Timeout(30))
        }
    }

    #[async_trait]
    impl Reporter for Broken {
        async fn report(&self, _: &ReportInput) -> Result<String, CollaboratorError> {
            Err(CollaboratorError::Malformed("no text".into()))
        }
    }

    struct Echo(&'static str);

    #[async_trait]
    impl Advisor for Echo {
        async fn advise(&self, _: &AdviceInput) -> Result<String, CollaboratorError> {
            Ok(self.0.to_string())
        }
    }

    #[async_trait]
    impl Reporter for Echo {
        async fn report(&self, _: &ReportInput) -> Result<String, CollaboratorError> {
            Ok(self.0.to_string())
        }
    }

    fn gateway(
        classifier: impl Classifier + 'static,
        advisor: impl Advisor + 'static,
        reporter: impl Reporter + 'static,
    ) -> CollaboratorGateway {
        CollaboratorGateway::new(
            Arc::new(classifier),
            Arc::new(advisor),
            Arc::new(reporter),
            FallbackTexts::default(),
        )
    }

    fn advice_input() -> AdviceInput {
        AdviceInput {
            survival_expenses: Vec::new(),
            revenue: Money::from_units(1000, 0),
            threshold_percent: 60,
        }
    }

    #[tokio::test]
    async fn test_classification_success() {
        let gw = gateway(FixedLabel("LEISURE"), Broken, Broken);
        assert_eq!(gw.classify("Coffee", Money::from_cents(1500)).await, Category::Leisure);
    }

    #[tokio::test]
    async fn test_classification_failure_falls_back() {
        let gw = gateway(Broken, Broken, Broken);
        assert_eq!(gw.classify("Rent", Money::from_cents(1500)).await, Category::Extras);
    }

    #[tokio::test]
    async fn test_unexpected_label_falls_back() {
        let gw = gateway(FixedLabel("HOUSING"), Broken, Broken);
        assert_eq!(gw.classify("Rent", Money::from_cents(1500)).await, Category::Extras);
    }

    #[tokio::test]
    async fn test_text_failures_fall_back() {
        let gw = gateway(Broken, Broken, Broken);
        let fallbacks = FallbackTexts::default();
        assert_eq!(gw.advise(&advice_input()).await, fallbacks.advice);

        let report = crate::reports::assemble_report(&crate::services::Ledger::new());
        assert_eq!(gw.report(&report).await, fallbacks.report);
    }

    #[tokio::test]
    async fn test_empty_text_uses_its_own_fallback() {
        let fallbacks = FallbackTexts::default();
        let gw = gateway(Broken, Echo("   \n"), Echo(""));
        assert_eq!(gw.advise(&advice_input()).await, fallbacks.empty_advice);

        let report = crate::reports::assemble_report(&crate::services::Ledger::new());
        assert_eq!(gw.report(&report).await, fallbacks.empty_report);
        assert_ne!(fallbacks.empty_advice, fallbacks.advice);
        assert_ne!(fallbacks.empty_report, fallbacks.report);
    }

    #[test]
    fn test_partial_fallback_config_keeps_defaults() {
        let fallbacks: FallbackTexts =
            serde_json::from_str(r#"{"advice": "Check your bills."}"#).unwrap();
        assert_eq!(fallbacks.advice, "Check your bills.");
        assert_eq!(fallbacks.empty_advice, FallbackTexts::default().empty_advice);
        assert_eq!(fallbacks.empty_report, FallbackTexts::default().empty_report);
    }

    #[tokio::test]
    async fn test_text_is_passed_through_verbatim() {
        let text = "Line one\n\n  Line two\n";
        let gw = gateway(Broken, Echo(text), Echo(text));
        assert_eq!(gw.advise(&advice_input()).await, text);
    }

    #[tokio::test]
    async fn test_offline_gateway_from_settings() {
        let gw = CollaboratorGateway::from_settings(&Settings::default()).unwrap();
        assert_eq!(gw.classify("Monthly rent", Money::from_cents(100)).await, Category::Survival);
    }

    #[test]
    fn test_command_gateway_requires_program() {
        let mut settings = Settings::default();
        settings.collaborator.backend = CollaboratorBackend::Command;
        assert!(matches!(
            CollaboratorGateway::from_settings(&settings),
            Err(CollaboratorError::Unavailable(_))
        ));
    }
}
