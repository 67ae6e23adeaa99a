//! Budget session controller
//!
//! The single owner of the ledger, the threshold monitor and both guidance
//! dialogs. Front ends drive the assistant exclusively through this type.
//!
//! Mutations are synchronous and return an [`Update`]. When a mutation trips
//! the survival monitor the diagnosis dialog is already `Loading` and the
//! update carries an [`AdviceRequest`] to hand to [`BudgetSession::deliver_advice`].
//! The `async` convenience methods do both steps.

use tracing::{debug, info};

use super::dialog::{DialogKind, DialogState, DialogTicket, GuidanceDialog};
use super::ledger::{BudgetSnapshot, Ledger};
use super::monitor::ThresholdMonitor;
use crate::config::Settings;
use crate::gateway::CollaboratorGateway;
use crate::models::{Money, SavingsLogEntry, Transaction, TransactionId};
use crate::reports::{assemble_advice, assemble_report, AdviceInput, ReportInput};

/// Outstanding advice call for an open diagnosis dialog
#[derive(Debug, Clone)]
pub struct AdviceRequest {
    pub ticket: DialogTicket,
    pub input: AdviceInput,
}

/// Outstanding report call for an open report dialog
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub ticket: DialogTicket,
    pub input: ReportInput,
}

/// Result of a session mutation
#[derive(Debug, Clone)]
pub struct Update<T> {
    /// What the mutation produced, if anything
    pub value: T,
    /// Aggregates after the mutation
    pub snapshot: BudgetSnapshot,
    /// Whether this mutation opened the diagnosis dialog
    pub diagnosis_triggered: bool,
    /// Advice still to be fetched; `None` once delivered
    pub advice: Option<AdviceRequest>,
}

/// Normalize and parse a user-typed amount
///
/// Accepts a decimal comma ("15,50"). Returns `None` for anything that is
/// not a positive amount.
pub fn parse_amount(input: &str) -> Option<Money> {
    Money::parse(&input.trim().replace(',', "."))
        .ok()
        .filter(|amount| amount.is_positive())
}

/// Explicit state container for one budgeting cycle
pub struct BudgetSession {
    ledger: Ledger,
    monitor: ThresholdMonitor,
    diagnosis: GuidanceDialog,
    report: GuidanceDialog,
    gateway: CollaboratorGateway,
}

impl BudgetSession {
    /// Create a session with default threshold and savings prefix
    pub fn new(gateway: CollaboratorGateway) -> Self {
        Self::from_parts(Ledger::new(), ThresholdMonitor::default(), gateway)
    }

    /// Create a session honoring the user's settings
    pub fn with_settings(gateway: CollaboratorGateway, settings: &Settings) -> Self {
        Self::from_parts(
            Ledger::with_savings_prefix(settings.savings_prefix.clone()),
            ThresholdMonitor::new(settings.survival_threshold_percent),
            gateway,
        )
    }

    fn from_parts(ledger: Ledger, monitor: ThresholdMonitor, gateway: CollaboratorGateway) -> Self {
        Self {
            ledger,
            monitor,
            diagnosis: GuidanceDialog::new(DialogKind::Diagnosis),
            report: GuidanceDialog::new(DialogKind::Report),
            gateway,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn snapshot(&self) -> BudgetSnapshot {
        self.ledger.snapshot()
    }

    pub fn threshold_percent(&self) -> u32 {
        self.monitor.threshold_percent()
    }

    pub fn diagnosis(&self) -> &GuidanceDialog {
        &self.diagnosis
    }

    pub fn report_dialog(&self) -> &GuidanceDialog {
        &self.report
    }

    // === Synchronous mutations ===

    /// Declare the monthly revenue (no-op once configured or when invalid)
    pub fn set_revenue(&mut self, value: Money) -> Update<bool> {
        let accepted = self.ledger.set_revenue(value);
        self.settle(accepted)
    }

    /// Record an already-classified expense
    pub fn record_expense(
        &mut self,
        description: &str,
        amount: Money,
        category: crate::models::Category,
    ) -> Update<Option<Transaction>> {
        let transaction = self.ledger.add_transaction(description, amount, category);
        self.settle(transaction)
    }

    /// Delete an expense; unknown IDs are ignored
    pub fn delete_expense(&mut self, id: TransactionId) -> Update<Option<Transaction>> {
        let removed = self.ledger.delete_transaction(id);
        self.settle(removed)
    }

    /// Record money diverted away from spending
    pub fn save_money(&mut self, description: &str, amount: &str) -> Update<Option<SavingsLogEntry>> {
        let entry = parse_amount(amount).and_then(|amount| self.ledger.add_savings(description, amount));
        self.settle(entry)
    }

    /// Clear everything: revenue, both lists and both dialogs
    ///
    /// All writes happen in this one call, so no caller can observe a
    /// partially reset session.
    pub fn reset(&mut self) -> BudgetSnapshot {
        self.ledger.reset();
        self.monitor.reset();
        self.diagnosis.reset();
        self.report.reset();
        info!("Session reset");
        self.ledger.snapshot()
    }

    /// Evaluate the monitor after a mutation and open the diagnosis if needed
    fn settle<T>(&mut self, value: T) -> Update<T> {
        let triggered = self.monitor.evaluate(&self.ledger, self.diagnosis.is_open());
        let advice = if triggered {
            let ticket = self.diagnosis.open();
            info!(threshold = self.monitor.threshold_percent(), "Survival threshold crossed");
            Some(AdviceRequest {
                ticket,
                input: assemble_advice(&self.ledger, self.monitor.threshold_percent()),
            })
        } else {
            None
        };

        Update {
            value,
            snapshot: self.ledger.snapshot(),
            diagnosis_triggered: triggered,
            advice,
        }
    }

    // === Dialogs ===

    /// Fetch advice for an open diagnosis and move it to `Ready`
    ///
    /// Collaborator failures resolve the dialog with fallback text.
    pub async fn deliver_advice(&mut self, request: AdviceRequest) -> bool {
        let text = self.gateway.advise(&request.input).await;
        self.diagnosis.resolve(request.ticket, text)
    }

    /// User acknowledgment of the diagnosis dialog
    pub fn acknowledge_diagnosis(&mut self) -> bool {
        self.diagnosis.acknowledge()
    }

    /// Open the report dialog and assemble its input
    pub fn open_report(&mut self) -> ReportRequest {
        let ticket = self.report.open();
        ReportRequest {
            ticket,
            input: assemble_report(&self.ledger),
        }
    }

    /// Fetch the narrative for an open report dialog
    pub async fn deliver_report(&mut self, request: ReportRequest) -> bool {
        let text = self.gateway.report(&request.input).await;
        self.report.resolve(request.ticket, text)
    }

    /// Close the report dialog
    pub fn close_report(&mut self) -> bool {
        self.report.acknowledge()
    }

    // === Async front door ===

    /// Classify and record an expense typed by the user
    ///
    /// Invalid input (empty description, unparsable or non-positive amount)
    /// is a no-op and never reaches the classifier.
    pub async fn add_expense(&mut self, description: &str, amount: &str) -> Update<Option<Transaction>> {
        let description = description.trim();
        let amount = match parse_amount(amount) {
            Some(amount) if !description.is_empty() => amount,
            _ => {
                debug!(description, amount, "Ignoring invalid expense input");
                return self.settle(None);
            }
        };

        let category = self.gateway.classify(description, amount).await;
        let update = self.record_expense(description, amount, category);
        self.complete(update).await
    }

    /// Declare revenue from user input
    pub async fn declare_revenue(&mut self, value: &str) -> Update<bool> {
        let update = match parse_amount(value) {
            Some(amount) => self.set_revenue(amount),
            None => self.settle(false),
        };
        self.complete(update).await
    }

    /// Delete an expense and deliver any advice the deletion triggered
    pub async fn remove_expense(&mut self, id: TransactionId) -> Update<Option<Transaction>> {
        let update = self.delete_expense(id);
        self.complete(update).await
    }

    /// Open the report dialog and wait for its narrative
    pub async fn generate_report(&mut self) -> Option<String> {
        let request = self.open_report();
        self.deliver_report(request).await;
        self.report.content().map(str::to_string)
    }

    async fn complete<T>(&mut self, mut update: Update<T>) -> Update<T> {
        if let Some(request) = update.advice.take() {
            self.deliver_advice(request).await;
        }
        update
    }

    /// Current state of the diagnosis dialog
    pub fn diagnosis_state(&self) -> DialogState {
        self.diagnosis.state()
    }

    /// Current state of the report dialog
    pub fn report_state(&self) -> DialogState {
        self.report.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{
        Advisor, Classifier, CollaboratorError, FallbackTexts, Reporter, TemplateAdvisor,
        TemplateReporter,
    };
    use crate::models::Category;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Fixed(Category);

    #[async_trait]
    impl Classifier for Fixed {
        async fn classify(&self, _: &str, _: Money) -> Result<String, CollaboratorError> {
            Ok(self.0.label().to_string())
        }
    }

    struct Failing;

    #[async_trait]
    impl Classifier for Failing {
        async fn classify(&self, _: &str, _: Money) -> Result<String, CollaboratorError> {
            Err(CollaboratorError::Unavailable("down".into()))
        }
    }

    #[async_trait]
    impl Advisor for Failing {
        async fn advise(&self, _: &AdviceInput) -> Result<String, CollaboratorError> {
            Err(CollaboratorError::Timeout(5))
        }
    }

    #[derive(Default)]
    struct CountingReporter(AtomicUsize);

    #[async_trait]
    impl Reporter for CountingReporter {
        async fn report(&self, _: &ReportInput) -> Result<String, CollaboratorError> {
            let n = self.0.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(format!("report #{}", n))
        }
    }

    fn session_with(classifier: impl Classifier + 'static) -> BudgetSession {
        BudgetSession::new(CollaboratorGateway::new(
            Arc::new(classifier),
            Arc::new(TemplateAdvisor::default()),
            Arc::new(TemplateReporter::default()),
            FallbackTexts::default(),
        ))
    }

    #[tokio::test]
    async fn test_rent_over_threshold_opens_diagnosis() {
        let mut session = session_with(Fixed(Category::Survival));
        session.declare_revenue("5000").await;

        // Step through the state machine by hand
        let update = session.record_expense("Rent", Money::from_units(3200, 0), Category::Survival);
        assert!(update.diagnosis_triggered);
        assert!((update.snapshot.survival_percentage() - 64.0).abs() < 1e-9);
        assert_eq!(session.diagnosis_state(), DialogState::Loading);

        let request = update.advice.expect("advice request");
        assert!(session.deliver_advice(request).await);
        assert_eq!(session.diagnosis_state(), DialogState::Ready);
        assert!(session.diagnosis().content().unwrap().contains("Rent"));

        assert!(session.acknowledge_diagnosis());
        assert_eq!(session.diagnosis_state(), DialogState::Closed);
    }

    #[tokio::test]
    async fn test_add_expense_delivers_advice() {
        let mut session = session_with(Fixed(Category::Survival));
        session.declare_revenue("5000").await;

        let update = session.add_expense("Rent", "3200").await;
        assert!(update.value.is_some());
        assert!(update.diagnosis_triggered);
        assert!(update.advice.is_none());
        assert_eq!(session.diagnosis_state(), DialogState::Ready);
    }

    #[tokio::test]
    async fn test_no_trigger_without_revenue() {
        let mut session = session_with(Fixed(Category::Survival));
        let update = session.add_expense("Rent", "3200").await;

        assert!(update.value.is_some());
        assert_eq!(update.snapshot.survival_ratio, 0.0);
        assert!(!update.diagnosis_triggered);
        assert_eq!(session.diagnosis_state(), DialogState::Closed);
    }

    #[tokio::test]
    async fn test_leisure_expense_never_triggers() {
        let mut session = session_with(Fixed(Category::Leisure));
        session.declare_revenue("2000").await;

        let update = session.add_expense("Coffee", "15").await;
        assert_eq!(update.value.unwrap().category, Category::Leisure);
        assert_eq!(update.snapshot.survival_percentage(), 0.0);
        assert!(!update.diagnosis_triggered);
    }

    #[tokio::test]
    async fn test_failing_classifier_defaults_to_extras() {
        let mut session = session_with(Failing);
        let update = session.add_expense("Mystery charge", "12,50").await;

        let txn = update.value.unwrap();
        assert_eq!(txn.category, Category::Extras);
        assert_eq!(txn.amount, Money::from_cents(1250));
    }

    #[tokio::test]
    async fn test_failing_advisor_still_reaches_ready() {
        let mut session = BudgetSession::new(CollaboratorGateway::new(
            Arc::new(Fixed(Category::Survival)),
            Arc::new(Failing),
            Arc::new(TemplateReporter::default()),
            FallbackTexts::default(),
        ));
        session.declare_revenue("1000").await;
        session.add_expense("Rent", "900").await;

        assert_eq!(session.diagnosis_state(), DialogState::Ready);
        assert_eq!(
            session.diagnosis().content(),
            Some(FallbackTexts::default().advice.as_str())
        );
    }

    #[tokio::test]
    async fn test_open_dialog_blocks_new_trigger() {
        let mut session = session_with(Fixed(Category::Survival));
        session.declare_revenue("1000").await;
        session.add_expense("Rent", "700").await;
        assert_eq!(session.diagnosis_state(), DialogState::Ready);

        let update = session.add_expense("Power", "100").await;
        assert!(!update.diagnosis_triggered);

        session.acknowledge_diagnosis();
        let update = session.add_expense("Water", "50").await;
        assert!(update.diagnosis_triggered);
    }

    #[tokio::test]
    async fn test_invalid_input_is_noop() {
        let mut session = session_with(Fixed(Category::Survival));
        let before = session.ledger().clone();

        assert!(session.add_expense("", "10").await.value.is_none());
        assert!(session.add_expense("Rent", "abc").await.value.is_none());
        assert!(session.add_expense("Rent", "-3").await.value.is_none());
        assert!(!session.declare_revenue("zero").await.value);
        assert!(session.save_money("Gym", "0").value.is_none());
        assert_eq!(session.ledger(), &before);
    }

    #[tokio::test]
    async fn test_huge_amounts_do_not_overflow_totals() {
        let mut session = session_with(Fixed(Category::Survival));
        session.declare_revenue("5000").await;

        assert!(session.add_expense("Rent", "90000000000000000").await.value.is_none());
        assert!(session.add_expense("Rent", "90000000000000000").await.value.is_none());
        assert!(session.ledger().transactions().is_empty());

        let huge = Money::from_cents(i64::MAX / 2 + 1);
        session.record_expense("Rent", huge, Category::Survival);
        let update = session.record_expense("Rent", huge, Category::Survival);
        assert_eq!(update.snapshot.total_expenses, Money::from_cents(i64::MAX));
        assert!(update.snapshot.available_balance.is_negative());
    }

    #[tokio::test]
    async fn test_save_money_updates_balance() {
        let mut session = session_with(Fixed(Category::Leisure));
        session.declare_revenue("2000").await;
        session.add_expense("Cinema", "50").await;

        let update = session.save_money("Renegotiated internet", "30");
        assert_eq!(update.value.unwrap().description, "Savings: Renegotiated internet");
        assert_eq!(update.snapshot.available_balance, Money::from_units(1980, 0));
    }

    #[tokio::test]
    async fn test_delete_missing_leaves_state_unchanged() {
        let mut session = session_with(Fixed(Category::Leisure));
        session.declare_revenue("2000").await;
        session.add_expense("Cinema", "50").await;

        let before = session.ledger().clone();
        let update = session.remove_expense(TransactionId::new()).await;
        assert!(update.value.is_none());
        assert_eq!(session.ledger(), &before);
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let mut session = session_with(Fixed(Category::Survival));
        session.declare_revenue("1000").await;
        session.add_expense("Rent", "900").await;
        session.save_money("Gym", "20");
        session.generate_report().await;

        let snapshot = session.reset();
        assert_eq!(snapshot.revenue, Money::zero());
        assert!(session.ledger().transactions().is_empty());
        assert!(session.ledger().savings().is_empty());
        assert_eq!(session.diagnosis_state(), DialogState::Closed);
        assert_eq!(session.report_state(), DialogState::Closed);
    }

    #[tokio::test]
    async fn test_reset_drops_in_flight_advice() {
        let mut session = session_with(Fixed(Category::Survival));
        session.declare_revenue("1000").await;
        let update = session.record_expense("Rent", Money::from_units(900, 0), Category::Survival);

        session.reset();
        assert!(!session.deliver_advice(update.advice.unwrap()).await);
        assert_eq!(session.diagnosis_state(), DialogState::Closed);
    }

    #[tokio::test]
    async fn test_report_one_call_per_open_latest_wins() {
        let reporter = Arc::new(CountingReporter::default());
        let mut session = BudgetSession::new(CollaboratorGateway::new(
            Arc::new(Fixed(Category::Leisure)),
            Arc::new(TemplateAdvisor::default()),
            reporter.clone(),
            FallbackTexts::default(),
        ));

        let first = session.open_report();
        let second = session.open_report();
        assert_eq!(session.report_state(), DialogState::Loading);

        assert!(session.deliver_report(second).await);
        assert!(!session.deliver_report(first).await);
        assert_eq!(reporter.0.load(Ordering::SeqCst), 2);
        assert_eq!(session.report_state(), DialogState::Ready);
        assert_eq!(session.report_dialog().content(), Some("report #1"));

        assert!(session.close_report());
        assert_eq!(session.generate_report().await.as_deref(), Some("report #3"));
    }

    #[tokio::test]
    async fn test_late_report_after_close_stays_closed() {
        let mut session = session_with(Fixed(Category::Leisure));
        let request = session.open_report();
        session.close_report();

        assert!(session.deliver_report(request).await);
        assert_eq!(session.report_state(), DialogState::Closed);
        assert!(session.report_dialog().content().is_some());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("15,50"), Some(Money::from_cents(1550)));
        assert_eq!(parse_amount(" 3200 "), Some(Money::from_units(3200, 0)));
        assert_eq!(parse_amount("0"), None);
        assert_eq!(parse_amount("-1"), None);
        assert_eq!(parse_amount("ten"), None);
        assert_eq!(parse_amount("abc12"), None);
        assert_eq!(parse_amount("Rent12"), None);
        assert_eq!(parse_amount("R$ 10"), Some(Money::from_units(10, 0)));
        assert_eq!(parse_amount("$10"), Some(Money::from_units(10, 0)));
    }
}
