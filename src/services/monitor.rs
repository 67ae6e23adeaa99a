//! Survival threshold monitor
//!
//! Decides when the diagnosis dialog must open. The monitor only reacts to a
//! change in the survival total or the revenue, and fires only when the
//! newest expense is a survival expense: the event that pushed (or kept) the
//! ratio over the threshold. Deletions, savings and non-survival expenses
//! never re-fire it on their own.

use tracing::debug;

use super::ledger::Ledger;
use crate::models::Money;

/// Default survival threshold, as a percentage of revenue
pub const DEFAULT_SURVIVAL_THRESHOLD: u32 = 60;

/// Watches the survival ratio across ledger mutations
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdMonitor {
    threshold_percent: u32,
    observed: Observation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Observation {
    survival_total: Money,
    revenue: Money,
}

impl Default for ThresholdMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_SURVIVAL_THRESHOLD)
    }
}

impl ThresholdMonitor {
    /// Create a monitor firing at `threshold_percent` of revenue
    pub fn new(threshold_percent: u32) -> Self {
        Self {
            threshold_percent,
            observed: Observation::default(),
        }
    }

    pub fn threshold_percent(&self) -> u32 {
        self.threshold_percent
    }

    /// Evaluate the ledger after a mutation
    ///
    /// Returns `true` exactly when the diagnosis must be triggered. Calling
    /// this again without a change to the survival total or revenue returns
    /// `false`.
    pub fn evaluate(&mut self, ledger: &Ledger, dialog_open: bool) -> bool {
        let snapshot = ledger.snapshot();
        let observation = Observation {
            survival_total: snapshot.survival_total,
            revenue: snapshot.revenue,
        };

        if observation == self.observed {
            return false;
        }
        self.observed = observation;

        if dialog_open || !snapshot.survival_at_least(self.threshold_percent) {
            return false;
        }

        let caused_by_survival = ledger
            .latest_transaction()
            .map(|t| t.is_survival())
            .unwrap_or(false);

        debug!(
            survival_percentage = snapshot.survival_percentage(),
            threshold = self.threshold_percent,
            caused_by_survival,
            "Survival threshold reached"
        );
        caused_by_survival
    }

    /// Forget the last observation, as after a ledger reset
    pub fn reset(&mut self) {
        self.observed = Observation::default();
    }
}
