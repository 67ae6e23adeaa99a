//! Service layer for Kakebo
//!
//! The service layer owns the budget state: the ledger and its derived
//! aggregates, the survival threshold monitor, the guidance dialogs and the
//! session controller tying them together.

pub mod dialog;
pub mod ledger;
pub mod monitor;
pub mod session;

pub use dialog::{DialogKind, DialogState, DialogTicket, GuidanceDialog};
pub use ledger::{BudgetSnapshot, Ledger};
pub use monitor::{ThresholdMonitor, DEFAULT_SURVIVAL_THRESHOLD};
pub use session::{parse_amount, AdviceRequest, BudgetSession, ReportRequest, Update};
