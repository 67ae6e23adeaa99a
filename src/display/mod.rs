//! Display formatting for terminal output
//!
//! Provides utilities for formatting the ledger, the budget summary and the
//! guidance dialogs for terminal display.

pub mod dialog;
pub mod ledger;
pub mod summary;

pub use dialog::format_dialog;
pub use ledger::{format_savings_list, format_transaction_list, format_transaction_short};
pub use summary::{format_snapshot, format_survival_meter};
