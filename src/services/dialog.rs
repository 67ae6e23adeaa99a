//! Guidance dialog state machine
//!
//! Both the diagnosis (advice) dialog and the report dialog follow the same
//! lifecycle:
//!
//! ```text
//! Closed --open--> Loading --resolve--> Ready --acknowledge--> Closed
//! ```
//!
//! Every `open` issues a [`DialogTicket`]. Only the ticket of the most recent
//! open may resolve the dialog; results carried by older tickets are dropped.
//! A result that arrives after the user closed the dialog still replaces the
//! stored text but never reopens it.

use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

/// Which dialog a ticket or transition belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogKind {
    Diagnosis,
    Report,
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Diagnosis => write!(f, "diagnosis"),
            Self::Report => write!(f, "report"),
        }
    }
}

/// Where a dialog is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogState {
    Closed,
    /// Open and waiting on a collaborator
    Loading,
    /// Open and showing collaborator text
    Ready,
}

impl DialogState {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// Proof of a specific `open` call, used to deliver its result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogTicket {
    kind: DialogKind,
    sequence: u64,
}

/// A dialog fed by a text-generation collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct GuidanceDialog {
    kind: DialogKind,
    state: DialogState,
    content: Option<String>,
    pending: Option<u64>,
    next_sequence: u64,
}

impl GuidanceDialog {
    pub fn new(kind: DialogKind) -> Self {
        Self {
            kind,
            state: DialogState::Closed,
            content: None,
            pending: None,
            next_sequence: 0,
        }
    }

    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn is_loading(&self) -> bool {
        self.state == DialogState::Loading
    }

    /// Text delivered by the latest resolved request
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Enter `Loading` and issue a ticket for the collaborator result
    ///
    /// Opening an already open dialog supersedes the outstanding request.
    pub fn open(&mut self) -> DialogTicket {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        if let Some(previous) = self.pending.replace(sequence) {
            debug!(dialog = %self.kind, previous, sequence, "Superseding outstanding request");
        }
        self.state = DialogState::Loading;
        self.content = None;
        info!(dialog = %self.kind, sequence, "Dialog opened");

        DialogTicket {
            kind: self.kind,
            sequence,
        }
    }

    /// Deliver collaborator text for `ticket`
    ///
    /// Returns `false` if the ticket is stale or belongs to another dialog.
    pub fn resolve(&mut self, ticket: DialogTicket, text: String) -> bool {
        if ticket.kind != self.kind || self.pending != Some(ticket.sequence) {
            debug!(dialog = %self.kind, sequence = ticket.sequence, "Dropping stale result");
            return false;
        }

        self.pending = None;
        self.content = Some(text);
        if self.state == DialogState::Loading {
            self.state = DialogState::Ready;
            info!(dialog = %self.kind, "Dialog ready");
        } else {
            debug!(dialog = %self.kind, "Result arrived after close");
        }
        true
    }

    /// User dismissal; returns whether the dialog was open
    pub fn acknowledge(&mut self) -> bool {
        if !self.state.is_open() {
            return false;
        }
        self.state = DialogState::Closed;
        info!(dialog = %self.kind, "Dialog closed");
        true
    }

    /// Back to a pristine closed dialog; outstanding tickets become stale
    pub fn reset(&mut self) {
        self.state = DialogState::Closed;
        self.content = None;
        self.pending = None;
    }
}
