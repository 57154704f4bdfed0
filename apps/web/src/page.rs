//! The single interactive page: current selection plus the state of the
//! latest submission.
//!
//! `ViewState` is the request lifecycle `Idle -> InFlight -> Succeeded | Failed`.
//! A result and an error can never be held at the same time.

use tracing::debug;

use crate::errors::SubmitError;
use crate::models::{AnalysisResult, Company};
use crate::selection::{AttachedFile, Selection};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Idle,
    InFlight,
    Succeeded(AnalysisResult),
    Failed(String),
}

/// Everything a submission needs, copied out of the page so the page lock is
/// not held while the request is outstanding.
#[derive(Debug, Clone)]
pub struct SubmissionTicket {
    pub id: u64,
    pub company: Company,
    pub files: Vec<AttachedFile>,
}

#[derive(Debug, Default)]
pub struct Page {
    pub selection: Selection,
    view: ViewState,
    issued: u64,
}

impl Page {
    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.view {
            ViewState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.view {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.view, ViewState::InFlight)
    }

    /// Validates the selection and moves to `InFlight`. An empty selection
    /// settles immediately as a validation failure.
    pub fn begin_submission(&mut self) -> Result<SubmissionTicket, SubmitError> {
        if self.selection.is_empty() {
            let err = SubmitError::NoFiles;
            self.view = ViewState::Failed(err.user_message());
            return Err(err);
        }

        self.issued += 1;
        self.view = ViewState::InFlight;
        Ok(SubmissionTicket {
            id: self.issued,
            company: self.selection.company(),
            files: self.selection.files().to_vec(),
        })
    }

    /// Records the outcome of a submission.
    ///
    /// While the newest ticket is still outstanding the page stays `InFlight`
    /// and outcomes of older tickets are dropped. Once the newest ticket has
    /// settled, whichever outcome arrives last is the one left on the page.
    pub fn settle(&mut self, ticket_id: u64, outcome: Result<AnalysisResult, SubmitError>) {
        if ticket_id != self.issued && self.is_in_flight() {
            debug!(
                "Dropping outcome of submission #{ticket_id}; newer submission #{} is in flight",
                self.issued
            );
            return;
        }
        self.view = match outcome {
            Ok(result) => ViewState::Succeeded(result),
            Err(err) => ViewState::Failed(err.user_message()),
        };
    }
}
