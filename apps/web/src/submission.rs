//! Submission controller: turns the current selection into one analysis
//! request and settles the page with its outcome.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::analysis_client::AnalysisService;
use crate::errors::SubmitError;
use crate::models::{AnalysisResult, Company};
use crate::page::{Page, SubmissionTicket};
use crate::selection::{AttachedFile, Selection, SUGGESTED_MAX_FILES};

pub type SharedPage = Arc<RwLock<Page>>;

#[derive(Clone)]
pub struct SubmissionController {
    page: SharedPage,
    service: Arc<dyn AnalysisService>,
}

impl SubmissionController {
    pub fn new(page: SharedPage, service: Arc<dyn AnalysisService>) -> Self {
        Self { page, service }
    }

    pub fn page(&self) -> &SharedPage {
        &self.page
    }

    /// Replaces the selection with the posted company and files, then submits
    /// it and waits for it to settle.
    ///
    /// The selection update and the start of the submission happen under one
    /// page lock, so a concurrent submission cannot swap the files in between.
    /// The request runs on its own task and settles the page there, so the
    /// page leaves `InFlight` even if the caller stops waiting.
    pub async fn submit_selection(
        &self,
        company: Option<Company>,
        files: Vec<AttachedFile>,
    ) -> Result<AnalysisResult, SubmitError> {
        let ticket = self
            .begin(move |selection| {
                if let Some(company) = company {
                    selection.set_company(company);
                }
                selection.set_files(files);
            })
            .await?;
        let ticket_id = ticket.id;

        let page = self.page.clone();
        let service = self.service.clone();
        let task = tokio::spawn(async move {
            let outcome = service.analyze(ticket.company, &ticket.files).await;
            log_outcome(&ticket, &outcome);
            page.write().await.settle(ticket.id, outcome.clone());
            outcome
        });

        match task.await {
            Ok(outcome) => outcome,
            Err(join_err) => {
                let err = SubmitError::transport(join_err);
                error!("Submission #{ticket_id} task failed: {err}");
                self.page.write().await.settle(ticket_id, Err(err.clone()));
                Err(err)
            }
        }
    }

    async fn begin(
        &self,
        update: impl FnOnce(&mut Selection),
    ) -> Result<SubmissionTicket, SubmitError> {
        let mut page = self.page.write().await;
        update(&mut page.selection);

        if page.selection.exceeds_guidance() {
            warn!(
                "Submitting {} files, more than the suggested {SUGGESTED_MAX_FILES}",
                page.selection.files().len()
            );
        }

        match page.begin_submission() {
            Ok(ticket) => {
                info!(
                    "Submission #{} started: ticker={}, files={}, bytes={}",
                    ticket.id,
                    ticket.company,
                    ticket.files.len(),
                    page.selection.total_bytes()
                );
                Ok(ticket)
            }
            Err(err) => {
                warn!("Submission rejected: {err}");
                Err(err)
            }
        }
    }
}

fn log_outcome(ticket: &SubmissionTicket, outcome: &Result<AnalysisResult, SubmitError>) {
    match outcome {
        Ok(result) => info!(
            "Submission #{} settled: run_id={}, trust={}, growth={}",
            ticket.id, result.run_id, result.trust_score, result.growth_score
        ),
        Err(SubmitError::Service { status, message }) => error!(
            "Submission #{} failed: service returned {status}: {message}",
            ticket.id
        ),
        Err(err) => error!(
            "Submission #{} failed ({}): {err}",
            ticket.id,
            err.kind()
        ),
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;

    /// Records calls and answers with a fixed outcome, optionally holding the
    /// response until released.
    pub struct FakeService {
        pub calls: AtomicUsize,
        pub requests: Mutex<Vec<(Company, Vec<String>)>>,
        outcome: Result<AnalysisResult, SubmitError>,
        gate: Option<Arc<Notify>>,
    }

    impl FakeService {
        pub fn answering(outcome: Result<AnalysisResult, SubmitError>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
                outcome,
                gate: None,
            }
        }

        pub fn gated(outcome: Result<AnalysisResult, SubmitError>, gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::answering(outcome)
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn last_request(&self) -> Option<(Company, Vec<String>)> {
            self.requests.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl AnalysisService for FakeService {
        async fn analyze(
            &self,
            company: Company,
            files: &[AttachedFile],
        ) -> Result<AnalysisResult, SubmitError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests
                .lock()
                .unwrap()
                .push((company, files.iter().map(|f| f.file_name.clone()).collect()));
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.outcome.clone()
        }
    }
}
