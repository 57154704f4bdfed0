use crate::config::Config;
use crate::submission::{SharedPage, SubmissionController};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one page instance. Handlers lock it only for short transitions.
    pub page: SharedPage,
    pub controller: SubmissionController,
    pub config: Config,
}

impl AppState {
    pub fn new(controller: SubmissionController, config: Config) -> Self {
        Self {
            page: controller.page().clone(),
            controller,
            config,
        }
    }
}
