use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub const NO_FILES_MESSAGE: &str = "No files selected. Attach at least one document.";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Outcome of a failed submission. Every variant is terminal for that attempt
/// and is recovered from by submitting again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Rejected locally before any request was issued.
    #[error("No files selected. Attach at least one document.")]
    NoFiles,

    /// The service answered with a non-2xx status.
    #[error("{message}")]
    Service { status: u16, message: String },

    /// No usable response: connection failure, aborted request, or a 2xx body
    /// that is not a valid report.
    #[error("{message}")]
    Transport { message: String },
}

impl SubmitError {
    /// Builds a transport error from any failure, substituting a generic
    /// message when the failure carries none.
    pub fn transport(err: impl std::fmt::Display) -> Self {
        let message = err.to_string();
        let message = if message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message
        };
        SubmitError::Transport { message }
    }

    /// The text shown to the user in the page's error area.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::NoFiles => NO_FILES_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SubmitError::NoFiles => "validation",
            SubmitError::Service { .. } => "service",
            SubmitError::Transport { .. } => "transport",
        }
    }
}

/// Errors raised by the HTTP surface itself, outside of a submission.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Export error: {0}")]
    Export(#[from] serde_json::Error),
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        AppError::Validation(format!("Malformed form data: {err}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Export(e) => {
                tracing::error!("Export error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_ERROR",
                    "The analysis could not be exported".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
