//! Analysis client — the only place that talks to the remote analysis service.
//!
//! One multipart POST per submission: a `ticker` text field and one `files`
//! part per attached document. No retries; every failure is reported to the
//! caller as a `SubmitError`.
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::debug;

use crate::errors::SubmitError;
use crate::models::{AnalysisResult, Company};
use crate::selection::AttachedFile;

pub mod error_body;
#[cfg(test)]
pub(crate) mod mock_service;

/// The remote scoring collaborator. `AppState` carries it as
/// `Arc<dyn AnalysisService>` so tests can substitute a fake.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(
        &self,
        company: Company,
        files: &[AttachedFile],
    ) -> Result<AnalysisResult, SubmitError>;
}

#[derive(Clone)]
pub struct HttpAnalysisClient {
    client: Client,
    endpoint: String,
}

impl HttpAnalysisClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn build_form(company: Company, files: &[AttachedFile]) -> Result<Form, SubmitError> {
    let mut form = Form::new().text("ticker", company.ticker());
    for file in files {
        let part = Part::bytes(file.bytes.to_vec()).file_name(file.file_name.clone());
        let part = match file.content_type.as_deref() {
            Some(content_type) => part.mime_str(content_type).map_err(SubmitError::transport)?,
            None => part,
        };
        form = form.part("files", part);
    }
    Ok(form)
}

#[async_trait]
impl AnalysisService for HttpAnalysisClient {
    async fn analyze(
        &self,
        company: Company,
        files: &[AttachedFile],
    ) -> Result<AnalysisResult, SubmitError> {
        let form = build_form(company, files)?;

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(SubmitError::transport)?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Analysis service returned {status}: {body}");
            return Err(SubmitError::Service {
                status: status.as_u16(),
                message: error_body::resolve_message(status.as_u16(), &body),
            });
        }

        let body = response.text().await.map_err(SubmitError::transport)?;
        let result: AnalysisResult = serde_json::from_str(&body)
            .map_err(|e| SubmitError::transport(format!("Malformed analysis response: {e}")))?;

        if let Some(problem) = result.out_of_range_score() {
            return Err(SubmitError::transport(format!(
                "Malformed analysis response: {problem}"
            )));
        }

        debug!(
            "Analysis succeeded: ticker={}, run_id={}",
            result.ticker, result.run_id
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::mock_service::{spawn_service, unreachable_endpoint, SUCCESS_BODY};
    use super::*;
    use crate::selection::file;

    fn client(endpoint: &str) -> HttpAnalysisClient {
        HttpAnalysisClient::new(endpoint, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_success_parses_report() {
        let service = spawn_service(StatusCode::OK, SUCCESS_BODY).await;
        let result = client(&service.url)
            .analyze(Company::A, &[file("q1.pdf", b"%PDF-1")])
            .await
            .unwrap();

        assert_eq!(result.ticker, "A");
        assert_eq!(result.trust_score, 81);
        assert_eq!(result.growth_score, 64);
        assert_eq!(result.run_id, "run-42");
    }

    #[tokio::test]
    async fn test_request_carries_ticker_and_every_file() {
        let service = spawn_service(StatusCode::OK, SUCCESS_BODY).await;
        let files = vec![
            file("annual.pdf", b"one"),
            file("quarterly.pdf", b"two"),
            file("proxy.pdf", b"three"),
        ];
        client(&service.url).analyze(Company::B, &files).await.unwrap();

        let recorded = service.recorded();
        assert_eq!(recorded.requests, 1);
        assert_eq!(recorded.tickers, vec!["B".to_string()]);
        assert_eq!(
            recorded.files,
            vec![
                ("annual.pdf".to_string(), b"one".to_vec()),
                ("quarterly.pdf".to_string(), b"two".to_vec()),
                ("proxy.pdf".to_string(), b"three".to_vec()),
            ]
        );
    }

    #[tokio::test]
    async fn test_structured_service_error() {
        let service = spawn_service(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"boom"}"#).await;
        let err = client(&service.url)
            .analyze(Company::A, &[file("a.pdf", b"x")])
            .await
            .unwrap_err();
        assert_eq!(
            err,
            SubmitError::Service {
                status: 500,
                message: "boom".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_plain_text_service_error() {
        let service = spawn_service(StatusCode::INTERNAL_SERVER_ERROR, "server down").await;
        let err = client(&service.url)
            .analyze(Company::A, &[file("a.pdf", b"x")])
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "server down");
    }

    #[tokio::test]
    async fn test_empty_service_error() {
        let service = spawn_service(StatusCode::INTERNAL_SERVER_ERROR, "").await;
        let err = client(&service.url)
            .analyze(Company::A, &[file("a.pdf", b"x")])
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "HTTP 500");
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_transport_error() {
        let service = spawn_service(StatusCode::OK, "<html>not json</html>").await;
        let err = client(&service.url)
            .analyze(Company::A, &[file("a.pdf", b"x")])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "transport");
        assert!(err.user_message().starts_with("Malformed analysis response"));
    }

    #[tokio::test]
    async fn test_out_of_range_score_is_transport_error() {
        let body = SUCCESS_BODY.replace("\"trust_score\": 81", "\"trust_score\": 181");
        let service = spawn_service(StatusCode::OK, body).await;
        let err = client(&service.url)
            .analyze(Company::A, &[file("a.pdf", b"x")])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "transport");
        assert!(err.user_message().contains("Trust score 181"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let endpoint = unreachable_endpoint().await;
        let err = client(&endpoint)
            .analyze(Company::A, &[file("a.pdf", b"x")])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "transport");
        assert!(!err.user_message().is_empty());
        assert_ne!(err.user_message(), crate::errors::UNKNOWN_ERROR_MESSAGE);
    }
}
