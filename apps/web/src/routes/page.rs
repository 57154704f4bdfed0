//! Axum handlers for the interactive page.

use axum::{
    extract::{Multipart, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{Html, IntoResponse},
};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::Company;
use crate::presenter::export::EXPORT_CONTENT_TYPE;
use crate::presenter::{export_as_file, render_page};
use crate::selection::AttachedFile;
use crate::state::AppState;

/// Form fields posted by the page.
#[derive(Debug, Default)]
struct AnalyzeForm {
    company: Option<Company>,
    files: Vec<AttachedFile>,
}

/// Reads the browser's multipart form. A file input left empty arrives as a
/// part with no file name and no content; those parts are skipped.
async fn read_form(mut multipart: Multipart) -> Result<AnalyzeForm, AppError> {
    let mut form = AnalyzeForm::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("ticker") => {
                let value = field.text().await?;
                let company = value
                    .parse::<Company>()
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                form.company = Some(company);
            }
            Some("files") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                form.files.push(AttachedFile::new(file_name, content_type, bytes));
            }
            _ => {}
        }
    }
    Ok(form)
}

/// GET /
pub async fn handle_page(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&*state.page.read().await))
}

/// POST /analyze
///
/// Submits the posted selection and renders the settled page. Submission
/// failures are shown inline rather than as an HTTP error.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let form = read_form(multipart).await?;

    // The outcome is already logged and recorded on the page.
    let _ = state
        .controller
        .submit_selection(form.company, form.files)
        .await;

    Ok(Html(render_page(&*state.page.read().await)))
}

/// GET /export
///
/// Downloads the current result as `<ticker>_analysis_<run_id>.json`.
pub async fn handle_export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let result = state
        .page
        .read()
        .await
        .result()
        .cloned()
        .ok_or_else(|| AppError::NotFound("No analysis result to export".to_string()))?;

    let export = export_as_file(&result)?;

    if let Some(dir) = state.config.export_dir.clone() {
        let staged = export.clone();
        match tokio::task::spawn_blocking(move || staged.write_into(&dir)).await {
            Ok(Ok(path)) => info!("Export mirrored to {}", path.display()),
            Ok(Err(e)) => warn!("Failed to mirror export {}: {e}", export.file_name),
            Err(e) => warn!("Export mirror task failed: {e}"),
        }
    }

    Ok((
        [
            (CONTENT_TYPE, EXPORT_CONTENT_TYPE.to_string()),
            (CONTENT_DISPOSITION, export.content_disposition()),
        ],
        export.contents,
    ))
}
