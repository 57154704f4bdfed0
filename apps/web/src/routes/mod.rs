pub mod health;
pub mod page;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes();
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(page::handle_page))
        .route(
            "/analyze",
            post(page::handle_analyze).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/export", get(page::handle_export))
        .with_state(state)
}
