pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers as extraction;
use crate::layout::handlers as layout;
use crate::state::AppState;
use crate::upload::handlers as upload;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resumes/import", post(upload::handle_import))
        .route("/api/v1/resumes/extract", post(extraction::handle_extract))
        .route(
            "/api/v1/resumes/extract/ai",
            post(extraction::handle_extract_ai),
        )
        .route("/api/v1/resumes/page-fit", post(layout::handle_page_fit))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
