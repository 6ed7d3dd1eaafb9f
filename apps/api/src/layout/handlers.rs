use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::layout::{analyze_page_fit, FontFamily, PageFitReport};
use crate::models::ResumeRecord;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFitRequest {
    pub record: ResumeRecord,
    /// Overrides the configured preview font.
    #[serde(default)]
    pub font: Option<FontFamily>,
}

/// POST /api/v1/resumes/page-fit
pub async fn handle_page_fit(
    State(state): State<AppState>,
    Json(req): Json<PageFitRequest>,
) -> Result<Json<PageFitReport>, AppError> {
    let config = match req.font {
        Some(font) => state.page_config.with_font(font),
        None => state.page_config,
    };

    // CPU-bound wrap estimation runs on the blocking pool.
    let report = tokio::task::spawn_blocking(move || analyze_page_fit(&req.record, &config))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in page fit: {e}")))?;

    tracing::debug!(
        lines = report.total_lines_used,
        available = report.total_lines_available,
        verdict = ?report.verdict,
        "Page fit estimated"
    );
    Ok(Json(report))
}
