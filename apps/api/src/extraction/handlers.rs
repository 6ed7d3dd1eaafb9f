use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::ResumeParser;
use crate::models::ResumeRecord;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractRequest {
    pub text: String,
    /// Current editing state; extracted fields are merged into it.
    #[serde(default, deserialize_with = "crate::models::resume::null_as_default")]
    pub prior: ResumeRecord,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    pub record: ResumeRecord,
    /// "heuristic" | "llm"
    pub backend: &'static str,
}

/// POST /api/v1/resumes/extract
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(req): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    run_parser(state.parser.as_ref(), &req).await.map(Json)
}

/// POST /api/v1/resumes/extract/ai
pub async fn handle_extract_ai(
    State(state): State<AppState>,
    Json(req): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    let parser = state.ai_parser.as_deref().ok_or_else(|| {
        AppError::FeatureDisabled(
            "AI parsing is not configured; set ANTHROPIC_API_KEYS to enable it".to_string(),
        )
    })?;
    run_parser(parser, &req).await.map(Json)
}

async fn run_parser(
    parser: &dyn ResumeParser,
    req: &ExtractRequest,
) -> Result<ExtractResponse, AppError> {
    let record = parser.parse(&req.text, &req.prior).await?;
    info!(
        backend = parser.backend(),
        chars = req.text.chars().count(),
        "Resume text extracted"
    );
    Ok(ExtractResponse {
        record,
        backend: parser.backend(),
    })
}
