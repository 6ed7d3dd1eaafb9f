use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::ResumeRecord;
use crate::state::AppState;
use crate::upload::{decode_upload_blocking, Decoded, FileKind};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub upload_id: Uuid,
    /// Detected upload format ("pdf", "docx", ...).
    pub format: &'static str,
    /// "passthrough" for JSON uploads, otherwise the parser backend.
    pub backend: &'static str,
    pub record: ResumeRecord,
}

struct UploadedFile {
    kind: FileKind,
    bytes: Bytes,
}

/// POST /api/v1/resumes/import
///
/// Multipart fields: `file` (required) and `prior` (optional JSON record to merge into).
pub async fn handle_import(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, AppError> {
    let upload_id = Uuid::new_v4();
    let limit = state.config.max_upload_bytes;

    let mut file: Option<UploadedFile> = None;
    let mut prior = ResumeRecord::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let kind = FileKind::detect(filename.as_deref(), content_type.as_deref())?;
                let bytes = field.bytes().await.map_err(|e| multipart_error(e, limit))?;
                info!(
                    %upload_id,
                    format = kind.as_str(),
                    bytes = bytes.len(),
                    "Resume upload received"
                );
                file = Some(UploadedFile { kind, bytes });
            }
            "prior" => {
                let bytes = field.bytes().await.map_err(|e| multipart_error(e, limit))?;
                if !bytes.is_empty() {
                    prior = ResumeRecord::from_json_slice(&bytes)?;
                }
            }
            _ => {}
        }
    }

    // An empty text file decodes to no lines and the parser hands `prior` back.
    let UploadedFile { kind, bytes } = file.ok_or_else(|| {
        AppError::Validation("multipart field 'file' is required".to_string())
    })?;

    let (record, backend) = match decode_upload_blocking(kind, bytes).await? {
        Decoded::Record(record) => (record, "passthrough"),
        Decoded::Text(text) => (
            state.parser.parse(&text, &prior).await?,
            state.parser.backend(),
        ),
    };

    info!(%upload_id, backend, "Resume import finished");
    Ok(Json(ImportResponse {
        upload_id,
        format: kind.as_str(),
        backend,
        record,
    }))
}

fn multipart_error(e: MultipartError, limit: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::Validation(format!("malformed multipart body: {}", e.body_text()))
    }
}
