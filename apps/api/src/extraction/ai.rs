//! LLM-backed resume parser.
//!
//! The model's reply is deserialized as a `ResumeRecord`, lifted into a partial and
//! merged through the same normalizer as the heuristic path, so caps and the
//! prior-value rules apply to both backends.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Datelike;
use tracing::{info, warn};

use super::prompts::{build_resume_parse_prompt, resume_parse_system};
use super::{normalize, PartialResume, ResumeParser};
use crate::errors::AppError;
use crate::llm_client::{LlmClient, LlmError, RotationCursor};
use crate::models::ResumeRecord;

pub struct LlmResumeParser {
    llm: LlmClient,
    /// Key index that last succeeded; read before and written after each call.
    cursor: Arc<AtomicUsize>,
}

impl LlmResumeParser {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm,
            cursor: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn cursor(&self) -> RotationCursor {
        RotationCursor(self.cursor.load(Ordering::Relaxed))
    }
}

#[async_trait]
impl ResumeParser for LlmResumeParser {
    async fn parse(&self, text: &str, prior: &ResumeRecord) -> Result<ResumeRecord, AppError> {
        if text.trim().is_empty() {
            return Ok(prior.clone());
        }

        let current_year = chrono::Utc::now().year();
        let prompt = build_resume_parse_prompt(text, current_year);
        let system = resume_parse_system();

        let (parsed, cursor) = self
            .llm
            .call_json::<ResumeRecord>(&prompt, &system, self.cursor())
            .await
            .map_err(|e| {
                warn!("AI resume parsing failed: {e}");
                llm_app_error(e)
            })?;
        self.cursor.store(cursor.0, Ordering::Relaxed);

        info!(
            key_index = cursor.0,
            jobs = parsed.work_experience.len(),
            "AI resume parsing succeeded"
        );

        Ok(normalize(prior, PartialResume::from_record(parsed)))
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

fn llm_app_error(e: LlmError) -> AppError {
    match e {
        LlmError::NoKeys => AppError::FeatureDisabled("AI parsing is not configured".to_string()),
        LlmError::Parse(_) | LlmError::EmptyContent => {
            AppError::Llm("The AI service returned an unreadable resume".to_string())
        }
        other => AppError::Llm(other.to_string()),
    }
}
