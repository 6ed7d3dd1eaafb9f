//! Heuristic resume extraction.
//!
//! raw text → Section Locator → Entry Tokenizer → Field Extractors → Schema Normalizer.
//!
//! Every extractor is a pure function over the document lines. A field that cannot be
//! located is reported as [`Extracted::NotFound`] and the prior value survives the merge.
//! Nothing in this module fails on unrecognizable input.

use async_trait::async_trait;
use chrono::Datelike;
use tracing::debug;

use crate::errors::AppError;
use crate::models::ResumeRecord;

pub mod ai;
pub mod contact;
pub mod entries;
pub mod handlers;
pub mod history;
pub mod identity;
pub mod normalizer;
pub mod prompts;
pub mod sections;
pub mod skills;
pub mod summary;

pub use normalizer::{normalize, PartialResume};

/// Result of a single field extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted<T> {
    Found(T),
    NotFound,
}

impl<T> Extracted<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Extracted::Found(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Extracted::Found(value) => Some(value),
            Extracted::NotFound => None,
        }
    }
}

impl<T> From<Option<T>> for Extracted<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Extracted::NotFound, Extracted::Found)
    }
}

/// An empty list counts as not found.
impl<T> From<Vec<T>> for Extracted<Vec<T>> {
    fn from(items: Vec<T>) -> Self {
        if items.is_empty() {
            Extracted::NotFound
        } else {
            Extracted::Found(items)
        }
    }
}

/// Decoded upload text, split for line heuristics. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub content: String,
    /// Trimmed, non-empty lines of `content`.
    pub lines: Vec<String>,
}

impl RawDocument {
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let lines = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        Self { content, lines }
    }

    /// Runs every field extractor over the document.
    pub fn extract(&self, current_year: i32) -> PartialResume {
        let lines = &self.lines;
        PartialResume {
            name: identity::extract_name(lines),
            position: identity::extract_position(lines),
            email: contact::extract_email(&self.content),
            phone: contact::extract_phone(&self.content),
            address: contact::extract_address(lines),
            social_media: contact::extract_social_links(&self.content),
            summary: summary::extract_summary(lines),
            education: history::extract_education(lines, current_year),
            work_experience: history::extract_work_experience(lines, current_year),
            projects: history::extract_projects(lines, current_year),
            skills: skills::extract_skills(lines),
            languages: skills::extract_languages(lines),
            certifications: history::extract_certifications(lines),
        }
    }
}

/// Extracts a record from decoded text and merges it into `prior`.
///
/// Date placeholders use the current calendar year.
pub fn extract_resume_data(text: &str, prior: &ResumeRecord) -> ResumeRecord {
    extract_resume_data_at(text, prior, chrono::Utc::now().year())
}

/// Same as [`extract_resume_data`] with an explicit year for date placeholders.
pub fn extract_resume_data_at(text: &str, prior: &ResumeRecord, current_year: i32) -> ResumeRecord {
    let document = RawDocument::new(text);
    if document.lines.is_empty() {
        return prior.clone();
    }

    let partial = document.extract(current_year);
    debug!(
        lines = document.lines.len(),
        name = partial.name.is_found(),
        email = partial.email.is_found(),
        summary = partial.summary.is_found(),
        skills = partial.skills.is_found(),
        work_experience = partial.work_experience.is_found(),
        education = partial.education.is_found(),
        "Heuristic extraction finished"
    );

    normalize(prior, partial)
}

// ────────────────────────────────────────────────────────────────────────────
// Parser backends
// ────────────────────────────────────────────────────────────────────────────

/// A resume parsing backend. Implement this to swap how text becomes a record
/// without touching the handlers.
///
/// Carried in `AppState` as `Arc<dyn ResumeParser>`.
#[async_trait]
pub trait ResumeParser: Send + Sync {
    async fn parse(&self, text: &str, prior: &ResumeRecord) -> Result<ResumeRecord, AppError>;

    /// Backend name reported to clients ("heuristic" | "llm").
    fn backend(&self) -> &'static str;
}

/// Default backend: the line-heuristic pipeline. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicParser;

#[async_trait]
impl ResumeParser for HeuristicParser {
    async fn parse(&self, text: &str, prior: &ResumeRecord) -> Result<ResumeRecord, AppError> {
        Ok(extract_resume_data(text, prior))
    }

    fn backend(&self) -> &'static str {
        "heuristic"
    }
}
