use std::sync::Arc;

use crate::config::Config;
use crate::extraction::ResumeParser;
use crate::layout::PageConfig;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Parser used for uploads and `/extract`. Default: HeuristicParser.
    pub parser: Arc<dyn ResumeParser>,
    /// LLM-backed parser for `/extract/ai`; `None` when no API key is configured.
    pub ai_parser: Option<Arc<dyn ResumeParser>>,
    /// A4 page layout used by the page-fit estimate.
    pub page_config: PageConfig,
}
