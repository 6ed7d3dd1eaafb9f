use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_api::config::Config;
use resume_api::extraction::ai::LlmResumeParser;
use resume_api::extraction::{HeuristicParser, ResumeParser};
use resume_api::layout::PageConfig;
use resume_api::llm_client::{self, LlmClient};
use resume_api::routes::build_router;
use resume_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Heuristic parser is always available; the LLM parser only with API keys.
    let parser: Arc<dyn ResumeParser> = Arc::new(HeuristicParser);
    let ai_parser: Option<Arc<dyn ResumeParser>> = if config.anthropic_api_keys.is_empty() {
        warn!("No Anthropic API keys configured; AI parsing disabled");
        None
    } else {
        let llm = LlmClient::new(config.anthropic_api_keys.clone())?;
        info!(
            "LLM client initialized (model: {}, keys: {})",
            llm_client::MODEL,
            llm.key_count()
        );
        Some(Arc::new(LlmResumeParser::new(llm)))
    };

    let page_config = PageConfig::a4(config.page_font, config.page_margin_mm);
    info!(
        "Page config: A4 {:?} {}pt, {:.1}em × {} lines",
        page_config.font,
        page_config.font_size_pt,
        page_config.text_width_em(),
        page_config.usable_height_lines()
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        parser,
        ai_parser,
        page_config,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS origins to the editor frontend

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
