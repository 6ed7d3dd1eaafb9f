use anyhow::{Context, Result};

use crate::layout::font_metrics::DEFAULT_MARGIN_MM;
use crate::layout::FontFamily;
use crate::llm_client::KeyRing;
use crate::upload::MAX_UPLOAD_BYTES;

/// Application configuration loaded from environment variables.
/// Every variable is optional; startup fails only on values that do not parse.
#[derive(Debug, Clone)]
pub struct Config {
    /// Anthropic credentials for AI parsing. Empty disables the AI endpoint.
    pub anthropic_api_keys: KeyRing,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub page_font: FontFamily,
    pub page_margin_mm: f32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_keys: api_keys_from_env(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: optional_env("MAX_UPLOAD_BYTES")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("MAX_UPLOAD_BYTES must be a byte count")?
                .unwrap_or(MAX_UPLOAD_BYTES),
            page_font: optional_env("PAGE_FONT")
                .map(|v| v.parse::<FontFamily>())
                .transpose()
                .map_err(anyhow::Error::msg)
                .context("PAGE_FONT must be 'sans' or 'serif'")?
                .unwrap_or_default(),
            page_margin_mm: optional_env("PAGE_MARGIN_MM")
                .map(|v| v.parse::<f32>())
                .transpose()
                .context("PAGE_MARGIN_MM must be a number of millimetres")?
                .unwrap_or(DEFAULT_MARGIN_MM),
        })
    }
}

/// `ANTHROPIC_API_KEYS` (comma separated) wins over the single `ANTHROPIC_API_KEY`.
fn api_keys_from_env() -> KeyRing {
    optional_env("ANTHROPIC_API_KEYS")
        .or_else(|| optional_env("ANTHROPIC_API_KEY"))
        .map(|raw| KeyRing::parse(&raw))
        .unwrap_or_default()
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
