//! LLM Client: the single point of entry for all Claude API calls in the resume API.
//!
//! ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
//! All LLM interactions MUST go through this module.
//!
//! Credentials live in a `KeyRing`. Which key is tried first is an explicit
//! `RotationCursor` passed into every call and handed back on success; the client
//! itself holds no mutable rotation state.

use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
/// Full passes over the key ring before giving up.
const MAX_CYCLES: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("All {keys} API keys failed after {cycles} cycles")]
    Exhausted { keys: usize, cycles: u32 },

    #[error("No API keys configured")]
    NoKeys,

    #[error("LLM returned empty content")]
    EmptyContent,
}

// ────────────────────────────────────────────────────────────────────────────
// Key rotation
// ────────────────────────────────────────────────────────────────────────────

/// Ordered set of API credentials. Empty entries are dropped.
#[derive(Clone, Default)]
pub struct KeyRing {
    keys: Vec<String>,
}

impl std::fmt::Debug for KeyRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyRing")
            .field("keys", &self.keys.len())
            .finish()
    }
}

impl KeyRing {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys
                .into_iter()
                .map(Into::into)
                .map(|k: String| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Parses a comma separated list, e.g. the `ANTHROPIC_API_KEYS` variable.
    pub fn parse(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn key(&self, index: usize) -> &str {
        &self.keys[index % self.keys.len()]
    }
}

/// Index of the key to try first. Passed into each call, returned on success.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RotationCursor(pub usize);

impl RotationCursor {
    /// Key indices in attempt order for one full cycle, starting at the cursor.
    pub fn attempt_order(self, ring_len: usize) -> impl Iterator<Item = usize> {
        let start = if ring_len == 0 { 0 } else { self.0 % ring_len };
        (0..ring_len).map(move |offset| (start + offset) % ring_len)
    }
}

/// Failures worth retrying on another key: rate limits, auth problems and outages.
pub fn is_failover_status(status: u16) -> bool {
    matches!(status, 401 | 403 | 429) || (500..600).contains(&status)
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Wraps the Anthropic Messages API with key failover and structured output helpers.
#[derive(Clone, Debug)]
pub struct LlmClient {
    client: Client,
    keys: KeyRing,
}

impl LlmClient {
    pub fn new(keys: KeyRing) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            keys,
        })
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Makes a raw call to the Claude API, starting with the key under `cursor`.
    ///
    /// A retryable failure moves on to the next key. When every key failed, waits
    /// (1s, then 2s) and starts another cycle, up to `MAX_CYCLES`. On success the
    /// returned cursor points at the key that worked.
    pub async fn call(
        &self,
        prompt: &str,
        system: &str,
        cursor: RotationCursor,
    ) -> Result<(LlmResponse, RotationCursor), LlmError> {
        if self.keys.is_empty() {
            return Err(LlmError::NoKeys);
        }

        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        for cycle in 0..MAX_CYCLES {
            if cycle > 0 {
                // Exponential backoff between full cycles: 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (cycle - 1)));
                warn!(
                    "All {} LLM keys failed, starting cycle {} after {}ms",
                    self.keys.len(),
                    cycle + 1,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            for index in cursor.attempt_order(self.keys.len()) {
                match self.send(&request_body, self.keys.key(index)).await {
                    Ok(response) => {
                        debug!(
                            key_index = index,
                            "LLM call succeeded: input_tokens={}, output_tokens={}",
                            response.usage.input_tokens,
                            response.usage.output_tokens
                        );
                        return Ok((response, RotationCursor(index)));
                    }
                    Err(LlmError::Api { status, message }) if !is_failover_status(status) => {
                        return Err(LlmError::Api { status, message });
                    }
                    Err(e) => {
                        warn!(key_index = index, "LLM key failed, rotating: {e}");
                    }
                }
            }
        }

        Err(LlmError::Exhausted {
            keys: self.keys.len(),
            cycles: MAX_CYCLES,
        })
    }

    async fn send(
        &self,
        request_body: &AnthropicRequest<'_>,
        api_key: &str,
    ) -> Result<LlmResponse, LlmError> {
        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// Calls the LLM and deserializes the text response as JSON.
    /// The prompt must instruct the model to return valid JSON.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
        cursor: RotationCursor,
    ) -> Result<(T, RotationCursor), LlmError> {
        let (response, cursor) = self.call(prompt, system, cursor).await?;

        let text = response.text().ok_or(LlmError::EmptyContent)?;

        // Strip markdown code fences if the model wraps JSON in them
        let text = strip_json_fences(text);

        let value = serde_json::from_str(text)?;
        Ok((value, cursor))
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(stripped) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
    else {
        return text;
    };
    let stripped = stripped.trim_start();
    stripped
        .strip_suffix("```")
        .map(str::trim)
        .unwrap_or(stripped)
}
