//! Google Gemini `generateContent` over REST.
//!
//! Request layout: one user turn with two parts (instruction text, then the
//! inline image) and a `generationConfig` carrying the response MIME type and
//! schema. The answer is the concatenated text of the first candidate.

use super::{GenerateRequest, VisionProvider};
use crate::config::AnalyzerConfig;
use crate::error::{ListerError, ProviderError};
use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const API_KEY_HEADER: &str = "x-goog-api-key";
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Finish reasons that mean the candidate was withheld rather than empty.
const BLOCKING_FINISH_REASONS: [&str; 5] = [
    "SAFETY",
    "RECITATION",
    "BLOCKLIST",
    "PROHIBITED_CONTENT",
    "SPII",
];

// ── Wire types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

impl<'a> From<&'a GenerateRequest> for GenerateContentRequest<'a> {
    fn from(req: &'a GenerateRequest) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![
                    Part::Text { text: &req.prompt },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: &req.image.mime_type,
                            data: &req.image.data,
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: &req.response_mime_type,
                response_schema: &req.response_schema,
                temperature: req.temperature,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

// ── Provider ─────────────────────────────────────────────────────────────

/// [`VisionProvider`] backed by the Gemini REST API.
pub struct GeminiProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl GeminiProvider {
    /// Build the HTTP client for `config`. The config's API key is required.
    pub fn new(config: &AnalyzerConfig) -> Result<Self, ListerError> {
        if config.api_key.trim().is_empty() {
            return Err(ListerError::MissingApiKey {
                var: crate::config::API_KEY_ENV.to_string(),
            });
        }

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ListerError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint_for(&config.base_url, &config.model),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl VisionProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String, ProviderError> {
        let body = GenerateContentRequest::from(request);
        debug!("POST {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<u64>().ok());
            let body = response.text().await.unwrap_or_else(|e| {
                debug!("Failed to read HTTP {} error body: {e}", status.as_u16());
                String::new()
            });
            return Err(status_error(status.as_u16(), retry_after, &body));
        }

        let text = response.text().await.map_err(classify_transport)?;
        extract_text(&text)
    }
}

/// `{base}/v1beta/models/{model}:generateContent`
pub fn endpoint_for(base_url: &str, model: &str) -> String {
    format!(
        "{}/v1beta/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    )
}

fn classify_transport(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout {
            secs: CONNECT_TIMEOUT_SECS,
        }
    } else {
        ProviderError::Transport(e.to_string())
    }
}

/// Map a non-success HTTP status to a [`ProviderError`].
fn status_error(status: u16, retry_after_secs: Option<u64>, body: &str) -> ProviderError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|env| env.error.message)
        .unwrap_or_else(|_| truncate(body.trim(), 200));

    match status {
        401 | 403 => ProviderError::Auth {
            status,
            detail: message,
        },
        429 => ProviderError::RateLimited { retry_after_secs },
        _ => ProviderError::Status { status, message },
    }
}

/// Pull the answer text out of a successful response envelope.
fn extract_text(body: &str) -> Result<String, ProviderError> {
    let envelope: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::MalformedResponse(format!("response envelope: {e}")))?;

    if let Some(reason) = envelope
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        return Err(ProviderError::Blocked { reason });
    }

    let candidate = envelope
        .candidates
        .into_iter()
        .next()
        .ok_or(ProviderError::EmptyResponse)?;

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter(|part| !part.thought)
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(match candidate.finish_reason {
            Some(reason) if BLOCKING_FINISH_REASONS.contains(&reason.as_str()) => {
                ProviderError::Blocked { reason }
            }
            _ => ProviderError::EmptyResponse,
        });
    }

    Ok(text)
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}\u{2026}", &s[..idx]),
        None => s.to_string(),
    }
}
