//! Model interaction: build the structured-output request and send it.
//!
//! Intentionally thin. Prompt wording and the schema live in
//! [`crate::prompts`]; wire format and HTTP status handling live in the
//! provider. This stage only assembles the request and enforces the deadline.
//!
//! One attempt per call. A failed analysis is retried by the user starting a
//! new one, never here.

use crate::config::{AnalyzerConfig, Language};
use crate::error::ProviderError;
use crate::pipeline::encode::InlineImage;
use crate::prompts::{prompt_for, response_schema, RESPONSE_MIME_TYPE};
use crate::provider::{GenerateRequest, VisionProvider};
use std::sync::Arc;
use std::time::Instant;
use tokio::time::{timeout, Duration};
use tracing::debug;

/// Assemble the request for `language`.
///
/// Pure: the same image, language and config always produce an identical
/// request.
pub fn build_request(
    image: InlineImage,
    language: Language,
    config: &AnalyzerConfig,
) -> GenerateRequest {
    GenerateRequest {
        prompt: prompt_for(language).to_string(),
        image,
        response_mime_type: RESPONSE_MIME_TYPE.to_string(),
        response_schema: response_schema(),
        temperature: config.temperature,
    }
}

/// Send `request` once, bounded by `timeout_secs` (`0` = no deadline).
pub async fn request_analysis(
    provider: &Arc<dyn VisionProvider>,
    request: &GenerateRequest,
    timeout_secs: u64,
) -> Result<String, ProviderError> {
    let start = Instant::now();

    let text = if timeout_secs == 0 {
        provider.generate(request).await?
    } else {
        timeout(Duration::from_secs(timeout_secs), provider.generate(request))
            .await
            .map_err(|_| ProviderError::Timeout { secs: timeout_secs })??
    };

    debug!(
        "{}: {} chars of response text in {:?}",
        provider.name(),
        text.len(),
        start.elapsed()
    );
    Ok(text)
}
