//! The seam between the pipeline and the hosted model.
//!
//! The pipeline only knows [`VisionProvider`]: hand it a [`GenerateRequest`],
//! get back the raw response text or a classified [`ProviderError`].
//! [`GeminiProvider`] is the production implementation; tests plug in their
//! own.

pub mod gemini;

pub use gemini::GeminiProvider;

use crate::error::ProviderError;
use crate::pipeline::encode::InlineImage;
use async_trait::async_trait;
use serde_json::Value;

/// Everything one structured-output call needs, independent of the wire format.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    /// Instruction text, sent as the first part.
    pub prompt: String,
    /// The item photo, sent as the second part.
    pub image: InlineImage,
    /// MIME type the answer must use (`application/json`).
    pub response_mime_type: String,
    /// Schema the answer must conform to.
    pub response_schema: Value,
    pub temperature: Option<f32>,
}

/// A multimodal model that answers one request with one text payload.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &str;

    /// Send `request` and return the model's text answer.
    ///
    /// Exactly one network round-trip; implementations must not retry.
    async fn generate(&self, request: &GenerateRequest) -> Result<String, ProviderError>;
}
