//! The analysis entry point: [`ItemAnalyzer`].
//!
//! An analyzer is built once at startup. Building it is where a missing API
//! key surfaces, so a running analyzer never fails a call for lack of
//! configuration. Each [`ItemAnalyzer::analyze`] call is independent: encode,
//! one provider request, decode. Every failure is logged with its full detail
//! here and handed to the caller as an opaque [`AnalysisError`].

use crate::config::{AnalyzerConfig, Language};
use crate::error::{AnalysisError, ListerError, ProviderError};
use crate::output::AnalysisResult;
use crate::pipeline::{decode, encode, input::ItemImage, llm};
use crate::provider::{GeminiProvider, GenerateRequest, VisionProvider};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Turns item photos into listing suggestions.
///
/// Cheap to share: wrap it in an `Arc` or borrow it; `analyze` takes `&self`
/// and overlapping calls do not interact.
#[derive(Clone)]
pub struct ItemAnalyzer {
    provider: Arc<dyn VisionProvider>,
    config: AnalyzerConfig,
}

impl std::fmt::Debug for ItemAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemAnalyzer")
            .field("provider", &self.provider.name())
            .field("config", &self.config)
            .finish()
    }
}

impl ItemAnalyzer {
    /// Build an analyzer backed by Gemini.
    pub fn new(config: AnalyzerConfig) -> Result<Self, ListerError> {
        let provider = GeminiProvider::new(&config)?;
        info!("Analyzer ready: model {}", config.model);
        debug!("Gemini endpoint: {}", provider.endpoint());
        Ok(Self {
            provider: Arc::new(provider),
            config,
        })
    }

    /// Build from `API_KEY` / `GEMINI_API_KEY` in the environment.
    ///
    /// # Example
    /// ```rust,no_run
    /// use salinlahi_lister::{ItemAnalyzer, ItemImage, Language};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let analyzer = ItemAnalyzer::from_env()?;
    /// let image = ItemImage::open("rice-cooker.jpg")?;
    /// let result = analyzer.analyze(&image, Language::En).await?;
    /// println!("{}", result.to_listing_text(Language::En));
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_env() -> Result<Self, ListerError> {
        Self::new(AnalyzerConfig::from_env()?)
    }

    /// Use a caller-supplied provider instead of Gemini.
    pub fn with_provider(config: AnalyzerConfig, provider: Arc<dyn VisionProvider>) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Encode `image` and assemble the request that `analyze` would send.
    pub async fn build_request(
        &self,
        image: &ItemImage,
        language: Language,
    ) -> Result<GenerateRequest, ProviderError> {
        let inline = encode::encode_image(image).await?;
        Ok(llm::build_request(inline, language, &self.config))
    }

    /// Analyze one item photo.
    ///
    /// Returns a fully validated result or an [`AnalysisError`]; never a
    /// partial result. Sends exactly one request and does not retry.
    pub async fn analyze(
        &self,
        image: &ItemImage,
        language: Language,
    ) -> Result<AnalysisResult, AnalysisError> {
        let start = Instant::now();
        info!(
            "Analyzing {} image ({}) with {}",
            image.mime_type(),
            language,
            self.provider.name()
        );

        match self.run(image, language).await {
            Ok(result) => {
                info!(
                    "Analysis complete in {}ms: {}",
                    start.elapsed().as_millis(),
                    result.suggested_category
                );
                Ok(result)
            }
            Err(e) => {
                error!(
                    provider = self.provider.name(),
                    kind = ?e.kind(),
                    "Error analyzing image: {e}"
                );
                Err(e.into())
            }
        }
    }

    /// Blocking wrapper around [`analyze`](Self::analyze).
    ///
    /// Creates a temporary tokio runtime; do not call from inside one.
    pub fn analyze_sync(
        &self,
        image: &ItemImage,
        language: Language,
    ) -> Result<AnalysisResult, AnalysisError> {
        let runtime = tokio::runtime::Runtime::new().map_err(|e| {
            let e = ProviderError::Runtime(e);
            error!(kind = ?e.kind(), "Error analyzing image: {e}");
            AnalysisError::from(e)
        })?;
        runtime.block_on(self.analyze(image, language))
    }

    async fn run(
        &self,
        image: &ItemImage,
        language: Language,
    ) -> Result<AnalysisResult, ProviderError> {
        let request = self.build_request(image, language).await?;
        debug!("Request prompt: {} chars", request.prompt.len());

        let text =
            llm::request_analysis(&self.provider, &request, self.config.api_timeout_secs).await?;
        decode::decode_response(&text)
    }
}
