//! Configuration types for item analysis.
//!
//! All analyzer behaviour is controlled through [`AnalyzerConfig`], built via
//! its [`AnalyzerConfigBuilder`] or read from the environment with
//! [`AnalyzerConfig::from_env`]. The API key is the only required setting;
//! a config without one cannot be built, so an analyzer that exists is always
//! able to send requests.

use crate::error::ListerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Primary environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "API_KEY";
/// Fallback environment variable for the API key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Optional model override.
pub const MODEL_ENV: &str = "SALINLAHI_MODEL";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Configuration for an [`crate::ItemAnalyzer`].
///
/// # Example
/// ```rust
/// use salinlahi_lister::AnalyzerConfig;
///
/// let config = AnalyzerConfig::builder()
///     .api_key("test-key")
///     .model("gemini-2.5-flash")
///     .api_timeout_secs(30)
///     .build()
///     .unwrap();
/// assert_eq!(config.api_timeout_secs, 30);
/// ```
#[derive(Clone)]
pub struct AnalyzerConfig {
    /// Credential for the inference provider. Never logged.
    pub api_key: String,

    /// Gemini model identifier. Default: `gemini-2.5-flash`.
    pub model: String,

    /// Scheme + host of the Gemini REST API. Default: the public endpoint.
    ///
    /// Overridable so tests can point the provider at a local fake server.
    pub base_url: String,

    /// Deadline for the single provider call in seconds. Default: 60.
    ///
    /// A hung connection would otherwise leave the caller in the loading
    /// state forever. `0` disables the deadline.
    pub api_timeout_secs: u64,

    /// Optional sampling temperature (0.0–2.0). `None` keeps the model default.
    pub temperature: Option<f32>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_timeout_secs: 60,
            temperature: None,
        }
    }
}

impl fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyzerConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl AnalyzerConfig {
    /// Create a new builder for `AnalyzerConfig`.
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder {
            config: Self::default(),
        }
    }

    /// Reopen a config for overrides; `build` validates it again.
    pub fn into_builder(self) -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder { config: self }
    }

    /// Read the configuration from the process environment.
    ///
    /// `API_KEY` is checked first, then `GEMINI_API_KEY`. A missing or empty
    /// key is a startup error, not something to discover on the first request.
    pub fn from_env() -> Result<Self, ListerError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ListerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = non_empty(API_KEY_ENV)
            .or_else(|| non_empty(GEMINI_API_KEY_ENV))
            .ok_or_else(|| ListerError::MissingApiKey {
                var: API_KEY_ENV.to_string(),
            })?;

        let mut builder = Self::builder().api_key(api_key);
        if let Some(model) = non_empty(MODEL_ENV) {
            builder = builder.model(model);
        }
        builder.build()
    }
}

/// Builder for [`AnalyzerConfig`].
#[derive(Debug)]
pub struct AnalyzerConfigBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerConfigBuilder {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs;
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = Some(t.clamp(0.0, 2.0));
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<AnalyzerConfig, ListerError> {
        let c = &self.config;
        if c.api_key.trim().is_empty() {
            return Err(ListerError::MissingApiKey {
                var: API_KEY_ENV.to_string(),
            });
        }
        if c.model.trim().is_empty() {
            return Err(ListerError::InvalidConfig("model must not be empty".into()));
        }
        if !(c.base_url.starts_with("http://") || c.base_url.starts_with("https://")) {
            return Err(ListerError::InvalidConfig(format!(
                "base URL must be http(s), got '{}'",
                c.base_url
            )));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Language used for the instruction template and user-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English with light conversational Taglish. (default)
    #[default]
    En,
    /// Filipino.
    Fil,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Fil];

    /// Short language code (`en`, `fil`).
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fil => "fil",
        }
    }

    /// Inline error text shown when an analysis fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Language::En => {
                "Oops! Something went wrong. Baka may problema sa network or sa image. \
                 Please try again with a different photo."
            }
            Language::Fil => {
                "Oops! Nagkaproblema. Baka may problema sa network o sa litrato. \
                 Pakisubukang muli gamit ang ibang litrato."
            }
        }
    }

    /// Labels for the copy-all listing block: title, category, condition, description.
    pub fn listing_labels(self) -> [&'static str; 4] {
        match self {
            Language::En => ["Title", "Category", "Condition", "Description"],
            Language::Fil => ["Pamagat", "Kategorya", "Kondisyon", "Deskripsyon"],
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ListerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "fil" | "filipino" | "tl" | "tagalog" => Ok(Language::Fil),
            other => Err(ListerError::InvalidConfig(format!(
                "unsupported language '{other}' (expected en or fil)"
            ))),
        }
    }
}
