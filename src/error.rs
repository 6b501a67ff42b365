//! Error types for the salinlahi-lister library.
//!
//! Three error types reflect three distinct audiences:
//!
//! * [`ListerError`] — **Fatal / setup**: the analyzer cannot be built or the
//!   input cannot even be offered to it (no API key, unsupported file type).
//!   Returned before any request leaves the process.
//!
//! * [`ProviderError`] — **Diagnostic**: the fine-grained reason a single
//!   analysis failed (network, HTTP status, blocked prompt, bad JSON). Logged
//!   at the pipeline boundary and kept as the `source()` of an
//!   [`AnalysisError`], never shown to end users verbatim.
//!
//! * [`AnalysisError`] — **Opaque**: what `analyze` returns. Its `Display` is
//!   the single user-facing message; callers only branch on [`FailureKind`].

use crate::config::Language;
use std::path::PathBuf;
use thiserror::Error;

/// Message shown for every failed analysis.
pub const ANALYSIS_FAILED_MESSAGE: &str = "Failed to get analysis from AI. Please try again.";

/// Fatal errors raised while setting up the analyzer or preparing input.
#[derive(Debug, Error)]
pub enum ListerError {
    // ── Config errors ─────────────────────────────────────────────────────
    /// No credential for the inference provider was found.
    #[error("{var} environment variable is not set.\nExport your Gemini API key, e.g. export {var}=...")]
    MissingApiKey { var: String },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),

    // ── Input errors ──────────────────────────────────────────────────────
    /// Image file was not found at the given path.
    #[error("Image file not found: '{path}'")]
    ImageNotFound { path: PathBuf },

    /// Image file exists but its header could not be read.
    #[error("Cannot read image file '{path}': {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not a PNG, JPEG or WEBP image.
    #[error("Unsupported image type for '{path}': expected PNG, JPEG or WEBP")]
    UnsupportedImageType { path: PathBuf },
}

/// Why a single analysis failed, in enough detail to debug it.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The image bytes could not be read; no request was sent.
    #[error("could not read image: {0}")]
    ImageRead(#[from] std::io::Error),

    /// The blocking wrapper could not start its tokio runtime.
    #[error("failed to create tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// Network-level failure (DNS, connection reset, TLS…).
    #[error("transport error: {0}")]
    Transport(String),

    /// No response within the configured deadline.
    #[error("request timed out after {secs}s")]
    Timeout { secs: u64 },

    /// Provider rejected the credential (HTTP 401/403).
    #[error("authentication failed (HTTP {status}): {detail}")]
    Auth { status: u16, detail: String },

    /// Provider returned HTTP 429.
    #[error("rate limited by provider (retry after {retry_after_secs:?}s)")]
    RateLimited { retry_after_secs: Option<u64> },

    /// Any other non-success HTTP status.
    #[error("provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The prompt was blocked by the provider's safety filters.
    #[error("request blocked by provider: {reason}")]
    Blocked { reason: String },

    /// The provider answered but produced no text.
    #[error("provider returned no content")]
    EmptyResponse,

    /// The response text did not match the structured-output schema.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Coarse category of a failed analysis, the only thing callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The image could not be read; the analysis never started.
    ImageUnreadable,
    /// Transport, provider or response-shape failure.
    AnalysisFailed,
}

impl ProviderError {
    /// Collapse into the caller-visible category.
    pub fn kind(&self) -> FailureKind {
        match self {
            ProviderError::ImageRead(_) => FailureKind::ImageUnreadable,
            _ => FailureKind::AnalysisFailed,
        }
    }

    /// `true` for the response-shape family (bad JSON, missing fields, no text).
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            ProviderError::MalformedResponse(_) | ProviderError::EmptyResponse
        )
    }
}

/// The opaque failure returned by [`crate::ItemAnalyzer::analyze`].
///
/// `Display` never includes provider text. The underlying [`ProviderError`] is
/// reachable through [`std::error::Error::source`] for logs and tests.
#[derive(Debug, Error)]
#[error("{}", ANALYSIS_FAILED_MESSAGE)]
pub struct AnalysisError {
    kind: FailureKind,
    #[source]
    cause: Box<ProviderError>,
}

impl AnalysisError {
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// The underlying diagnostic error.
    pub fn cause(&self) -> &ProviderError {
        &self.cause
    }

    /// Localised message suitable for an inline error banner.
    pub fn user_message(&self, language: Language) -> &'static str {
        language.failure_message()
    }
}

impl From<ProviderError> for AnalysisError {
    fn from(cause: ProviderError) -> Self {
        Self {
            kind: cause.kind(),
            cause: Box::new(cause),
        }
    }
}
