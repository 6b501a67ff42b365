//! # salinlahi-lister
//!
//! Turn a photo of a pre-loved item into listing suggestions (category,
//! condition, three titles, a short description) for the Salin-Lahi community
//! sharing app, using a multimodal model with a strict structured-output
//! schema.
//!
//! ## Pipeline Overview
//!
//! ```text
//! image (bytes + MIME)
//!  │
//!  ├─ 1. Encode   read bytes → base64 inline part
//!  ├─ 2. Prompt   fixed template for the chosen language (en / fil)
//!  ├─ 3. Request  one generateContent call with a JSON response schema
//!  ├─ 4. Decode   JSON → AnalysisResult, reject any shape mismatch
//!  └─ 5. Result   validated AnalysisResult, or one opaque AnalysisError
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use salinlahi_lister::{ItemAnalyzer, ItemImage, Language};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Fails here, not on the first request, when API_KEY is missing.
//!     let analyzer = ItemAnalyzer::from_env()?;
//!     let image = ItemImage::open("electric-fan.jpg")?;
//!     match analyzer.analyze(&image, Language::Fil).await {
//!         Ok(result) => println!("{}", result.to_listing_text(Language::Fil)),
//!         Err(e) => eprintln!("{}", e.user_message(Language::Fil)),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `salinlahi` binary (clap + anyhow + indicatif + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod analyze;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod prompts;
pub mod provider;
pub mod session;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use analyze::ItemAnalyzer;
pub use config::{AnalyzerConfig, AnalyzerConfigBuilder, Language};
pub use error::{AnalysisError, FailureKind, ListerError, ProviderError};
pub use output::AnalysisResult;
pub use pipeline::encode::InlineImage;
pub use pipeline::input::{ImageSource, ItemImage, ACCEPTED_FORMATS};
pub use provider::{GeminiProvider, GenerateRequest, VisionProvider};
pub use session::{AnalysisSession, SessionState, Ticket};
