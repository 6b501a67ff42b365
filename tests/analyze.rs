//! Pipeline tests against a scripted in-process provider.
//!
//! No network: every test plugs a [`ScriptedProvider`] into the analyzer and
//! inspects both the request it received and what `analyze` returned.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageFormat, Rgba, RgbaImage};
use salinlahi_lister::error::ANALYSIS_FAILED_MESSAGE;
use salinlahi_lister::prompts::{prompt_for, response_schema, EN_PROMPT, FIL_PROMPT};
use salinlahi_lister::{
    AnalysisSession, AnalyzerConfig, FailureKind, GenerateRequest, ItemAnalyzer, ItemImage,
    Language, ListerError, ProviderError, SessionState, VisionProvider,
};
use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

// ── Test helpers ─────────────────────────────────────────────────────────────

const TOYS_JSON: &str = r#"{"suggested_category":"Toys","suggested_condition":"Like New","suggested_titles":["A","B","C"],"suggested_description":"A small red item."}"#;

enum Reply {
    Text(String),
    Transport(String),
}

/// Provider that records every request and answers from a script.
struct ScriptedProvider {
    reply: Reply,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedProvider {
    fn text(body: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Text(body.to_string()),
            requests: Mutex::new(vec![]),
        })
    }

    fn transport_error(detail: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Transport(detail.to_string()),
            requests: Mutex::new(vec![]),
        })
    }

    fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisionProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Reply::Text(body) => Ok(body.clone()),
            Reply::Transport(detail) => Err(ProviderError::Transport(detail.clone())),
        }
    }
}

fn config() -> AnalyzerConfig {
    AnalyzerConfig::builder()
        .api_key("test-key")
        .build()
        .expect("valid config")
}

fn analyzer(provider: Arc<ScriptedProvider>) -> ItemAnalyzer {
    ItemAnalyzer::with_provider(config(), provider)
}

/// A 10×10 PNG of a red square.
fn red_square_png() -> Vec<u8> {
    let img = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("png encode");
    buf
}

/// Shared buffer that a tracing subscriber writes formatted events into.
#[derive(Clone, Default)]
struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl LogCapture {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

// ── Scenarios ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn red_square_english_round_trip() {
    let provider = ScriptedProvider::text(TOYS_JSON);
    let png = red_square_png();
    let image = ItemImage::from_bytes(png.clone(), "image/png");

    let result = analyzer(provider.clone())
        .analyze(&image, Language::En)
        .await
        .expect("analysis should succeed");

    assert_eq!(result.suggested_category, "Toys");
    assert_eq!(result.suggested_condition, "Like New");
    assert_eq!(result.suggested_titles, ["A", "B", "C"]);
    assert_eq!(result.suggested_description, "A small red item.");

    let requests = provider.requests();
    assert_eq!(requests.len(), 1, "exactly one outbound call");
    let req = &requests[0];
    assert_eq!(req.prompt, EN_PROMPT);
    assert_eq!(req.image.mime_type, "image/png");
    assert_eq!(STANDARD.decode(&req.image.data).unwrap(), png);
    assert_eq!(req.response_mime_type, "application/json");
    assert_eq!(req.response_schema, response_schema());
}

#[tokio::test]
async fn filipino_uses_filipino_template_only() {
    let provider = ScriptedProvider::text(TOYS_JSON);
    let image = ItemImage::from_bytes(red_square_png(), "image/png");

    analyzer(provider.clone())
        .analyze(&image, Language::Fil)
        .await
        .unwrap();

    let req = &provider.requests()[0];
    assert_eq!(req.prompt, FIL_PROMPT);
    assert!(!req.prompt.contains("INSTRUCTIONS:"));
}

#[tokio::test]
async fn missing_fields_fail_as_malformed() {
    let provider = ScriptedProvider::text(r#"{"suggested_category":"Toys"}"#);
    let image = ItemImage::from_bytes(red_square_png(), "image/png");

    let err = analyzer(provider)
        .analyze(&image, Language::En)
        .await
        .expect_err("partial response must fail");

    assert_eq!(err.kind(), FailureKind::AnalysisFailed);
    assert!(err.cause().is_malformed(), "got: {:?}", err.cause());
    assert_eq!(err.to_string(), ANALYSIS_FAILED_MESSAGE);
}

#[tokio::test]
async fn transport_error_matches_malformed_for_the_user_and_is_logged() {
    let logs = LogCapture::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let image = ItemImage::from_bytes(red_square_png(), "image/png");

    let transport = analyzer(ScriptedProvider::transport_error("connection reset by peer"))
        .analyze(&image, Language::En)
        .await
        .unwrap_err();
    let malformed = analyzer(ScriptedProvider::text(r#"{"suggested_category":"Toys"}"#))
        .analyze(&image, Language::En)
        .await
        .unwrap_err();

    assert_eq!(transport.kind(), malformed.kind());
    assert_eq!(transport.to_string(), malformed.to_string());
    assert!(!transport.to_string().contains("connection reset"));
    assert!(matches!(transport.cause(), ProviderError::Transport(_)));

    let captured = logs.contents();
    assert!(
        captured.contains("connection reset by peer"),
        "original transport detail should be logged, got:\n{captured}"
    );
    assert!(captured.contains("Error analyzing image"));
}

#[tokio::test]
async fn unreadable_image_never_reaches_the_provider() {
    let provider = ScriptedProvider::text(TOYS_JSON);
    let image = ItemImage::from_file("/no/such/dir/item.jpg", "image/jpeg");

    let err = analyzer(provider.clone())
        .analyze(&image, Language::En)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::ImageUnreadable);
    assert!(provider.requests().is_empty());
}

#[tokio::test]
async fn file_backed_image_is_read_and_mime_passed_through() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("square.webp");
    let bytes = b"RIFF\x10\0\0\0WEBPVP8 fake".to_vec();
    std::fs::write(&path, &bytes).unwrap();

    let provider = ScriptedProvider::text(TOYS_JSON);
    let image = ItemImage::open(&path).unwrap();
    analyzer(provider.clone())
        .analyze(&image, Language::En)
        .await
        .unwrap();

    let req = &provider.requests()[0];
    assert_eq!(req.image.mime_type, "image/webp");
    assert_eq!(STANDARD.decode(&req.image.data).unwrap(), bytes);
}

#[tokio::test]
async fn same_input_same_request() {
    let provider = ScriptedProvider::text(TOYS_JSON);
    let analyzer = analyzer(provider.clone());
    let image = ItemImage::from_bytes(red_square_png(), "image/png");

    for lang in Language::ALL {
        analyzer.analyze(&image, lang).await.unwrap();
        analyzer.analyze(&image, lang).await.unwrap();
    }

    let requests = provider.requests();
    assert_eq!(requests.len(), 4);
    assert_eq!(requests[0], requests[1]);
    assert_eq!(requests[2], requests[3]);
    assert_ne!(requests[0].prompt, requests[2].prompt);
    assert_eq!(requests[0].response_schema, requests[2].response_schema);
    assert_eq!(
        analyzer.build_request(&image, Language::En).await.unwrap(),
        requests[0]
    );
}

#[tokio::test]
async fn whitespace_around_json_is_tolerated() {
    let provider = ScriptedProvider::text(&format!("\n\n  {TOYS_JSON}  \n"));
    let image = ItemImage::from_bytes(red_square_png(), "image/png");
    let result = analyzer(provider).analyze(&image, Language::En).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn session_shows_result_then_allows_edits() {
    let provider = ScriptedProvider::text(TOYS_JSON);
    let analyzer = analyzer(provider);
    let image = ItemImage::from_bytes(red_square_png(), "image/png");

    let mut session = AnalysisSession::new();
    assert!(matches!(
        session.analyze(&analyzer, &image, Language::En).await,
        SessionState::Succeeded(_)
    ));

    let result = session.result_mut().unwrap();
    result.set_title(0, "Red toy block");
    assert_eq!(
        session.result().unwrap().to_listing_text(Language::En),
        "Title: Red toy block\nCategory: Toys\nCondition: Like New\n\nDescription:\nA small red item."
    );
}

#[tokio::test]
async fn session_failure_carries_localised_message() {
    let analyzer = analyzer(ScriptedProvider::transport_error("dns"));
    let image = ItemImage::from_bytes(red_square_png(), "image/png");

    let mut session = AnalysisSession::new();
    session.analyze(&analyzer, &image, Language::Fil).await;

    let err = session.error().expect("failed state");
    assert!(err.user_message(Language::Fil).contains("Nagkaproblema"));
    assert!(session.result().is_none());
}

// ── Initialisation ───────────────────────────────────────────────────────────

#[test]
fn missing_credential_blocks_initialisation() {
    let err = AnalyzerConfig::from_lookup(|_| None).unwrap_err();
    assert!(matches!(err, ListerError::MissingApiKey { .. }));

    let err = ItemAnalyzer::new(AnalyzerConfig::default()).unwrap_err();
    assert!(matches!(err, ListerError::MissingApiKey { .. }));
}

#[test]
fn gemini_analyzer_initialises_with_a_key() {
    let analyzer = ItemAnalyzer::new(config()).expect("key present");
    assert_eq!(analyzer.config().model, "gemini-2.5-flash");
    assert!(!format!("{analyzer:?}").contains("test-key"));
}

#[test]
fn analyze_sync_outside_a_runtime() {
    let provider = ScriptedProvider::text(TOYS_JSON);
    let image = ItemImage::from_bytes(red_square_png(), "image/png");
    let result = analyzer(provider)
        .analyze_sync(&image, Language::En)
        .unwrap();
    assert_eq!(result.suggested_category, "Toys");
}

#[test]
fn templates_are_language_specific() {
    assert_eq!(prompt_for(Language::En), EN_PROMPT);
    assert_eq!(prompt_for(Language::Fil), FIL_PROMPT);
}
