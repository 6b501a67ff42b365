//! CLI binary for salinlahi-lister.
//!
//! A thin shim over the library crate: admits the image, runs one analysis
//! behind a spinner and prints the listing.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use salinlahi_lister::{
    AnalysisSession, AnalyzerConfig, ItemAnalyzer, ItemImage, Language, SessionState,
};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Analyze a photo, English suggestions
  salinlahi rice-cooker.jpg

  # Filipino suggestions
  salinlahi --lang fil electric-fan.png

  # Use the second title option in the listing block
  salinlahi --title 2 stroller.webp

  # Raw JSON result
  salinlahi --json book.jpg > listing.json

SUPPORTED IMAGES:
  PNG, JPEG, WEBP

ENVIRONMENT VARIABLES:
  API_KEY            Gemini API key (required)
  GEMINI_API_KEY     Fallback when API_KEY is unset
  SALINLAHI_MODEL    Override model ID (default: gemini-2.5-flash)
  SALINLAHI_LANG     Default language (en, fil)
"#;

/// Turn a photo of a pre-loved item into listing suggestions.
#[derive(Parser, Debug)]
#[command(
    name = "salinlahi",
    version,
    about = "Turn a photo of a pre-loved item into listing suggestions",
    long_about = "Send a photo of an item to Google Gemini and get back a suggested category, \
condition, three title options and a short description, ready to post in the Salin-Lahi \
community sharing app.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to a PNG, JPEG or WEBP photo of the item.
    image: PathBuf,

    /// Suggestion language: en or fil.
    #[arg(short, long, env = "SALINLAHI_LANG", default_value = "en", value_parser = parse_language)]
    lang: Language,

    /// Gemini model ID.
    #[arg(long, env = "SALINLAHI_MODEL")]
    model: Option<String>,

    /// Give up on the model after this many seconds (0 = wait forever).
    #[arg(long, env = "SALINLAHI_API_TIMEOUT", default_value_t = 60)]
    api_timeout: u64,

    /// Which title option (1–3) to put in the listing block.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=3))]
    title: u8,

    /// Print the result as JSON instead of the listing block.
    #[arg(long, env = "SALINLAHI_JSON")]
    json: bool,

    /// Disable the spinner.
    #[arg(long, env = "SALINLAHI_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "SALINLAHI_VERBOSE")]
    verbose: bool,

    /// Suppress all output except the result and errors.
    #[arg(short, long, env = "SALINLAHI_QUIET")]
    quiet: bool,
}

fn parse_language(s: &str) -> Result<Language, String> {
    s.parse::<Language>().map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner is the user's feedback; keep library logs to errors while
    // it is active so they do not tear through it.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build analyzer (fails fast without an API key) ───────────────────
    let config = build_config(&cli)?;
    let analyzer = ItemAnalyzer::new(config).context("Failed to initialise analyzer")?;

    // ── Admit the image ──────────────────────────────────────────────────
    let image = ItemImage::open(&cli.image).context("Cannot use this image")?;

    // ── Run analysis ─────────────────────────────────────────────────────
    let spinner = show_progress.then(|| spinner(cli.lang));
    let mut session = AnalysisSession::new();
    session.analyze(&analyzer, &image, cli.lang).await;
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }

    if let SessionState::Failed(e) = session.state() {
        eprintln!("{} {}", red("✘"), e.user_message(cli.lang));
        return Ok(ExitCode::FAILURE);
    }
    let Some(result) = session.result() else {
        anyhow::bail!("analysis did not complete");
    };

    // ── Print ────────────────────────────────────────────────────────────
    if cli.json {
        let json = serde_json::to_string_pretty(result).context("Failed to serialise result")?;
        println!("{json}");
        return Ok(ExitCode::SUCCESS);
    }

    let listing = result
        .to_listing_text_with_title(cli.lang, usize::from(cli.title) - 1)
        .with_context(|| format!("Title option {} is not available", cli.title))?;
    println!("{listing}");

    if !cli.quiet {
        eprintln!();
        eprintln!("{}", bold(title_options_heading(cli.lang)));
        for (i, title) in result.suggested_titles.iter().enumerate() {
            eprintln!("  {} {}", dim(&format!("{}.", i + 1)), title);
        }
        eprintln!("{} {}", green("✔"), dim(ready_message(cli.lang)));
    }

    Ok(ExitCode::SUCCESS)
}

/// Map CLI args to `AnalyzerConfig`, reading the key from the environment.
fn build_config(cli: &Cli) -> Result<AnalyzerConfig> {
    let mut builder = AnalyzerConfig::from_env()
        .context("Missing configuration")?
        .into_builder()
        .api_timeout_secs(cli.api_timeout);
    if let Some(ref model) = cli.model {
        builder = builder.model(model.clone());
    }
    builder.build().context("Invalid configuration")
}

fn spinner(lang: Language) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
    );
    bar.set_prefix(match lang {
        Language::En => "Processing...",
        Language::Fil => "Pinoproseso...",
    });
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

fn title_options_heading(lang: Language) -> &'static str {
    match lang {
        Language::En => "Suggested Titles",
        Language::Fil => "Mga Mungkahing Pamagat",
    }
}

fn ready_message(lang: Language) -> &'static str {
    match lang {
        Language::En => "Ready to post! Edit as you like, then copy it into the app.",
        Language::Fil => "Handa nang i-post! I-edit ayon sa gusto mo, saka kopyahin sa app.",
    }
}
