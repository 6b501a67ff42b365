//! Caller-side state for one screen's worth of analysis.
//!
//! The pipeline itself is stateless. A UI or CLI that shows a loading state,
//! a result or an error needs the small state machine below:
//!
//! ```text
//!          begin()              complete(latest, Ok)
//!   Idle ──────────▶ Running ─────────────────────▶ Succeeded
//!    ▲                  │    complete(latest, Err)
//!    │                  └─────────────────────────▶ Failed
//!    └──────────── reset() / begin() from any state
//! ```
//!
//! Starting a new analysis clears the previous result or error immediately.
//! Every `begin()` issues a fresh [`Ticket`]; an outcome is applied only when
//! it carries the newest ticket, so when two analyses race, the one started
//! last wins regardless of which finishes last.

use crate::analyze::ItemAnalyzer;
use crate::config::Language;
use crate::error::{AnalysisError, FailureKind};
use crate::output::AnalysisResult;
use crate::pipeline::input::ItemImage;
use tracing::debug;

/// Identifies one started analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Where the session currently is.
#[derive(Debug, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Running,
    Succeeded(AnalysisResult),
    Failed(AnalysisError),
}

/// Tracks the latest analysis and discards stale outcomes.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    state: SessionState,
    issued: u64,
    latest: Option<Ticket>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// `true` while an analysis is in flight (show the spinner).
    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Running)
    }

    /// Start a new analysis, dropping any previous result or error.
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        let ticket = Ticket(self.issued);
        self.latest = Some(ticket);
        self.state = SessionState::Running;
        ticket
    }

    /// Apply the outcome of the analysis identified by `ticket`.
    ///
    /// Returns `false` and leaves the state untouched when the ticket has
    /// been superseded by a later `begin()` or invalidated by `reset()`.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> bool {
        if self.latest != Some(ticket) || !self.is_loading() {
            debug!("Discarding stale outcome for {:?}", ticket);
            return false;
        }
        self.state = match outcome {
            Ok(result) => SessionState::Succeeded(result),
            Err(e) => SessionState::Failed(e),
        };
        true
    }

    /// Back to `Idle`; outstanding tickets become stale.
    pub fn reset(&mut self) {
        self.latest = None;
        self.state = SessionState::Idle;
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            SessionState::Succeeded(r) => Some(r),
            _ => None,
        }
    }

    /// Field-level edits on the current result.
    pub fn result_mut(&mut self) -> Option<&mut AnalysisResult> {
        match &mut self.state {
            SessionState::Succeeded(r) => Some(r),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&AnalysisError> {
        match &self.state {
            SessionState::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.error().map(AnalysisError::kind)
    }

    /// `begin`, run the analysis, `complete`: the common single-flight case.
    pub async fn analyze(
        &mut self,
        analyzer: &ItemAnalyzer,
        image: &ItemImage,
        language: Language,
    ) -> &SessionState {
        let ticket = self.begin();
        let outcome = analyzer.analyze(image, language).await;
        self.complete(ticket, outcome);
        &self.state
    }
}
