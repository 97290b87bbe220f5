//! Analysis controller
//!
//! Owns the current ticker, the current [`AnalysisResult`] with its
//! [`DerivedView`], and the loading/error flags. An analyze call is split in
//! two halves so a caller can await the service between them:
//!
//! 1. [`AnalysisController::begin`] validates the input and flips the state to
//!    loading, returning a [`PendingAnalysis`] ticket.
//! 2. [`AnalysisController::complete`] applies the service outcome, unless a
//!    newer `begin` has happened in the meantime.

use crate::api::{AnalysisPayload, AnalysisService};
use crate::engine::result::AnalysisResult;
use crate::error::{ClearTradeError, Result};
use crate::normalizer::DerivedView;
use crate::ticker::TickerSymbol;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    pub loading: bool,
    pub error: Option<String>,
}

/// Ticket for an analyze request that has been issued but not yet applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAnalysis {
    generation: u64,
    ticker: TickerSymbol,
}

impl PendingAnalysis {
    pub fn ticker(&self) -> &TickerSymbol {
        &self.ticker
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened to an analyze outcome
#[derive(Debug)]
pub enum Completion {
    /// The result is now current
    Applied,
    /// A newer analyze was started; the outcome was dropped
    Stale,
    /// The call failed; the error message is in [`UiState::error`]
    Failed(ClearTradeError),
}

impl Completion {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

#[derive(Debug)]
pub struct AnalysisController {
    ticker_input: String,
    current_ticker: Option<TickerSymbol>,
    result: Option<AnalysisResult>,
    derived: Option<DerivedView>,
    ui: UiState,
    generation: u64,
}

impl AnalysisController {
    pub fn new(default_ticker: impl Into<String>) -> Self {
        Self {
            ticker_input: default_ticker.into(),
            current_ticker: None,
            result: None,
            derived: None,
            ui: UiState::default(),
            generation: 0,
        }
    }

    /// Start an analyze call for `raw_ticker`
    ///
    /// Always supersedes any in-flight call and clears the previous result.
    /// Blank input fails with [`ClearTradeError::Validation`] and leaves the
    /// controller idle with the error set; no request must be issued.
    pub fn begin(&mut self, raw_ticker: &str) -> Result<PendingAnalysis> {
        self.ticker_input = raw_ticker.to_string();
        self.generation += 1;
        self.result = None;
        self.derived = None;

        let ticker = match TickerSymbol::parse(raw_ticker) {
            Ok(ticker) => ticker,
            Err(err) => {
                debug!(input = raw_ticker, "Rejected analyze input");
                self.current_ticker = None;
                self.ui = UiState {
                    loading: false,
                    error: Some(err.user_message()),
                };
                return Err(err);
            }
        };

        self.current_ticker = Some(ticker.clone());
        self.ui = UiState {
            loading: true,
            error: None,
        };

        Ok(PendingAnalysis {
            generation: self.generation,
            ticker,
        })
    }

    /// Apply the outcome of the request started by `pending`
    pub fn complete(
        &mut self,
        pending: PendingAnalysis,
        outcome: Result<AnalysisPayload>,
    ) -> Completion {
        if pending.generation != self.generation {
            debug!(
                ticker = %pending.ticker,
                stale = pending.generation,
                current = self.generation,
                "Dropping superseded analyze response"
            );
            return Completion::Stale;
        }

        self.ui.loading = false;

        match outcome {
            Ok(payload) => {
                let result = AnalysisResult::from_payload(&pending.ticker, payload);
                info!(
                    ticker = %result.ticker,
                    recommendation = result.recommendation.as_deref().unwrap_or("-"),
                    "Analysis updated"
                );
                self.derived = Some(DerivedView::from_result(&result));
                self.result = Some(result);
                self.ui.error = None;
                Completion::Applied
            }
            Err(err) => {
                warn!(ticker = %pending.ticker, error = %err, "Analyze failed");
                self.result = None;
                self.derived = None;
                self.ui.error = Some(err.user_message());
                Completion::Failed(err)
            }
        }
    }

    /// `begin`, one service call, `complete`
    pub async fn analyze(
        &mut self,
        service: &dyn AnalysisService,
        raw_ticker: &str,
    ) -> Completion {
        let pending = match self.begin(raw_ticker) {
            Ok(pending) => pending,
            Err(err) => return Completion::Failed(err),
        };

        let outcome = service.analyze(pending.ticker()).await;
        self.complete(pending, outcome)
    }

    /// Raw text of the last submitted (or default) ticker
    pub fn ticker_input(&self) -> &str {
        &self.ticker_input
    }

    /// Normalized ticker of the latest accepted submission
    pub fn current_ticker(&self) -> Option<&TickerSymbol> {
        self.current_ticker.as_ref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn derived(&self) -> Option<&DerivedView> {
        self.derived.as_ref()
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn is_loading(&self) -> bool {
        self.ui.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.ui.error.as_deref()
    }
}
