//! Chat controller
//!
//! Questions are echoed into the log immediately; answers (or a failure note)
//! are appended whenever their request resolves, in arrival order.

use crate::api::{AnalysisService, ChatPayload};
use crate::chat::session::{ChatMessage, ChatSession};
use crate::error::{ClearTradeError, Result, UNREACHABLE_MESSAGE};
use crate::ticker::TickerSymbol;
use tracing::{debug, warn};

/// Appended when the service answers without an `answer` field or rejects
/// the question
pub const NO_ANSWER_FALLBACK: &str = "No response";

/// Why `ask` did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No analysis is current, so there is no ticker to ask about
    NoAnalysis,
    /// Blank question
    EmptyQuestion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskOutcome {
    Skipped(SkipReason),
    Answered,
    /// Service replied without an answer (or rejected the question); the
    /// fallback text was appended
    NoAnswer,
    /// Request failed; an apology was appended
    Failed,
}

/// A question that has been echoed and sent but not yet answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuestion {
    ticker: TickerSymbol,
    question: String,
}

impl PendingQuestion {
    /// Ticker of the analysis that was current when the question was asked
    pub fn ticker(&self) -> &TickerSymbol {
        &self.ticker
    }

    pub fn question(&self) -> &str {
        &self.question
    }
}

#[derive(Debug, Default)]
pub struct ChatController {
    session: ChatSession,
}

impl ChatController {
    pub fn new(greeting: Option<&str>) -> Self {
        let session = match greeting {
            Some(greeting) => ChatSession::with_greeting(greeting),
            None => ChatSession::new(),
        };
        Self { session }
    }

    /// Echo `question` into the log and bind it to `current_ticker`
    ///
    /// `current_ticker` must be the ticker of the current analysis result;
    /// without one the call is a no-op.
    pub fn begin(
        &mut self,
        question: &str,
        current_ticker: Option<&TickerSymbol>,
    ) -> std::result::Result<PendingQuestion, SkipReason> {
        let Some(ticker) = current_ticker else {
            return Err(SkipReason::NoAnalysis);
        };

        let question = question.trim();
        if question.is_empty() {
            return Err(SkipReason::EmptyQuestion);
        }

        self.session.push(ChatMessage::user(question, ticker.clone()));

        Ok(PendingQuestion {
            ticker: ticker.clone(),
            question: question.to_string(),
        })
    }

    /// Append the agent side of `pending`
    pub fn resolve(
        &mut self,
        pending: PendingQuestion,
        outcome: Result<ChatPayload>,
    ) -> AskOutcome {
        let (text, result) = match outcome {
            Ok(ChatPayload {
                answer: Some(answer),
            }) if !answer.trim().is_empty() => (answer, AskOutcome::Answered),
            Ok(_) => (NO_ANSWER_FALLBACK.to_string(), AskOutcome::NoAnswer),
            // The service did answer, just not with an `answer` field.
            Err(err @ ClearTradeError::Request { .. }) => {
                warn!(ticker = %pending.ticker, error = %err, "Chat question rejected");
                (NO_ANSWER_FALLBACK.to_string(), AskOutcome::NoAnswer)
            }
            Err(err) => {
                warn!(ticker = %pending.ticker, error = %err, "Chat request failed");
                (format!("{UNREACHABLE_MESSAGE}."), AskOutcome::Failed)
            }
        };

        debug!(ticker = %pending.ticker, outcome = ?result, "Chat resolved");
        self.session.push(ChatMessage::agent(text, Some(pending.ticker)));
        result
    }

    /// `begin`, one service call, `resolve`
    pub async fn ask(
        &mut self,
        service: &dyn AnalysisService,
        question: &str,
        current_ticker: Option<&TickerSymbol>,
    ) -> AskOutcome {
        let pending = match self.begin(question, current_ticker) {
            Ok(pending) => pending,
            Err(reason) => return AskOutcome::Skipped(reason),
        };

        let outcome = service.chat(pending.ticker(), pending.question()).await;
        self.resolve(pending, outcome)
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }
}
