//! Interactive dashboard
//!
//! [`Dashboard`] composes the analysis and chat controllers over one
//! [`AnalysisService`] and is the single writer of their state. The terminal
//! front-end drives it through [`Command`]s.
//!
//! # Example
//!
//! ```rust,ignore
//! use cleartrade_client::{ClientConfig, Dashboard};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let mut dashboard = Dashboard::connect(ClientConfig::from_env()?)?;
//!     dashboard.analyze("aapl").await;
//!     dashboard.ask("Why?").await;
//!     println!("{:?}", dashboard.view());
//!     Ok(())
//! }
//! ```

pub mod commands;

use crate::api::{AnalysisService, HistoryEntry, HttpAnalysisService};
use crate::chat::{AskOutcome, ChatController, SkipReason};
use crate::config::ClientConfig;
use crate::engine::{AnalysisController, Completion};
use crate::error::{ClearTradeError, Result};
use crate::interface::Formatter;
use crate::ticker::TickerSymbol;
use crate::view::ViewState;
use std::sync::Arc;
use tracing::info;

pub use commands::Command;

/// What the front-end should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Exit,
}

pub struct Dashboard {
    service: Arc<dyn AnalysisService>,
    analysis: AnalysisController,
    chat: ChatController,
}

impl Dashboard {
    pub fn new(service: Arc<dyn AnalysisService>, config: &ClientConfig) -> Self {
        Self {
            service,
            analysis: AnalysisController::new(config.default_ticker.clone()),
            chat: ChatController::new(config.greeting.as_deref()),
        }
    }

    /// Dashboard backed by the HTTP service described by `config`
    pub fn connect(config: ClientConfig) -> Result<Self> {
        info!(api_base = %config.api_base, "Connecting to analysis service");
        let service = HttpAnalysisService::new(config.clone())?;
        Ok(Self::new(Arc::new(service), &config))
    }

    pub async fn analyze(&mut self, raw_ticker: &str) -> Completion {
        self.analysis.analyze(self.service.as_ref(), raw_ticker).await
    }

    /// Ask about the current analysis; see [`ChatController::ask`]
    pub async fn ask(&mut self, question: &str) -> AskOutcome {
        let current = self.analysis.result().map(|result| &result.ticker);
        self.chat.ask(self.service.as_ref(), question, current).await
    }

    /// Past recommendations for `raw_ticker`, or for the analyzed ticker
    ///
    /// Read-only: neither controller is touched, errors go to the caller.
    pub async fn history(
        &self,
        raw_ticker: Option<&str>,
    ) -> Result<(TickerSymbol, Vec<HistoryEntry>)> {
        let ticker = match raw_ticker {
            Some(raw) => TickerSymbol::parse(raw)?,
            None => match self.analysis.result() {
                Some(result) => result.ticker.clone(),
                None => TickerSymbol::parse(self.analysis.ticker_input())?,
            },
        };

        let entries = self.service.history(&ticker).await?;
        Ok((ticker, entries))
    }

    pub fn view(&self) -> ViewState<'_> {
        ViewState::compose(&self.analysis, &self.chat)
    }

    pub fn analysis(&self) -> &AnalysisController {
        &self.analysis
    }

    pub fn chat(&self) -> &ChatController {
        &self.chat
    }

    /// Parse and execute one line of user input
    pub async fn process_input(&mut self, input: &str, formatter: &dyn Formatter) -> Result<Reply> {
        let command = Command::parse(input)?;
        self.execute_command(command, formatter).await
    }

    /// Execute a parsed command
    pub async fn execute_command(
        &mut self,
        command: Command,
        formatter: &dyn Formatter,
    ) -> Result<Reply> {
        let text = match command {
            Command::Analyze { ticker } => {
                let raw = ticker.unwrap_or_else(|| self.analysis.ticker_input().to_string());
                self.analyze(&raw).await;
                formatter.format_view(&self.view())
            }
            Command::History { ticker } => {
                let (ticker, entries) = self.history(ticker.as_deref()).await?;
                formatter.format_history(&ticker, &entries)
            }
            Command::Show => formatter.format_view(&self.view()),
            Command::Chat => formatter.format_chat(self.chat.session().messages()),
            Command::Help => Command::help_text().to_string(),
            Command::Exit => return Ok(Reply::Exit),
            Command::Ask { question } => {
                let before = self.chat.session().len();
                match self.ask(&question).await {
                    AskOutcome::Skipped(SkipReason::NoAnalysis) => {
                        return Err(ClearTradeError::Command(
                            "Run /analyze first to enable chat.".to_string(),
                        ));
                    }
                    AskOutcome::Skipped(SkipReason::EmptyQuestion) => String::new(),
                    _ => {
                        // Only the agent side; the question is already on screen.
                        let added = &self.chat.session().messages()[before..];
                        formatter.format_chat(&added[added.len().saturating_sub(1)..])
                    }
                }
            }
        };

        Ok(Reply::Text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AnalysisPayload, ChatPayload, MockAnalysisService};
    use crate::chat::Role;
    use crate::interface::TextFormatter;
    use crate::normalizer::{RecommendationCategory, SentimentTone};
    use chrono::Utc;

    fn payload() -> AnalysisPayload {
        serde_json::from_str(
            r#"{
                "ticker": "AAPL",
                "recommendation": "Buy",
                "confidence": 0.9,
                "explanation": "Trend, fundamentals and news agree.",
                "features": {"ma_10": 190.1, "ma_30": 185.3, "rsi": 63.0, "volatility": 0.012},
                "fundamentals": {"pe_ratio": 28},
                "sentiment": 0.3
            }"#,
        )
        .unwrap()
    }

    fn dashboard(service: MockAnalysisService) -> Dashboard {
        Dashboard::new(Arc::new(service), &ClientConfig::default())
    }

    #[tokio::test]
    async fn test_analyze_then_ask_scenario() {
        let mut service = MockAnalysisService::new();
        service
            .expect_analyze()
            .withf(|ticker| ticker.as_str() == "AAPL")
            .times(1)
            .returning(|_| Ok(payload()));
        service
            .expect_chat()
            .withf(|ticker, question| ticker.as_str() == "AAPL" && question == "Why?")
            .times(1)
            .returning(|_, _| {
                Ok(ChatPayload {
                    answer: Some("Trend, fundamentals and news agree.".to_string()),
                })
            });

        let mut dashboard = dashboard(service);
        assert!(dashboard.analyze("aapl ").await.is_applied());

        let view = dashboard.view();
        let derived = view.derived.unwrap();
        assert_eq!(derived.recommendation_category, RecommendationCategory::Buy);
        assert_eq!(derived.confidence_label, "90.0%");
        assert_eq!(derived.sentiment_tone, SentimentTone::Positive);
        assert_eq!(derived.fundamentals_labels.pe, "28");
        assert!(derived.has_fundamentals_data);

        assert_eq!(dashboard.ask("Why?").await, AskOutcome::Answered);
        // greeting + question + answer
        assert_eq!(dashboard.view().chat.len(), 3);
    }

    #[tokio::test]
    async fn test_empty_analyze_scenario() {
        let mut service = MockAnalysisService::new();
        service.expect_analyze().never();

        let mut dashboard = dashboard(service);
        dashboard.analyze("").await;

        let view = dashboard.view();
        assert!(view.analysis.is_none());
        assert_eq!(view.error, Some("empty ticker"));
    }

    #[tokio::test]
    async fn test_ask_before_analyze_scenario() {
        let mut service = MockAnalysisService::new();
        service.expect_chat().never();

        let mut dashboard = dashboard(service);
        let before = dashboard.view().chat.to_vec();

        assert_eq!(
            dashboard.ask("Why?").await,
            AskOutcome::Skipped(SkipReason::NoAnalysis)
        );
        assert_eq!(dashboard.view().chat, before.as_slice());
    }

    #[tokio::test]
    async fn test_chat_survives_reanalysis_and_failures() {
        let mut service = MockAnalysisService::new();
        service.expect_analyze().times(2).returning(|_| Ok(payload()));
        service
            .expect_chat()
            .returning(|_, _| Err(ClearTradeError::Transport("refused".to_string())));

        let mut dashboard = dashboard(service);
        dashboard.analyze("AAPL").await;
        assert_eq!(dashboard.ask("RSI?").await, AskOutcome::Failed);

        // A failed chat leaves the analysis untouched.
        assert!(dashboard.view().analysis.is_some());
        assert!(dashboard.view().error.is_none());

        dashboard.analyze("AAPL").await;
        let chat = dashboard.view().chat;
        assert_eq!(chat.len(), 3);
        assert_eq!(chat[1].role, Role::User);
    }

    #[tokio::test]
    async fn test_history_defaults_to_analyzed_ticker() {
        let mut service = MockAnalysisService::new();
        service.expect_analyze().returning(|_| Ok(payload()));
        service
            .expect_history()
            .withf(|ticker| ticker.as_str() == "AAPL")
            .times(1)
            .returning(|_| {
                Ok(vec![HistoryEntry {
                    created_at: Utc::now(),
                    signal: "BUY".to_string(),
                    confidence: 0.9,
                    explanation: String::new(),
                }])
            });

        let mut dashboard = dashboard(service);
        dashboard.analyze("aapl").await;
        let (ticker, entries) = dashboard.history(None).await.unwrap();
        assert_eq!(ticker.as_str(), "AAPL");
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_history_rejects_blank_ticker() {
        let mut service = MockAnalysisService::new();
        service.expect_history().never();

        let dashboard = dashboard(service);
        let err = dashboard.history(Some(" ")).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_process_input() {
        let mut service = MockAnalysisService::new();
        service.expect_analyze().returning(|_| Ok(payload()));
        service.expect_chat().returning(|_, _| {
            Ok(ChatPayload {
                answer: Some("RSI = 63.00.".to_string()),
            })
        });

        let mut dashboard = dashboard(service);
        let formatter = TextFormatter;

        assert!(dashboard.process_input("RSI?", &formatter).await.is_err());

        let reply = dashboard.process_input("/analyze", &formatter).await.unwrap();
        let Reply::Text(text) = reply else {
            panic!("Expected text reply");
        };
        assert!(text.contains("== AAPL =="));

        let reply = dashboard.process_input("RSI?", &formatter).await.unwrap();
        assert_eq!(reply, Reply::Text("agent: RSI = 63.00.".to_string()));

        assert_eq!(
            dashboard.process_input("/exit", &formatter).await.unwrap(),
            Reply::Exit
        );
    }
}
