//! HTTP client for the analysis service

use crate::api::dto::{
    AnalysisPayload, ChatPayload, ChatRequest, ErrorPayload, HistoryEntry, HistoryPayload,
};
use crate::config::ClientConfig;
use crate::error::{ClearTradeError, GENERIC_ANALYZE_FAILURE, Result};
use crate::ticker::TickerSymbol;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

/// Remote analysis service
///
/// One call per user action; implementations must not retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// `GET /analyze?ticker=`
    async fn analyze(&self, ticker: &TickerSymbol) -> Result<AnalysisPayload>;

    /// `POST /chat` with `{ticker, question}`
    async fn chat(&self, ticker: &TickerSymbol, question: &str) -> Result<ChatPayload>;

    /// `GET /history?ticker=`
    async fn history(&self, ticker: &TickerSymbol) -> Result<Vec<HistoryEntry>>;
}

/// reqwest-backed [`AnalysisService`]
#[derive(Debug, Clone)]
pub struct HttpAnalysisService {
    client: Client,
    config: ClientConfig,
}

impl HttpAnalysisService {
    /// Create a service client; the configured timeout applies to every request
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClearTradeError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Status and raw body; JSON parsing is left to [`decode`]
    async fn read(response: reqwest::Response) -> Result<(StatusCode, String)> {
        let status = response.status();
        // Text decoding is lossy, so a failure here means the stream broke.
        let body = response
            .text()
            .await
            .map_err(|e| ClearTradeError::Transport(e.to_string()))?;
        Ok((status, body))
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    #[instrument(skip(self, ticker), fields(ticker = %ticker, api_base = %self.config.api_base))]
    async fn analyze(&self, ticker: &TickerSymbol) -> Result<AnalysisPayload> {
        debug!("Requesting analysis");

        let response = self
            .client
            .get(self.config.endpoint("analyze"))
            .query(&[("ticker", ticker.as_str())])
            .send()
            .await?;

        let (status, body) = Self::read(response).await?;
        decode(status, &body)
    }

    #[instrument(skip(self, ticker, question), fields(ticker = %ticker))]
    async fn chat(&self, ticker: &TickerSymbol, question: &str) -> Result<ChatPayload> {
        debug!("Sending chat question");

        let response = self
            .client
            .post(self.config.endpoint("chat"))
            .json(&ChatRequest {
                ticker: ticker.as_str(),
                question,
            })
            .send()
            .await?;

        let (status, body) = Self::read(response).await?;
        decode(status, &body)
    }

    #[instrument(skip(self, ticker), fields(ticker = %ticker))]
    async fn history(&self, ticker: &TickerSymbol) -> Result<Vec<HistoryEntry>> {
        let response = self
            .client
            .get(self.config.endpoint("history"))
            .query(&[("ticker", ticker.as_str())])
            .send()
            .await?;

        let (status, body) = Self::read(response).await?;
        let payload: HistoryPayload = decode(status, &body)?;
        Ok(payload.history)
    }
}

/// Interpret a raw response
///
/// Non-success statuses become [`ClearTradeError::Request`], using the body's
/// `error` field when present. Success bodies must parse as `T`.
pub(crate) fn decode<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorPayload>(body)
            .ok()
            .and_then(|payload| payload.error)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| GENERIC_ANALYZE_FAILURE.to_string());

        warn!(status = status.as_u16(), %message, "Analysis service returned an error");
        return Err(ClearTradeError::Request {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_str(body)?)
}
