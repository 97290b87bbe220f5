//! Configuration for the analysis client

use crate::error::{ClearTradeError, Result};
use cleartrade_utils::{env_or, env_parse};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Default location of the analysis service
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api";

/// Ticker the input field starts with
pub const DEFAULT_TICKER: &str = "AAPL";

/// First agent message of every chat session
pub const DEFAULT_GREETING: &str = "Ask: Why? RSI? Confidence? Sentiment?";

/// Configuration for the analysis client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the analysis service, without a trailing slash
    pub api_base: String,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// Ticker prefilled in the input before the first analyze
    pub default_ticker: String,

    /// Greeting seeded into a fresh chat session (`None` starts empty)
    pub greeting: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: Duration::from_secs(30),
            default_ticker: DEFAULT_TICKER.to_string(),
            greeting: Some(DEFAULT_GREETING.to_string()),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Build a configuration from `CLEARTRADE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env().build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_base)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClearTradeError::Config(format!(
                "api_base must be http(s), got {}",
                url.scheme()
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(ClearTradeError::Config(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Full URL for an endpoint below the API base, e.g. `endpoint("analyze")`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base.trim_end_matches('/'), path)
    }
}

/// Builder for ClientConfig
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    api_base: Option<String>,
    request_timeout: Option<Duration>,
    default_ticker: Option<String>,
    greeting: Option<Option<String>>,
    env_error: Option<String>,
}

impl ClientConfigBuilder {
    /// Set the service base URL
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the ticker prefilled before the first analyze
    pub fn default_ticker(mut self, ticker: impl Into<String>) -> Self {
        self.default_ticker = Some(ticker.into());
        self
    }

    /// Set the chat greeting
    pub fn greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = Some(Some(greeting.into()));
        self
    }

    /// Start chat sessions without a greeting
    pub fn no_greeting(mut self) -> Self {
        self.greeting = Some(None);
        self
    }

    /// Fill unset fields from `CLEARTRADE_API_BASE`, `CLEARTRADE_TIMEOUT_SECS`
    /// and `CLEARTRADE_DEFAULT_TICKER`
    pub fn with_env(mut self) -> Self {
        if self.api_base.is_none() {
            self.api_base = Some(env_or("CLEARTRADE_API_BASE", DEFAULT_API_BASE));
        }
        if self.request_timeout.is_none() {
            match env_parse::<u64>("CLEARTRADE_TIMEOUT_SECS") {
                Ok(secs) => self.request_timeout = secs.map(Duration::from_secs),
                Err(raw) => {
                    self.env_error =
                        Some(format!("CLEARTRADE_TIMEOUT_SECS is not a number: {raw}"));
                }
            }
        }
        if self.default_ticker.is_none() {
            self.default_ticker = Some(env_or("CLEARTRADE_DEFAULT_TICKER", DEFAULT_TICKER));
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ClientConfig> {
        if let Some(reason) = self.env_error {
            return Err(ClearTradeError::Config(reason));
        }

        let defaults = ClientConfig::default();

        let config = ClientConfig {
            api_base: self.api_base.unwrap_or(defaults.api_base),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            default_ticker: self.default_ticker.unwrap_or(defaults.default_ticker),
            greeting: self.greeting.unwrap_or(defaults.greeting),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.default_ticker, "AAPL");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::builder()
            .api_base("https://cleartrade.example.com/api/")
            .request_timeout(Duration::from_secs(5))
            .no_greeting()
            .build()
            .unwrap();

        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert!(config.greeting.is_none());
        assert_eq!(
            config.endpoint("analyze"),
            "https://cleartrade.example.com/api/analyze"
        );
    }

    #[test]
    fn test_validation_rejects_bad_base() {
        let err = ClientConfig::builder().api_base("not a url").build().unwrap_err();
        assert!(matches!(err, ClearTradeError::Config(_)));

        let err = ClientConfig::builder()
            .api_base("ftp://example.com/api")
            .build()
            .unwrap_err();
        assert!(matches!(err, ClearTradeError::Config(_)));
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = ClientConfig {
            request_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
