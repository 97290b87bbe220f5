//! Ticker symbol normalization

use crate::error::ClearTradeError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Canonical (trimmed, uppercase) ticker symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TickerSymbol(String);

impl TickerSymbol {
    /// Parse and normalize a ticker; blank input is rejected
    pub fn parse(input: &str) -> Result<Self, ClearTradeError> {
        let normalized = input.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(ClearTradeError::Validation("empty ticker".to_string()));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TickerSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for TickerSymbol {
    type Error = ClearTradeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for TickerSymbol {
    type Error = ClearTradeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<TickerSymbol> for String {
    fn from(value: TickerSymbol) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_ticker() {
        let parsed = TickerSymbol::parse(" aapl ").expect("ticker should parse");
        assert_eq!(parsed.as_str(), "AAPL");
    }

    #[test]
    fn identity_is_case_insensitive() {
        assert_eq!(
            TickerSymbol::parse("msft").unwrap(),
            TickerSymbol::parse("MSFT ").unwrap()
        );
    }

    #[test]
    fn rejects_blank_input() {
        for input in ["", "   ", "\t\n"] {
            let err = TickerSymbol::parse(input).expect_err("must fail");
            assert!(err.is_validation());
            assert_eq!(err.user_message(), "empty ticker");
        }
    }

    #[test]
    fn deserializes_through_normalization() {
        let ticker: TickerSymbol = serde_json::from_str("\" tsla\"").unwrap();
        assert_eq!(ticker.as_str(), "TSLA");
        assert!(serde_json::from_str::<TickerSymbol>("\"  \"").is_err());
    }
}
