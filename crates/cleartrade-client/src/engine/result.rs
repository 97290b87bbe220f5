//! Analysis result model

use crate::api::dto::{AnalysisPayload, FundamentalsPayload};
use crate::ticker::TickerSymbol;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Fundamentals {
    pub pe_ratio: Option<f64>,
    pub earnings_growth: Option<f64>,
    pub revenue_growth: Option<f64>,
}

impl From<FundamentalsPayload> for Fundamentals {
    fn from(payload: FundamentalsPayload) -> Self {
        Self {
            pe_ratio: payload.pe_ratio,
            earnings_growth: payload.earnings_growth,
            revenue_growth: payload.revenue_growth,
        }
    }
}

/// One successful analysis, as returned by the service
///
/// Never modified after construction; the controller swaps it out wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ticker: TickerSymbol,
    pub recommendation: Option<String>,
    pub confidence: Option<f64>,
    pub explanation: String,
    pub summary: Option<String>,
    pub features: BTreeMap<String, f64>,
    pub fundamentals: Fundamentals,
    pub sentiment: Option<f64>,
    pub class_probabilities: BTreeMap<String, f64>,
    pub received_at: DateTime<Utc>,
}

impl AnalysisResult {
    /// Build from a payload; the service's ticker wins when it is usable,
    /// otherwise the requested one is kept.
    pub fn from_payload(requested: &TickerSymbol, payload: AnalysisPayload) -> Self {
        let ticker = payload
            .ticker
            .as_deref()
            .and_then(|raw| TickerSymbol::parse(raw).ok())
            .unwrap_or_else(|| requested.clone());

        Self {
            ticker,
            recommendation: payload.recommendation,
            confidence: payload.confidence,
            explanation: payload.explanation.unwrap_or_default(),
            summary: payload.summary.filter(|s| !s.trim().is_empty()),
            features: payload.features,
            fundamentals: payload.fundamentals.into(),
            sentiment: payload.sentiment,
            class_probabilities: payload.class_probabilities,
            received_at: Utc::now(),
        }
    }

    /// Look up a technical feature such as `rsi` or `ma_10`
    pub fn feature(&self, name: &str) -> Option<f64> {
        self.features.get(name).copied()
    }
}
