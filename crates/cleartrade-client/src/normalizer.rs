//! Presentation values derived from an analysis result
//!
//! Every function here is total: missing or non-finite input maps to a
//! placeholder instead of an error, so a renderer can show whatever the
//! service returned without further checks.

use crate::engine::{AnalysisResult, Fundamentals};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown in place of a value that is missing or not a finite number
pub const PLACEHOLDER: &str = "—";

/// Sentiment scores above this are positive, below its negation negative
pub const SENTIMENT_THRESHOLD: f64 = 0.1;

/// Slack allowed around [0, 1] for float noise in confidence values
const CONFIDENCE_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationCategory {
    Buy,
    Sell,
    Hold,
    Neutral,
}

impl RecommendationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Hold => "hold",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SentimentTone {
    Positive,
    Negative,
    Neutral,
    NoData,
}

impl SentimentTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::NoData => "no-data",
        }
    }

    /// Capitalized name used in labels
    pub fn title(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
            Self::NoData => "No data",
        }
    }

    pub fn explanation(&self) -> &'static str {
        match self {
            Self::Positive => {
                "Recent headlines lean bullish, which supports the recommendation."
            }
            Self::Negative => {
                "Recent headlines lean bearish, adding downside risk to the recommendation."
            }
            Self::Neutral => {
                "Headline flow is mixed or balanced, so news has little pull either way."
            }
            Self::NoData => "No recent headlines were available to score sentiment.",
        }
    }
}

impl fmt::Display for SentimentTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentView {
    pub tone: SentimentTone,
    pub label: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundamentalsLabels {
    pub pe: String,
    pub earnings_growth: String,
    pub revenue_growth: String,
}

impl FundamentalsLabels {
    /// False only when every metric is the placeholder
    pub fn has_data(&self) -> bool {
        [&self.pe, &self.earnings_growth, &self.revenue_growth]
            .iter()
            .any(|label| label.as_str() != PLACEHOLDER)
    }
}

/// Everything a renderer needs beyond the raw result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedView {
    pub confidence_label: String,
    pub recommendation_category: RecommendationCategory,
    pub sentiment_tone: SentimentTone,
    pub sentiment_label: String,
    pub sentiment_explanation: String,
    pub fundamentals_labels: FundamentalsLabels,
    pub has_fundamentals_data: bool,
}

impl DerivedView {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let sentiment = sentiment_view(result.sentiment);
        let fundamentals_labels = fundamentals_labels(&result.fundamentals);
        let has_fundamentals_data = fundamentals_labels.has_data();

        Self {
            confidence_label: confidence_label(result.confidence),
            recommendation_category: recommendation_category(result.recommendation.as_deref()),
            sentiment_tone: sentiment.tone,
            sentiment_label: sentiment.label,
            sentiment_explanation: sentiment.explanation,
            fundamentals_labels,
            has_fundamentals_data,
        }
    }
}

/// `0.823` → `"82.3%"`; anything outside [0, 1] or non-finite → placeholder
pub fn confidence_label(confidence: Option<f64>) -> String {
    match confidence {
        Some(x)
            if x.is_finite()
                && (-CONFIDENCE_TOLERANCE..=1.0 + CONFIDENCE_TOLERANCE).contains(&x) =>
        {
            format!("{:.1}%", x.clamp(0.0, 1.0) * 100.0)
        }
        _ => PLACEHOLDER.to_string(),
    }
}

/// First matching keyword wins, in the order buy, sell, hold
pub fn recommendation_category(recommendation: Option<&str>) -> RecommendationCategory {
    let Some(raw) = recommendation else {
        return RecommendationCategory::Neutral;
    };

    let lowered = raw.trim().to_lowercase();
    if lowered.contains("buy") {
        RecommendationCategory::Buy
    } else if lowered.contains("sell") {
        RecommendationCategory::Sell
    } else if lowered.contains("hold") {
        RecommendationCategory::Hold
    } else {
        RecommendationCategory::Neutral
    }
}

pub fn fundamentals_labels(fundamentals: &Fundamentals) -> FundamentalsLabels {
    FundamentalsLabels {
        pe: match fundamentals.pe_ratio {
            Some(pe) if pe.is_finite() => pe.to_string(),
            _ => PLACEHOLDER.to_string(),
        },
        earnings_growth: percent_label(fundamentals.earnings_growth),
        revenue_growth: percent_label(fundamentals.revenue_growth),
    }
}

pub fn sentiment_view(score: Option<f64>) -> SentimentView {
    let Some(score) = score.filter(|s| s.is_finite()) else {
        let tone = SentimentTone::NoData;
        return SentimentView {
            tone,
            label: tone.title().to_string(),
            explanation: tone.explanation().to_string(),
        };
    };

    let tone = if score > SENTIMENT_THRESHOLD {
        SentimentTone::Positive
    } else if score < -SENTIMENT_THRESHOLD {
        SentimentTone::Negative
    } else {
        SentimentTone::Neutral
    };

    SentimentView {
        tone,
        label: format!("{} ({score:.2})", tone.title()),
        explanation: tone.explanation().to_string(),
    }
}

fn percent_label(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.1}%", v * 100.0),
        _ => PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::{AnalysisPayload, FundamentalsPayload};
    use crate::ticker::TickerSymbol;
    use std::collections::BTreeMap;

    #[test]
    fn test_confidence_label() {
        assert_eq!(confidence_label(Some(0.823)), "82.3%");
        assert_eq!(confidence_label(Some(0.9)), "90.0%");
        assert_eq!(confidence_label(Some(0.0)), "0.0%");
        assert_eq!(confidence_label(Some(1.0)), "100.0%");
        assert_eq!(confidence_label(Some(f64::NAN)), PLACEHOLDER);
        assert_eq!(confidence_label(Some(f64::INFINITY)), PLACEHOLDER);
        assert_eq!(confidence_label(Some(1.7)), PLACEHOLDER);
        assert_eq!(confidence_label(Some(-0.2)), PLACEHOLDER);
        assert_eq!(confidence_label(None), PLACEHOLDER);
    }

    #[test]
    fn test_recommendation_category() {
        assert_eq!(
            recommendation_category(Some("Strong Buy")),
            RecommendationCategory::Buy
        );
        assert_eq!(recommendation_category(Some("SELL")), RecommendationCategory::Sell);
        assert_eq!(recommendation_category(Some("hold")), RecommendationCategory::Hold);
        assert_eq!(recommendation_category(Some("")), RecommendationCategory::Neutral);
        assert_eq!(recommendation_category(None), RecommendationCategory::Neutral);
        assert_eq!(
            recommendation_category(Some("wait and see")),
            RecommendationCategory::Neutral
        );
        // buy is checked before sell
        assert_eq!(
            recommendation_category(Some("sell then buy back")),
            RecommendationCategory::Buy
        );
    }

    #[test]
    fn test_sentiment_view() {
        assert_eq!(sentiment_view(Some(0.5)).tone, SentimentTone::Positive);
        assert_eq!(sentiment_view(Some(-0.5)).tone, SentimentTone::Negative);
        assert_eq!(sentiment_view(Some(0.05)).tone, SentimentTone::Neutral);
        assert_eq!(sentiment_view(Some(0.1)).tone, SentimentTone::Neutral);
        assert_eq!(sentiment_view(Some(-0.1)).tone, SentimentTone::Neutral);
        assert_eq!(sentiment_view(None).tone, SentimentTone::NoData);
        assert_eq!(sentiment_view(Some(f64::NAN)).tone, SentimentTone::NoData);

        assert_eq!(sentiment_view(Some(0.3)).label, "Positive (0.30)");
        assert_eq!(sentiment_view(Some(-0.456)).label, "Negative (-0.46)");
        assert_eq!(sentiment_view(None).label, "No data");
    }

    #[test]
    fn test_each_tone_has_its_own_explanation() {
        let explanations: Vec<String> = [Some(0.5), Some(-0.5), Some(0.0), None]
            .into_iter()
            .map(|score| sentiment_view(score).explanation)
            .collect();

        for (i, a) in explanations.iter().enumerate() {
            for b in &explanations[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_fundamentals_labels() {
        let labels = fundamentals_labels(&Fundamentals {
            pe_ratio: Some(28.0),
            earnings_growth: Some(0.125),
            revenue_growth: None,
        });
        assert_eq!(labels.pe, "28");
        assert_eq!(labels.earnings_growth, "12.5%");
        assert_eq!(labels.revenue_growth, PLACEHOLDER);
        assert!(labels.has_data());

        let empty = fundamentals_labels(&Fundamentals {
            pe_ratio: None,
            earnings_growth: Some(f64::NAN),
            revenue_growth: None,
        });
        assert!(!empty.has_data());
    }

    #[test]
    fn test_derived_view_from_result() {
        let payload = AnalysisPayload {
            ticker: Some("AAPL".to_string()),
            recommendation: Some("Buy".to_string()),
            confidence: Some(0.9),
            explanation: Some("Momentum is strong.".to_string()),
            summary: None,
            class_probabilities: BTreeMap::new(),
            features: BTreeMap::new(),
            fundamentals: FundamentalsPayload {
                pe_ratio: Some(28.0),
                ..Default::default()
            },
            sentiment: Some(0.3),
        };
        let result = AnalysisResult::from_payload(&TickerSymbol::parse("AAPL").unwrap(), payload);

        let derived = DerivedView::from_result(&result);
        assert_eq!(derived.recommendation_category, RecommendationCategory::Buy);
        assert_eq!(derived.confidence_label, "90.0%");
        assert_eq!(derived.sentiment_tone, SentimentTone::Positive);
        assert_eq!(derived.fundamentals_labels.pe, "28");
        assert!(derived.has_fundamentals_data);
    }
}
