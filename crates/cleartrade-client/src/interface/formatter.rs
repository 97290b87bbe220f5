//! Response formatting utilities

use crate::api::HistoryEntry;
use crate::chat::ChatMessage;
use crate::engine::AnalysisResult;
use crate::normalizer::{DerivedView, PLACEHOLDER, confidence_label};
use crate::ticker::TickerSymbol;
use crate::view::ViewState;
use comfy_table::{Table, presets};
use std::fmt::Write as _;

/// Output flavour of a [`Formatter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStyle {
    /// Terminal text with box-drawn tables
    #[default]
    Text,
    /// GitHub-flavoured markdown
    Markdown,
}

pub trait Formatter: Send + Sync {
    fn style(&self) -> OutputStyle;
    fn format_view(&self, view: &ViewState<'_>) -> String;
    fn format_chat(&self, messages: &[ChatMessage]) -> String;
    fn format_history(&self, ticker: &TickerSymbol, entries: &[HistoryEntry]) -> String;
    fn format_error(&self, error: &str) -> String;
}

const CHAT_DISABLED_HINT: &str = "Run /analyze first to enable chat.";

fn loading_line(view: &ViewState<'_>) -> String {
    format!("Analyzing {}...", view.ticker.trim().to_uppercase())
}

fn probabilities_line(result: &AnalysisResult) -> Option<String> {
    if result.class_probabilities.is_empty() {
        return None;
    }
    let parts: Vec<String> = result
        .class_probabilities
        .iter()
        .map(|(class, p)| format!("{class} {}", confidence_label(Some(*p))))
        .collect();
    Some(parts.join(" · "))
}

fn fundamentals_rows(derived: &DerivedView) -> [(&'static str, &str); 3] {
    let labels = &derived.fundamentals_labels;
    [
        ("P/E ratio", labels.pe.as_str()),
        ("Earnings growth", labels.earnings_growth.as_str()),
        ("Revenue growth", labels.revenue_growth.as_str()),
    ]
}

pub struct TextFormatter;

impl TextFormatter {
    fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_header(headers.to_vec());
        for row in rows {
            table.add_row(row);
        }
        table.to_string()
    }

    fn format_analysis(result: &AnalysisResult, derived: &DerivedView) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "== {} ==", result.ticker);
        let _ = writeln!(
            out,
            "Recommendation: {} ({})",
            result.recommendation.as_deref().unwrap_or(PLACEHOLDER),
            derived.recommendation_category
        );
        let _ = writeln!(out, "Confidence:     {}", derived.confidence_label);
        if let Some(line) = probabilities_line(result) {
            let _ = writeln!(out, "Probabilities:  {line}");
        }
        let _ = writeln!(out, "Explanation:    {}", result.explanation);
        if let Some(summary) = &result.summary {
            let _ = writeln!(out, "Summary:        {summary}");
        }

        out.push_str("\nTechnical features\n");
        if result.features.is_empty() {
            out.push_str("  (none)\n");
        } else {
            let rows = result
                .features
                .iter()
                .map(|(name, value)| vec![name.clone(), format!("{value:.4}")])
                .collect();
            out.push_str(&Self::table(&["Indicator", "Value"], rows));
            out.push('\n');
        }

        out.push_str("\nFundamentals\n");
        if derived.has_fundamentals_data {
            let rows = fundamentals_rows(derived)
                .iter()
                .map(|(name, value)| vec![(*name).to_string(), (*value).to_string()])
                .collect();
            out.push_str(&Self::table(&["Metric", "Value"], rows));
            out.push('\n');
        } else {
            out.push_str("  No fundamentals data\n");
        }

        let _ = write!(
            out,
            "\nSentiment: {}\n  {}",
            derived.sentiment_label, derived.sentiment_explanation
        );
        out
    }
}

impl Formatter for TextFormatter {
    fn style(&self) -> OutputStyle {
        OutputStyle::Text
    }

    fn format_view(&self, view: &ViewState<'_>) -> String {
        if view.loading {
            return loading_line(view);
        }
        if let Some(error) = view.error {
            return self.format_error(error);
        }
        match (view.analysis, view.derived) {
            (Some(result), Some(derived)) => Self::format_analysis(result, derived),
            _ => CHAT_DISABLED_HINT.to_string(),
        }
    }

    fn format_chat(&self, messages: &[ChatMessage]) -> String {
        messages
            .iter()
            .map(|m| format!("{}: {}", m.role, m.text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_history(&self, ticker: &TickerSymbol, entries: &[HistoryEntry]) -> String {
        if entries.is_empty() {
            return format!("No recommendations recorded for {ticker}.");
        }
        let rows = entries
            .iter()
            .map(|e| {
                vec![
                    e.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
                    e.signal.clone(),
                    confidence_label(Some(e.confidence)),
                    e.explanation.clone(),
                ]
            })
            .collect();
        format!(
            "History for {ticker}\n{}",
            Self::table(&["When", "Signal", "Confidence", "Explanation"], rows)
        )
    }

    fn format_error(&self, error: &str) -> String {
        format!("Error: {error}")
    }
}

pub struct MarkdownFormatter;

impl MarkdownFormatter {
    fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
        let mut output = String::new();
        output.push_str(&format!("| {} |\n", headers.join(" | ")));
        output.push_str(&format!("|{}\n", "---|".repeat(headers.len())));
        for row in rows {
            output.push_str(&format!("| {} |\n", row.join(" | ")));
        }
        output
    }
}

impl Formatter for MarkdownFormatter {
    fn style(&self) -> OutputStyle {
        OutputStyle::Markdown
    }

    fn format_view(&self, view: &ViewState<'_>) -> String {
        if view.loading {
            return format!("_{}_", loading_line(view));
        }
        if let Some(error) = view.error {
            return self.format_error(error);
        }
        let (Some(result), Some(derived)) = (view.analysis, view.derived) else {
            return format!("_{CHAT_DISABLED_HINT}_");
        };

        let mut out = String::new();
        let _ = writeln!(out, "## {}\n", result.ticker);
        let _ = writeln!(
            out,
            "**Recommendation:** {} ({})  ",
            result.recommendation.as_deref().unwrap_or(PLACEHOLDER),
            derived.recommendation_category
        );
        let _ = writeln!(out, "**Confidence:** {}  ", derived.confidence_label);
        if let Some(line) = probabilities_line(result) {
            let _ = writeln!(out, "**Probabilities:** {line}  ");
        }
        let _ = writeln!(out, "**Explanation:** {}\n", result.explanation);
        if let Some(summary) = &result.summary {
            let _ = writeln!(out, "{summary}\n");
        }

        out.push_str("### Technical features\n\n");
        let rows: Vec<Vec<String>> = result
            .features
            .iter()
            .map(|(name, value)| vec![name.clone(), format!("{value:.4}")])
            .collect();
        out.push_str(&Self::table(&["Indicator", "Value"], &rows));

        out.push_str("\n### Fundamentals\n\n");
        if derived.has_fundamentals_data {
            let rows: Vec<Vec<String>> = fundamentals_rows(derived)
                .iter()
                .map(|(name, value)| vec![(*name).to_string(), (*value).to_string()])
                .collect();
            out.push_str(&Self::table(&["Metric", "Value"], &rows));
        } else {
            out.push_str("_No fundamentals data_\n");
        }

        let _ = write!(
            out,
            "\n### Sentiment\n\n**{}**: {}",
            derived.sentiment_label, derived.sentiment_explanation
        );
        out
    }

    fn format_chat(&self, messages: &[ChatMessage]) -> String {
        messages
            .iter()
            .map(|m| format!("**{}:** {}", m.role, m.text))
            .collect::<Vec<_>>()
            .join("  \n")
    }

    fn format_history(&self, ticker: &TickerSymbol, entries: &[HistoryEntry]) -> String {
        if entries.is_empty() {
            return format!("_No recommendations recorded for {ticker}._");
        }
        let rows: Vec<Vec<String>> = entries
            .iter()
            .map(|e| {
                vec![
                    e.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
                    e.signal.clone(),
                    confidence_label(Some(e.confidence)),
                    e.explanation.clone(),
                ]
            })
            .collect();
        format!(
            "### History for {ticker}\n\n{}",
            Self::table(&["When", "Signal", "Confidence", "Explanation"], &rows)
        )
    }

    fn format_error(&self, error: &str) -> String {
        format!("**Error:** {error}")
    }
}

pub struct FormatterFactory;

impl FormatterFactory {
    pub fn create(style: OutputStyle) -> Box<dyn Formatter> {
        match style {
            OutputStyle::Text => Box::new(TextFormatter),
            OutputStyle::Markdown => Box::new(MarkdownFormatter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AnalysisPayload;
    use crate::chat::ChatController;
    use crate::engine::AnalysisController;
    use chrono::{TimeZone, Utc};

    fn analyzed() -> (AnalysisController, ChatController) {
        let mut analysis = AnalysisController::new("AAPL");
        let pending = analysis.begin("aapl").unwrap();
        let payload: AnalysisPayload = serde_json::from_str(
            r#"{
                "ticker": "AAPL",
                "recommendation": "BUY",
                "confidence": 0.71,
                "explanation": "Model leans bullish.",
                "class_probabilities": {"BUY": 0.71, "SELL": 0.29},
                "features": {"rsi": 61.4},
                "fundamentals": {"pe_ratio": 29.5, "earnings_growth": null, "revenue_growth": null},
                "sentiment": -0.4
            }"#,
        )
        .unwrap();
        analysis.complete(pending, Ok(payload));
        (analysis, ChatController::new(Some("Ask: Why?")))
    }

    #[test]
    fn test_text_view_contains_derived_values() {
        let (analysis, chat) = analyzed();
        let view = ViewState::compose(&analysis, &chat);
        let text = TextFormatter.format_view(&view);

        assert!(text.contains("== AAPL =="));
        assert!(text.contains("BUY (buy)"));
        assert!(text.contains("71.0%"));
        assert!(text.contains("BUY 71.0% · SELL 29.0%"));
        assert!(text.contains("rsi"));
        assert!(text.contains("29.5"));
        assert!(text.contains("Negative (-0.40)"));
    }

    #[test]
    fn test_markdown_view() {
        let (analysis, chat) = analyzed();
        let view = ViewState::compose(&analysis, &chat);
        let md = MarkdownFormatter.format_view(&view);

        assert!(md.starts_with("## AAPL"));
        assert!(md.contains("| rsi | 61.4000 |"));
        assert!(md.contains("| P/E ratio | 29.5 |"));
    }

    #[test]
    fn test_view_without_analysis_shows_hint_or_error() {
        let mut analysis = AnalysisController::new("AAPL");
        let chat = ChatController::new(None);
        assert_eq!(
            TextFormatter.format_view(&ViewState::compose(&analysis, &chat)),
            CHAT_DISABLED_HINT
        );

        let _ = analysis.begin("  ");
        assert_eq!(
            TextFormatter.format_view(&ViewState::compose(&analysis, &chat)),
            "Error: empty ticker"
        );
    }

    #[test]
    fn test_chat_log() {
        let chat = ChatController::new(Some("Ask: Why?"));
        assert_eq!(
            TextFormatter.format_chat(chat.session().messages()),
            "agent: Ask: Why?"
        );
    }

    #[test]
    fn test_history() {
        let ticker = TickerSymbol::parse("AAPL").unwrap();
        let entries = vec![HistoryEntry {
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 14, 3, 0).unwrap(),
            signal: "HOLD".to_string(),
            confidence: 0.52,
            explanation: "Mixed signals.".to_string(),
        }];

        let md = MarkdownFormatter.format_history(&ticker, &entries);
        assert!(md.contains("| 2024-05-01 14:03 UTC | HOLD | 52.0% | Mixed signals. |"));

        let text = TextFormatter.format_history(&ticker, &[]);
        assert_eq!(text, "No recommendations recorded for AAPL.");
    }

    #[test]
    fn test_factory() {
        assert_eq!(
            FormatterFactory::create(OutputStyle::Markdown).style(),
            OutputStyle::Markdown
        );
        assert_eq!(FormatterFactory::create(OutputStyle::default()).style(), OutputStyle::Text);
    }
}
