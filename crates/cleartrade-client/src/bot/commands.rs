//! Command parsing for the terminal front-end

use crate::error::{ClearTradeError, Result};

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Analyze a ticker; without one, re-submit the current input
    Analyze { ticker: Option<String> },
    /// Past recommendations for a ticker (defaults to the analyzed one)
    History { ticker: Option<String> },
    /// Re-render the current analysis
    Show,
    /// Print the chat log
    Chat,
    /// Show help
    Help,
    /// Exit the front-end
    Exit,
    /// Follow-up question about the analyzed ticker
    Ask { question: String },
}

impl Command {
    /// Parse a command from user input
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(ClearTradeError::Command("Empty input".to_string()));
        }

        let Some(rest) = input.strip_prefix('/') else {
            return Ok(Command::Ask {
                question: input.to_string(),
            });
        };

        let parts: Vec<&str> = rest.split_whitespace().collect();
        let Some((cmd, args)) = parts.split_first() else {
            return Err(ClearTradeError::Command("Empty command".to_string()));
        };

        let ticker = args.first().map(|s| (*s).to_string());

        match cmd.to_lowercase().as_str() {
            "analyze" | "a" => Ok(Command::Analyze { ticker }),
            "history" | "hist" => Ok(Command::History { ticker }),
            "show" | "s" => Ok(Command::Show),
            "chat" | "log" => Ok(Command::Chat),
            "help" | "h" | "?" => Ok(Command::Help),
            "exit" | "quit" | "q" => Ok(Command::Exit),
            other => Err(ClearTradeError::Command(format!("Unknown command: {other}"))),
        }
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r"
ClearTrade Commands
===================

  /analyze [ticker]   Analyze a ticker (default: the current input)
  /history [ticker]   Past recommendations
  /show               Show the current analysis again
  /chat               Show the chat log
  /help               Show this help
  /exit               Exit

Anything else is sent as a question about the analyzed ticker:
  Why?   RSI?   Confidence?   Sentiment?
"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze() {
        assert_eq!(
            Command::parse("/analyze aapl").unwrap(),
            Command::Analyze {
                ticker: Some("aapl".to_string())
            }
        );
        assert_eq!(
            Command::parse("/a").unwrap(),
            Command::Analyze { ticker: None }
        );
    }

    #[test]
    fn test_parse_history() {
        assert_eq!(
            Command::parse("/HISTORY msft").unwrap(),
            Command::History {
                ticker: Some("msft".to_string())
            }
        );
        assert_eq!(
            Command::parse("/hist").unwrap(),
            Command::History { ticker: None }
        );
    }

    #[test]
    fn test_parse_question() {
        assert_eq!(
            Command::parse("  Why is it a buy? ").unwrap(),
            Command::Ask {
                question: "Why is it a buy?".to_string()
            }
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("/show").unwrap(), Command::Show);
        assert_eq!(Command::parse("/log").unwrap(), Command::Chat);
        assert_eq!(Command::parse("/?").unwrap(), Command::Help);
        assert_eq!(Command::parse("/quit").unwrap(), Command::Exit);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse("").is_err());
        assert!(Command::parse("/").is_err());
        assert!(Command::parse("/frobnicate").is_err());
    }
}
