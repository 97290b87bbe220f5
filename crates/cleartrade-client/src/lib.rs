//! ClearTrade analysis client
//!
//! Client-side interaction controller for the ClearTrade stock analysis
//! service. It turns user actions into service requests and keeps a
//! consistent in-memory model of the answers:
//!
//! - `analyze`: fetch a per-ticker recommendation with confidence, technical
//!   features, fundamentals and news sentiment
//! - `ask`: follow-up questions about the analyzed ticker, kept in a chat log
//! - `history`: past recommendations stored by the service
//!
//! All presentation values (confidence percentage, recommendation category,
//! sentiment tone and explanation) are derived deterministically by
//! [`normalizer`] and exposed through the borrowed [`ViewState`].
//!
//! # Architecture
//!
//! - [`AnalysisController`] owns the current result, loading and error state
//! - [`ChatController`] owns the chat log
//! - [`Dashboard`] composes both over one [`AnalysisService`]
//!
//! # Example
//!
//! ```rust,ignore
//! use cleartrade_client::{ClientConfig, Dashboard};
//!
//! let mut dashboard = Dashboard::connect(ClientConfig::default())?;
//! dashboard.analyze("aapl").await;
//! if let Some(derived) = dashboard.view().derived {
//!     println!("{} {}", derived.recommendation_category, derived.confidence_label);
//! }
//! ```

pub mod api;
pub mod bot;
pub mod chat;
pub mod config;
pub mod engine;
pub mod error;
pub mod interface;
pub mod normalizer;
pub mod ticker;
pub mod view;

// Re-export main types for convenience
pub use api::{AnalysisService, HttpAnalysisService};
pub use bot::{Command, Dashboard, Reply};
pub use chat::{AskOutcome, ChatController, ChatMessage, ChatSession, Role};
pub use config::ClientConfig;
pub use engine::{AnalysisController, AnalysisResult, Completion};
pub use error::{ClearTradeError, Result};
pub use normalizer::{DerivedView, RecommendationCategory, SentimentTone};
pub use ticker::TickerSymbol;
pub use view::ViewState;
