//! Analysis state
//!
//! The analysis result model and the controller that owns it

pub mod controller;
pub mod result;

pub use controller::{AnalysisController, Completion, PendingAnalysis, UiState};
pub use result::{AnalysisResult, Fundamentals};
