//! Read model handed to renderers

use crate::chat::{ChatController, ChatMessage};
use crate::engine::{AnalysisController, AnalysisResult};
use crate::normalizer::DerivedView;
use serde::Serialize;

/// Snapshot of both controllers, borrowed for the duration of one render
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ViewState<'a> {
    pub ticker: &'a str,
    pub analysis: Option<&'a AnalysisResult>,
    pub derived: Option<&'a DerivedView>,
    pub chat: &'a [ChatMessage],
    pub loading: bool,
    pub error: Option<&'a str>,
}

impl<'a> ViewState<'a> {
    pub fn compose(analysis: &'a AnalysisController, chat: &'a ChatController) -> Self {
        Self {
            ticker: analysis.ticker_input(),
            analysis: analysis.result(),
            derived: analysis.derived(),
            chat: chat.session().messages(),
            loading: analysis.is_loading(),
            error: analysis.error(),
        }
    }

    /// Chat is only usable once an analysis is on screen
    pub fn chat_enabled(&self) -> bool {
        self.analysis.is_some()
    }
}
