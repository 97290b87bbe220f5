//! Follow-up chat about the analyzed ticker

pub mod controller;
pub mod session;

pub use controller::{AskOutcome, ChatController, NO_ANSWER_FALLBACK, PendingQuestion, SkipReason};
pub use session::{ChatMessage, ChatSession, Role};
