//! Client for the remote analysis service

pub mod client;
pub mod dto;

#[cfg(test)]
pub use client::MockAnalysisService;
pub use client::{AnalysisService, HttpAnalysisService};
pub use dto::{AnalysisPayload, ChatPayload, FundamentalsPayload, HistoryEntry};
