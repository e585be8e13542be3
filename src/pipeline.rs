// src/pipeline.rs
//! Pipeline capability traits: the three stages of the standup pipeline.
//!
//! Each trait describes a single capability, enabling testing each stage in isolation.

use crate::error::AppError;
use crate::model::StandupEntry;
use crate::output::OutputReport;
use crate::standup::StandupDigest;
use crate::types::RenderedPrompt;

/// Gathers the done tasks and their work items.
#[async_trait::async_trait]
pub trait StandupSource {
    async fn collect(&self) -> Result<StandupDigest, AppError>;
}

/// Turns saved standup entries into a summarization prompt.
pub trait PromptComposer {
    fn compose(&self, entries: &[StandupEntry]) -> Result<RenderedPrompt, AppError>;
}

/// Delivers a rendered prompt to its destinations.
pub trait PromptDelivery {
    fn deliver(&self, prompt: RenderedPrompt) -> Result<OutputReport, AppError>;
}
