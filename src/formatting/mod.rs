// src/formatting/mod.rs
//! Renders saved standup entries into a summarization prompt.

mod standup_prompt;

pub use self::standup_prompt::{
    format_standup_data, load_standups, StandupPromptComposer, DEFAULT_TEMPLATE,
};
