// src/formatting/standup_prompt.rs
//! Composes the summarization prompt from saved standup entries.
//!
//! The entries are rendered into plain per-project sections first; the
//! Handlebars template only wraps them with the instruction preamble and
//! the expected response format.

use crate::error::AppError;
use crate::model::StandupEntry;
use crate::pipeline::PromptComposer;
use crate::types::RenderedPrompt;
use handlebars::Handlebars;
use serde_json::json;
use std::path::Path;

/// The template used when no `--template` is given.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/standup-prompt.hbs");

const DEFAULT_TEMPLATE_NAME: &str = "standup-prompt";

/// Separates one project's section from the next.
const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// Renders entries as `Project: <name>\nWork completed:\n- item` sections.
pub fn format_standup_data(entries: &[StandupEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            let items: Vec<String> = entry
                .contents
                .iter()
                .map(|item| format!("- {}", item))
                .collect();
            format!(
                "Project: {}\nWork completed:\n{}",
                entry.project_name,
                items.join("\n")
            )
        })
        .collect::<Vec<_>>()
        .join(SECTION_SEPARATOR)
}

/// Renders standup entries through a registered Handlebars template.
pub struct StandupPromptComposer {
    handlebars: Handlebars<'static>,
    template_name: String,
    instruction: Option<String>,
}

impl StandupPromptComposer {
    /// A composer using the embedded default template.
    pub fn new(instruction: Option<String>) -> Result<Self, AppError> {
        Self::from_source(DEFAULT_TEMPLATE_NAME, DEFAULT_TEMPLATE, instruction)
    }

    /// A composer using the template stored at `path`.
    pub fn from_template_file(path: &Path, instruction: Option<String>) -> Result<Self, AppError> {
        let source = std::fs::read_to_string(path).map_err(|e| AppError::TemplateNotFound {
            path: path.display().to_string(),
            source: e,
        })?;
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(DEFAULT_TEMPLATE_NAME);
        Self::from_source(name, &source, instruction)
    }

    fn from_source(
        name: &str,
        source: &str,
        instruction: Option<String>,
    ) -> Result<Self, AppError> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars
            .register_template_string(name, source)
            .map_err(|e| AppError::TemplateRenderError {
                name: name.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            handlebars,
            template_name: name.to_string(),
            instruction: instruction.filter(|text| !text.trim().is_empty()),
        })
    }

    pub fn template_name(&self) -> &str {
        &self.template_name
    }
}

impl PromptComposer for StandupPromptComposer {
    fn compose(&self, entries: &[StandupEntry]) -> Result<RenderedPrompt, AppError> {
        let data = json!({
            "standup_data": format_standup_data(entries),
            "instruction": self.instruction,
            "entry_count": entries.len(),
        });

        let prompt = self
            .handlebars
            .render(&self.template_name, &data)
            .map_err(|e| AppError::TemplateRenderError {
                name: self.template_name.clone(),
                message: e.to_string(),
            })?;

        log::info!(
            "Prompt composed: {} bytes from {} entries",
            prompt.len(),
            entries.len()
        );
        Ok(RenderedPrompt::new(prompt))
    }
}

/// Reads a saved standup digest (`standups.json`).
pub fn load_standups(path: &Path) -> Result<Vec<StandupEntry>, AppError> {
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| AppError::JsonParseError {
        path: path.to_path_buf(),
        source: e,
    })
}
