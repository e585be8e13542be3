// src/config.rs
use crate::constants::{
    DEFAULT_OUTPUT_DIR, DEFAULT_REQUEST_TIMEOUT_SECS, DONE_STATUS, NOTION_MAX_FETCH_DEPTH,
};
use crate::error::AppError;
use crate::types::{ApiKey, NotionId, ValidationError};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the Notion integration token.
pub const TOKEN_ENV_VAR: &str = "NOTION_TOKEN";

/// Environment variable holding the task database id.
pub const DATABASE_ENV_VAR: &str = "NOTION_DATABASE_ID";

const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Directory receiving every artifact the tool writes
    #[arg(short = 'o', long, global = true, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Maximum nesting depth expanded below a page's top-level blocks
    #[arg(long, global = true, default_value_t = NOTION_MAX_FETCH_DEPTH)]
    pub max_depth: u8,

    /// Seconds a single Notion request may take
    #[arg(long, global = true, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout: u64,

    /// Status value that marks a task as done
    #[arg(long, global = true, default_value = DONE_STATUS)]
    pub status: String,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Collect done tasks into standups.json
    Fetch,
    /// Write a timestamped report of every done page in full detail
    Details,
    /// Print one page in full detail as JSON
    Page {
        /// Notion page URL or ID
        id: String,
    },
    /// Render the summarization prompt from a saved standups.json
    Prompt(PromptArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct PromptArgs {
    /// Handlebars template replacing the built-in prompt
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Extra instruction text included in the prompt
    #[arg(long)]
    pub instruction: Option<String>,

    /// Do not copy the prompt to the clipboard
    #[arg(long, default_value_t = false)]
    pub no_clipboard: bool,

    /// Also print the prompt to stdout
    #[arg(long, default_value_t = false)]
    pub print: bool,
}

/// Settings shared by every subcommand, validated once at start-up.
#[derive(Debug, Clone)]
pub struct StandupConfig {
    pub output_dir: PathBuf,
    pub max_depth: u8,
    pub request_timeout: Duration,
    pub status: String,
    pub verbose: bool,
}

impl StandupConfig {
    /// Validates the global flags.
    pub fn resolve(cli: &CommandLineInput) -> Result<Self, AppError> {
        if cli.output_dir.exists() && !cli.output_dir.is_dir() {
            return Err(ValidationError::InvalidFilePath {
                path: cli.output_dir.display().to_string(),
                reason: "exists but is not a directory".to_string(),
            }
            .into());
        }

        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&cli.request_timeout) {
            return Err(ValidationError::OutOfBounds {
                value: cli.request_timeout,
                min: 1,
                max: MAX_REQUEST_TIMEOUT_SECS,
            }
            .into());
        }

        let status = cli.status.trim();
        if status.is_empty() {
            return Err(ValidationError::EmptyField("status").into());
        }

        Ok(Self {
            output_dir: cli.output_dir.clone(),
            max_depth: cli.max_depth,
            request_timeout: Duration::from_secs(cli.request_timeout),
            status: status.to_string(),
            verbose: cli.verbose,
        })
    }
}

impl Default for StandupConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            max_depth: NOTION_MAX_FETCH_DEPTH,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            status: DONE_STATUS.to_string(),
            verbose: false,
        }
    }
}

/// Reads the integration token through `lookup` (normally `std::env::var`).
pub fn resolve_api_key<F>(lookup: F) -> Result<ApiKey, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let token = lookup(TOKEN_ENV_VAR).ok_or_else(|| {
        AppError::MissingConfiguration(format!("{} environment variable not set", TOKEN_ENV_VAR))
    })?;
    Ok(ApiKey::new(token)?)
}

/// Reads the task database id through `lookup`.
pub fn resolve_database_id<F>(lookup: F) -> Result<NotionId, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(DATABASE_ENV_VAR).ok_or_else(|| {
        AppError::MissingConfiguration(format!(
            "{} environment variable not set",
            DATABASE_ENV_VAR
        ))
    })?;
    Ok(NotionId::parse(&raw)?)
}

/// Looks a variable up in the process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
