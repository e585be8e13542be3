// src/lib.rs
//! notion-standup library: collects done work items from a Notion task
//! database into a per-project standup digest.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `StandupConfig`
//! - **Domain model**: `Block`, `BlockKind`, `StandupEntry`, `PageDetails`
//! - **API client**: `NotionRepository`, `NotionHttpClient`, `PageQuery`, `BlockTreeFlattener`
//! - **Extraction**: `extract_content`, `extract_done_list_item`, `summarize_page`
//! - **Prompt & output**: `StandupPromptComposer`, `OutputPlan`, `deliver`

pub mod analytics;
pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod formatting;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod standup;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, PromptArgs, StandupConfig};

// --- Domain Model ---
pub use crate::model::{
    Block, BlockKind, DetailsReport, PageDetails, PageSummary, PropertyValue, ReportMetadata,
    StandupEntry,
};

// --- Domain Types ---
pub use crate::types::{ApiKey, NotionId, RenderedPrompt, Warning, WarningLevel};

// --- API Client ---
pub use crate::api::{
    BlockTreeFlattener, DatabaseQuery, FlattenReport, FlattenedTree, NotionHttpClient,
    NotionRepository, PageQuery, PaginatedResponse,
};

// --- Extraction ---
pub use crate::extract::{
    collect_work_items, extract_content, extract_done_list_item, extract_page_details,
    summarize_page,
};

// --- Collection ---
pub use crate::standup::{page_details, DetailsDigest, StandupCollector, StandupDigest};

// --- Prompt & Output ---
pub use crate::formatting::{format_standup_data, load_standups, StandupPromptComposer};
pub use crate::output::{deliver, deliver_all, DeliveryTarget, OutputPlan, OutputReport};

// --- Pipeline Traits ---
pub use crate::pipeline::{PromptComposer, PromptDelivery, StandupSource};
