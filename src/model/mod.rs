//! The records the standup pipeline produces.
//!
//! Raw Notion objects stay `serde_json::Value` until the extractor turns
//! them into one of these. Two read-only views are built over the same
//! flattened [`Block`] sequence: [`StandupEntry`] for the digest and
//! [`PageDetails`] for the full-fidelity report.

mod block;
mod property_value;

pub use block::{Block, BlockKind};
pub use property_value::PropertyValue;

use crate::constants::UNKNOWN_PROJECT;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The identity of a done task: its page id, title and project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub id: String,
    pub title: String,
    pub project_name: String,
}

/// One done task with its work items, ready for summarization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandupEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "unknown_project")]
    pub project_name: String,
    #[serde(default)]
    pub contents: Vec<String>,
}

fn unknown_project() -> String {
    UNKNOWN_PROJECT.to_string()
}

impl StandupEntry {
    pub fn new(summary: PageSummary, contents: Vec<String>) -> Self {
        Self {
            id: summary.id,
            title: summary.title,
            project_name: summary.project_name,
            contents,
        }
    }
}

/// Everything known about a page: metadata, simplified properties and
/// every block that carries text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDetails {
    pub id: String,
    pub url: Option<String>,
    pub created_time: Option<String>,
    pub last_edited_time: Option<String>,
    pub archived: bool,
    pub properties: IndexMap<String, PropertyValue>,
    pub content: Vec<Block>,
}

/// Header of the raw extraction report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub timestamp: String,
    pub total_pages: usize,
    pub database_id: String,
}

/// The raw extraction artifact: every done page in full detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailsReport {
    pub metadata: ReportMetadata,
    pub pages: Vec<PageDetails>,
}
