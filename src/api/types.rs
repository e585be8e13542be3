// src/api/types.rs
//! Type definitions for the Notion API module.
//!
//! Raw pages and blocks stay untyped JSON: the extractor decides what it
//! needs from them, and unknown shapes must pass through unharmed.

use crate::constants::{DONE_STATUS, LAST_EDITED_TIMESTAMP, STATUS_PROPERTY};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A page object exactly as returned by the database query endpoint.
pub type RawPage = Value;

/// A block object exactly as returned by the block children endpoint.
pub type RawBlock = Value;

/// One batch of a cursor-paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default)]
    pub object: String,
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    /// A final batch with no continuation.
    pub fn last(results: Vec<T>) -> Self {
        Self {
            object: "list".to_string(),
            results,
            next_cursor: None,
            has_more: false,
        }
    }

    /// A batch that continues at `cursor`.
    pub fn with_more(results: Vec<T>, cursor: impl Into<String>) -> Self {
        Self {
            object: "list".to_string(),
            results,
            next_cursor: Some(cursor.into()),
            has_more: true,
        }
    }
}

/// Everything gathered by walking a cursor chain to its end.
#[derive(Debug, Clone)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub batches_fetched: u32,
}

/// Matches pages whose status property equals a given value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusFilter {
    pub property: String,
    pub status: StatusCondition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCondition {
    pub equals: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Descending,
}

/// Orders results by one of the page's built-in timestamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimestampSort {
    pub timestamp: String,
    pub direction: SortDirection,
}

/// The filter and sort sent with every database query request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatabaseQuery {
    pub filter: StatusFilter,
    pub sorts: Vec<TimestampSort>,
}

impl DatabaseQuery {
    /// Tasks whose status equals `status`, most recently edited first.
    pub fn with_status(status: impl Into<String>) -> Self {
        Self {
            filter: StatusFilter {
                property: STATUS_PROPERTY.to_string(),
                status: StatusCondition {
                    equals: status.into(),
                },
            },
            sorts: vec![TimestampSort {
                timestamp: LAST_EDITED_TIMESTAMP.to_string(),
                direction: SortDirection::Descending,
            }],
        }
    }

    /// The request body for one batch, continuing at `cursor` when given.
    pub fn request_body<'a>(
        &'a self,
        page_size: usize,
        cursor: Option<&'a str>,
    ) -> QueryRequest<'a> {
        QueryRequest {
            query: self,
            page_size,
            start_cursor: cursor,
        }
    }
}

impl Default for DatabaseQuery {
    fn default() -> Self {
        Self::with_status(DONE_STATUS)
    }
}

/// Wire body of `POST databases/{id}/query`.
#[derive(Debug, Serialize)]
pub struct QueryRequest<'a> {
    #[serde(flatten)]
    pub query: &'a DatabaseQuery,
    pub page_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<&'a str>,
}
