// src/api/mod.rs
//! Notion API interaction: querying the task database and walking block trees.
//!
//! Business logic depends on [`NotionRepository`], never on HTTP details.
//! Pagination, flattening and the database query are written against the
//! trait so tests can drive them from memory.

pub mod client;
mod flatten;
mod pagination;
pub mod parser;
mod query;
mod types;

use crate::error::AppError;
use crate::types::NotionId;

/// The ability to read a task database and its pages' content.
///
/// Each method issues exactly one request; cursor chains are walked by the
/// callers.
#[async_trait::async_trait]
pub trait NotionRepository: Send + Sync {
    /// One batch of the database query, continuing at `cursor` when given.
    async fn query_database(
        &self,
        database: &NotionId,
        query: &DatabaseQuery,
        cursor: Option<&str>,
    ) -> Result<PaginatedResponse<RawPage>, AppError>;

    /// One batch of a block's (or page's) direct children.
    async fn list_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
    ) -> Result<PaginatedResponse<RawBlock>, AppError>;

    async fn retrieve_page(&self, id: &NotionId) -> Result<RawPage, AppError>;
}

pub use client::{ApiResponse, NotionHttpClient};
pub use flatten::{BlockTreeFlattener, FlattenReport, FlattenedTree};
pub use pagination::{fetch_all_pages, CursorChain};
pub use query::PageQuery;
pub use types::{
    DatabaseQuery, PaginatedResponse, PaginationResult, QueryRequest, RawBlock, RawPage,
    SortDirection, StatusCondition, StatusFilter, TimestampSort,
};
