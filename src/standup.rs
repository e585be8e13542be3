// src/standup.rs
//! Collection of done tasks into standup entries and detail reports.
//!
//! The page query is fatal on failure; everything below a page degrades.
//! Both views are built from the same flattened block sequence, so a page
//! is only walked once per run.

use crate::api::{BlockTreeFlattener, DatabaseQuery, FlattenedTree, NotionRepository, PageQuery, RawPage};
use crate::error::AppError;
use crate::extract::{collect_work_items, extract_page_details, page_id, summarize_page};
use crate::model::{DetailsReport, PageDetails, ReportMetadata, StandupEntry};
use crate::pipeline::StandupSource;
use crate::types::{NotionId, Warning};

/// `Processing page 2/5: <id> (<title>)`; the id matches warning contexts.
fn progress_line(position: usize, total: usize, id: &str, title: &str) -> String {
    if title.is_empty() {
        format!("Processing page {}/{}: {}", position, total, id)
    } else {
        format!("Processing page {}/{}: {} ({})", position, total, id, title)
    }
}

/// The standup entries of one run and whatever went wrong below the pages.
#[derive(Debug, Clone, Default)]
pub struct StandupDigest {
    pub entries: Vec<StandupEntry>,
    pub warnings: Vec<Warning>,
    /// Children requests issued across all pages.
    pub requests: u32,
}

/// The raw extraction report and the warnings gathered while building it.
#[derive(Debug, Clone)]
pub struct DetailsDigest {
    pub report: DetailsReport,
    pub warnings: Vec<Warning>,
}

/// Walks every done task of one database.
pub struct StandupCollector<'a> {
    client: &'a dyn NotionRepository,
    database: &'a NotionId,
    query: DatabaseQuery,
    max_depth: u8,
}

impl<'a> StandupCollector<'a> {
    pub fn new(client: &'a dyn NotionRepository, database: &'a NotionId, max_depth: u8) -> Self {
        Self {
            client,
            database,
            query: DatabaseQuery::default(),
            max_depth,
        }
    }

    /// Replaces the default done-status query.
    pub fn with_query(mut self, query: DatabaseQuery) -> Self {
        self.query = query;
        self
    }

    /// Builds one standup entry per done page, in query order.
    pub async fn collect_entries(&self) -> Result<StandupDigest, AppError> {
        let pages = self.fetch_pages().await?;
        let flattener = BlockTreeFlattener::new(self.client, self.max_depth);
        let mut digest = StandupDigest::default();

        for (index, raw) in pages.iter().enumerate() {
            let summary = summarize_page(raw);
            log::info!(
                "{}",
                progress_line(index + 1, pages.len(), &summary.id, &summary.title)
            );

            let tree = self.walk(&flattener, raw).await;
            digest.requests += tree.report.requests;
            digest.warnings.extend(tree.report.warnings);
            digest
                .entries
                .push(StandupEntry::new(summary, collect_work_items(&tree.blocks)));
        }

        Ok(digest)
    }

    /// Builds the full-detail report of every done page.
    ///
    /// `timestamp` is stamped into the report metadata as given.
    pub async fn collect_details(&self, timestamp: String) -> Result<DetailsDigest, AppError> {
        let pages = self.fetch_pages().await?;
        let flattener = BlockTreeFlattener::new(self.client, self.max_depth);
        let mut details = Vec::with_capacity(pages.len());
        let mut warnings = Vec::new();

        for (index, raw) in pages.iter().enumerate() {
            log::info!(
                "{}",
                progress_line(index + 1, pages.len(), &page_id(raw), "")
            );
            let tree = self.walk(&flattener, raw).await;
            warnings.extend(tree.report.warnings);
            details.push(extract_page_details(raw, &tree.blocks));
        }

        Ok(DetailsDigest {
            report: DetailsReport {
                metadata: ReportMetadata {
                    timestamp,
                    total_pages: details.len(),
                    database_id: self.database.to_hyphenated(),
                },
                pages: details,
            },
            warnings,
        })
    }

    async fn fetch_pages(&self) -> Result<Vec<RawPage>, AppError> {
        let pages = PageQuery::new(self.client, self.database, self.query.clone())
            .fetch_done_pages()
            .await?;
        log::info!("Found {} done pages", pages.len());
        Ok(pages)
    }

    async fn walk(&self, flattener: &BlockTreeFlattener<'_>, raw: &RawPage) -> FlattenedTree {
        let id = page_id(raw);
        if id.is_empty() {
            log::warn!("Skipping content of a page without an id");
            return FlattenedTree::default();
        }
        flattener.flatten(&id).await
    }
}

#[async_trait::async_trait]
impl StandupSource for StandupCollector<'_> {
    async fn collect(&self) -> Result<StandupDigest, AppError> {
        self.collect_entries().await
    }
}

/// Retrieves a single page and everything below it in full detail.
pub async fn page_details(
    client: &dyn NotionRepository,
    id: &NotionId,
    max_depth: u8,
) -> Result<(PageDetails, Vec<Warning>), AppError> {
    let raw = client.retrieve_page(id).await?;
    let tree = BlockTreeFlattener::new(client, max_depth)
        .flatten(&id.to_hyphenated())
        .await;
    Ok((extract_page_details(&raw, &tree.blocks), tree.report.warnings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_line_names_the_page_id() {
        assert_eq!(
            progress_line(2, 5, "9a8b7c6d-1111", "TP-41 Payment retries"),
            "Processing page 2/5: 9a8b7c6d-1111 (TP-41 Payment retries)"
        );
        assert_eq!(
            progress_line(1, 1, "9a8b7c6d-1111", ""),
            "Processing page 1/1: 9a8b7c6d-1111"
        );
    }
}
