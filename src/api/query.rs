// src/api/query.rs
//! Retrieval of every page in a database that matches the done filter.

use super::pagination::fetch_all_pages;
use super::types::{DatabaseQuery, RawPage};
use super::NotionRepository;
use crate::error::AppError;
use crate::types::NotionId;

/// A filtered, sorted query against one task database.
pub struct PageQuery<'a> {
    client: &'a dyn NotionRepository,
    database: &'a NotionId,
    query: DatabaseQuery,
}

impl<'a> PageQuery<'a> {
    /// Pages with status "Done", most recently edited first.
    pub fn done_pages(client: &'a dyn NotionRepository, database: &'a NotionId) -> Self {
        Self::new(client, database, DatabaseQuery::default())
    }

    pub fn new(
        client: &'a dyn NotionRepository,
        database: &'a NotionId,
        query: DatabaseQuery,
    ) -> Self {
        Self {
            client,
            database,
            query,
        }
    }

    /// Fetches the whole result set, following cursors until exhausted.
    ///
    /// Pages come back in the order the API returned them, batch after
    /// batch. A failure on any batch fails the whole query.
    pub async fn fetch_done_pages(&self) -> Result<Vec<RawPage>, AppError> {
        let result = fetch_all_pages(|cursor| async move {
            self.client
                .query_database(self.database, &self.query, cursor.as_deref())
                .await
        })
        .await;

        let result = match result {
            Ok(result) => result,
            Err(e) => {
                log::error!("Query of database {} failed: {}", self.database, e);
                return Err(e);
            }
        };

        log::info!(
            "Fetched {} done pages in {} batches",
            result.items.len(),
            result.batches_fetched
        );
        Ok(result.items)
    }
}
