// src/api/pagination.rs
//! Cursor-chain pagination over Notion list endpoints.

use super::types::{PaginatedResponse, PaginationResult};
use crate::error::AppError;
use std::future::Future;

/// Tracks where a cursor chain stands between batches.
///
/// The chain is exhausted once a batch reports `has_more: false` or comes
/// back without a `next_cursor`, whichever happens first.
#[derive(Debug, Clone, Default)]
pub struct CursorChain {
    cursor: Option<String>,
    exhausted: bool,
    batches: u32,
}

impl CursorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cursor to send with the next request; `None` for the first batch.
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn batches(&self) -> u32 {
        self.batches
    }

    /// Records a received batch and hands back its results.
    pub fn advance<T>(&mut self, response: PaginatedResponse<T>) -> Vec<T> {
        self.batches += 1;
        self.exhausted = !response.has_more || response.next_cursor.is_none();
        self.cursor = if self.exhausted {
            None
        } else {
            response.next_cursor
        };
        response.results
    }
}

/// Walks a cursor chain to its end, concatenating every batch in order.
///
/// Any failed batch aborts the walk: earlier batches are discarded and the
/// error is returned as-is.
pub async fn fetch_all_pages<T, F, Fut>(mut fetch_fn: F) -> Result<PaginationResult<T>, AppError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<PaginatedResponse<T>, AppError>>,
{
    let mut chain = CursorChain::new();
    let mut items = Vec::new();

    while !chain.is_exhausted() {
        let response = fetch_fn(chain.cursor().map(str::to_string)).await?;
        let batch = chain.advance(response);
        log::info!(
            "Fetched {} pages (total: {})",
            batch.len(),
            items.len() + batch.len()
        );
        items.extend(batch);
    }

    Ok(PaginationResult {
        items,
        batches_fetched: chain.batches(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;

    #[test]
    fn test_chain_stops_when_cursor_missing_despite_has_more() {
        let mut chain = CursorChain::new();
        let results = chain.advance(PaginatedResponse {
            object: "list".to_string(),
            results: vec![1, 2],
            next_cursor: None,
            has_more: true,
        });
        assert_eq!(results, vec![1, 2]);
        assert!(chain.is_exhausted());
        assert_eq!(chain.cursor(), None);
    }

    #[tokio::test]
    async fn test_batches_are_concatenated_in_order() {
        let mut batches = VecDeque::from(vec![
            PaginatedResponse::with_more(vec!["a", "b"], "c1"),
            PaginatedResponse::with_more(vec!["c"], "c2"),
            PaginatedResponse::last(vec!["d"]),
        ]);
        let mut seen_cursors = Vec::new();

        let result = fetch_all_pages(|cursor| {
            seen_cursors.push(cursor);
            let next = batches.pop_front();
            async move { next.ok_or_else(|| AppError::MalformedResponse("drained".into())) }
        })
        .await
        .unwrap();

        assert_eq!(result.items, vec!["a", "b", "c", "d"]);
        assert_eq!(result.batches_fetched, 3);
        assert_eq!(
            seen_cursors,
            vec![None, Some("c1".to_string()), Some("c2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_failed_batch_discards_everything() {
        let mut calls = 0;
        let result: Result<PaginationResult<&str>, _> = fetch_all_pages(|_| {
            calls += 1;
            let call = calls;
            async move {
                if call == 1 {
                    Ok(PaginatedResponse::with_more(vec!["a"], "c1"))
                } else {
                    Err(AppError::MalformedResponse("boom".into()))
                }
            }
        })
        .await;

        assert!(matches!(result, Err(AppError::MalformedResponse(_))));
    }
}
