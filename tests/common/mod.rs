// tests/common/mod.rs
//! An in-memory Notion workspace for driving the collectors without HTTP.

#![allow(dead_code)]

use notion_standup::{AppError, DatabaseQuery, NotionId, NotionRepository, PaginatedResponse};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Canned responses keyed by cursor position, plus a log of every request.
#[derive(Default)]
pub struct InMemoryNotion {
    query_batches: Vec<PaginatedResponse<Value>>,
    failing_query_batch: Option<usize>,
    children: HashMap<String, Vec<PaginatedResponse<Value>>>,
    failing_children: HashSet<String>,
    pages: HashMap<String, Value>,
    pub requests: Mutex<Vec<String>>,
}

impl InMemoryNotion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits `pages` into query batches of `batch_size`, chained by cursor.
    pub fn with_done_pages(mut self, pages: Vec<Value>, batch_size: usize) -> Self {
        let chunks: Vec<Vec<Value>> = pages.chunks(batch_size).map(<[Value]>::to_vec).collect();
        let count = chunks.len();
        self.query_batches = chunks
            .into_iter()
            .enumerate()
            .map(|(index, chunk)| {
                if index + 1 < count {
                    PaginatedResponse::with_more(chunk, format!("{}", index + 1))
                } else {
                    PaginatedResponse::last(chunk)
                }
            })
            .collect();
        if self.query_batches.is_empty() {
            self.query_batches.push(PaginatedResponse::last(Vec::new()));
        }
        self
    }

    /// Makes the query batch at `index` (0-based) fail.
    pub fn failing_query_batch(mut self, index: usize) -> Self {
        self.failing_query_batch = Some(index);
        self
    }

    /// Gives `parent` the `blocks` as its children, in one batch.
    pub fn with_children(self, parent: &str, blocks: Vec<Value>) -> Self {
        self.with_child_batches(parent, vec![blocks])
    }

    /// Gives `parent` its children split over several cursor batches.
    pub fn with_child_batches(mut self, parent: &str, batches: Vec<Vec<Value>>) -> Self {
        let count = batches.len();
        let responses = batches
            .into_iter()
            .enumerate()
            .map(|(index, blocks)| {
                if index + 1 < count {
                    PaginatedResponse::with_more(blocks, format!("{}", index + 1))
                } else {
                    PaginatedResponse::last(blocks)
                }
            })
            .collect();
        self.children.insert(parent.to_string(), responses);
        self
    }

    /// Makes every children request for `parent` fail.
    pub fn failing_children(mut self, parent: &str) -> Self {
        self.failing_children.insert(parent.to_string());
        self
    }

    pub fn with_page(mut self, id: &str, page: Value) -> Self {
        self.pages.insert(id.to_string(), page);
        self
    }

    pub fn request_log(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, request: String) {
        self.requests.lock().unwrap().push(request);
    }
}

fn batch_index(cursor: Option<&str>) -> usize {
    cursor.and_then(|c| c.parse().ok()).unwrap_or(0)
}

fn service_unavailable(what: String) -> AppError {
    AppError::MalformedResponse(format!("simulated failure: {}", what))
}

#[async_trait::async_trait]
impl NotionRepository for InMemoryNotion {
    async fn query_database(
        &self,
        database: &NotionId,
        _query: &DatabaseQuery,
        cursor: Option<&str>,
    ) -> Result<PaginatedResponse<Value>, AppError> {
        let index = batch_index(cursor);
        self.record(format!("query {} #{}", database, index));

        if self.failing_query_batch == Some(index) {
            return Err(service_unavailable(format!("query batch {}", index)));
        }
        self.query_batches
            .get(index)
            .cloned()
            .ok_or_else(|| service_unavailable(format!("no query batch {}", index)))
    }

    async fn list_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
    ) -> Result<PaginatedResponse<Value>, AppError> {
        let index = batch_index(cursor);
        self.record(format!("children {} #{}", block_id, index));

        if self.failing_children.contains(block_id) {
            return Err(service_unavailable(format!("children of {}", block_id)));
        }
        match self.children.get(block_id) {
            Some(batches) => batches
                .get(index)
                .cloned()
                .ok_or_else(|| service_unavailable(format!("no batch {} for {}", index, block_id))),
            None => Ok(PaginatedResponse::last(Vec::new())),
        }
    }

    async fn retrieve_page(&self, id: &NotionId) -> Result<Value, AppError> {
        self.record(format!("page {}", id));
        self.pages
            .get(&id.to_hyphenated())
            .cloned()
            .ok_or_else(|| service_unavailable(format!("page {}", id)))
    }
}

/// A done task page with the given title and project (`None` = unset).
pub fn done_page(id: &str, title: &str, project: Option<&str>) -> Value {
    let select = match project {
        Some(name) => serde_json::json!({"id": "opt", "name": name, "color": "blue"}),
        None => Value::Null,
    };
    serde_json::json!({
        "object": "page",
        "id": id,
        "url": format!("https://www.notion.so/{}", id.replace('-', "")),
        "created_time": "2024-05-01T09:00:00.000Z",
        "last_edited_time": "2024-05-02T17:30:00.000Z",
        "archived": false,
        "properties": {
            "Name": {"id": "title", "type": "title", "title": [{"type": "text", "plain_text": title}]},
            "Project": {"id": "proj", "type": "select", "select": select},
            "Status": {"id": "stat", "type": "status", "status": {"name": "Done"}}
        }
    })
}

/// A block of `kind` whose text is `text`.
pub fn block(id: &str, kind: &str, text: &str, has_children: bool) -> Value {
    let mut data = serde_json::json!({"rich_text": [{"type": "text", "plain_text": text}]});
    if kind == "to_do" {
        data["checked"] = Value::Bool(true);
    }
    let mut raw = serde_json::json!({
        "object": "block",
        "id": id,
        "type": kind,
        "has_children": has_children,
        "created_time": "2024-05-01T09:00:00.000Z",
        "last_edited_time": "2024-05-01T09:05:00.000Z"
    });
    raw[kind] = data;
    raw
}

pub fn database_id() -> NotionId {
    NotionId::parse("0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a").unwrap()
}
