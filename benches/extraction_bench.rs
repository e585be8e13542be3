// benches/extraction_bench.rs
//! Benchmarks for block extraction and tree flattening.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use notion_standup::{
    collect_work_items, extract_content, AppError, BlockTreeFlattener, DatabaseQuery, NotionId,
    NotionRepository, PaginatedResponse,
};
use serde_json::{json, Value};
use std::collections::HashMap;

const KINDS: [&str; 6] = [
    "paragraph",
    "to_do",
    "bulleted_list_item",
    "code",
    "callout",
    "synced_block",
];

fn raw_block(id: &str, index: usize, has_children: bool) -> Value {
    let kind = KINDS[index % KINDS.len()];
    let mut raw = json!({
        "object": "block",
        "id": id,
        "type": kind,
        "has_children": has_children,
    });
    raw[kind] = json!({
        "rich_text": [
            {"plain_text": format!("Work item {} ", index)},
            {"plain_text": "with a second run of text"}
        ],
        "checked": index % 2 == 0,
        "language": "rust"
    });
    raw
}

/// A complete tree of the given breadth and depth, served from memory.
struct SyntheticTree {
    children: HashMap<String, Vec<Value>>,
}

impl SyntheticTree {
    fn new(breadth: usize, depth: usize) -> Self {
        let mut children = HashMap::new();
        let mut frontier = vec!["root".to_string()];
        for level in 0..depth {
            let mut next = Vec::new();
            for parent in &frontier {
                let blocks: Vec<Value> = (0..breadth)
                    .map(|i| {
                        let id = format!("{}-{}", parent, i);
                        next.push(id.clone());
                        raw_block(&id, i, level + 1 < depth)
                    })
                    .collect();
                children.insert(parent.clone(), blocks);
            }
            frontier = next;
        }
        Self { children }
    }
}

#[async_trait::async_trait]
impl NotionRepository for SyntheticTree {
    async fn query_database(
        &self,
        _database: &NotionId,
        _query: &DatabaseQuery,
        _cursor: Option<&str>,
    ) -> Result<PaginatedResponse<Value>, AppError> {
        Ok(PaginatedResponse::last(Vec::new()))
    }

    async fn list_children(
        &self,
        block_id: &str,
        _cursor: Option<&str>,
    ) -> Result<PaginatedResponse<Value>, AppError> {
        Ok(PaginatedResponse::last(
            self.children.get(block_id).cloned().unwrap_or_default(),
        ))
    }

    async fn retrieve_page(&self, id: &NotionId) -> Result<Value, AppError> {
        Err(AppError::MalformedResponse(format!("no page {}", id)))
    }
}

fn bench_extract_content(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_content");

    for size in [10, 100, 1000] {
        let blocks: Vec<Value> = (0..size)
            .map(|i| raw_block(&format!("b{}", i), i, false))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &blocks, |b, blocks| {
            b.iter(|| {
                let extracted: Vec<_> = blocks.iter().map(extract_content).collect();
                black_box(collect_work_items(&extracted))
            });
        });
    }

    group.finish();
}

fn bench_flatten(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let mut group = c.benchmark_group("flatten");

    for (breadth, depth) in [(10, 2), (5, 4), (3, 6)] {
        let tree = SyntheticTree::new(breadth, depth);
        group.bench_with_input(
            BenchmarkId::new("tree", format!("{}x{}", breadth, depth)),
            &tree,
            |b, tree| {
                b.iter(|| {
                    runtime.block_on(async {
                        let flattened = BlockTreeFlattener::new(tree, 50).flatten("root").await;
                        black_box(flattened.blocks.len())
                    })
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_extract_content, bench_flatten);
criterion_main!(benches);
