// src/api/flatten.rs
//! Recursive flattening of a page's block tree into pre-order.
//!
//! Children are fetched one cursor batch at a time. Each block is emitted
//! before its own sub-tree, and a sub-tree is fully expanded before the
//! next sibling is looked at. A failed children fetch never escapes: the
//! node is treated as childless from that point on and a [`Warning`] is
//! recorded.

use super::pagination::CursorChain;
use super::NotionRepository;
use crate::constants::NOTION_MAX_FETCH_DEPTH;
use crate::extract::extract_content;
use crate::model::Block;
use crate::types::{Warning, WarningLevel};
use futures::future::BoxFuture;

/// The flattened blocks of one page together with how the walk went.
#[derive(Debug, Clone, Default)]
pub struct FlattenedTree {
    pub blocks: Vec<Block>,
    pub report: FlattenReport,
}

/// Bookkeeping for a single flatten run.
#[derive(Debug, Clone, Default)]
pub struct FlattenReport {
    pub warnings: Vec<Warning>,
    /// Children requests issued, failed ones included.
    pub requests: u32,
}

impl FlattenReport {
    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Where the walk currently is: the ids above the node being listed and
/// how deep that node's children sit.
#[derive(Debug, Clone)]
struct TraversalContext {
    ancestors: im::HashSet<String>,
    depth: u8,
}

/// What to do with a block that reports children.
enum Descent {
    Expand(TraversalContext),
    DepthExceeded,
    Cycle,
}

impl TraversalContext {
    fn root(root_id: &str) -> Self {
        Self {
            ancestors: im::HashSet::unit(root_id.to_string()),
            depth: 0,
        }
    }

    fn descend(&self, block_id: &str, max_depth: u8) -> Descent {
        if self.ancestors.contains(block_id) {
            return Descent::Cycle;
        }
        if self.depth >= max_depth {
            return Descent::DepthExceeded;
        }
        Descent::Expand(Self {
            ancestors: self.ancestors.update(block_id.to_string()),
            depth: self.depth + 1,
        })
    }
}

/// Walks block trees through a [`NotionRepository`], sequentially.
pub struct BlockTreeFlattener<'a> {
    client: &'a dyn NotionRepository,
    max_depth: u8,
}

impl<'a> BlockTreeFlattener<'a> {
    /// Creates a flattener that expands at most `max_depth` levels below
    /// the top-level blocks. Depths above the safe ceiling are clamped.
    pub fn new(client: &'a dyn NotionRepository, max_depth: u8) -> Self {
        let safe_depth = max_depth.min(NOTION_MAX_FETCH_DEPTH);
        if max_depth > safe_depth {
            log::warn!(
                "Requested recursion depth {} exceeds maximum safe depth {}. Clamping to safe value.",
                max_depth,
                safe_depth
            );
        }

        Self {
            client,
            max_depth: safe_depth,
        }
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// Flattens everything below `root_id` (a page or block id).
    ///
    /// Never fails. If even the root's children cannot be listed the tree
    /// is empty and the report says why.
    pub async fn flatten(&self, root_id: &str) -> FlattenedTree {
        let mut tree = FlattenedTree::default();
        self.expand(root_id.to_string(), TraversalContext::root(root_id), &mut tree)
            .await;

        log::debug!(
            "Flattened {} blocks under {} with {} requests",
            tree.blocks.len(),
            root_id,
            tree.report.requests
        );
        tree
    }

    fn expand<'s>(
        &'s self,
        node_id: String,
        context: TraversalContext,
        tree: &'s mut FlattenedTree,
    ) -> BoxFuture<'s, ()> {
        Box::pin(async move {
            let mut chain = CursorChain::new();

            while !chain.is_exhausted() {
                tree.report.requests += 1;
                let response = match self.client.list_children(&node_id, chain.cursor()).await {
                    Ok(response) => response,
                    Err(e) => {
                        log::warn!("Failed to fetch children of block {}: {}", node_id, e);
                        tree.report.warnings.push(
                            Warning::new(
                                WarningLevel::Warning,
                                format!("children could not be fetched: {}", e),
                            )
                            .with_context(node_id.clone()),
                        );
                        return;
                    }
                };

                for raw in chain.advance(response) {
                    let block = extract_content(&raw);
                    let child_id = block.id.clone();
                    let has_children = block.has_children;
                    tree.blocks.push(block);

                    if !has_children {
                        continue;
                    }

                    match context.descend(&child_id, self.max_depth) {
                        Descent::Expand(child_context) => {
                            self.expand(child_id, child_context, tree).await;
                        }
                        Descent::DepthExceeded => {
                            log::warn!(
                                "Not expanding block {}: depth limit {} reached",
                                child_id,
                                self.max_depth
                            );
                            tree.report.warnings.push(
                                Warning::new(
                                    WarningLevel::Info,
                                    format!("depth limit {} reached", self.max_depth),
                                )
                                .with_context(child_id),
                            );
                        }
                        Descent::Cycle => {
                            log::warn!("Not expanding block {}: already an ancestor", child_id);
                            tree.report.warnings.push(
                                Warning::new(WarningLevel::Warning, "block is its own ancestor")
                                    .with_context(child_id),
                            );
                        }
                    }
                }
            }
        })
    }
}
