use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::outline::OutlineNode;

/// Depth ceiling applied when accepting serialized block trees.
///
/// In-memory trees cannot cycle (children are owned), but serialized input is
/// untrusted; anything deeper than this is rejected at construction rather
/// than recursed into.
pub const MAX_BLOCK_DEPTH: usize = 512;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("block tree too deep at {path}: depth {depth} exceeds {MAX_BLOCK_DEPTH}")]
    TooDeep { path: String, depth: usize },
}

/// JSON ingestion schema for a whole page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub page_text: String,
    #[serde(default)]
    pub page_blocks: Vec<Block>,
}

/// One block of a serialized page: text plus nested children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub block_text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub block_children: Vec<Block>,
}

impl Page {
    pub fn new(page_text: impl Into<String>, page_blocks: Vec<Block>) -> Self {
        Self {
            page_text: page_text.into(),
            page_blocks,
        }
    }

    /// Converts the page's blocks into an outline forest.
    ///
    /// Depth is validated up front (with the offending block's path) so the
    /// recursive conversion below runs only on trees of accepted depth.
    pub fn into_outline(self) -> Result<Vec<OutlineNode>, PageError> {
        check_depth(&self.page_blocks, "page_blocks")?;
        Ok(self.page_blocks.into_iter().map(Block::into_outline).collect())
    }

    pub fn from_outline(page_text: impl Into<String>, nodes: &[OutlineNode]) -> Self {
        Self {
            page_text: page_text.into(),
            page_blocks: nodes.iter().map(Block::from_outline).collect(),
        }
    }
}

impl Block {
    pub fn into_outline(self) -> OutlineNode {
        OutlineNode::with_children(
            self.block_text,
            self.block_children
                .into_iter()
                .map(Block::into_outline)
                .collect(),
        )
    }

    pub fn from_outline(node: &OutlineNode) -> Self {
        Self {
            block_text: node.text.clone(),
            block_children: node.children.iter().map(Block::from_outline).collect(),
        }
    }
}

/// Iterative depth check over a serialized block forest.
fn check_depth(blocks: &[Block], root_path: &str) -> Result<(), PageError> {
    let mut stack: Vec<(&Block, String, usize)> = blocks
        .iter()
        .enumerate()
        .map(|(i, b)| (b, format!("{root_path}[{i}]"), 1))
        .collect();

    while let Some((block, path, depth)) = stack.pop() {
        if depth > MAX_BLOCK_DEPTH {
            return Err(PageError::TooDeep { path, depth });
        }
        for (i, child) in block.block_children.iter().enumerate() {
            stack.push((child, format!("{path}.block_children[{i}]"), depth + 1));
        }
    }
    Ok(())
}
