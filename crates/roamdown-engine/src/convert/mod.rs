//! The block-tree dispatcher: classifies each node once (table root vs.
//! plain content), routes table subtrees and plain text through the right
//! converter, and recurses depth-first preserving sibling order.
//!
//! Nothing here errors on malformed input; ragged tables pad, unbalanced
//! markers stay verbatim. Correctness is "never lose or corrupt data", not
//! "reject bad input".

pub mod cache;
pub mod emphasis;
pub mod table;
pub mod tasks;

use crate::models::outline::OutlineNode;
use crate::parsing;

pub use cache::EmphasisCache;
pub use table::{TABLE_MARKER, flat_table_to_outline, is_table_root, outline_table_to_flat};

/// Which dialect the output should be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Source (Roam-style outline) markers to standard markdown markers.
    ToStandard,
    /// Standard markdown markers back to source markers.
    ToSource,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::ToStandard => Direction::ToSource,
            Direction::ToSource => Direction::ToStandard,
        }
    }
}

/// Node shape, decided once before recursion so the dispatch is exhaustive.
enum Shape<'a> {
    Table(&'a OutlineNode),
    Plain(&'a OutlineNode),
}

fn classify(node: &OutlineNode) -> Shape<'_> {
    if is_table_root(node) {
        Shape::Table(node)
    } else {
        Shape::Plain(node)
    }
}

type EmphasisFn<'a> = &'a dyn Fn(&str, Direction) -> String;

/// Converts a whole subtree into the target dialect.
pub fn convert_tree(node: &OutlineNode, direction: Direction) -> OutlineNode {
    convert_node(node, direction, &emphasis::convert_markers)
}

/// Converts sibling trees in order; each element is independent.
pub fn convert_forest(nodes: &[OutlineNode], direction: Direction) -> Vec<OutlineNode> {
    nodes
        .iter()
        .map(|node| convert_tree(node, direction))
        .collect()
}

/// Full text-to-text conversion: parse in the input dialect, convert the
/// tree, serialize in the target dialect.
pub fn convert_text(text: &str, direction: Direction) -> String {
    match direction {
        Direction::ToStandard => {
            let forest = parsing::parse_outline(text);
            parsing::serialize_markdown(&convert_forest(&forest, direction))
        }
        Direction::ToSource => {
            let forest = parsing::parse_markdown(text);
            parsing::serialize_outline(&convert_forest(&forest, direction))
        }
    }
}

fn convert_node(node: &OutlineNode, direction: Direction, emph: EmphasisFn<'_>) -> OutlineNode {
    match classify(node) {
        Shape::Table(root) => convert_table_subtree(root, direction, emph),
        Shape::Plain(plain) => {
            let text = tasks::convert_task_marker(&plain.text, direction);
            OutlineNode::with_children(
                emph(&text, direction),
                plain
                    .children
                    .iter()
                    .map(|child| convert_node(child, direction, emph))
                    .collect(),
            )
        }
    }
}

/// Everything under a table root is cell text: emphasis-converted, but never
/// re-classified or task-rewritten. This keeps the dispatcher from recursing
/// into a table's column/row structure as if it were ordinary bullets.
fn convert_table_subtree(
    root: &OutlineNode,
    direction: Direction,
    emph: EmphasisFn<'_>,
) -> OutlineNode {
    fn map_cell(node: &OutlineNode, direction: Direction, emph: EmphasisFn<'_>) -> OutlineNode {
        OutlineNode::with_children(
            emph(&node.text, direction),
            node.children
                .iter()
                .map(|child| map_cell(child, direction, emph))
                .collect(),
        )
    }

    OutlineNode::with_children(
        TABLE_MARKER,
        root.children
            .iter()
            .map(|cell| map_cell(cell, direction, emph))
            .collect(),
    )
}

/// A converter with an injectable, size-bounded memoization cache for the
/// inline marker transform. Purely an optimization: results are identical to
/// the free functions, repeated texts just skip the rescan.
#[derive(Debug, Default)]
pub struct Converter {
    cache: EmphasisCache,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache_capacity(capacity: usize) -> Self {
        Self {
            cache: EmphasisCache::new(capacity),
        }
    }

    pub fn convert_tree(&self, node: &OutlineNode, direction: Direction) -> OutlineNode {
        convert_node(node, direction, &|text, dir| {
            self.cache
                .get_or_insert_with(dir, text, || emphasis::convert_markers(text, dir))
        })
    }

    pub fn convert_forest(&self, nodes: &[OutlineNode], direction: Direction) -> Vec<OutlineNode> {
        nodes
            .iter()
            .map(|node| self.convert_tree(node, direction))
            .collect()
    }

    pub fn convert_text(&self, text: &str, direction: Direction) -> String {
        match direction {
            Direction::ToStandard => {
                let forest = parsing::parse_outline(text);
                parsing::serialize_markdown(&self.convert_forest(&forest, direction))
            }
            Direction::ToSource => {
                let forest = parsing::parse_markdown(text);
                parsing::serialize_outline(&self.convert_forest(&forest, direction))
            }
        }
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn node(text: &str, children: Vec<OutlineNode>) -> OutlineNode {
        OutlineNode::with_children(text, children)
    }

    #[test]
    fn sibling_order_and_depth_are_preserved() {
        let root = node(
            "root",
            vec![
                node("A", vec![node("A1", vec![]), node("A2", vec![])]),
                node("B", vec![]),
                node("C", vec![node("C1", vec![])]),
            ],
        );

        let converted = convert_tree(&root, Direction::ToStandard);
        let order: Vec<_> = converted.children.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(order, vec!["A", "B", "C"]);
        assert_eq!(converted.children[0].children.len(), 2);
        assert_eq!(converted.children[2].children[0].text, "C1");
    }

    #[test]
    fn plain_text_is_emphasis_converted_at_every_level() {
        let root = node(
            "^^top^^",
            vec![node("__deep__", vec![node("^^deeper^^", vec![])])],
        );
        let converted = convert_tree(&root, Direction::ToStandard);
        assert_eq!(converted.text, "==top==");
        assert_eq!(converted.children[0].text, "*deep*");
        assert_eq!(converted.children[0].children[0].text, "==deeper==");
    }

    #[test]
    fn table_cells_are_emphasis_converted_but_not_reclassified() {
        let root = node(
            TABLE_MARKER,
            vec![
                node("^^Name^^", vec![node("__ada__", vec![])]),
                node("Role", vec![node("[] not a task", vec![])]),
            ],
        );

        let converted = convert_tree(&root, Direction::ToStandard);
        assert_eq!(converted.text, TABLE_MARKER);
        assert_eq!(converted.children[0].text, "==Name==");
        assert_eq!(converted.children[0].children[0].text, "*ada*");
        // Cell text is never task-rewritten.
        assert_eq!(converted.children[1].children[0].text, "[] not a task");
    }

    #[test]
    fn prose_mentioning_the_marker_is_plain_content() {
        let root = node("see {{[[table]]}} for details ^^here^^", vec![]);
        let converted = convert_tree(&root, Direction::ToStandard);
        assert_eq!(converted.text, "see {{[[table]]}} for details ==here==");
        assert!(converted.children.is_empty());
    }

    #[test]
    fn task_markers_convert_on_plain_nodes() {
        let root = node("{{[[TODO]]}} write ^^tests^^", vec![]);
        let converted = convert_tree(&root, Direction::ToStandard);
        assert_eq!(converted.text, "[] write ==tests==");
    }

    #[test]
    fn converter_with_cache_matches_free_function() {
        let converter = Converter::with_cache_capacity(16);
        let root = node("^^same^^", vec![node("^^same^^", vec![])]);

        let cached = converter.convert_tree(&root, Direction::ToStandard);
        let plain = convert_tree(&root, Direction::ToStandard);
        assert_eq!(cached, plain);
        // Two identical texts, one cache entry.
        assert_eq!(converter.cache_len(), 1);

        converter.clear_cache();
        assert_eq!(converter.cache_len(), 0);
    }
}
