//! Text ⇄ tree conversion for both dialects.
//!
//! Parsing is line-oriented and keeps node text raw — inline markers must
//! survive byte-for-byte so the emphasis converter (not the parser) decides
//! what they mean. Hierarchy is built iteratively with an explicit stack, so
//! input depth never grows the native call stack.

pub mod markdown;
pub mod outline;

pub use markdown::{parse_markdown, serialize_markdown};
pub use outline::{parse_outline, serialize_outline};

use crate::models::outline::OutlineNode;

/// Nests `(level, node)` items into a forest. An item becomes a child of the
/// nearest preceding item with a smaller level; sibling order is kept.
pub(crate) fn build_forest(items: Vec<(usize, OutlineNode)>) -> Vec<OutlineNode> {
    let mut roots = Vec::new();
    let mut stack: Vec<(usize, OutlineNode)> = Vec::new();

    for (level, node) in items {
        while stack.last().is_some_and(|(open_level, _)| *open_level >= level) {
            let (_, finished) = stack.pop().expect("stack checked non-empty");
            attach(&mut stack, &mut roots, finished);
        }
        stack.push((level, node));
    }
    while let Some((_, finished)) = stack.pop() {
        attach(&mut stack, &mut roots, finished);
    }
    roots
}

fn attach(stack: &mut Vec<(usize, OutlineNode)>, roots: &mut Vec<OutlineNode>, node: OutlineNode) {
    match stack.last_mut() {
        Some((_, parent)) => parent.children.push(node),
        None => roots.push(node),
    }
}

/// Splits a line into its indent level and remaining content. Tabs count one
/// level each; runs of spaces count one level per `space_width`.
pub(crate) fn measure_indent(line: &str, space_width: usize) -> (usize, &str) {
    let mut level = 0;
    let mut spaces = 0;
    let mut offset = 0;

    for c in line.chars() {
        match c {
            '\t' => level += 1,
            ' ' => {
                spaces += 1;
                if spaces == space_width {
                    level += 1;
                    spaces = 0;
                }
            }
            _ => break,
        }
        offset += c.len_utf8();
    }
    (level, &line[offset..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn build_forest_nests_by_level() {
        let items = vec![
            (0, OutlineNode::new("parent")),
            (1, OutlineNode::new("child")),
            (2, OutlineNode::new("grandchild")),
            (1, OutlineNode::new("second child")),
            (0, OutlineNode::new("sibling")),
        ];

        let forest = build_forest(items);
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].children.len(), 2);
        assert_eq!(forest[0].children[0].children[0].text, "grandchild");
        assert_eq!(forest[0].children[1].text, "second child");
        assert_eq!(forest[1].text, "sibling");
    }

    #[test]
    fn build_forest_tolerates_level_jumps() {
        // A child two levels deeper than its parent still attaches to it.
        let items = vec![(0, OutlineNode::new("a")), (3, OutlineNode::new("b"))];
        let forest = build_forest(items);
        assert_eq!(forest[0].children[0].text, "b");
    }

    #[test]
    fn measure_indent_counts_tabs_and_spaces() {
        assert_eq!(measure_indent("\t\t- x", 4), (2, "- x"));
        assert_eq!(measure_indent("    - x", 4), (1, "- x"));
        assert_eq!(measure_indent("  - x", 2), (1, "- x"));
        assert_eq!(measure_indent("- x", 4), (0, "- x"));
    }
}
