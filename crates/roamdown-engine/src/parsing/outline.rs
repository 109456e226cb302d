//! Source-dialect text: one `- ` bullet per line, nesting by leading tabs
//! (four-space runs tolerated). Tables are ordinary nested bullets in this
//! dialect, so no table handling happens here.

use super::{build_forest, measure_indent};
use crate::models::outline::OutlineNode;

/// Spaces treated as one indent level when the source text uses spaces
/// instead of tabs.
const SPACE_WIDTH: usize = 4;

pub fn parse_outline(text: &str) -> Vec<OutlineNode> {
    let mut items = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let (level, rest) = measure_indent(line, SPACE_WIDTH);
        let content = strip_bullet(rest);
        items.push((level, OutlineNode::new(content)));
    }
    build_forest(items)
}

pub fn serialize_outline(nodes: &[OutlineNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(node, 0, &mut out);
    }
    out
}

fn write_node(node: &OutlineNode, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push('\t');
    }
    out.push_str("- ");
    out.push_str(&node.text);
    out.push('\n');
    for child in &node.children {
        write_node(child, depth + 1, out);
    }
}

pub(crate) fn strip_bullet(rest: &str) -> &str {
    match rest.strip_prefix("- ") {
        Some(content) => content,
        None if rest == "-" => "",
        None => rest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_tab_nested_bullets() {
        let text = "- parent\n\t- child\n\t\t- grandchild\n- sibling\n";
        let forest = parse_outline(text);

        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].text, "parent");
        assert_eq!(forest[0].children[0].text, "child");
        assert_eq!(forest[0].children[0].children[0].text, "grandchild");
        assert_eq!(forest[1].text, "sibling");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let forest = parse_outline("- a\n\n\n- b\n");
        assert_eq!(forest.len(), 2);
    }

    #[test]
    fn non_bullet_lines_become_nodes() {
        let forest = parse_outline("heading text\n\t- under it\n");
        assert_eq!(forest[0].text, "heading text");
        assert_eq!(forest[0].children[0].text, "under it");
    }

    #[test]
    fn space_indent_is_tolerated() {
        let forest = parse_outline("- parent\n    - child\n");
        assert_eq!(forest[0].children[0].text, "child");
    }

    #[test]
    fn empty_bullet_has_empty_text() {
        let forest = parse_outline("-\n");
        assert_eq!(forest[0].text, "");
    }

    #[test]
    fn serialize_then_parse_round_trips() {
        let forest = vec![
            OutlineNode::with_children(
                "parent",
                vec![
                    OutlineNode::with_children("child", vec![OutlineNode::new("grandchild")]),
                    OutlineNode::new("second"),
                ],
            ),
            OutlineNode::new("sibling"),
        ];

        let text = serialize_outline(&forest);
        assert_eq!(text, "- parent\n\t- child\n\t\t- grandchild\n\t- second\n- sibling\n");
        assert_eq!(parse_outline(&text), forest);
    }
}
