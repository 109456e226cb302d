//! Standard-dialect text: two-space-indented `- ` bullets, with pipe tables
//! as runs of `|…|` lines. A valid table run (second line is a separator)
//! becomes an outline table subtree; an invalid run degrades to plain lines.

use super::{build_forest, measure_indent, outline::strip_bullet};
use crate::convert::table::{flat_table_to_outline, is_table_root, outline_table_to_flat};
use crate::models::outline::OutlineNode;
use crate::models::table::FlatTable;

const SPACE_WIDTH: usize = 2;

pub fn parse_markdown(text: &str) -> Vec<OutlineNode> {
    let lines: Vec<&str> = text.lines().collect();
    let mut items = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        if line.trim().is_empty() {
            i += 1;
            continue;
        }

        let (level, rest) = measure_indent(line, SPACE_WIDTH);
        if rest.starts_with('|') {
            let start = i;
            while i < lines.len() && lines[i].trim_start().starts_with('|') {
                i += 1;
            }
            let run = lines[start..i].join("\n");
            match FlatTable::parse(&run) {
                Some(table) => {
                    items.push((level, flat_table_to_outline(&table)));
                }
                None => {
                    // No separator line: not a table, keep the lines as text.
                    for raw in &lines[start..i] {
                        let (lvl, content) = measure_indent(raw, SPACE_WIDTH);
                        items.push((lvl, OutlineNode::new(content)));
                    }
                }
            }
            continue;
        }

        items.push((level, OutlineNode::new(strip_bullet(rest))));
        i += 1;
    }
    build_forest(items)
}

pub fn serialize_markdown(nodes: &[OutlineNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(node, 0, &mut out);
    }
    out
}

fn write_node(node: &OutlineNode, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);

    // A table root with columns renders as pipe-table lines; its subtree is
    // consumed by the structural conversion. A bare marker with no columns
    // degrades to an ordinary bullet.
    if is_table_root(node) && !node.children.is_empty() {
        let table = outline_table_to_flat(node);
        for line in table.render().lines() {
            out.push_str(&indent);
            out.push_str(line);
            out.push('\n');
        }
        return;
    }

    out.push_str(&indent);
    out.push_str("- ");
    out.push_str(&node.text);
    out.push('\n');
    for child in &node.children {
        write_node(child, depth + 1, out);
    }
}
