//! Structural conversion between the outline table encoding and [`FlatTable`].
//!
//! Outline form: a node whose text is exactly [`TABLE_MARKER`], with one
//! child per header cell (column order) and, under each header cell, one
//! grandchild per row value (row order).

use crate::models::outline::OutlineNode;
use crate::models::table::FlatTable;

/// The sentinel text identifying a node as the root of an outline table.
pub const TABLE_MARKER: &str = "{{[[table]]}}";

/// True iff this node is a table root. Exact match only — prose that merely
/// mentions the marker is ordinary content.
pub fn is_table_root(node: &OutlineNode) -> bool {
    node.text == TABLE_MARKER
}

/// Flattens an outline table subtree into a rectangular [`FlatTable`].
///
/// Column order and count come from the root's children; row count is the
/// maximum child count across header cells. Columns with fewer values are
/// right-padded with empty strings — a ragged source table degrades to empty
/// cells, never an error.
pub fn outline_table_to_flat(root: &OutlineNode) -> FlatTable {
    let header: Vec<String> = root.children.iter().map(|cell| cell.text.clone()).collect();
    let row_count = root
        .children
        .iter()
        .map(|cell| cell.children.len())
        .max()
        .unwrap_or(0);

    let rows = (0..row_count)
        .map(|row| {
            root.children
                .iter()
                .map(|cell| {
                    cell.children
                        .get(row)
                        .map(|value| value.text.clone())
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    FlatTable::new(header, rows)
}

/// Rebuilds the outline table subtree from a flat table. Exact inverse of
/// [`outline_table_to_flat`] on rectangular input.
pub fn flat_table_to_outline(table: &FlatTable) -> OutlineNode {
    let children = table
        .header()
        .iter()
        .enumerate()
        .map(|(column, header_text)| {
            let values = table
                .rows()
                .iter()
                .map(|row| OutlineNode::new(row[column].clone()))
                .collect();
            OutlineNode::with_children(header_text.clone(), values)
        })
        .collect();

    OutlineNode::with_children(TABLE_MARKER, children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cell(text: &str, values: &[&str]) -> OutlineNode {
        OutlineNode::with_children(text, values.iter().map(|v| OutlineNode::new(*v)).collect())
    }

    fn table_root(cells: Vec<OutlineNode>) -> OutlineNode {
        OutlineNode::with_children(TABLE_MARKER, cells)
    }

    #[test]
    fn rectangular_table_round_trips() {
        let original = table_root(vec![
            cell("Name", &["ada", "grace"]),
            cell("Role", &["engineer", "admiral"]),
        ]);

        let flat = outline_table_to_flat(&original);
        assert_eq!(flat.header(), ["Name", "Role"]);
        assert_eq!(flat.rows(), [["ada", "engineer"], ["grace", "admiral"]]);

        assert_eq!(flat_table_to_outline(&flat), original);
    }

    #[test]
    fn ragged_columns_pad_with_empty_cells() {
        let root = table_root(vec![
            cell("a", &["1", "2"]),
            cell("b", &["1", "2", "3"]),
            cell("c", &["1"]),
        ]);

        let flat = outline_table_to_flat(&root);
        assert_eq!(flat.row_count(), 3);
        assert_eq!(flat.rows()[1], ["2", "2", ""]);
        assert_eq!(flat.rows()[2], ["", "3", ""]);
    }

    #[test]
    fn empty_table_is_header_only() {
        let root = table_root(vec![cell("only", &[]), cell("headers", &[])]);
        let flat = outline_table_to_flat(&root);
        assert_eq!(flat.column_count(), 2);
        assert_eq!(flat.row_count(), 0);

        let rebuilt = flat_table_to_outline(&flat);
        assert!(rebuilt.children.iter().all(|c| c.children.is_empty()));
    }

    #[test]
    fn single_column_table_is_valid() {
        let root = table_root(vec![cell("solo", &["x"])]);
        let flat = outline_table_to_flat(&root);
        assert_eq!(flat.column_count(), 1);
        assert_eq!(flat_table_to_outline(&flat), root);
    }

    #[test]
    fn empty_header_text_is_preserved() {
        let root = table_root(vec![cell("", &["v"]), cell("b", &["w"])]);
        let flat = outline_table_to_flat(&root);
        assert_eq!(flat.header()[0], "");
        assert_eq!(flat_table_to_outline(&flat), root);
    }

    #[test]
    fn marker_match_is_exact() {
        assert!(is_table_root(&OutlineNode::new(TABLE_MARKER)));
        assert!(!is_table_root(&OutlineNode::new("see {{[[table]]}} docs")));
        assert!(!is_table_root(&OutlineNode::new("table")));
    }
}
