/// A pipe-delimited table: one header row, a separator, zero or more data rows.
///
/// Invariant: every data row has exactly `header.len()` cells. `new` and
/// `parse` enforce this by right-padding short rows with empty strings and
/// truncating excess trailing cells, so ragged input never becomes an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl FlatTable {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = header.len();
        let rows = rows.into_iter().map(|row| fit_row(row, width)).collect();
        Self { header, rows }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Renders the textual form: header line, dash separator, data lines.
    ///
    /// Literal pipes inside cells are backslash-escaped so the output stays
    /// parseable. Columns are not visually padded; padding is cosmetic and
    /// carries no meaning.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&render_row(&self.header));
        out.push('\n');
        let separator: Vec<String> = self.header.iter().map(|_| "---".to_string()).collect();
        out.push_str(&render_row(&separator));
        for row in &self.rows {
            out.push('\n');
            out.push_str(&render_row(row));
        }
        out
    }

    /// Parses the textual form back into a table.
    ///
    /// Returns `None` when the text has no header line or no valid separator
    /// as its second line. Data rows with too few cells are padded, rows with
    /// excess trailing cells are truncated to the header's column count.
    /// Alignment colons in the separator are tolerated and discarded.
    pub fn parse(text: &str) -> Option<Self> {
        let mut lines = text.lines().filter(|line| !line.trim().is_empty());

        let header = split_row(lines.next()?);
        if header.is_empty() {
            return None;
        }
        if !is_separator_row(&split_row(lines.next()?)) {
            return None;
        }

        let width = header.len();
        let rows = lines.map(|line| fit_row(split_row(line), width)).collect();
        Some(Self { header, rows })
    }
}

/// True when every cell is a dash run with optional alignment colons.
pub(crate) fn is_separator_row(cells: &[String]) -> bool {
    !cells.is_empty()
        && cells.iter().all(|cell| {
            let dashes = cell.strip_prefix(':').unwrap_or(cell);
            let dashes = dashes.strip_suffix(':').unwrap_or(dashes);
            !dashes.is_empty() && dashes.chars().all(|c| c == '-')
        })
}

fn fit_row(mut row: Vec<String>, width: usize) -> Vec<String> {
    row.truncate(width);
    while row.len() < width {
        row.push(String::new());
    }
    row
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|")
}

fn render_row(cells: &[String]) -> String {
    let mut line = String::from("|");
    for cell in cells {
        line.push(' ');
        line.push_str(&escape_cell(cell));
        line.push_str(" |");
    }
    line
}

/// Splits one table line into trimmed, unescaped cells.
///
/// `\|` is an escaped literal pipe and does not open a new cell. The empty
/// segments produced by the boundary pipes are dropped; interior empty cells
/// survive.
pub(crate) fn split_row(line: &str) -> Vec<String> {
    let line = line.trim();
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                current.push('|');
                chars.next();
            }
            '|' => {
                cells.push(current.trim().to_string());
                current = String::new();
            }
            _ => current.push(c),
        }
    }
    cells.push(current.trim().to_string());

    if line.starts_with('|') && !cells.is_empty() {
        cells.remove(0);
    }
    if line.ends_with('|') && !line.ends_with("\\|") && !cells.is_empty() {
        cells.pop();
    }
    cells
}
