//! Fixed-width text rendering of XHTML tables

use crate::defaults;
use crate::dom::{ExpandedName, Node};
use crate::error::{CoreError, Result};
use crate::text::render_text;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Border style of a rendered table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridStyle {
    /// `+---+` rules around and between every row, `|` column separators
    #[default]
    Grid,
    /// Dashed rules above and below, columns separated by two spaces
    Simple,
    /// Rows only, columns separated by two spaces
    Plain,
}

impl GridStyle {
    /// All supported styles
    pub const ALL: [GridStyle; 3] = [GridStyle::Grid, GridStyle::Simple, GridStyle::Plain];

    /// Style name as accepted by [`FromStr`]
    pub fn as_str(&self) -> &'static str {
        match self {
            GridStyle::Grid => "grid",
            GridStyle::Simple => "simple",
            GridStyle::Plain => "plain",
        }
    }
}

impl fmt::Display for GridStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GridStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "grid" => Ok(GridStyle::Grid),
            "simple" => Ok(GridStyle::Simple),
            "plain" => Ok(GridStyle::Plain),
            other => Err(format!("unknown table style '{other}'")),
        }
    }
}

/// Element names that make up a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableTags {
    /// The table element
    pub table: ExpandedName,
    /// Row elements, searched at any depth below the table
    pub row: ExpandedName,
    /// Cell elements, searched at any depth below a row
    pub cell: ExpandedName,
}

impl TableTags {
    /// Rows and cells in the table element's namespace
    pub fn for_table(table: ExpandedName) -> Self {
        Self {
            row: table.with_local(defaults::TABLE_ROW_TAG),
            cell: table.with_local(defaults::TABLE_CELL_TAG),
            table,
        }
    }
}

impl Default for TableTags {
    fn default() -> Self {
        Self::for_table(defaults::table_tag())
    }
}

/// Render an XHTML table element as a text grid
pub fn render_table(node: Node<'_>, normalize: bool, style: GridStyle) -> Result<String> {
    render_table_with(node, &TableTags::default(), normalize, style)
}

/// Render a table element identified by custom tags as a text grid
///
/// Fails with [`CoreError::InvalidNodeKind`] unless `node` is the table
/// element named in `tags`.
pub fn render_table_with(
    node: Node<'_>,
    tags: &TableTags,
    normalize: bool,
    style: GridStyle,
) -> Result<String> {
    if !node.has_name(&tags.table) {
        return Err(CoreError::InvalidNodeKind {
            expected: tags.table.to_string(),
            found: node.name().expanded().to_string(),
        });
    }

    let rows: Vec<Vec<String>> = node
        .descendants()
        .filter(|n| n.has_name(&tags.row))
        .map(|row| {
            row.descendants()
                .filter(|n| n.has_name(&tags.cell))
                .map(|cell| render_text(cell, normalize))
                .collect()
        })
        .collect();

    Ok(format_grid(&rows, style))
}

/// Lay out rows of cell text as a fixed-width grid
///
/// Column width is the widest line in the column. Ragged rows are padded
/// with empty cells; columns holding only numbers are right-aligned.
pub fn format_grid(rows: &[Vec<String>], style: GridStyle) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    if columns == 0 {
        return String::new();
    }

    let cells: Vec<Vec<Vec<&str>>> = rows
        .iter()
        .map(|row| {
            (0..columns)
                .map(|i| row.get(i).map(|c| c.lines().collect()).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..columns)
        .map(|i| {
            cells
                .iter()
                .flat_map(|row| row[i].iter())
                .map(|line| line.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let numeric: Vec<bool> = (0..columns)
        .map(|i| {
            let mut values = rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .peekable();
            values.peek().is_some() && values.all(|c| c.parse::<f64>().is_ok())
        })
        .collect();

    let mut lines = Vec::new();
    let rule = match style {
        GridStyle::Grid => Some(format!(
            "+{}+",
            widths
                .iter()
                .map(|w| "-".repeat(w + 2))
                .collect::<Vec<_>>()
                .join("+")
        )),
        GridStyle::Simple => Some(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("  "),
        ),
        GridStyle::Plain => None,
    };

    if let Some(rule) = &rule {
        lines.push(rule.clone());
    }
    for row in &cells {
        let height = row.iter().map(Vec::len).max().unwrap_or(0).max(1);
        for k in 0..height {
            let padded: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let line = cell.get(k).copied().unwrap_or("");
                    let width = widths[i];
                    if numeric[i] {
                        format!("{line:>width$}")
                    } else {
                        format!("{line:<width$}")
                    }
                })
                .collect();
            match style {
                GridStyle::Grid => lines.push(format!("| {} |", padded.join(" | "))),
                GridStyle::Simple | GridStyle::Plain => lines.push(padded.join("  ")),
            }
        }
        if style == GridStyle::Grid {
            if let Some(rule) = &rule {
                lines.push(rule.clone());
            }
        }
    }
    if style == GridStyle::Simple {
        if let Some(rule) = &rule {
            lines.push(rule.clone());
        }
    }

    lines.join("\n")
}
