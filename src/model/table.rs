//! Table types.

use super::{Block, Paragraph};
use serde::{Deserialize, Serialize};

/// A table structure.
///
/// CV documents use tables for layout, not data: the typical shape is a
/// two-column grid pairing an employer with a role, or a language with a
/// proficiency. Header semantics are therefore not modelled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Plain text, one row per line.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// A row with exactly one left and one right cell.
    pub fn pair(left: TableCell, right: TableCell) -> Self {
        Self {
            cells: vec![left, right],
        }
    }

    /// Plain text of the row, cells joined with a tab.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.plain_text())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// A table cell holding nested blocks.
///
/// Cells nest full blocks because the source layout puts small headings
/// (company, role) inside cells alongside paragraphs and lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableCell {
    /// Blocks inside the cell
    pub blocks: Vec<Block>,
}

impl TableCell {
    /// Create a new cell with blocks.
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// A cell holding a single text paragraph.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            blocks: vec![Block::Paragraph(Paragraph::with_text(text))],
        }
    }

    /// The first heading paragraph inside the cell, if any.
    pub fn first_heading(&self) -> Option<&Paragraph> {
        self.blocks.iter().find_map(|b| match b {
            Block::Paragraph(p) if p.is_heading() => Some(p),
            _ => None,
        })
    }

    /// All non-heading paragraphs inside the cell, in order.
    pub fn body_paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph(p) if !p.is_heading() => Some(p),
            _ => None,
        })
    }

    /// Check if the cell holds no visible text.
    pub fn is_empty(&self) -> bool {
        self.plain_text().trim().is_empty()
    }

    /// Plain text of all nested blocks.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_first_heading() {
        let cell = TableCell::new(vec![
            Block::Paragraph(Paragraph::with_text("Jan 2020 – Dec 2023")),
            Block::Paragraph(Paragraph::heading("Vattenfall", 5)),
        ]);
        assert_eq!(cell.first_heading().unwrap().plain_text(), "Vattenfall");
    }

    #[test]
    fn test_cell_body_paragraphs() {
        let cell = TableCell::new(vec![
            Block::Paragraph(Paragraph::heading("Vattenfall", 5)),
            Block::Paragraph(Paragraph::with_text("Stockholm")),
        ]);
        let bodies: Vec<_> = cell.body_paragraphs().map(|p| p.plain_text()).collect();
        assert_eq!(bodies, vec!["Stockholm"]);
    }

    #[test]
    fn test_row_pair() {
        let row = TableRow::pair(TableCell::text("Svenska"), TableCell::text("Modersmål"));
        assert_eq!(row.cells.len(), 2);
        assert_eq!(row.plain_text(), "Svenska\tModersmål");
    }

    #[test]
    fn test_empty_cell() {
        assert!(TableCell::default().is_empty());
        assert!(!TableCell::text("x").is_empty());
    }
}
