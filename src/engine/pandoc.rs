//! Pandoc-based markup engine.
//!
//! Runs `pandoc` as a subprocess, asks for its native JSON AST, and maps
//! that AST into the [`DocTree`] model. The mapping is deliberately
//! tolerant: node shapes it does not understand are skipped (with a log
//! line), never errors. Only a failed subprocess or undecodable JSON is
//! terminal.

use crate::error::{Error, Result};
use crate::model::{Block, DocTree, List, Paragraph, Table, TableCell, TableRow};

use serde_json::Value;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use super::MarkupEngine;

/// Engine wrapping the Pandoc document converter.
#[derive(Debug, Clone)]
pub struct PandocEngine {
    program: String,
}

impl PandocEngine {
    /// Create an engine invoking `pandoc` from the search path.
    pub fn new() -> Self {
        Self {
            program: "pandoc".to_string(),
        }
    }

    /// Create an engine invoking a specific pandoc binary.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn source_format(extension: &str) -> &'static str {
        match extension.to_lowercase().as_str() {
            "odt" => "odt",
            "rtf" => "rtf",
            _ => "docx",
        }
    }

    fn run(&self, mut command: Command, stdin_bytes: Option<&[u8]>) -> Result<DocTree> {
        command.stdout(Stdio::piped()).stderr(Stdio::piped());
        if stdin_bytes.is_some() {
            command.stdin(Stdio::piped());
        }

        let mut child = command
            .spawn()
            .map_err(|e| Error::Engine(format!("failed to launch {}: {}", self.program, e)))?;

        if let Some(bytes) = stdin_bytes {
            if let Some(mut stdin) = child.stdin.take() {
                stdin
                    .write_all(bytes)
                    .map_err(|e| Error::Engine(format!("failed to feed {}: {}", self.program, e)))?;
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| Error::Engine(format!("{} did not finish: {}", self.program, e)))?;

        if !output.status.success() {
            let diagnostic = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Engine(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                diagnostic.trim()
            )));
        }

        let ast: Value = serde_json::from_slice(&output.stdout)?;
        tree_from_ast(&ast)
    }
}

impl Default for PandocEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupEngine for PandocEngine {
    fn name(&self) -> &str {
        "pandoc"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["docx", "odt", "rtf"]
    }

    fn convert_path(&self, path: &Path) -> Result<DocTree> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let mut command = Command::new(&self.program);
        command
            .arg(path)
            .args(["-f", Self::source_format(ext), "-t", "json"]);
        self.run(command, None)
    }

    fn convert_bytes(&self, bytes: &[u8], extension: &str) -> Result<DocTree> {
        let mut command = Command::new(&self.program);
        command.args(["-f", Self::source_format(extension), "-t", "json"]);
        self.run(command, Some(bytes))
    }
}

/// Map a Pandoc JSON AST document into a [`DocTree`].
pub fn tree_from_ast(ast: &Value) -> Result<DocTree> {
    let blocks = ast
        .get("blocks")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::MalformedTree("document has no blocks array".into()))?;

    Ok(DocTree {
        blocks: convert_blocks(blocks),
    })
}

fn convert_blocks(values: &[Value]) -> Vec<Block> {
    values.iter().flat_map(convert_block).collect()
}

fn convert_block(value: &Value) -> Vec<Block> {
    let tag = value.get("t").and_then(Value::as_str).unwrap_or_default();
    let content = value.get("c");

    match (tag, content) {
        ("Header", Some(c)) => {
            let level = c
                .get(0)
                .and_then(Value::as_u64)
                .map(|l| l.clamp(1, 6) as u8)
                .unwrap_or(6);
            let inlines = c.get(2).and_then(Value::as_array);
            let mut paragraph = paragraph_from_inlines(inlines.map(Vec::as_slice).unwrap_or(&[]));
            paragraph.heading_level = Some(level);
            wrap_paragraph(paragraph)
        }
        ("Para" | "Plain", Some(c)) => {
            let inlines = c.as_array().map(Vec::as_slice).unwrap_or(&[]);
            wrap_paragraph(paragraph_from_inlines(inlines))
        }
        ("LineBlock", Some(c)) => {
            // Each sub-array is one visual line; keep them stacked with
            // explicit breaks.
            let mut paragraph = Paragraph::new();
            for (index, line) in c.as_array().into_iter().flatten().enumerate() {
                if index > 0 {
                    paragraph.add_line_break();
                }
                if let Some(inlines) = line.as_array() {
                    fill_paragraph(inlines, &mut paragraph);
                }
            }
            wrap_paragraph(paragraph)
        }
        ("BulletList", Some(c)) => vec![Block::List(List::bulleted(list_items(c)))],
        ("OrderedList", Some(c)) => {
            let items = c.get(1).map(list_items).unwrap_or_default();
            vec![Block::List(List::numbered(items))]
        }
        ("Table", Some(c)) => convert_table(c).map(Block::Table).into_iter().collect(),
        ("Div", Some(c)) => c
            .get(1)
            .and_then(Value::as_array)
            .map(|blocks| convert_blocks(blocks))
            .unwrap_or_default(),
        ("BlockQuote", Some(c)) => c
            .as_array()
            .map(|blocks| convert_blocks(blocks))
            .unwrap_or_default(),
        ("HorizontalRule" | "Null", _) => Vec::new(),
        _ => {
            log::debug!("skipping unsupported pandoc block: {}", tag);
            Vec::new()
        }
    }
}

fn wrap_paragraph(paragraph: Paragraph) -> Vec<Block> {
    if paragraph.is_empty() {
        Vec::new()
    } else {
        vec![Block::Paragraph(paragraph)]
    }
}

/// One list item is a sequence of blocks; its text collapses into a single
/// paragraph, which is all the flattener keeps of a list item anyway.
fn list_items(value: &Value) -> Vec<Paragraph> {
    value
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|item| {
            let blocks = convert_blocks(item.as_array().map(Vec::as_slice).unwrap_or(&[]));
            let text = blocks
                .iter()
                .map(|b| b.plain_text())
                .filter(|t| !t.trim().is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            if text.trim().is_empty() {
                None
            } else {
                Some(Paragraph::with_text(text))
            }
        })
        .collect()
}

fn paragraph_from_inlines(inlines: &[Value]) -> Paragraph {
    let mut paragraph = Paragraph::new();
    fill_paragraph(inlines, &mut paragraph);
    paragraph
}

fn fill_paragraph(inlines: &[Value], paragraph: &mut Paragraph) {
    let mut buffer = String::new();
    walk_inlines(inlines, &mut buffer, paragraph);
    if !buffer.is_empty() {
        paragraph.add_text(buffer);
    }
}

fn walk_inlines(inlines: &[Value], buffer: &mut String, paragraph: &mut Paragraph) {
    for inline in inlines {
        let tag = inline.get("t").and_then(Value::as_str).unwrap_or_default();
        let content = inline.get("c");

        match (tag, content) {
            ("Str", Some(c)) => buffer.push_str(c.as_str().unwrap_or_default()),
            ("Space" | "SoftBreak", _) => buffer.push(' '),
            ("LineBreak", _) => {
                if !buffer.trim().is_empty() {
                    paragraph.add_text(std::mem::take(buffer));
                } else {
                    buffer.clear();
                }
                paragraph.add_line_break();
            }
            // Styling carries no meaning downstream; keep the text only.
            ("Emph" | "Strong" | "Underline" | "Strikeout" | "SmallCaps", Some(c)) => {
                if let Some(nested) = c.as_array() {
                    walk_inlines(nested, buffer, paragraph);
                }
            }
            ("Span" | "Quoted", Some(c)) => {
                if let Some(nested) = c.get(1).and_then(Value::as_array) {
                    walk_inlines(nested, buffer, paragraph);
                }
            }
            ("Link", Some(c)) => {
                if let Some(nested) = c.get(1).and_then(Value::as_array) {
                    walk_inlines(nested, buffer, paragraph);
                }
            }
            ("Code", Some(c)) => {
                buffer.push_str(c.get(1).and_then(Value::as_str).unwrap_or_default())
            }
            // Inline images are recovered from the archive instead.
            ("Image" | "Note", _) => {}
            _ => log::debug!("skipping unsupported pandoc inline: {}", tag),
        }
    }
}

/// Map a pandoc table. Handles both the modern shape (attr, caption,
/// colspecs, head, bodies, foot; pandoc-types >= 1.22) and the legacy
/// 5-element shape emitted by old pandoc releases.
fn convert_table(content: &Value) -> Option<Table> {
    let parts = content.as_array()?;
    let mut table = Table::new();

    if parts.len() == 6 {
        // Head rows, then each body's intermediate-head and body rows,
        // then foot rows.
        if let Some(rows) = parts[3].get(1).and_then(Value::as_array) {
            add_rows(&mut table, rows);
        }
        for body in parts[4].as_array().into_iter().flatten() {
            for index in [2, 3] {
                if let Some(rows) = body.get(index).and_then(Value::as_array) {
                    add_rows(&mut table, rows);
                }
            }
        }
        if let Some(rows) = parts[5].get(1).and_then(Value::as_array) {
            add_rows(&mut table, rows);
        }
    } else if parts.len() == 5 {
        // Legacy: [caption, alignments, widths, header-cells, rows] where a
        // cell is a bare block list.
        if let Some(cells) = parts[3].as_array() {
            if cells.iter().any(|c| !legacy_cell(c).is_empty()) {
                table.add_row(TableRow::new(cells.iter().map(legacy_cell).collect()));
            }
        }
        for row in parts[4].as_array().into_iter().flatten() {
            if let Some(cells) = row.as_array() {
                table.add_row(TableRow::new(cells.iter().map(legacy_cell).collect()));
            }
        }
    } else {
        log::debug!("skipping pandoc table with unexpected shape");
        return None;
    }

    if table.is_empty() {
        None
    } else {
        Some(table)
    }
}

fn add_rows(table: &mut Table, rows: &[Value]) {
    for row in rows {
        // Row: [attr, [cells]]; cell: [attr, alignment, rowspan, colspan,
        // [blocks]].
        let cells = row
            .get(1)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let converted: Vec<TableCell> = cells
            .iter()
            .map(|cell| {
                let blocks = cell
                    .get(4)
                    .and_then(Value::as_array)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);
                TableCell::new(convert_blocks(blocks))
            })
            .collect();
        if !converted.is_empty() {
            table.add_row(TableRow::new(converted));
        }
    }
}

fn legacy_cell(value: &Value) -> TableCell {
    TableCell::new(convert_blocks(
        value.as_array().map(Vec::as_slice).unwrap_or(&[]),
    ))
}
