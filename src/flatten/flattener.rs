//! Markup flattener: parse tree to line-oriented Markdown.

use crate::heuristics;
use crate::model::{Block, DocTree, Inline, List, Paragraph, Table, TableCell};

use super::{FlattenedLine, Section, BREAK_MARKER};

/// Flatten a parse tree into an ordered line sequence.
///
/// Headings map 1:1 to heading lines, paragraphs to one content line each
/// with forced breaks rendered as [`BREAK_MARKER`], lists to one line per
/// item, and two-cell table rows are decomposed according to the section
/// they appear under. Flattening is pure: the same tree always yields the
/// same sequence.
pub fn flatten(tree: &DocTree) -> Vec<FlattenedLine> {
    let mut flattener = Flattener::new();
    for block in &tree.blocks {
        flattener.flatten_block(block);
    }
    flattener.finish()
}

/// Tree walker accumulating the output sequence.
///
/// All output goes through [`Flattener::append`]; no other state is shared
/// between the per-section handlers.
struct Flattener {
    lines: Vec<FlattenedLine>,
    section: Section,
}

impl Flattener {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            section: Section::default(),
        }
    }

    /// Final whitespace pass over the whole sequence: internal runs collapse
    /// to one space and edges are trimmed. Applied once at the end so that
    /// joins inside the recursive handlers cannot compound.
    fn finish(self) -> Vec<FlattenedLine> {
        self.lines
            .into_iter()
            .map(|line| match line {
                FlattenedLine::Heading { level, text } => {
                    FlattenedLine::heading(level, collapse_whitespace(&text))
                }
                FlattenedLine::Content(text) => FlattenedLine::content(collapse_whitespace(&text)),
                FlattenedLine::Blank => FlattenedLine::Blank,
            })
            .collect()
    }

    fn append(&mut self, line: FlattenedLine) {
        self.lines.push(line);
    }

    fn append_blank(&mut self) {
        self.lines.push(FlattenedLine::Blank);
    }

    fn flatten_block(&mut self, block: &Block) {
        match block {
            Block::Paragraph(p) => self.flatten_paragraph(p),
            Block::List(l) => self.flatten_list(l),
            Block::Table(t) => self.flatten_table(t),
        }
    }

    fn flatten_paragraph(&mut self, paragraph: &Paragraph) {
        if paragraph.is_empty() {
            return;
        }
        let text = paragraph_text(paragraph);
        if let Some(level) = paragraph.heading_level {
            // Top-level headings drive the section state for table rows
            // that follow.
            self.section = Section::from_heading(&text);
            self.append(FlattenedLine::heading(level, text));
        } else {
            self.append(FlattenedLine::content(text));
        }
        self.append_blank();
    }

    fn flatten_list(&mut self, list: &List) {
        for (index, item) in list.items.iter().enumerate() {
            let text = paragraph_text(item);
            if text.trim().is_empty() {
                continue;
            }
            if list.ordered {
                self.append(FlattenedLine::content(format!("{}. {}", index + 1, text)));
            } else {
                self.append(FlattenedLine::content(format!("- {}", text)));
            }
        }
        self.append_blank();
    }

    fn flatten_table(&mut self, table: &Table) {
        for row in &table.rows {
            if let [left, right] = row.cells.as_slice() {
                match self.section.clone() {
                    Section::Experience => self.flatten_experience_row(left, right),
                    s if s.is_education_family() => self.flatten_education_row(left, right),
                    Section::Languages => self.flatten_language_row(left, right),
                    _ => {
                        self.flatten_cell(left);
                        self.flatten_cell(right);
                        self.append_blank();
                    }
                }
            } else {
                // Rows without the two-column shape carry no positional
                // semantics.
                for cell in &row.cells {
                    self.flatten_cell(cell);
                }
                self.append_blank();
            }
        }
    }

    /// Default cell handling: nested blocks flattened in order.
    fn flatten_cell(&mut self, cell: &TableCell) {
        for block in &cell.blocks {
            match block {
                Block::Paragraph(p) if p.is_heading() => {
                    if !p.is_empty() {
                        let level = p.heading_level.unwrap_or(6);
                        self.append(FlattenedLine::heading(level, paragraph_text(p)));
                        self.append_blank();
                    }
                }
                other => self.flatten_block(other),
            }
        }
    }

    /// Experience row: left cell holds the company plus date/location lines,
    /// right cell holds the role plus description and tech-stack fragments.
    fn flatten_experience_row(&mut self, left: &TableCell, right: &TableCell) {
        // Company: prefer a nested small heading, else the first paragraph.
        let mut date_location: Vec<String> = Vec::new();
        let company = if let Some(heading) = left.first_heading() {
            date_location.extend(left.body_paragraphs().map(paragraph_text));
            paragraph_text(heading)
        } else {
            let mut paragraphs = left.body_paragraphs().map(paragraph_text);
            let first = paragraphs.next().unwrap_or_default();
            date_location.extend(paragraphs);
            // Stacked sub-lines after the company name stay in the cell as
            // date/location content.
            match first.split_once(BREAK_MARKER) {
                Some((name, rest)) => {
                    date_location.insert(0, rest.to_string());
                    name.to_string()
                }
                None => first,
            }
        };

        if !company.trim().is_empty() {
            self.append(FlattenedLine::heading(4, company));
        } else {
            log::debug!("experience row without a company cell, using fallback layout");
            date_location.clear();
            self.flatten_cell(left);
        }

        for paragraph in date_location {
            for piece in paragraph.split(BREAK_MARKER) {
                let piece = piece.trim();
                if !piece.is_empty() {
                    self.append(FlattenedLine::content(piece));
                }
            }
        }
        self.append_blank();

        if let Some(role) = right.first_heading() {
            self.append(FlattenedLine::heading(5, paragraph_text(role)));
            self.append_blank();
        }

        // Everything else in the right cell competes for "description":
        // the longest long-form fragment wins, short fragments become
        // tech-stack tokens.
        let mut fragments: Vec<String> = right.body_paragraphs().map(paragraph_text).collect();
        for block in &right.blocks {
            if let Block::List(list) = block {
                fragments.extend(list.items.iter().map(paragraph_text));
            }
        }
        let (description, stack) = heuristics::split_description_and_stack(&fragments);

        if let Some(description) = description {
            self.append(FlattenedLine::content(description));
            self.append_blank();
        }
        for token in stack {
            self.append(FlattenedLine::content(token));
        }
        self.append_blank();
    }

    /// Education-family row: left cell first paragraph is the entry heading
    /// (split at the break marker), the right cell text is a trailing date.
    fn flatten_education_row(&mut self, left: &TableCell, right: &TableCell) {
        let mut paragraphs: Vec<String> = left
            .first_heading()
            .into_iter()
            .chain(left.body_paragraphs())
            .map(paragraph_text)
            .collect();

        if paragraphs.is_empty() {
            // No paragraph structure at all; fall back to the cell's full
            // text with stacked lines split out.
            let text = cell_text(left);
            if !text.trim().is_empty() {
                paragraphs.push(text);
            }
        }

        let mut rest = paragraphs.split_off(if paragraphs.is_empty() { 0 } else { 1 });
        if let Some(first) = paragraphs.pop() {
            match first.split_once(BREAK_MARKER) {
                Some((head, tail)) => {
                    // The marker stays on the heading line so a consumer can
                    // tell a split heading from a plain one.
                    self.append(FlattenedLine::heading(
                        4,
                        format!("{}{}", head.trim(), BREAK_MARKER),
                    ));
                    self.append_blank();
                    if !tail.trim().is_empty() {
                        rest.insert(0, tail.to_string());
                    }
                }
                None => {
                    self.append(FlattenedLine::heading(4, first));
                    self.append_blank();
                }
            }
        }

        for paragraph in rest {
            for piece in paragraph.split(BREAK_MARKER) {
                let piece = piece.trim();
                if !piece.is_empty() {
                    self.append(FlattenedLine::content(piece));
                    self.append_blank();
                }
            }
        }

        let date = cell_text(right);
        if !date.trim().is_empty() {
            self.append(FlattenedLine::content(date));
        }
        self.append_blank();
    }

    /// Language row: language name as a sub-heading, proficiency as content.
    fn flatten_language_row(&mut self, left: &TableCell, right: &TableCell) {
        let language = cell_text(left);
        let proficiency = cell_text(right);
        if !language.trim().is_empty() {
            self.append(FlattenedLine::heading(4, language));
        }
        if !proficiency.trim().is_empty() {
            self.append(FlattenedLine::content(proficiency));
        }
        self.append_blank();
    }
}

/// Paragraph text with forced breaks rendered as the break marker.
fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for inline in &paragraph.inlines {
        match inline {
            Inline::Text(run) => {
                if !text.is_empty() && !text.ends_with(' ') && !text.ends_with(BREAK_MARKER) {
                    text.push(' ');
                }
                text.push_str(run);
            }
            Inline::LineBreak => text.push_str(BREAK_MARKER),
        }
    }
    text
}

/// All text in a cell joined into one logical line, breaks kept as markers.
fn cell_text(cell: &TableCell) -> String {
    let mut parts: Vec<String> = Vec::new();
    for block in &cell.blocks {
        match block {
            Block::Paragraph(p) => parts.push(paragraph_text(p)),
            Block::List(l) => parts.extend(l.items.iter().map(paragraph_text)),
            Block::Table(t) => parts.push(t.plain_text()),
        }
    }
    parts.retain(|p| !p.trim().is_empty());
    parts.join(" ")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TableRow;

    fn heading_block(text: &str, level: u8) -> Block {
        Block::Paragraph(Paragraph::heading(text, level))
    }

    fn text_block(text: &str) -> Block {
        Block::Paragraph(Paragraph::with_text(text))
    }

    #[test]
    fn test_flatten_headings_and_paragraphs() {
        let mut tree = DocTree::new();
        tree.add_paragraph(Paragraph::heading("Philip Boukaras", 1));
        tree.add_paragraph(Paragraph::heading("Senior Fullstack-utvecklare", 2));
        tree.add_paragraph(Paragraph::with_text("A   driven  developer."));

        let lines = flatten(&tree);
        assert_eq!(
            lines,
            vec![
                FlattenedLine::heading(1, "Philip Boukaras"),
                FlattenedLine::Blank,
                FlattenedLine::heading(2, "Senior Fullstack-utvecklare"),
                FlattenedLine::Blank,
                FlattenedLine::content("A driven developer."),
                FlattenedLine::Blank,
            ]
        );
    }

    #[test]
    fn test_flatten_lists() {
        let mut tree = DocTree::new();
        tree.add_block(Block::List(List::bulleted(vec![
            Paragraph::with_text("Rust"),
            Paragraph::with_text("Go"),
        ])));
        tree.add_block(Block::List(List::numbered(vec![
            Paragraph::with_text("First"),
            Paragraph::with_text("Second"),
        ])));

        let lines = flatten(&tree);
        let rendered: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(rendered, vec!["- Rust", "- Go", "", "1. First", "2. Second", ""]);
    }

    #[test]
    fn test_paragraph_text_break_marker() {
        let mut p = Paragraph::new();
        p.add_text("Jan 2020 – Dec 2023");
        p.add_line_break();
        p.add_text("Stockholm");
        assert_eq!(
            paragraph_text(&p),
            format!("Jan 2020 – Dec 2023{}Stockholm", BREAK_MARKER)
        );
    }

    fn experience_tree(left: TableCell, right: TableCell) -> DocTree {
        let mut tree = DocTree::new();
        tree.add_paragraph(Paragraph::heading("Erfarenhet", 3));
        let mut table = Table::new();
        table.add_row(TableRow::pair(left, right));
        tree.add_block(Block::Table(table));
        tree
    }

    #[test]
    fn test_experience_row_with_nested_headings() {
        let mut dates = Paragraph::new();
        dates.add_text("Jan 2020 – Dec 2023");
        dates.add_line_break();
        dates.add_text("Stockholm");

        let left = TableCell::new(vec![
            heading_block("Vattenfall", 5),
            Block::Paragraph(dates),
        ]);
        let right = TableCell::new(vec![
            heading_block("Systemutvecklare", 5),
            text_block(
                "Worked on CI/CD pipelines and the migration of core systems to the cloud.",
            ),
            text_block("Kubernetes"),
            text_block("C#"),
        ]);

        let lines = flatten(&experience_tree(left, right));
        let rendered: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "### Erfarenhet",
                "",
                "#### Vattenfall",
                "Jan 2020 – Dec 2023",
                "Stockholm",
                "",
                "##### Systemutvecklare",
                "",
                "Worked on CI/CD pipelines and the migration of core systems to the cloud.",
                "",
                "Kubernetes",
                "C#",
                "",
            ]
        );
    }

    #[test]
    fn test_experience_company_before_right_cell() {
        let left = TableCell::text("Acme Corp");
        let right = TableCell::new(vec![heading_block("Engineer", 5), text_block("Terraform")]);

        let lines = flatten(&experience_tree(left, right));
        let company = lines
            .iter()
            .position(|l| l.heading_level() == Some(4) && l.text() == "Acme Corp")
            .expect("company heading emitted");
        let role = lines
            .iter()
            .position(|l| l.text() == "Engineer")
            .expect("role emitted");
        let token = lines
            .iter()
            .position(|l| l.text() == "Terraform")
            .expect("token emitted");
        assert!(company < role);
        assert!(company < token);
    }

    #[test]
    fn test_experience_company_fallback_splits_stacked_lines() {
        let mut stacked = Paragraph::new();
        stacked.add_text("Acme Corp");
        stacked.add_line_break();
        stacked.add_text("2020–2023");

        let left = TableCell::new(vec![Block::Paragraph(stacked)]);
        let right = TableCell::new(vec![text_block("Rust")]);

        let lines = flatten(&experience_tree(left, right));
        assert!(lines.contains(&FlattenedLine::heading(4, "Acme Corp")));
        assert!(lines.contains(&FlattenedLine::content("2020–2023")));
    }

    #[test]
    fn test_education_row_marker_split() {
        let mut tree = DocTree::new();
        tree.add_paragraph(Paragraph::heading("Utbildning", 3));

        let mut degree = Paragraph::new();
        degree.add_text("M.Sc. Computer Science");
        degree.add_line_break();
        degree.add_text("KTH Royal Institute of Technology");

        let mut table = Table::new();
        table.add_row(TableRow::pair(
            TableCell::new(vec![Block::Paragraph(degree)]),
            TableCell::text("2015–2020"),
        ));
        tree.add_block(Block::Table(table));

        let lines = flatten(&tree);
        let rendered: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "### Utbildning",
                "",
                &format!("#### M.Sc. Computer Science{}", BREAK_MARKER),
                "",
                "KTH Royal Institute of Technology",
                "",
                "2015–2020",
                "",
            ]
        );
    }

    #[test]
    fn test_language_row() {
        let mut tree = DocTree::new();
        tree.add_paragraph(Paragraph::heading("Språk", 3));
        let mut table = Table::new();
        table.add_row(TableRow::pair(
            TableCell::text("Svenska"),
            TableCell::text("Modersmål"),
        ));
        tree.add_block(Block::Table(table));

        let lines = flatten(&tree);
        assert!(lines.contains(&FlattenedLine::heading(4, "Svenska")));
        assert!(lines.contains(&FlattenedLine::content("Modersmål")));
    }

    #[test]
    fn test_unrecognized_section_default_table_handling() {
        let mut tree = DocTree::new();
        tree.add_paragraph(Paragraph::heading("Hobbies", 3));
        let mut table = Table::new();
        table.add_row(TableRow::pair(
            TableCell::text("Climbing"),
            TableCell::text("Weekly"),
        ));
        tree.add_block(Block::Table(table));

        let lines = flatten(&tree);
        // Both cells preserved as plain content, no positional semantics.
        assert!(lines.contains(&FlattenedLine::content("Climbing")));
        assert!(lines.contains(&FlattenedLine::content("Weekly")));
    }

    #[test]
    fn test_three_cell_row_flattened_cell_by_cell() {
        let mut tree = DocTree::new();
        tree.add_paragraph(Paragraph::heading("Erfarenhet", 3));
        let mut table = Table::new();
        table.add_row(TableRow::new(vec![
            TableCell::text("a"),
            TableCell::text("b"),
            TableCell::text("c"),
        ]));
        tree.add_block(Block::Table(table));

        let lines = flatten(&tree);
        for text in ["a", "b", "c"] {
            assert!(lines.contains(&FlattenedLine::content(text)));
        }
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let mut tree = DocTree::new();
        tree.add_paragraph(Paragraph::heading("Erfarenhet", 3));
        let mut table = Table::new();
        table.add_row(TableRow::pair(
            TableCell::new(vec![heading_block("Acme", 5)]),
            TableCell::new(vec![text_block("Rust")]),
        ));
        tree.add_block(Block::Table(table));

        assert_eq!(flatten(&tree), flatten(&tree));
    }
}
