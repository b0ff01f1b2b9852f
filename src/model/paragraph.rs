//! Paragraph and inline-level types.

use serde::{Deserialize, Serialize};

/// A paragraph of text content, optionally a heading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paragraph {
    /// Inline content in document order
    pub inlines: Vec<Inline>,

    /// Heading level (1-6) or None for body text
    pub heading_level: Option<u8>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self {
            inlines: Vec::new(),
            heading_level: None,
        }
    }

    /// Create a paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    /// Create a heading paragraph.
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        let mut p = Self::with_text(text);
        p.heading_level = Some(level.clamp(1, 6));
        p
    }

    /// Add plain text to the paragraph.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.inlines.push(Inline::Text(text.into()));
    }

    /// Add an explicit line break.
    pub fn add_line_break(&mut self) {
        self.inlines.push(Inline::LineBreak);
    }

    /// Plain text content with line breaks rendered as newlines.
    pub fn plain_text(&self) -> String {
        self.inlines
            .iter()
            .map(|c| match c {
                Inline::Text(text) => text.as_str(),
                Inline::LineBreak => "\n",
            })
            .collect()
    }

    /// Check if the paragraph holds no visible text.
    pub fn is_empty(&self) -> bool {
        self.inlines.is_empty() || self.plain_text().trim().is_empty()
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        self.heading_level.is_some()
    }
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Inline content within a paragraph.
///
/// Character styling (bold, italic, links) carries no meaning for the
/// flattener, so engines collapse styled runs into plain text. Forced line
/// breaks are kept: a break inside one paragraph marks visually stacked
/// sub-lines that the flattener must keep joinable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Inline {
    /// A run of plain text
    Text(String),

    /// A forced line break
    LineBreak,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_plain_text() {
        let mut p = Paragraph::new();
        p.add_text("Jan 2020");
        p.add_line_break();
        p.add_text("Stockholm");

        assert_eq!(p.plain_text(), "Jan 2020\nStockholm");
    }

    #[test]
    fn test_heading() {
        let h = Paragraph::heading("Erfarenhet", 3);
        assert!(h.is_heading());
        assert_eq!(h.heading_level, Some(3));

        let clamped = Paragraph::heading("deep", 9);
        assert_eq!(clamped.heading_level, Some(6));
    }

    #[test]
    fn test_is_empty() {
        assert!(Paragraph::new().is_empty());
        assert!(Paragraph::with_text("   ").is_empty());
        assert!(!Paragraph::with_text("text").is_empty());
    }
}
