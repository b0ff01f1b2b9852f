//! The flattened line-oriented intermediate format.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker standing in for a forced line break inside one logical block.
///
/// Visually stacked sub-lines (date over location inside one table cell) are
/// joined with this marker so the consumer can split them again without
/// losing the information that they belonged together.
pub const BREAK_MARKER: &str = "<br />";

/// One line of the flattened intermediate representation.
///
/// Ordering is significant and matches the document's top-to-bottom reading
/// order. Rendered as Markdown, the sequence is a stable, inspectable
/// artifact in its own right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlattenedLine {
    /// A blank line separating blocks
    Blank,

    /// A heading line with level 1-6
    Heading {
        /// Heading level (1-6)
        level: u8,
        /// Heading text
        text: String,
    },

    /// A content line of plain text, possibly carrying a break marker
    Content(String),
}

impl FlattenedLine {
    /// Create a heading line, clamping the level to 1-6.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::Heading {
            level: level.clamp(1, 6),
            text: text.into(),
        }
    }

    /// Create a content line.
    pub fn content(text: impl Into<String>) -> Self {
        Self::Content(text.into())
    }

    /// The text payload of the line (empty for blanks).
    pub fn text(&self) -> &str {
        match self {
            FlattenedLine::Blank => "",
            FlattenedLine::Heading { text, .. } => text,
            FlattenedLine::Content(text) => text,
        }
    }

    /// The heading level, or None for non-headings.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            FlattenedLine::Heading { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Whether this is a blank separator line.
    pub fn is_blank(&self) -> bool {
        matches!(self, FlattenedLine::Blank)
    }

    /// Parse one rendered Markdown line back into a flattened line.
    ///
    /// Inverse of `Display` for lines the flattener emits; arbitrary
    /// Markdown (nested lists, block quotes) is read as plain content.
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return FlattenedLine::Blank;
        }
        let hashes = trimmed.chars().take_while(|c| *c == '#').count();
        if (1..=6).contains(&hashes) {
            if let Some(rest) = trimmed[hashes..].strip_prefix(' ') {
                return FlattenedLine::heading(hashes as u8, rest.trim());
            }
        }
        FlattenedLine::Content(trimmed.to_string())
    }
}

impl fmt::Display for FlattenedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlattenedLine::Blank => Ok(()),
            FlattenedLine::Heading { level, text } => {
                write!(f, "{} {}", "#".repeat(*level as usize), text)
            }
            FlattenedLine::Content(text) => write!(f, "{}", text),
        }
    }
}

/// Render a line sequence as a Markdown document.
pub fn to_markdown(lines: &[FlattenedLine]) -> String {
    lines
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse a Markdown document back into a line sequence.
pub fn from_markdown(markdown: &str) -> Vec<FlattenedLine> {
    markdown.lines().map(FlattenedLine::parse).collect()
}
