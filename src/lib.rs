//! # cvmark
//!
//! Heuristic extraction of structured consultant profiles from CV documents.
//!
//! The pipeline has two stages. A markup engine (Pandoc by default) turns a
//! word-processing document into a parse tree, which the flattener reduces
//! to line-oriented Markdown: headings, content lines, and blanks, with
//! in-cell line breaks preserved as `<br />` markers. The extractor then
//! scans those lines with a section state machine and produces a
//! [`ConsultantProfile`] ready for template rendering.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cvmark::{flatten_file, profile_from_file};
//!
//! fn main() -> cvmark::Result<()> {
//!     // Flatten a CV to line-oriented Markdown
//!     let markdown = flatten_file("cv.docx")?;
//!     println!("{}", markdown);
//!
//!     // Or extract the structured profile directly
//!     let profile = profile_from_file("cv.docx")?;
//!     println!("{}: {} assignments", profile.name, profile.assignments.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Section-aware flattening**: experience, education, and language
//!   tables decompose by their two-cell layout instead of row-major order
//! - **Structured extraction**: name, title, summary, skills, assignments,
//!   education, certifications, and languages from flattened lines
//! - **Pluggable engines**: document conversion behind the
//!   [`MarkupEngine`](engine::MarkupEngine) trait
//! - **Portrait extraction**: the largest embedded raster image pulled
//!   straight from the document archive

pub mod assets;
pub mod engine;
pub mod error;
pub mod extract;
pub mod flatten;
pub mod heuristics;
pub mod model;
pub mod template;

// Re-export commonly used types
pub use assets::{extract_portrait, MediaImage};
pub use engine::{EngineRegistry, MarkupEngine, PandocEngine};
pub use error::{Error, Result};
pub use extract::{
    Assignment, Certification, ConsultantProfile, EducationEntry, LanguageProficiency,
};
pub use flatten::{FlattenedLine, Section, BREAK_MARKER};
pub use model::{Block, DocTree, Inline, List, Paragraph, Table, TableCell, TableRow};
pub use template::{build_context, render_profile, TemplateRenderer};

use std::path::Path;

/// Convert a document into a parse tree with the default engine.
///
/// # Example
///
/// ```no_run
/// use cvmark::parse_file;
///
/// let tree = parse_file("cv.docx").unwrap();
/// println!("{} blocks", tree.blocks.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<DocTree> {
    EngineRegistry::with_defaults().convert(path.as_ref())
}

/// Flatten a document to line-oriented Markdown.
///
/// # Example
///
/// ```no_run
/// use cvmark::flatten_file;
///
/// let markdown = flatten_file("cv.docx").unwrap();
/// std::fs::write("cv.md", markdown).unwrap();
/// ```
pub fn flatten_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let tree = parse_file(path)?;
    let lines = flatten::flatten(&tree);
    Ok(flatten::to_markdown(&lines))
}

/// Flatten a parse tree to line-oriented Markdown.
pub fn flatten_tree(tree: &DocTree) -> String {
    flatten::to_markdown(&flatten::flatten(tree))
}

/// Extract a structured profile from a document.
///
/// Runs the full pipeline: engine conversion, flattening, and extraction.
///
/// # Example
///
/// ```no_run
/// use cvmark::profile_from_file;
///
/// let profile = profile_from_file("cv.docx").unwrap();
/// println!("{}", serde_json::to_string_pretty(&profile).unwrap());
/// ```
pub fn profile_from_file<P: AsRef<Path>>(path: P) -> Result<ConsultantProfile> {
    let tree = parse_file(path)?;
    Ok(extract::extract(&flatten::flatten(&tree)))
}

/// Extract a structured profile from already-flattened Markdown.
pub fn profile_from_markdown(markdown: &str) -> ConsultantProfile {
    extract::extract_from_markdown(markdown)
}
