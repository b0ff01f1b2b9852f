//! Parse-tree model for CV documents.
//!
//! This module defines the intermediate representation supplied by a markup
//! engine and consumed by the flattener. The model is engine-agnostic: any
//! engine that can express headings, paragraphs, lists and tables can
//! produce it.

mod document;
mod paragraph;
mod table;

pub use document::{Block, DocTree, List};
pub use paragraph::{Inline, Paragraph};
pub use table::{Table, TableCell, TableRow};
