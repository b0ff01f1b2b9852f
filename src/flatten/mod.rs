//! Flattening a parse tree into the line-oriented intermediate format.

mod flattener;
mod line;
mod section;

pub use flattener::flatten;
pub use line::{from_markdown, to_markdown, FlattenedLine, BREAK_MARKER};
pub use section::Section;
