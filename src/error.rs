//! Error types for the cvmark library.

use std::io;
use thiserror::Error;

/// Result type alias for cvmark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while processing a CV document.
///
/// Only the external collaborator boundaries produce errors: the markup
/// engine, the template renderer, and archive/file I/O. The flattening and
/// extraction heuristics degrade to fallbacks instead of failing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The markup-conversion engine is unavailable or rejected the input.
    #[error("Markup engine failure: {0}")]
    Engine(String),

    /// No engine is registered under the requested name.
    #[error("Unknown markup engine: {0}")]
    UnknownEngine(String),

    /// The engine produced output that could not be decoded into a parse tree.
    #[error("Malformed parse tree: {0}")]
    MalformedTree(String),

    /// The input file extension is not handled by any registered engine.
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    /// The input document could not be opened as an archive.
    #[error("Archive error: {0}")]
    Archive(String),

    /// Error while filling the output document template.
    #[error("Template rendering error: {0}")]
    Template(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Archive(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedTree(err.to_string())
    }
}
