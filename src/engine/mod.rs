//! Markup engines producing parse trees from source documents.
//!
//! The conversion from a binary word-processing document to a parse tree is
//! delegated to an external engine behind the [`MarkupEngine`] trait. Which
//! engine runs is configuration, not a code path: engines register in an
//! [`EngineRegistry`] and are selected by name.
//!
//! # Example
//!
//! ```no_run
//! use cvmark::engine::EngineRegistry;
//!
//! fn main() -> cvmark::Result<()> {
//!     let registry = EngineRegistry::with_defaults();
//!     let tree = registry.convert(std::path::Path::new("cv.docx"))?;
//!     println!("{} blocks", tree.blocks.len());
//!     Ok(())
//! }
//! ```

mod pandoc;

pub use pandoc::PandocEngine;

use crate::error::{Error, Result};
use crate::model::DocTree;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// A strategy that produces a parse tree from a source document.
///
/// Implementations wrap one external conversion tool. A failing engine is a
/// terminal error for the document; engines never return partial trees.
pub trait MarkupEngine: Send + Sync {
    /// The engine's registry name.
    fn name(&self) -> &str;

    /// Supported file extensions, lowercase, without the leading dot.
    fn supported_extensions(&self) -> &[&str];

    /// Convert a document file into a parse tree.
    fn convert_path(&self, path: &Path) -> Result<DocTree>;

    /// Convert an in-memory document into a parse tree. The extension tells
    /// the engine which source format the bytes carry.
    fn convert_bytes(&self, bytes: &[u8], extension: &str) -> Result<DocTree>;

    /// Check if this engine handles the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let folded = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == folded)
    }
}

/// Registry of markup engines, selected by name.
pub struct EngineRegistry {
    engines: HashMap<String, Arc<dyn MarkupEngine>>,
    default_name: Option<String>,
}

impl EngineRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            engines: HashMap::new(),
            default_name: None,
        }
    }

    /// Create a registry with the default engine (Pandoc).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PandocEngine::new()));
        registry
    }

    /// Register an engine. The first registered engine becomes the default.
    pub fn register(&mut self, engine: Arc<dyn MarkupEngine>) {
        let name = engine.name().to_lowercase();
        if self.default_name.is_none() {
            self.default_name = Some(name.clone());
        }
        self.engines.insert(name, engine);
    }

    /// Look up an engine by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn MarkupEngine>> {
        self.engines.get(&name.to_lowercase()).cloned()
    }

    /// The default engine, if any is registered.
    pub fn default_engine(&self) -> Option<Arc<dyn MarkupEngine>> {
        self.default_name.as_deref().and_then(|n| self.get(n))
    }

    /// Names of all registered engines.
    pub fn engine_names(&self) -> Vec<&str> {
        self.engines.keys().map(|s| s.as_str()).collect()
    }

    /// Convert a document with the default engine.
    pub fn convert(&self, path: &Path) -> Result<DocTree> {
        let engine = self
            .default_engine()
            .ok_or_else(|| Error::Other("no markup engine registered".into()))?;
        Self::check_extension(&*engine, path)?;
        engine.convert_path(path)
    }

    /// Convert a document with a named engine.
    pub fn convert_with(&self, name: &str, path: &Path) -> Result<DocTree> {
        let engine = self
            .get(name)
            .ok_or_else(|| Error::UnknownEngine(name.to_string()))?;
        Self::check_extension(&*engine, path)?;
        engine.convert_path(path)
    }

    fn check_extension(engine: &dyn MarkupEngine, path: &Path) -> Result<()> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))?;
        if !engine.supports_extension(ext) {
            return Err(Error::UnsupportedFormat(ext.to_string()));
        }
        Ok(())
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
