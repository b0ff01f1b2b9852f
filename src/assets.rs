//! Portrait image extraction from the source document archive.
//!
//! A docx file is a zip archive; embedded pictures live under `word/media/`.
//! The consultant portrait is taken to be the largest embedded raster image,
//! which holds for the documents this pipeline sees (logos and decorations
//! are small or vector).

use crate::error::Result;

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Archive prefix under which docx stores embedded pictures.
const MEDIA_PREFIX: &str = "word/media/";

/// Extensions that mark vector or metafile formats, never a portrait.
const SKIPPED_EXTENSIONS: &[&str] = &["emf", "wmf", "svg"];

/// An embedded raster image pulled out of the source document.
#[derive(Debug, Clone)]
pub struct MediaImage {
    /// Raw image bytes
    pub data: Vec<u8>,

    /// Archive entry name ("word/media/image1.jpg")
    pub name: String,

    /// File extension, lowercase, without the dot
    pub extension: String,
}

impl MediaImage {
    /// Size of the image data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// MIME type detected from magic bytes, if recognized.
    pub fn mime_type(&self) -> Option<&'static str> {
        detect_mime_type(&self.data)
    }

    /// Write the image to a temporary file and return its path.
    ///
    /// The file is persisted; the caller owns the cleanup. The path is what
    /// feeds the template context's `image_path`.
    pub fn write_temp(&self) -> Result<PathBuf> {
        let file = tempfile::Builder::new()
            .prefix("cvmark-portrait")
            .suffix(&format!(".{}", self.extension))
            .tempfile()?;
        std::fs::write(file.path(), &self.data)?;
        let (_, path) = file.keep().map_err(|e| e.error)?;
        Ok(path)
    }
}

/// Extract the consultant portrait from a document file.
///
/// Returns the largest embedded raster image under the media path, or
/// `None` when no entry qualifies. A document without pictures is not an
/// error.
pub fn extract_portrait(path: &Path) -> Result<Option<MediaImage>> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    // Collect candidates first; entries must be re-opened by name to read.
    let mut candidates: Vec<(String, u64)> = Vec::new();
    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;
        let name = entry.name().to_string();
        if !name.starts_with(MEDIA_PREFIX) {
            continue;
        }
        let extension = entry_extension(&name);
        if SKIPPED_EXTENSIONS.contains(&extension.as_str()) {
            log::debug!("skipping vector media entry {}", name);
            continue;
        }
        candidates.push((name, entry.size()));
    }
    candidates.sort_by(|a, b| b.1.cmp(&a.1));

    let Some((name, _)) = candidates.into_iter().next() else {
        return Ok(None);
    };

    let mut entry = archive.by_name(&name)?;
    let mut data = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut data)?;

    let extension = entry_extension(&name);
    Ok(Some(MediaImage {
        data,
        name,
        extension,
    }))
}

fn entry_extension(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase()
}

/// Detect an image MIME type from magic bytes.
pub fn detect_mime_type(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some("image/png");
    }
    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return Some("image/gif");
    }
    if data.starts_with(b"BM") {
        return Some("image/bmp");
    }
    if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    None
}
