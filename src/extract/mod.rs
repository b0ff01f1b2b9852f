//! Structured extraction: flattened lines to a consultant profile.

mod extractor;
mod profile;

pub use extractor::{extract, extract_from_markdown};
pub use profile::{
    Assignment, Certification, ConsultantProfile, EducationEntry, LanguageProficiency,
};
