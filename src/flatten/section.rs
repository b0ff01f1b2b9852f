//! CV section vocabulary.

use serde::{Deserialize, Serialize};

/// The logical CV category established by the most recent level-3 heading.
///
/// Section names are recognized against a fixed bilingual (English/Swedish)
/// vocabulary. Anything else becomes [`Section::Other`] and is handled by
/// the default, data-preserving paths; the unrecognized case is an explicit
/// variant, not a silent fallthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Experience / Erfarenhet
    Experience,
    /// Education / Utbildning
    Education,
    /// Courses and certifications / Kurser och certifieringar
    Certifications,
    /// Competences / Kompetenser
    Competences,
    /// Languages / Språk
    Languages,
    /// Any other heading text, kept verbatim
    Other(String),
}

impl Section {
    /// Normalize a heading text into a section.
    ///
    /// Matching case-folds both sides, so "ERFARENHET" and "Experience"
    /// land in the same variant.
    pub fn from_heading(text: &str) -> Self {
        let folded = text.trim().to_lowercase();
        match folded.as_str() {
            "experience" | "erfarenhet" => Section::Experience,
            "education" | "utbildning" => Section::Education,
            "courses and certifications" | "kurser och certifieringar" => Section::Certifications,
            "competences" | "kompetenser" => Section::Competences,
            "languages" | "språk" => Section::Languages,
            _ => Section::Other(text.trim().to_string()),
        }
    }

    /// Whether this section shares the education-style table layout
    /// (left cell entry + right cell date).
    pub fn is_education_family(&self) -> bool {
        matches!(
            self,
            Section::Education | Section::Certifications | Section::Competences
        )
    }

    /// Whether the section was recognized from the fixed vocabulary.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Section::Other(_))
    }
}

impl Default for Section {
    fn default() -> Self {
        Section::Other(String::new())
    }
}
