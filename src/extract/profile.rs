//! The structured consultant profile record.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The structured record produced from a flattened CV.
///
/// Every entry in the sequence fields is fully populated before it is
/// appended; the extractor never exposes a partially-built entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsultantProfile {
    /// Consultant name, from the document title
    pub name: String,

    /// Professional title, from the level-2 heading below the name
    pub title: String,

    /// Free text found before the first recognized section
    pub summary: String,

    /// Flat skills list (not deduplicated)
    pub skills: Vec<String>,

    /// Assignments under the Experience section
    pub assignments: Vec<Assignment>,

    /// Entries under the Education section
    pub education: Vec<EducationEntry>,

    /// Entries under the Courses and certifications section
    pub certifications: Vec<Certification>,

    /// Entries under the Languages section
    pub languages: Vec<LanguageProficiency>,

    /// Extracted portrait image, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<PathBuf>,
}

impl ConsultantProfile {
    /// Create an empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no structured data was recognized at all.
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
            && self.assignments.is_empty()
            && self.education.is_empty()
            && self.certifications.is_empty()
            && self.languages.is_empty()
    }
}

/// One engagement under the Experience section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Client or employer name
    pub company: String,

    /// Role title
    pub role: String,

    /// Date range text ("Jan 2020 – Dec 2023")
    pub duration: String,

    /// Location text
    pub location: String,

    /// Concatenated prose description
    pub description: String,

    /// Short technology tokens, in encounter order
    pub tech_stack: Vec<String>,
}

impl Assignment {
    /// Start an assignment knowing only the company.
    pub fn for_company(company: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            ..Self::default()
        }
    }
}

/// One entry under the Education section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    /// Degree title
    pub degree: String,

    /// Institution name
    pub institution: String,

    /// Date range text
    pub duration: String,

    /// Concatenated prose description
    pub description: String,
}

/// One entry under the Courses and certifications section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    /// Certification title
    pub title: String,

    /// Concatenated prose description
    pub description: String,

    /// Issue year, when present as a bare year line
    pub year: String,
}

/// One entry under the Languages section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageProficiency {
    /// Language name
    pub language: String,

    /// Proficiency level text
    pub proficiency: String,
}
