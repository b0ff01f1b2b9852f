//! Structured extraction from the flattened line sequence.

use crate::flatten::{from_markdown, FlattenedLine, Section, BREAK_MARKER};
use crate::heuristics;

use super::{Assignment, Certification, ConsultantProfile, EducationEntry, LanguageProficiency};

/// Extract a [`ConsultantProfile`] from a flattened line sequence.
///
/// One left-to-right scan with a cursor and a current-section state. Entry
/// records are built incrementally and appended only once complete; an
/// assignment left open at end-of-input is flushed exactly once after the
/// scan.
pub fn extract(lines: &[FlattenedLine]) -> ConsultantProfile {
    Extractor::new().run(lines)
}

/// Extract a profile from rendered intermediate Markdown.
pub fn extract_from_markdown(markdown: &str) -> ConsultantProfile {
    extract(&from_markdown(markdown))
}

struct Extractor {
    profile: ConsultantProfile,
    section: Option<Section>,
    seen_recognized: bool,
    summary: Vec<String>,
    assignment: Option<Assignment>,
}

impl Extractor {
    fn new() -> Self {
        Self {
            profile: ConsultantProfile::new(),
            section: None,
            seen_recognized: false,
            summary: Vec::new(),
            assignment: None,
        }
    }

    /// Whether a recognized section heading has been seen yet. Free text
    /// only counts toward the summary before that point; the preamble never
    /// reopens, even when a later heading is unrecognized.
    fn in_preamble(&self) -> bool {
        !self.seen_recognized
    }

    fn finish_assignment(&mut self) {
        if let Some(assignment) = self.assignment.take() {
            self.profile.assignments.push(assignment);
        }
    }

    fn run(mut self, lines: &[FlattenedLine]) -> ConsultantProfile {
        let mut i = 0;
        while i < lines.len() {
            let line = &lines[i];
            match line.heading_level() {
                _ if line.is_blank() => i += 1,
                Some(1) => {
                    self.profile.name = line.text().to_string();
                    i += 1;
                }
                Some(2) if self.in_preamble() => {
                    self.profile.title = line.text().to_string();
                    i += 1;
                }
                Some(3) => {
                    // A section boundary closes any in-progress assignment.
                    self.finish_assignment();
                    let section = Section::from_heading(line.text());
                    if section.is_recognized() {
                        self.seen_recognized = true;
                    }
                    self.section = Some(section);
                    i += 1;
                }
                Some(4) => i = self.entry(lines, i),
                _ => {
                    i = self.plain_line(lines, i);
                }
            }
        }
        self.finish_assignment();
        self.profile.summary = self.summary.join("\n").trim().to_string();
        self.profile
    }

    /// Dispatch a level-4 heading on the current section.
    fn entry(&mut self, lines: &[FlattenedLine], i: usize) -> usize {
        let text = lines[i].text().to_string();
        match self.section {
            Some(Section::Experience) => self.experience_entry(lines, i, &text),
            Some(Section::Education) => self.education_entry(lines, i, &text),
            Some(Section::Certifications) => self.certification_entry(lines, i, &text),
            Some(Section::Competences) => {
                // Competence tables put skill-group names in heading cells;
                // the text is skills data, not structure.
                self.push_skills(&text);
                i + 1
            }
            Some(Section::Languages) => self.language_entry(lines, i, &text),
            // Unknown sections advance without mutating the record.
            _ => i + 1,
        }
    }

    fn plain_line(&mut self, lines: &[FlattenedLine], i: usize) -> usize {
        let text = lines[i].text();
        match self.section {
            Some(Section::Competences) => self.push_skills(text),
            _ if self.in_preamble() && lines[i].heading_level().is_none() => {
                self.summary.push(text.to_string());
            }
            _ => {}
        }
        i + 1
    }

    fn push_skills(&mut self, text: &str) {
        if text.contains(',') {
            for skill in text.split(',') {
                let skill = skill.trim();
                if !skill.is_empty() {
                    self.profile.skills.push(skill.to_string());
                }
            }
        } else if !text.trim().is_empty() {
            self.profile.skills.push(text.trim().to_string());
        }
    }

    /// Experience entry: company heading, then a duration/location/role
    /// lookahead, then lines classified into role, tech stack, and prose.
    fn experience_entry(&mut self, lines: &[FlattenedLine], mut i: usize, company: &str) -> usize {
        self.finish_assignment();
        let mut assignment = Assignment::for_company(company);
        i += 1;

        if let Some(FlattenedLine::Content(text)) = lines.get(i) {
            if heuristics::contains_year(text) {
                assignment.duration = text.clone();
                i += 1;
            }
        }
        if let Some(FlattenedLine::Content(text)) = lines.get(i) {
            if !heuristics::starts_with_year(text) {
                assignment.location = text.clone();
                i += 1;
            }
        }
        if let Some(line) = lines.get(i) {
            if line.heading_level() == Some(5) {
                assignment.role = line.text().to_string();
                i += 1;
            }
        }

        let mut description: Vec<String> = Vec::new();
        while i < lines.len() {
            let line = &lines[i];
            match line.heading_level() {
                Some(3) | Some(4) => break,
                Some(5) if assignment.role.is_empty() => {
                    assignment.role = line.text().to_string();
                }
                _ if line.is_blank() => {}
                _ => {
                    let text = line.text();
                    if heuristics::is_stack_line(text) {
                        assignment.tech_stack.push(text.to_string());
                    } else {
                        description.push(text.to_string());
                    }
                }
            }
            i += 1;
        }
        assignment.description = description.join(" ").trim().to_string();

        // Finalized lazily: the entry closes at the next heading, the next
        // section, or end-of-input.
        self.assignment = Some(assignment);
        i
    }

    fn education_entry(&mut self, lines: &[FlattenedLine], mut i: usize, heading: &str) -> usize {
        let degree = heading.replace(BREAK_MARKER, "").trim().to_string();
        let mut entry = EducationEntry {
            degree,
            ..EducationEntry::default()
        };
        i += 1;

        let mut description: Vec<String> = Vec::new();
        while i < lines.len() {
            let line = &lines[i];
            if matches!(line.heading_level(), Some(3) | Some(4)) {
                break;
            }
            if !line.is_blank() {
                let text = line.text();
                if entry.institution.is_empty() {
                    entry.institution = text.to_string();
                } else if entry.duration.is_empty() && heuristics::contains_year(text) {
                    entry.duration = text.to_string();
                } else {
                    description.push(text.to_string());
                }
            }
            i += 1;
        }
        entry.description = description.join(" ");
        self.profile.education.push(entry);
        i
    }

    fn certification_entry(&mut self, lines: &[FlattenedLine], mut i: usize, title: &str) -> usize {
        let title = title.replace(BREAK_MARKER, "").trim().to_string();
        let mut year = String::new();
        let mut description: Vec<String> = Vec::new();
        i += 1;

        while i < lines.len() {
            let line = &lines[i];
            if matches!(line.heading_level(), Some(3) | Some(4)) {
                break;
            }
            if !line.is_blank() {
                let text = line.text();
                if heuristics::is_bare_year(text) {
                    year = text.to_string();
                    i += 1;
                    break;
                }
                description.push(text.to_string());
            }
            i += 1;
        }

        self.profile.certifications.push(Certification {
            title,
            description: description.join(" "),
            year,
        });
        i
    }

    /// Language entry: the single line following the heading is the
    /// proficiency level.
    fn language_entry(&mut self, lines: &[FlattenedLine], mut i: usize, language: &str) -> usize {
        let mut entry = LanguageProficiency {
            language: language.to_string(),
            proficiency: String::new(),
        };
        i += 1;
        while i < lines.len() && lines[i].is_blank() {
            i += 1;
        }
        if let Some(FlattenedLine::Content(text)) = lines.get(i) {
            entry.proficiency = text.clone();
            i += 1;
        }
        self.profile.languages.push(entry);
        i
    }
}
