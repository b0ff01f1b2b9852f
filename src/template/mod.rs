//! Template-rendering boundary.
//!
//! The merge engine that fills a document template is an external
//! collaborator behind [`TemplateRenderer`]. This module owns what feeds
//! it: the plain key/value context derived from a profile, and the derived
//! view filters the templates rely on.

use crate::error::{Error, Result};
use crate::extract::{Certification, ConsultantProfile};

use serde_json::{json, Value};
use std::path::Path;

/// Checkmark glyph used by the checklist views.
pub const CHECKMARK: &str = "✔";

/// Number of skills shown in the main skills section; the full list stays
/// available under `skills_full`.
pub const MAX_SKILLS: usize = 10;

/// Number of certifications shown in the main section.
pub const MAX_CERTIFICATIONS: usize = 5;

/// External engine filling named placeholders in a document template.
pub trait TemplateRenderer: Send + Sync {
    /// Fill `template` with `context` and write the result to `output`.
    fn render(&self, template: &Path, context: &Value, output: &Path) -> Result<()>;
}

/// Render a string sequence as a checkmarked list, one item per line.
pub fn checklist(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("{} {}", CHECKMARK, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Titles-only checklist view of certifications.
pub fn certification_titles(certifications: &[Certification]) -> String {
    let titles: Vec<String> = certifications.iter().map(|c| c.title.clone()).collect();
    checklist(&titles)
}

/// Build the key/value context handed to the template renderer.
///
/// Missing education and language fields render as `-` rather than empty
/// placeholders, and the capped lists carry `_full` companions so templates
/// can opt into either view.
pub fn build_context(profile: &ConsultantProfile) -> Value {
    let education: Vec<Value> = profile
        .education
        .iter()
        .map(|e| {
            json!({
                "degree": e.degree,
                "institution": placeholder(&e.institution),
                "duration": placeholder(&e.duration),
            })
        })
        .collect();

    let languages: Vec<Value> = profile
        .languages
        .iter()
        .map(|l| {
            json!({
                "language": l.language,
                "proficiency": placeholder(&l.proficiency),
            })
        })
        .collect();

    let mut context = json!({
        "consultant_name": profile.name,
        "title": profile.title,
        "summary": profile.summary,
        "skills": profile.skills.iter().take(MAX_SKILLS).collect::<Vec<_>>(),
        "skills_full": profile.skills,
        "skills_checklist": checklist(&profile.skills),
        "certifications": profile.certifications.iter().take(MAX_CERTIFICATIONS).collect::<Vec<_>>(),
        "certifications_full": profile.certifications,
        "certification_titles": certification_titles(&profile.certifications),
        "assignments": profile.assignments,
        "education": education,
        "languages": languages,
    });

    if let Some(ref image_path) = profile.image_path {
        context["image_path"] = json!(image_path.display().to_string());
    }

    context
}

fn placeholder(text: &str) -> String {
    if text.trim().is_empty() {
        "-".to_string()
    } else {
        text.to_string()
    }
}

/// Render a profile into an output document, staging through a temporary
/// file so a failed render leaves no partial output behind.
pub fn render_profile(
    renderer: &dyn TemplateRenderer,
    profile: &ConsultantProfile,
    template: &Path,
    output: &Path,
) -> Result<()> {
    let context = build_context(profile);

    let staging_dir = output.parent().unwrap_or_else(|| Path::new("."));
    let staged = tempfile::Builder::new()
        .prefix(".cvmark-render")
        .tempfile_in(staging_dir)?;

    renderer.render(template, &context, staged.path())?;

    staged
        .persist(output)
        .map_err(|e| Error::Template(format!("failed to move output into place: {}", e.error)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::LanguageProficiency;
    use std::fs;

    #[test]
    fn test_checklist() {
        let items = vec!["Systemutveckling".to_string(), "Cloud".to_string()];
        assert_eq!(checklist(&items), "✔ Systemutveckling\n✔ Cloud");
        assert_eq!(checklist(&[]), "");
    }

    #[test]
    fn test_certification_titles() {
        let certs = vec![
            Certification {
                title: "AWS Developer".to_string(),
                description: "Associate level.".to_string(),
                year: "2021".to_string(),
            },
            Certification {
                title: "CKA".to_string(),
                ..Certification::default()
            },
        ];
        assert_eq!(certification_titles(&certs), "✔ AWS Developer\n✔ CKA");
    }

    #[test]
    fn test_context_caps_and_full_lists() {
        let mut profile = ConsultantProfile::new();
        profile.skills = (0..12).map(|i| format!("skill{}", i)).collect();

        let context = build_context(&profile);
        assert_eq!(context["skills"].as_array().unwrap().len(), MAX_SKILLS);
        assert_eq!(context["skills_full"].as_array().unwrap().len(), 12);
    }

    #[test]
    fn test_context_placeholders() {
        let mut profile = ConsultantProfile::new();
        profile.languages.push(LanguageProficiency {
            language: "Svenska".to_string(),
            proficiency: String::new(),
        });

        let context = build_context(&profile);
        assert_eq!(context["languages"][0]["proficiency"], "-");
    }

    #[test]
    fn test_context_omits_missing_image() {
        let context = build_context(&ConsultantProfile::new());
        assert!(context.get("image_path").is_none());
    }

    struct WritingRenderer;

    impl TemplateRenderer for WritingRenderer {
        fn render(&self, _template: &Path, context: &Value, output: &Path) -> Result<()> {
            fs::write(output, context["consultant_name"].as_str().unwrap_or(""))?;
            Ok(())
        }
    }

    struct FailingRenderer;

    impl TemplateRenderer for FailingRenderer {
        fn render(&self, _template: &Path, _context: &Value, _output: &Path) -> Result<()> {
            Err(Error::Template("missing placeholder".to_string()))
        }
    }

    #[test]
    fn test_render_profile_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("cv.docx");
        let mut profile = ConsultantProfile::new();
        profile.name = "Philip".to_string();

        render_profile(&WritingRenderer, &profile, Path::new("template.docx"), &output).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "Philip");
    }

    #[test]
    fn test_failed_render_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("cv.docx");

        let err = render_profile(
            &FailingRenderer,
            &ConsultantProfile::new(),
            Path::new("template.docx"),
            &output,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Template(_)));
        assert!(!output.exists());
        // No stray staging files either.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
