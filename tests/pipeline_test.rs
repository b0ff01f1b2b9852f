//! Integration tests for the flatten-then-extract pipeline.

use cvmark::flatten::{self, FlattenedLine};
use cvmark::model::{Block, DocTree, List, Paragraph, Table, TableCell, TableRow};
use cvmark::{extract, BREAK_MARKER};

fn heading_cell(text: &str, level: u8) -> Block {
    Block::Paragraph(Paragraph::heading(text, level))
}

fn text_cell(text: &str) -> Block {
    Block::Paragraph(Paragraph::with_text(text))
}

fn stacked(first: &str, second: &str) -> Paragraph {
    let mut p = Paragraph::new();
    p.add_text(first);
    p.add_line_break();
    p.add_text(second);
    p
}

/// A parse tree shaped like the CV documents the pipeline targets:
/// preamble, then two-cell tables under each section heading.
fn sample_cv() -> DocTree {
    let mut tree = DocTree::new();

    tree.add_paragraph(Paragraph::heading("Philip Boukaras", 1));
    tree.add_paragraph(Paragraph::heading("Senior Fullstack-utvecklare", 2));
    tree.add_paragraph(Paragraph::with_text(
        "En driven utvecklare med tio års erfarenhet av webbplattformar.",
    ));

    tree.add_paragraph(Paragraph::heading("Kompetenser", 3));
    let mut skills = Table::new();
    skills.add_row(TableRow::pair(
        TableCell::text("Systemutveckling, Integration"),
        TableCell::text("Cloud, Ledarskap"),
    ));
    tree.add_block(Block::Table(skills));

    tree.add_paragraph(Paragraph::heading("Erfarenhet", 3));
    let mut experience = Table::new();
    experience.add_row(TableRow::pair(
        TableCell::new(vec![
            heading_cell("Vattenfall", 5),
            Block::Paragraph(stacked("Jan 2020 – Dec 2023", "Stockholm")),
        ]),
        TableCell::new(vec![
            heading_cell("Systemutvecklare", 5),
            text_cell("Ansvarade för migreringen av kärnsystemen till molnet och byggde CI/CD-flöden."),
            Block::List(List::bulleted(vec![
                Paragraph::with_text("Kubernetes"),
                Paragraph::with_text("C#"),
            ])),
        ]),
    ));
    experience.add_row(TableRow::pair(
        TableCell::text("Acme AB"),
        TableCell::new(vec![
            heading_cell("Backendutvecklare", 5),
            text_cell("Utvecklade betalningsflöden och integrationer mot externa partners."),
            text_cell("Java"),
        ]),
    ));
    tree.add_block(Block::Table(experience));

    tree.add_paragraph(Paragraph::heading("Utbildning", 3));
    let mut education = Table::new();
    education.add_row(TableRow::pair(
        TableCell::new(vec![Block::Paragraph(stacked(
            "Civilingenjör Datateknik",
            "KTH",
        ))]),
        TableCell::text("2010–2015"),
    ));
    tree.add_block(Block::Table(education));

    tree.add_paragraph(Paragraph::heading("Kurser och certifieringar", 3));
    let mut certifications = Table::new();
    certifications.add_row(TableRow::pair(
        TableCell::text("AWS Solutions Architect"),
        TableCell::text("2021"),
    ));
    tree.add_block(Block::Table(certifications));

    tree.add_paragraph(Paragraph::heading("Språk", 3));
    let mut languages = Table::new();
    languages.add_row(TableRow::pair(
        TableCell::text("Svenska"),
        TableCell::text("Modersmål"),
    ));
    languages.add_row(TableRow::pair(
        TableCell::text("Engelska"),
        TableCell::text("Flytande"),
    ));
    tree.add_block(Block::Table(languages));

    tree
}

#[test]
fn test_full_pipeline() {
    let lines = flatten::flatten(&sample_cv());
    let profile = extract::extract(&lines);

    assert_eq!(profile.name, "Philip Boukaras");
    assert_eq!(profile.title, "Senior Fullstack-utvecklare");
    assert_eq!(
        profile.summary,
        "En driven utvecklare med tio års erfarenhet av webbplattformar."
    );

    assert_eq!(
        profile.skills,
        vec!["Systemutveckling", "Integration", "Cloud", "Ledarskap"]
    );

    assert_eq!(profile.assignments.len(), 2);
    let first = &profile.assignments[0];
    assert_eq!(first.company, "Vattenfall");
    assert_eq!(first.role, "Systemutvecklare");
    assert_eq!(first.duration, "Jan 2020 – Dec 2023");
    assert_eq!(first.location, "Stockholm");
    assert_eq!(first.tech_stack, vec!["Kubernetes", "C#"]);
    assert!(first.description.contains("migreringen"));

    let second = &profile.assignments[1];
    assert_eq!(second.company, "Acme AB");
    assert_eq!(second.role, "Backendutvecklare");
    assert_eq!(second.tech_stack, vec!["Java"]);

    assert_eq!(profile.education.len(), 1);
    assert_eq!(profile.education[0].degree, "Civilingenjör Datateknik");
    assert_eq!(profile.education[0].institution, "KTH");
    assert_eq!(profile.education[0].duration, "2010–2015");

    assert_eq!(profile.certifications.len(), 1);
    assert_eq!(profile.certifications[0].title, "AWS Solutions Architect");
    assert_eq!(profile.certifications[0].year, "2021");

    assert_eq!(profile.languages.len(), 2);
    assert_eq!(profile.languages[0].language, "Svenska");
    assert_eq!(profile.languages[0].proficiency, "Modersmål");
    assert_eq!(profile.languages[1].language, "Engelska");
    assert_eq!(profile.languages[1].proficiency, "Flytande");
}

#[test]
fn test_pipeline_survives_markdown_round_trip() {
    let lines = flatten::flatten(&sample_cv());
    let markdown = flatten::to_markdown(&lines);

    let direct = extract::extract(&lines);
    let reparsed = extract::extract_from_markdown(&markdown);
    assert_eq!(direct, reparsed);
}

#[test]
fn test_education_heading_split_keeps_marker() {
    let mut tree = DocTree::new();
    tree.add_paragraph(Paragraph::heading("Utbildning", 3));
    let mut table = Table::new();
    table.add_row(TableRow::pair(
        TableCell::new(vec![Block::Paragraph(stacked("B.Sc.", "Chalmers"))]),
        TableCell::text("2012"),
    ));
    tree.add_block(Block::Table(table));

    let lines = flatten::flatten(&tree);
    let split_heading = format!("B.Sc.{}", BREAK_MARKER);
    assert!(lines.contains(&FlattenedLine::heading(4, split_heading)));

    // The marker is flattening metadata; the extracted degree drops it.
    let profile = extract::extract(&lines);
    assert_eq!(profile.education[0].degree, "B.Sc.");
    assert_eq!(profile.education[0].institution, "Chalmers");
}

#[test]
fn test_empty_tree_produces_empty_profile() {
    let lines = flatten::flatten(&DocTree::new());
    assert!(lines.is_empty());
    let profile = extract::extract(&lines);
    assert!(profile.is_empty());
    assert_eq!(profile.name, "");
}

#[test]
fn test_document_order_is_preserved() {
    let lines = flatten::flatten(&sample_cv());
    let headings: Vec<&str> = lines
        .iter()
        .filter(|l| l.heading_level() == Some(3))
        .map(|l| l.text())
        .collect();
    assert_eq!(
        headings,
        vec![
            "Kompetenser",
            "Erfarenhet",
            "Utbildning",
            "Kurser och certifieringar",
            "Språk",
        ]
    );
}
