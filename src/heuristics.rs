//! Layout classification heuristics.
//!
//! The source documents carry no markup that distinguishes a technology
//! token ("Kubernetes") from prose or from a date fragment, so classification
//! is lexical. All thresholds live here as named constants so boundary values
//! can be probed exactly in tests. This is a best-effort classifier: authors
//! who write very short descriptions or very long single-word technology
//! names will be misclassified, and that is accepted.

use regex::Regex;
use std::sync::OnceLock;

/// Maximum number of whitespace-separated words for a fragment to qualify as
/// a technology/skill token.
pub const TECH_TOKEN_MAX_WORDS: usize = 3;

/// Fragments longer than this (in characters) are treated as prose. The
/// single longest fragment above the threshold inside an experience cell is
/// taken as the assignment description.
pub const DESCRIPTION_MIN_CHARS: usize = 50;

/// A leading "20" marks a fragment as year-like ("2021", "2019–2023").
pub const YEAR_PREFIX: &str = "20";

/// A trailing "er" catches Swedish/English agent nouns used as role titles
/// ("Utvecklare" does not match, but "Developer", "Tekniker" and similar do).
pub const ROLE_SUFFIX: &str = "er";

/// Company-name suffixes that disqualify a fragment from being a tech token.
pub const COMPANY_SUFFIXES: &[&str] = &["AB", "Inc", "LLC"];

/// Month names, English and Swedish, lowercase.
pub const MONTH_NAMES: &[&str] = &[
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
    "januari",
    "februari",
    "mars",
    "maj",
    "juni",
    "juli",
    "augusti",
    "oktober",
    "december",
];

fn year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{4}").expect("valid regex"))
}

fn bare_year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}$").expect("valid regex"))
}

fn leading_year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}").expect("valid regex"))
}

/// Whether the line contains a 4-digit year anywhere ("Jan 2020 – Dec 2023").
pub fn contains_year(text: &str) -> bool {
    year_re().is_match(text)
}

/// Whether the line is exactly a 4-digit year ("2021").
pub fn is_bare_year(text: &str) -> bool {
    bare_year_re().is_match(text)
}

/// Whether the line opens with a 4-digit year ("2020–2023").
pub fn starts_with_year(text: &str) -> bool {
    leading_year_re().is_match(text)
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn matches_month(word: &str) -> bool {
    let folded = word.to_lowercase();
    MONTH_NAMES.iter().any(|m| *m == folded)
}

fn matches_company_suffix(word: &str) -> bool {
    COMPANY_SUFFIXES.iter().any(|s| *s == word)
}

/// Classify a text fragment as a technology/skill token.
///
/// A token has at most [`TECH_TOKEN_MAX_WORDS`] words and none of its words
/// look like a month name, a company suffix, an agent-noun role title, or a
/// year. Everything else is prose.
pub fn is_tech_token(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() || word_count(text) > TECH_TOKEN_MAX_WORDS {
        return false;
    }
    for word in text.split_whitespace() {
        if matches_month(word)
            || matches_company_suffix(word)
            || word.ends_with(ROLE_SUFFIX)
            || word.starts_with(YEAR_PREFIX)
        {
            return false;
        }
    }
    true
}

/// The extractor's cheaper line-level variant: short lines that do not end a
/// sentence are taken as tech-stack entries.
pub fn is_stack_line(text: &str) -> bool {
    let text = text.trim();
    !text.is_empty() && word_count(text) <= TECH_TOKEN_MAX_WORDS && !text.ends_with('.')
}

/// Split the candidate fragments of an experience cell into one description
/// and the remaining tech-stack tokens.
///
/// The single longest fragment above [`DESCRIPTION_MIN_CHARS`] becomes the
/// description; every other sub-threshold fragment is kept as a stack line,
/// deduplicated, in the original encounter order. Short prose that fails
/// [`is_tech_token`] is preserved too — dropping data here would lose it
/// from the flattened artifact entirely, and the consumer reclassifies
/// lines anyway.
pub fn split_description_and_stack(fragments: &[String]) -> (Option<String>, Vec<String>) {
    let description = fragments
        .iter()
        .filter(|f| f.chars().count() > DESCRIPTION_MIN_CHARS)
        .max_by_key(|f| f.chars().count())
        .cloned();

    let mut stack: Vec<String> = Vec::new();
    for fragment in fragments {
        let fragment = fragment.trim();
        if fragment.chars().count() < 2 || fragment.chars().count() > DESCRIPTION_MIN_CHARS {
            continue;
        }
        if !stack.iter().any(|s| s == fragment) {
            stack.push(fragment.to_string());
        }
    }
    (description, stack)
}
