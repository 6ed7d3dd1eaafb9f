//! Skills and spoken-language extractors.

use super::entries::strip_bullet;
use super::sections::{SectionKind, SectionRange};
use super::Extracted;

pub const MAX_SKILLS: usize = 15;
pub const MAX_LANGUAGES: usize = 10;
const MAX_GROUP_LABEL_WORDS: usize = 4;
const SKILL_DELIMITERS: &[char] = &[',', ';', '|', '•', '-'];
const LANGUAGE_DELIMITERS: &[char] = &[',', ';', '|', '•'];

/// Splits the skills section into tokens of 2–29 characters, at most 15.
pub fn extract_skills(lines: &[String]) -> Extracted<Vec<String>> {
    let Some(range) = SectionKind::Skills.locate(lines) else {
        return Extracted::NotFound;
    };
    split_tokens(&section_text(&range, lines), SKILL_DELIMITERS, MAX_SKILLS).into()
}

/// Spoken languages, e.g. `English (native), Spanish`.
pub fn extract_languages(lines: &[String]) -> Extracted<Vec<String>> {
    let Some(range) = SectionKind::Languages.locate(lines) else {
        return Extracted::NotFound;
    };
    split_tokens(
        &section_text(&range, lines),
        LANGUAGE_DELIMITERS,
        MAX_LANGUAGES,
    )
    .into()
}

/// Inline heading content plus every body line, one per row. Sub-group labels such
/// as `Frameworks:` are dropped.
fn section_text(range: &SectionRange, lines: &[String]) -> String {
    let mut rows: Vec<&str> = range.inline_content(lines).into_iter().collect();
    rows.extend(
        range
            .body(lines)
            .iter()
            .map(|line| strip_group_label(strip_bullet(line).unwrap_or(line))),
    );
    rows.join("\n")
}

/// `Frameworks: React, Axum` → `React, Axum`. URLs and unlabelled lines pass through.
fn strip_group_label(line: &str) -> &str {
    let Some((label, rest)) = line.split_once(':') else {
        return line;
    };
    let is_label = !label.trim().is_empty()
        && label.split_whitespace().count() <= MAX_GROUP_LABEL_WORDS
        && label
            .chars()
            .all(|c| c.is_alphabetic() || c.is_whitespace() || "&/-".contains(c));
    if is_label && !rest.trim().is_empty() && !rest.starts_with("//") {
        rest.trim()
    } else {
        line
    }
}

fn split_tokens(text: &str, delimiters: &[char], cap: usize) -> Option<Vec<String>> {
    let tokens: Vec<String> = text
        .split(|c: char| c == '\n' || delimiters.contains(&c))
        .map(str::trim)
        .filter(|token| (2..30).contains(&token.chars().count()))
        .take(cap)
        .map(String::from)
        .collect();

    (!tokens.is_empty()).then_some(tokens)
}
