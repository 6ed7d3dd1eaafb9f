//! List-section extractors: work experience, education, projects and certifications.
//!
//! Each one locates its section, tokenizes it into raw entries and then reads fields
//! out of every entry. Caps are applied later by the normalizer.

use once_cell::sync::Lazy;
use regex::Regex;

use super::contact::normalize_link;
use super::entries::{
    contains_year, infer_dates, is_institution_line, strip_bullet, strip_dates, tokenize_entries,
    DateSpan, EntryStyle, RawEntry,
};
use super::sections::SectionKind;
use super::Extracted;
use crate::models::{Certification, EducationEntry, ProjectEntry, WorkExperienceEntry};

/// Separators between role, company, school and degree inside a header line.
static HEADER_SPLIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*\|\s*|\s*,\s*|\s+[-–—]\s+|\s+at\s+|\s+@\s+").expect("header split regex")
});

static DEGREE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:bachelor|master|doctor|associate|diploma|ph\.?\s?d|mba|b\.?\s?(?:sc|s|a|e|eng|tech)|m\.?\s?(?:sc|s|a|e|eng|tech|ba))(?:\b|[.\s']|$)",
    )
    .expect("degree regex")
});

static LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://|www\.|(?:github|gitlab|bitbucket)\.(?:com|org)/)[^\s,;|()<>]*")
        .expect("link regex")
});

const ROLE_WORDS: &[&str] = &[
    "engineer",
    "developer",
    "manager",
    "analyst",
    "designer",
    "specialist",
    "intern",
    "lead",
    "director",
    "consultant",
    "architect",
    "scientist",
    "administrator",
    "coordinator",
    "officer",
    "associate",
    "head of",
];

pub fn extract_work_experience(
    lines: &[String],
    current_year: i32,
) -> Extracted<Vec<WorkExperienceEntry>> {
    section_entries(lines, SectionKind::Experience, EntryStyle::Timeline)
        .iter()
        .map(|entry| work_entry(entry, current_year))
        .collect::<Vec<_>>()
        .into()
}

pub fn extract_education(lines: &[String], current_year: i32) -> Extracted<Vec<EducationEntry>> {
    section_entries(lines, SectionKind::Education, EntryStyle::Education)
        .iter()
        .map(|entry| education_entry(entry, current_year))
        .collect::<Vec<_>>()
        .into()
}

pub fn extract_projects(lines: &[String], current_year: i32) -> Extracted<Vec<ProjectEntry>> {
    section_entries(lines, SectionKind::Projects, EntryStyle::Timeline)
        .iter()
        .map(|entry| project_entry(entry, current_year))
        .collect::<Vec<_>>()
        .into()
}

/// One certification per line: `Name, Issuer` or `Name | Issuer | link`.
pub fn extract_certifications(lines: &[String]) -> Extracted<Vec<Certification>> {
    let Some(range) = SectionKind::Certifications.locate(lines) else {
        return Extracted::NotFound;
    };

    range
        .body(lines)
        .iter()
        .map(|line| strip_bullet(line).unwrap_or(line))
        .filter_map(|line| {
            let link = LINK_RE
                .find(line)
                .map(|m| normalize_link(m.as_str()))
                .unwrap_or_default();
            let without_link = LINK_RE.replace_all(line, "");
            let mut parts = header_segments(&without_link).into_iter();
            let name = parts.next()?;
            Some(Certification {
                name,
                issuer: parts.next().unwrap_or_default(),
                link,
            })
        })
        .collect::<Vec<_>>()
        .into()
}

fn section_entries(lines: &[String], kind: SectionKind, style: EntryStyle) -> Vec<RawEntry> {
    kind.locate(lines)
        .map(|range| tokenize_entries(range.body(lines), style))
        .unwrap_or_default()
}

fn work_entry(entry: &RawEntry, current_year: i32) -> WorkExperienceEntry {
    let parts = header_segments(&entry.header);
    let (position, company) = match parts.as_slice() {
        [] => (String::new(), String::new()),
        [only] if is_role(only) => (only.clone(), String::new()),
        [only] => (String::new(), only.clone()),
        [first, second, ..] if is_role(second) && !is_role(first) => {
            (second.clone(), first.clone())
        }
        [first, second, ..] => (first.clone(), second.clone()),
    };
    let dates = entry_dates(entry, current_year);

    WorkExperienceEntry {
        company,
        position,
        description: entry.description_text(),
        key_achievements: entry.key_achievements_text(),
        start_year: dates.start,
        end_year: dates.end,
    }
}

fn education_entry(entry: &RawEntry, current_year: i32) -> EducationEntry {
    let header_parts = header_segments(&entry.header);
    let detail_parts = entry
        .detail
        .as_deref()
        .map(header_segments)
        .unwrap_or_default();

    let school = header_parts
        .iter()
        .find(|part| is_institution_line(part))
        .cloned()
        .unwrap_or_else(|| strip_dates(&entry.header));
    let degree = header_parts
        .iter()
        .chain(detail_parts.iter())
        .find(|part| DEGREE_RE.is_match(part))
        .cloned()
        .unwrap_or_default();

    let date_text = match &entry.detail {
        Some(detail) => format!("{}\n{}", entry.header, detail),
        None => entry.header.clone(),
    };
    let dates = infer_dates(&date_text, current_year);

    EducationEntry {
        school,
        degree,
        start_year: dates.start,
        end_year: dates.end,
    }
}

fn project_entry(entry: &RawEntry, current_year: i32) -> ProjectEntry {
    let link = LINK_RE
        .find(&entry.full_text())
        .map(|m| normalize_link(m.as_str()))
        .unwrap_or_default();
    let header_without_link = LINK_RE.replace_all(&entry.header, "");
    let name = header_segments(&header_without_link)
        .into_iter()
        .next()
        .unwrap_or_default();
    let dates = entry_dates(entry, current_year);

    ProjectEntry {
        name,
        description: entry.description_text(),
        key_achievements: entry.key_achievements_text(),
        start_year: dates.start,
        end_year: dates.end,
        link,
    }
}

/// Dates from the header line, falling back to the whole entry when the header has none.
fn entry_dates(entry: &RawEntry, current_year: i32) -> DateSpan {
    if contains_year(&entry.header) {
        infer_dates(&entry.header, current_year)
    } else {
        infer_dates(&entry.full_text(), current_year)
    }
}

fn header_segments(text: &str) -> Vec<String> {
    HEADER_SPLIT_RE
        .split(&strip_dates(text))
        .map(|part| part.trim_matches(|c: char| c.is_whitespace() || "()".contains(c)))
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

fn is_role(text: &str) -> bool {
    let lower = text.to_lowercase();
    ROLE_WORDS.iter().any(|role| lower.contains(role))
}
