//! Entry Tokenizer: splits a located section into discrete entries.
//!
//! # Boundary rules
//! - Timeline (work experience, projects): a non-bullet line containing `|` or a
//!   4-digit year opens a new entry. Following plain lines go to the description,
//!   bullet lines go to key achievements. Lines before the first boundary are dropped.
//! - Education: a line naming an institution (University, College, Institute, School)
//!   opens a new entry; the next line is kept as its detail line.

use once_cell::sync::Lazy;
use regex::Regex;

static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("year regex"));

static DATE_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+((?:19|20)\d{2})|(\d{1,2})/((?:19|20)\d{2})|((?:19|20)\d{2}))\b",
    )
    .expect("date token regex")
});

static PRESENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:present|current|now|ongoing)\b").expect("present regex"));

const BULLET_MARKERS: &[char] = &['-', '•', '*', '▪', '●', '◦'];
const INSTITUTION_KEYWORDS: &[&str] = &["university", "college", "institute", "school"];
const MONTHS: &[&str] = &[
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStyle {
    Timeline,
    Education,
}

/// One unparsed entry: the boundary line plus whatever followed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub header: String,
    /// Line right after an education boundary (degree and dates often live here).
    pub detail: Option<String>,
    pub description: Vec<String>,
    pub key_achievements: Vec<String>,
}

impl RawEntry {
    fn new(header: &str) -> Self {
        Self {
            header: header.to_string(),
            ..Default::default()
        }
    }

    pub fn description_text(&self) -> String {
        self.description.join(" ")
    }

    pub fn key_achievements_text(&self) -> String {
        self.key_achievements.join("\n")
    }

    /// Header, detail and body joined; used for link and date lookups.
    pub fn full_text(&self) -> String {
        let mut parts = vec![self.header.as_str()];
        parts.extend(self.detail.as_deref());
        parts.extend(self.description.iter().map(String::as_str));
        parts.extend(self.key_achievements.iter().map(String::as_str));
        parts.join("\n")
    }
}

pub fn tokenize_entries(section_lines: &[String], style: EntryStyle) -> Vec<RawEntry> {
    match style {
        EntryStyle::Timeline => tokenize_timeline(section_lines),
        EntryStyle::Education => tokenize_education(section_lines),
    }
}

fn tokenize_timeline(lines: &[String]) -> Vec<RawEntry> {
    let mut entries: Vec<RawEntry> = Vec::new();

    for line in lines {
        if is_timeline_boundary(line) {
            entries.push(RawEntry::new(line));
            continue;
        }
        let Some(current) = entries.last_mut() else {
            continue;
        };
        match strip_bullet(line) {
            Some(text) if !text.is_empty() => current.key_achievements.push(text.to_string()),
            Some(_) => {}
            None => current.description.push(line.clone()),
        }
    }

    entries
}

fn tokenize_education(lines: &[String]) -> Vec<RawEntry> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_institution_line(line))
        .map(|(i, line)| {
            let mut entry = RawEntry::new(line);
            entry.detail = lines
                .get(i + 1)
                .filter(|next| !is_institution_line(next))
                .cloned();
            entry
        })
        .collect()
}

fn is_timeline_boundary(line: &str) -> bool {
    !is_bullet(line) && (line.contains('|') || contains_year(line))
}

pub fn is_institution_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    INSTITUTION_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

pub fn is_bullet(line: &str) -> bool {
    line.trim_start().starts_with(BULLET_MARKERS)
}

/// Text after the bullet marker, or `None` if the line is not a bullet.
pub fn strip_bullet(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    trimmed
        .strip_prefix(BULLET_MARKERS)
        .map(|rest| rest.trim_start_matches(BULLET_MARKERS).trim())
}

pub fn contains_year(text: &str) -> bool {
    YEAR_RE.is_match(text)
}

/// True if the line starts with a 4-digit year (e.g. `2019 - Joined Acme`).
pub fn starts_with_year(line: &str) -> bool {
    YEAR_RE.find(line.trim_start()).is_some_and(|m| m.start() == 0)
}

// ────────────────────────────────────────────────────────────────────────────
// Dates
// ────────────────────────────────────────────────────────────────────────────

/// Start/end dates in `YYYY-MM-DD` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSpan {
    pub start: String,
    pub end: String,
}

/// Infers a date span from free text.
///
/// The first two date tokens are start and end. A single token is both start and end,
/// unless the text says "present"/"current", in which case the end is the current
/// year. With no token at all, both fall back to the current year.
pub fn infer_dates(text: &str, current_year: i32) -> DateSpan {
    let dates: Vec<(i32, u32)> = DATE_TOKEN_RE
        .captures_iter(text)
        .filter_map(|caps| {
            if let (Some(month), Some(year)) = (caps.get(1), caps.get(2)) {
                let month = month_index(month.as_str());
                return year.as_str().parse().ok().map(|y| (y, month));
            }
            if let (Some(month), Some(year)) = (caps.get(3), caps.get(4)) {
                let month = month
                    .as_str()
                    .parse::<u32>()
                    .ok()
                    .filter(|m| (1..=12).contains(m))
                    .unwrap_or(1);
                return year.as_str().parse().ok().map(|y| (y, month));
            }
            caps.get(5)
                .and_then(|year| year.as_str().parse().ok())
                .map(|y| (y, 1))
        })
        .collect();

    let placeholder = format_date(current_year, 1);
    match dates.as_slice() {
        [] => DateSpan {
            start: placeholder.clone(),
            end: placeholder,
        },
        [(year, month)] => DateSpan {
            start: format_date(*year, *month),
            end: if PRESENT_RE.is_match(text) {
                placeholder
            } else {
                format_date(*year, *month)
            },
        },
        [(y1, m1), (y2, m2), ..] => DateSpan {
            start: format_date(*y1, *m1),
            end: format_date(*y2, *m2),
        },
    }
}

/// Removes date tokens and "present" markers, then trims dangling separators.
pub fn strip_dates(text: &str) -> String {
    let without_dates = DATE_TOKEN_RE.replace_all(text, "");
    let without_present = PRESENT_RE.replace_all(&without_dates, "");
    without_present
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| c.is_whitespace() || "-–—,|()".contains(c))
        .to_string()
}

fn month_index(name: &str) -> u32 {
    let lower = name.to_lowercase();
    MONTHS
        .iter()
        .position(|m| lower.starts_with(m))
        .map_or(1, |i| i as u32 + 1)
}

fn format_date(year: i32, month: u32) -> String {
    format!("{year:04}-{month:02}-01")
}
