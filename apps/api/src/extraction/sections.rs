//! Section Locator: finds the line range that belongs to a labeled resume section.
//!
//! A section starts on the line after its heading and runs until the next heading of a
//! different section, or to the end of the document.
//!
//! # Heading shape
//! Only the text before the first `:` is compared against keywords, and only when it
//! looks like a heading: at most 4 words, at most 40 characters, no digits, no `|`,
//! and no terminal period. Prose such as "8 years experience." never opens or closes
//! a section.

const MAX_HEADING_WORDS: usize = 4;
const MAX_HEADING_CHARS: usize = 40;

/// Line range of a located section. `start..end` excludes the heading line itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionRange {
    pub heading_index: usize,
    pub start: usize,
    pub end: usize,
}

impl SectionRange {
    /// Content lines of the section (heading excluded).
    pub fn body<'a>(&self, lines: &'a [String]) -> &'a [String] {
        &lines[self.start..self.end]
    }

    /// Inline content after the heading's colon, e.g. `Summary: I build compilers`.
    pub fn inline_content<'a>(&self, lines: &'a [String]) -> Option<&'a str> {
        lines[self.heading_index]
            .split_once(':')
            .map(|(_, rest)| rest.trim())
            .filter(|rest| !rest.is_empty())
    }
}

/// Resume sections the locator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Summary,
    Projects,
    Experience,
    Education,
    Skills,
    Certifications,
    Languages,
}

impl SectionKind {
    /// Classification order when a heading matches more than one keyword set.
    pub const PRIORITY: [SectionKind; 7] = [
        SectionKind::Summary,
        SectionKind::Projects,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Certifications,
        SectionKind::Languages,
    ];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            SectionKind::Summary => &[
                "summary",
                "objective",
                "profile",
                "about",
                "overview",
                "professional summary",
            ],
            SectionKind::Projects => &["projects"],
            SectionKind::Experience => &[
                "experience",
                "employment",
                "work history",
                "career history",
            ],
            SectionKind::Education => &["education", "academic background", "qualifications"],
            SectionKind::Skills => &[
                "skills",
                "technical skills",
                "technologies",
                "expertise",
                "competencies",
                "proficient in",
                "programming languages",
            ],
            SectionKind::Certifications => &[
                "certifications",
                "certification",
                "certificates",
                "licenses",
            ],
            SectionKind::Languages => &["languages"],
        }
    }

    /// Keywords of every other section; these close a section opened by `self`.
    pub fn stop_keywords(self) -> Vec<&'static str> {
        Self::PRIORITY
            .iter()
            .filter(|k| **k != self)
            .flat_map(|k| k.keywords().iter().copied())
            .collect()
    }

    /// Assigns a heading line to at most one section, following `PRIORITY`.
    pub fn classify(line: &str) -> Option<SectionKind> {
        let heading = heading_text(line)?;
        Self::PRIORITY
            .into_iter()
            .find(|kind| kind.keywords().iter().any(|kw| heading.contains(kw)))
    }

    /// Locates this section, stopping at the next heading that classifies differently.
    pub fn locate(self, lines: &[String]) -> Option<SectionRange> {
        let headings = section_headings(lines);
        let position = headings.iter().position(|(_, kind)| *kind == self)?;
        let heading_index = headings[position].0;
        let end = headings[position + 1..]
            .iter()
            .find(|(_, kind)| *kind != self)
            .map_or(lines.len(), |(index, _)| *index);

        Some(SectionRange {
            heading_index,
            start: heading_index + 1,
            end,
        })
    }
}

/// Section headings in document order.
///
/// Inside an open Skills section, `Languages: Python, Go` is a skill sub-group label
/// rather than the spoken-languages heading. A bare `Languages` line still opens one.
fn section_headings(lines: &[String]) -> Vec<(usize, SectionKind)> {
    let mut headings = Vec::new();
    let mut open: Option<SectionKind> = None;

    for (index, line) in lines.iter().enumerate() {
        let Some(kind) = SectionKind::classify(line) else {
            continue;
        };
        if open == Some(SectionKind::Skills)
            && kind == SectionKind::Languages
            && has_inline_content(line)
        {
            continue;
        }
        open = Some(kind);
        headings.push((index, kind));
    }

    headings
}

fn has_inline_content(line: &str) -> bool {
    line.split_once(':')
        .is_some_and(|(_, rest)| !rest.trim().is_empty())
}

/// Returns true if the line is a heading of any known section.
pub fn is_heading(line: &str) -> bool {
    SectionKind::classify(line).is_some()
}

/// Locates a section by raw keyword sets.
///
/// The first heading containing any of `keywords` opens the section; the next heading
/// containing any of `stop_keywords` closes it. Overlapping keyword sets resolve to
/// whichever the caller asks about; use [`SectionKind::locate`] for a fixed priority.
pub fn locate_section(
    lines: &[String],
    keywords: &[&str],
    stop_keywords: &[&str],
) -> Option<SectionRange> {
    locate_where(
        lines,
        |line| heading_matches(line, keywords),
        |line| heading_matches(line, stop_keywords),
    )
}

fn locate_where(
    lines: &[String],
    is_start: impl Fn(&str) -> bool,
    is_stop: impl Fn(&str) -> bool,
) -> Option<SectionRange> {
    let heading_index = lines.iter().position(|line| is_start(line))?;
    let start = heading_index + 1;
    let end = lines[start..]
        .iter()
        .position(|line| is_stop(line))
        .map_or(lines.len(), |offset| start + offset);

    Some(SectionRange {
        heading_index,
        start,
        end,
    })
}

fn heading_matches(line: &str, keywords: &[&str]) -> bool {
    heading_text(line).is_some_and(|heading| keywords.iter().any(|kw| heading.contains(kw)))
}

/// Lowercased heading portion of a line, or `None` if the line is not heading-shaped.
fn heading_text(line: &str) -> Option<String> {
    let raw = line.split_once(':').map_or(line, |(head, _)| head).trim();
    if raw.is_empty()
        || raw.ends_with('.')
        || raw.contains('|')
        || raw.chars().any(|c| c.is_ascii_digit())
    {
        return None;
    }

    let cleaned = raw.trim_matches(|c: char| !c.is_alphanumeric());
    if cleaned.is_empty()
        || cleaned.chars().count() > MAX_HEADING_CHARS
        || cleaned.split_whitespace().count() > MAX_HEADING_WORDS
    {
        return None;
    }

    Some(cleaned.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_locate_section_starts_after_heading() {
        let doc = lines("Jane Doe\nSKILLS\nRust, Go\nEDUCATION\nMIT");
        let range = locate_section(&doc, &["skills"], &["education"]).unwrap();
        assert_eq!(range.heading_index, 1);
        assert_eq!(range.start, 2);
        assert_eq!(range.end, 3);
        assert_eq!(range.body(&doc), &["Rust, Go".to_string()]);
    }

    #[test]
    fn test_locate_section_without_stop_consumes_rest() {
        let doc = lines("Summary\nLine one\nLine two");
        let range = locate_section(&doc, &["summary"], &["skills"]).unwrap();
        assert_eq!(range.end, doc.len());
        assert_eq!(range.body(&doc).len(), 2);
    }

    #[test]
    fn test_locate_section_not_found() {
        let doc = lines("Jane Doe\njane@example.com");
        assert!(locate_section(&doc, &["skills"], &["education"]).is_none());
    }

    #[test]
    fn test_heading_match_is_case_insensitive_substring() {
        let doc = lines("TECHNICAL SKILLS:\nRust");
        assert!(locate_section(&doc, &["skills"], &[]).is_some());
    }

    #[test]
    fn test_prose_lines_are_not_headings() {
        assert!(!is_heading("Results-driven engineer with 8 years experience."));
        assert!(!is_heading("Software Engineer | Acme | 2019 - 2021"));
        assert!(is_heading("Work Experience"));
        assert!(is_heading("## Projects"));
    }

    #[test]
    fn test_inline_content_after_colon() {
        let doc = lines("Summary: Builds compilers.\nOther line");
        let range = SectionKind::Summary.locate(&doc).unwrap();
        assert_eq!(range.inline_content(&doc), Some("Builds compilers."));
    }

    #[test]
    fn test_inline_content_absent_for_bare_heading() {
        let doc = lines("Summary\nBuilds compilers.");
        let range = SectionKind::Summary.locate(&doc).unwrap();
        assert_eq!(range.inline_content(&doc), None);
    }

    #[test]
    fn test_classify_uses_priority_order() {
        // Both "education" and "experience" appear; Experience has priority.
        assert_eq!(
            SectionKind::classify("Education & Experience"),
            Some(SectionKind::Experience)
        );
        assert_eq!(
            SectionKind::classify("Projects & Experience"),
            Some(SectionKind::Projects)
        );
        assert_eq!(
            SectionKind::classify("Programming Languages"),
            Some(SectionKind::Skills)
        );
        assert_eq!(
            SectionKind::classify("Languages"),
            Some(SectionKind::Languages)
        );
    }

    #[test]
    fn test_kind_locate_stops_at_next_section() {
        let doc = lines("EXPERIENCE\nAcme | 2020\nBuilt things\nEDUCATION\nMIT");
        let range = SectionKind::Experience.locate(&doc).unwrap();
        assert_eq!(range.body(&doc).len(), 2);
    }

    #[test]
    fn test_languages_label_inside_skills_does_not_close_it() {
        let doc = lines(
            "SKILLS\nLanguages: Python, Rust, Go\nFrameworks: React, Axum\nEDUCATION\nStanford University",
        );
        let skills = SectionKind::Skills.locate(&doc).unwrap();
        assert_eq!(skills.start, 1);
        assert_eq!(skills.end, 3);
        assert!(SectionKind::Languages.locate(&doc).is_none());
    }

    #[test]
    fn test_bare_languages_heading_after_skills_still_opens_section() {
        let doc = lines("Skills\nRust, Go\nLanguages\nEnglish, German");
        let skills = SectionKind::Skills.locate(&doc).unwrap();
        assert_eq!(skills.end, 2);
        let languages = SectionKind::Languages.locate(&doc).unwrap();
        assert_eq!(languages.body(&doc), &["English, German".to_string()]);
    }

    #[test]
    fn test_stop_keywords_exclude_own_keywords() {
        let stops = SectionKind::Skills.stop_keywords();
        assert!(stops.contains(&"education"));
        assert!(!stops.contains(&"skills"));
    }
}
