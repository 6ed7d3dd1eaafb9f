//! Summary extractor.

use super::contact::extract_email;
use super::entries::starts_with_year;
use super::sections::{is_heading, SectionKind};
use super::Extracted;

const MAX_SUMMARY_LINES: usize = 4;
pub const MAX_SUMMARY_CHARS: usize = 500;

/// Reads the summary/objective/profile section.
///
/// Inline heading content (`Summary: ...`) is used as-is, even when the following lines
/// are longer. Otherwise up to four following lines are joined, skipping headings,
/// email lines and lines that start with a year.
pub fn extract_summary(lines: &[String]) -> Extracted<String> {
    let Some(range) = SectionKind::Summary.locate(lines) else {
        return Extracted::NotFound;
    };

    let text = match range.inline_content(lines) {
        Some(inline) => inline.to_string(),
        None => range
            .body(lines)
            .iter()
            .map(|line| line.trim())
            .filter(|line| {
                !is_heading(line) && !extract_email(line).is_found() && !starts_with_year(line)
            })
            .take(MAX_SUMMARY_LINES)
            .collect::<Vec<_>>()
            .join(" "),
    };

    let text = truncate_chars(text.trim(), MAX_SUMMARY_CHARS);
    if text.is_empty() {
        Extracted::NotFound
    } else {
        Extracted::Found(text)
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_summary_following_lines() {
        let doc = lines(&[
            "SUMMARY",
            "Results-driven engineer with 8 years experience.",
            "SKILLS",
            "Rust",
        ]);
        assert_eq!(
            extract_summary(&doc),
            Extracted::Found("Results-driven engineer with 8 years experience.".to_string())
        );
    }

    #[test]
    fn test_inline_summary_beats_longer_following_lines() {
        let doc = lines(&[
            "Summary: I am a backend engineer.",
            "This following line is considerably longer than the inline summary text.",
        ]);
        assert_eq!(
            extract_summary(&doc),
            Extracted::Found("I am a backend engineer.".to_string())
        );
    }

    #[test]
    fn test_summary_caps_at_four_lines_and_skips_noise() {
        let doc = lines(&[
            "Profile",
            "One.",
            "me@example.com",
            "2019 joined Acme",
            "Two.",
            "Three.",
            "Four.",
            "Five.",
        ]);
        assert_eq!(
            extract_summary(&doc),
            Extracted::Found("One. Two. Three. Four.".to_string())
        );
    }

    #[test]
    fn test_summary_truncated_to_500_chars() {
        let long = "a".repeat(300);
        let doc = lines(&["Objective", &long, &long]);
        match extract_summary(&doc) {
            Extracted::Found(text) => assert_eq!(text.chars().count(), MAX_SUMMARY_CHARS),
            Extracted::NotFound => panic!("expected a summary"),
        }
    }

    #[test]
    fn test_summary_missing_section() {
        let doc = lines(&["Jane Doe", "Skills", "Rust"]);
        assert_eq!(extract_summary(&doc), Extracted::NotFound);
    }

    #[test]
    fn test_summary_heading_without_content() {
        let doc = lines(&["Summary", "Experience", "Acme | 2020"]);
        assert_eq!(extract_summary(&doc), Extracted::NotFound);
    }
}
