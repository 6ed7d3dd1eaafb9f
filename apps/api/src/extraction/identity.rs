//! Identity extractors: candidate name and current position.

use once_cell::sync::Lazy;
use regex::Regex;

use super::sections::is_heading;
use super::Extracted;

const NAME_SCAN_LINES: usize = 8;
const POSITION_SCAN_LINES: std::ops::Range<usize> = 1..8;
const MAX_NAME_TOKENS: usize = 5;
const MAX_POSITION_CHARS: usize = 80;

const DOCUMENT_TITLE_WORDS: &[&str] = &["resume", "résumé", "cv", "curriculum"];
const ROLE_WORDS: &[&str] = &[
    "engineer",
    "developer",
    "manager",
    "analyst",
    "designer",
    "specialist",
];

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z\s.\-]+$").expect("name regex"));

/// Finds the candidate's name in the first lines of the document.
///
/// An explicit `Name:` line wins. Otherwise the first name-shaped line is taken,
/// skipping document titles ("Resume", "CV") and section headings. The result is
/// upper-cased.
pub fn extract_name(lines: &[String]) -> Extracted<String> {
    let head = &lines[..lines.len().min(NAME_SCAN_LINES)];

    let labelled = head.iter().find_map(|line| {
        let (label, value) = line.split_once(':')?;
        let value = value.trim();
        (label.trim().eq_ignore_ascii_case("name") && !value.is_empty()).then_some(value)
    });
    if let Some(name) = labelled {
        return Extracted::Found(name.to_uppercase());
    }

    head.iter()
        .map(|line| line.trim())
        .filter(|line| !is_document_title(line) && !is_heading(line))
        .find(|line| looks_like_name(line))
        .map(str::to_uppercase)
        .into()
}

/// Finds the first role-like line among lines 1–7 (the name line is skipped).
pub fn extract_position(lines: &[String]) -> Extracted<String> {
    lines
        .iter()
        .skip(POSITION_SCAN_LINES.start)
        .take(POSITION_SCAN_LINES.len())
        .map(|line| line.trim())
        .filter(|line| !line.contains('@') && !is_heading(line))
        .filter(|line| line.chars().count() <= MAX_POSITION_CHARS)
        .find(|line| {
            let lower = line.to_lowercase();
            ROLE_WORDS.iter().any(|role| lower.contains(role))
        })
        .map(String::from)
        .into()
}

fn is_document_title(line: &str) -> bool {
    let lower = line.to_lowercase();
    DOCUMENT_TITLE_WORDS.iter().any(|w| lower.contains(w))
}

fn looks_like_name(line: &str) -> bool {
    let len = line.chars().count();
    (2..=60).contains(&len)
        && line.split_whitespace().count() <= MAX_NAME_TOKENS
        && !line.contains('@')
        && !line.chars().any(|c| c.is_ascii_digit())
        && NAME_RE.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_name_first_name_like_line() {
        let doc = lines(&["John Smith", "Senior Software Engineer"]);
        assert_eq!(extract_name(&doc), Extracted::Found("JOHN SMITH".to_string()));
    }

    #[test]
    fn test_name_skips_resume_title() {
        let doc = lines(&["Curriculum Vitae", "Resume", "Mary-Jane O. Watson"]);
        assert_eq!(
            extract_name(&doc),
            Extracted::Found("MARY-JANE O. WATSON".to_string())
        );
    }

    #[test]
    fn test_name_label_takes_precedence() {
        let doc = lines(&["Jane Roe", "Name: Ada Lovelace"]);
        assert_eq!(
            extract_name(&doc),
            Extracted::Found("ADA LOVELACE".to_string())
        );
    }

    #[test]
    fn test_name_rejects_digits_email_and_long_lines() {
        let doc = lines(&[
            "jane@example.com",
            "Apartment 42",
            "This line has far too many words to be a name",
        ]);
        assert_eq!(extract_name(&doc), Extracted::NotFound);
    }

    #[test]
    fn test_name_only_scans_first_eight_lines() {
        let mut doc: Vec<String> = (0..8).map(|i| format!("line {i}")).collect();
        doc.push("Late Name".to_string());
        assert_eq!(extract_name(&doc), Extracted::NotFound);
    }

    #[test]
    fn test_name_skips_section_heading() {
        let doc = lines(&["SUMMARY", "Grace Hopper"]);
        assert_eq!(
            extract_name(&doc),
            Extracted::Found("GRACE HOPPER".to_string())
        );
    }

    #[test]
    fn test_position_first_role_line_wins() {
        let doc = lines(&[
            "John Smith",
            "john@example.com",
            "Data Analyst",
            "Product Designer",
        ]);
        assert_eq!(
            extract_position(&doc),
            Extracted::Found("Data Analyst".to_string())
        );
    }

    #[test]
    fn test_position_ignores_first_line() {
        let doc = lines(&["Engineer Smith", "Portland, OR"]);
        assert_eq!(extract_position(&doc), Extracted::NotFound);
    }
}
