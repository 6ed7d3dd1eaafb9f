//! Page Fill Analysis: estimates how much of one A4 page a record fills.
//!
//! Every section is word-wrapped against the page's text width with the static
//! font tables; the sum is compared with the page's line capacity.
//!
//! # Verdicts
//! - fill < 60%          → Underfilled
//! - 60% ≤ fill ≤ 100%   → Fits
//! - 100% < fill ≤ 105%  → MinorOverflow (spacing tweaks usually recover it)
//! - fill > 105%         → MajorOverflow (content has to go)

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::{get_metrics, FontMetricTable, PageConfig};
use crate::models::ResumeRecord;

/// Name is set larger than body text.
const NAME_LINES: u16 = 2;
/// Heading line plus the gap above it.
const SECTION_HEADING_LINES: u16 = 2;
/// Indent of bulleted lines, in em.
const BULLET_INDENT_EM: f32 = 1.5;

const UNDERFILLED_BELOW: f32 = 0.60;
const MINOR_OVERFLOW_UP_TO: f32 = 1.05;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageFitVerdict {
    Underfilled,
    Fits,
    MinorOverflow,
    MajorOverflow,
}

/// Lines used by one rendered section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionUsage {
    pub section: String,
    pub lines: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFitReport {
    pub total_lines_used: u16,
    pub total_lines_available: u16,
    pub fill_ratio: f32,
    pub overflow_lines: u16,
    pub estimated_pages: u16,
    pub exceeds_one_page: bool,
    pub verdict: PageFitVerdict,
    pub sections: Vec<SectionUsage>,
}

// ────────────────────────────────────────────────────────────────────────────
// Core functions
// ────────────────────────────────────────────────────────────────────────────

/// Per-section line usage of `record` on the configured page. Empty sections are skipped.
pub fn estimate_record_lines(record: &ResumeRecord, config: &PageConfig) -> Vec<SectionUsage> {
    let wrap = Wrapper::new(config);
    let mut sections = Vec::new();

    let mut push = |name: &str, body_lines: u16, heading: bool| {
        if body_lines > 0 {
            let heading_lines = if heading { SECTION_HEADING_LINES } else { 0 };
            sections.push(SectionUsage {
                section: name.to_string(),
                lines: body_lines.saturating_add(heading_lines),
            });
        }
    };

    push("header", header_lines(record, &wrap), false);
    push("summary", wrap.text(&record.summary), true);

    let experience = sum_lines(record.work_experience.iter().map(|job| {
        let dates = year_span(&job.start_year, &job.end_year);
        wrap.text(&joined(&[&job.position, &job.company, &dates]))
            .saturating_add(wrap.text(&job.description))
            .saturating_add(wrap.bullets(&job.key_achievements))
    }));
    push("workExperience", experience, true);

    let education = sum_lines(record.education.iter().map(|school| {
        let dates = year_span(&school.start_year, &school.end_year);
        wrap.text(&joined(&[&school.degree, &school.school, &dates]))
    }));
    push("education", education, true);

    let projects = sum_lines(record.projects.iter().map(|project| {
        wrap.text(&joined(&[&project.name, &project.link]))
            .saturating_add(wrap.text(&project.description))
            .saturating_add(wrap.bullets(&project.key_achievements))
    }));
    push("projects", projects, true);

    let skills = sum_lines(
        record
            .skills
            .iter()
            .filter(|group| !group.skills.is_empty())
            .map(|group| wrap.text(&format!("{}: {}", group.title, group.skills.join(", ")))),
    );
    push("skills", skills, true);

    push("languages", wrap.text(&record.languages.join(", ")), true);

    let certifications = sum_lines(
        record
            .certifications
            .iter()
            .map(|cert| wrap.text(&joined(&[&cert.name, &cert.issuer]))),
    );
    push("certifications", certifications, true);

    sections
}

/// Compares the record's estimated height with one page of the configured layout.
pub fn analyze_page_fit(record: &ResumeRecord, config: &PageConfig) -> PageFitReport {
    let sections = estimate_record_lines(record, config);
    let total_lines_used = sum_lines(sections.iter().map(|s| s.lines));
    let available = config.usable_height_lines().max(1);

    let fill_ratio = f32::from(total_lines_used) / f32::from(available);
    let verdict = if fill_ratio > MINOR_OVERFLOW_UP_TO {
        PageFitVerdict::MajorOverflow
    } else if fill_ratio > 1.0 {
        PageFitVerdict::MinorOverflow
    } else if fill_ratio < UNDERFILLED_BELOW {
        PageFitVerdict::Underfilled
    } else {
        PageFitVerdict::Fits
    };

    PageFitReport {
        total_lines_used,
        total_lines_available: available,
        fill_ratio,
        overflow_lines: total_lines_used.saturating_sub(available),
        estimated_pages: total_lines_used.div_ceil(available).max(1),
        exceeds_one_page: total_lines_used > available,
        verdict,
        sections,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

struct Wrapper {
    metrics: &'static FontMetricTable,
    width_em: f32,
}

impl Wrapper {
    fn new(config: &PageConfig) -> Self {
        Self {
            metrics: get_metrics(config.font),
            width_em: config.text_width_em(),
        }
    }

    /// Lines of a paragraph; explicit newlines start new lines.
    fn text(&self, text: &str) -> u16 {
        sum_lines(
            text.lines()
                .map(|line| self.metrics.estimated_lines(line, self.width_em)),
        )
    }

    /// One bullet per non-empty line, wrapped at the indented width.
    fn bullets(&self, text: &str) -> u16 {
        let width = (self.width_em - BULLET_INDENT_EM).max(1.0);
        sum_lines(text.lines().map(|line| self.metrics.estimated_lines(line, width)))
    }
}

fn header_lines(record: &ResumeRecord, wrap: &Wrapper) -> u16 {
    let name = if record.name.trim().is_empty() { 0 } else { NAME_LINES };
    let links: Vec<&str> = record.social_media.iter().map(|l| l.link.as_str()).collect();
    let mut contact: Vec<&str> = vec![
        record.email.as_str(),
        record.contact_information.as_str(),
        record.address.as_str(),
    ];
    contact.extend(links);

    name.saturating_add(wrap.text(&record.position))
        .saturating_add(wrap.text(&joined(&contact)))
}

/// Line counts clamp at `u16::MAX`; anything that large is a major overflow anyway.
fn sum_lines(lines: impl Iterator<Item = u16>) -> u16 {
    lines.fold(0, u16::saturating_add)
}

/// Non-empty parts joined the way templates print them.
fn joined<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(|p| p.as_ref().trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}

/// `2019-01-01`, `2022-01-01` → `2019 - 2022`.
fn year_span(start: &str, end: &str) -> String {
    let year = |date: &str| date.split('-').next().unwrap_or_default().trim().to_string();
    match (year(start), year(end)) {
        (s, e) if s.is_empty() && e.is_empty() => String::new(),
        (s, e) if e.is_empty() || s == e => s,
        (s, e) if s.is_empty() => e,
        (s, e) => format!("{s} - {e}"),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::FontFamily;
    use crate::models::{SkillGroup, WorkExperienceEntry};

    fn job(i: usize, bullets: usize) -> WorkExperienceEntry {
        WorkExperienceEntry {
            company: format!("Company {i}"),
            position: "Senior Software Engineer".to_string(),
            description: "Owned the payments platform end to end, from API design to on-call."
                .to_string(),
            key_achievements: (0..bullets)
                .map(|b| format!("Delivered initiative {b} that reduced infrastructure cost and improved reliability across every production region"))
                .collect::<Vec<_>>()
                .join("\n"),
            start_year: "2019-01-01".to_string(),
            end_year: "2022-01-01".to_string(),
        }
    }

    #[test]
    fn test_empty_record_is_underfilled() {
        let report = analyze_page_fit(&ResumeRecord::default(), &PageConfig::default());
        assert_eq!(report.total_lines_used, 0);
        assert!(report.sections.is_empty());
        assert_eq!(report.verdict, PageFitVerdict::Underfilled);
        assert_eq!(report.estimated_pages, 1);
        assert!(!report.exceeds_one_page);
    }

    #[test]
    fn test_sections_counted_with_headings() {
        let record = ResumeRecord {
            name: "JANE DOE".to_string(),
            summary: "Backend engineer.".to_string(),
            skills: vec![SkillGroup {
                title: "Technical Skills".to_string(),
                skills: vec!["Rust".to_string(), "Go".to_string()],
            }],
            ..Default::default()
        };
        let sections = estimate_record_lines(&record, &PageConfig::default());
        assert_eq!(
            sections,
            vec![
                SectionUsage { section: "header".to_string(), lines: NAME_LINES },
                SectionUsage { section: "summary".to_string(), lines: 1 + SECTION_HEADING_LINES },
                SectionUsage { section: "skills".to_string(), lines: 1 + SECTION_HEADING_LINES },
            ]
        );
    }

    #[test]
    fn test_long_record_overflows() {
        let record = ResumeRecord {
            name: "JANE DOE".to_string(),
            work_experience: (0..8).map(|i| job(i, 6)).collect(),
            ..Default::default()
        };
        let report = analyze_page_fit(&record, &PageConfig::default());
        assert!(report.exceeds_one_page);
        assert_eq!(report.verdict, PageFitVerdict::MajorOverflow);
        assert!(report.estimated_pages >= 2);
        assert_eq!(
            report.overflow_lines,
            report.total_lines_used - report.total_lines_available
        );
    }

    #[test]
    fn test_huge_description_saturates_instead_of_overflowing() {
        let mut huge = job(0, 0);
        huge.description = "Shipped\n".repeat(70_000);
        let record = ResumeRecord {
            name: "JANE DOE".to_string(),
            summary: "Backend engineer.".to_string(),
            work_experience: vec![huge, job(1, 2)],
            ..Default::default()
        };
        let report = analyze_page_fit(&record, &PageConfig::default());
        assert_eq!(report.total_lines_used, u16::MAX);
        assert_eq!(report.verdict, PageFitVerdict::MajorOverflow);
        assert!(report.exceeds_one_page);
        let experience = report
            .sections
            .iter()
            .find(|s| s.section == "workExperience")
            .unwrap();
        assert_eq!(experience.lines, u16::MAX);
    }

    #[test]
    fn test_serif_uses_no_more_lines_than_sans() {
        let record = ResumeRecord {
            work_experience: (0..3).map(|i| job(i, 4)).collect(),
            ..Default::default()
        };
        let sans = analyze_page_fit(&record, &PageConfig::default());
        let serif = analyze_page_fit(&record, &PageConfig::default().with_font(FontFamily::Serif));
        assert!(serif.total_lines_used <= sans.total_lines_used);
    }

    #[test]
    fn test_year_span_formats() {
        assert_eq!(year_span("2019-01-01", "2022-01-01"), "2019 - 2022");
        assert_eq!(year_span("2019-01-01", "2019-06-01"), "2019");
        assert_eq!(year_span("", ""), "");
    }
}
