//! End-to-end extraction scenarios over realistic resume text.

use resume_api::extraction::extract_resume_data_at;
use resume_api::layout::{analyze_page_fit, PageConfig, PageFitVerdict};
use resume_api::models::{ResumeRecord, SkillGroup, SocialLink};
use resume_api::upload::{decode_upload, Decoded, FileKind};

const YEAR: i32 = 2026;

const FULL_RESUME: &str = "\
Resume
Maria Garcia
Backend Developer
maria.garcia@example.com | +44 20 7946 0958
Location: London, UK
https://www.linkedin.com/in/mariagarcia | github.com/mgarcia

Professional Summary
Backend developer focused on payment systems and distributed data stores.

Work Experience
Backend Developer | Fintech Ltd | Mar 2021 - Present
Builds the ledger service.
- Cut settlement time from hours to minutes
- Led migration to event sourcing
Acme Corp, Software Engineer, 2018 - 2021
Maintained the billing API.

Education
University of Manchester
BSc Computer Science, 2014 - 2018

Projects
Ledger Sim | github.com/mgarcia/ledger-sim | 2022
Simulates double-entry ledgers under load.

Skills
Rust, Go, PostgreSQL, Kafka

Languages
English, Spanish (native)

Certifications
AWS Certified Developer, Amazon
";

fn record() -> ResumeRecord {
    extract_resume_data_at(FULL_RESUME, &ResumeRecord::default(), YEAR)
}

#[test]
fn test_full_resume_identity_and_contact() {
    let r = record();
    assert_eq!(r.name, "MARIA GARCIA");
    assert_eq!(r.position, "Backend Developer");
    assert_eq!(r.email, "maria.garcia@example.com");
    assert_eq!(r.contact_information, "+44 20 7946 0958");
    assert_eq!(r.address, "London, UK");
    assert_eq!(
        r.social_media,
        vec![
            SocialLink::new("LinkedIn", "linkedin.com/in/mariagarcia"),
            SocialLink::new("GitHub", "github.com/mgarcia"),
        ]
    );
}

#[test]
fn test_full_resume_sections() {
    let r = record();
    assert_eq!(
        r.summary,
        "Backend developer focused on payment systems and distributed data stores."
    );

    assert_eq!(r.work_experience.len(), 2);
    let current = &r.work_experience[0];
    assert_eq!(current.position, "Backend Developer");
    assert_eq!(current.company, "Fintech Ltd");
    assert_eq!(current.start_year, "2021-03-01");
    assert_eq!(current.end_year, "2026-01-01");
    assert_eq!(current.description, "Builds the ledger service.");
    assert_eq!(
        current.key_achievements,
        "Cut settlement time from hours to minutes\nLed migration to event sourcing"
    );
    assert_eq!(r.work_experience[1].company, "Acme Corp");
    assert_eq!(r.work_experience[1].position, "Software Engineer");

    assert_eq!(r.education.len(), 1);
    assert_eq!(r.education[0].school, "University of Manchester");
    assert_eq!(r.education[0].degree, "BSc Computer Science");
    assert_eq!(r.education[0].end_year, "2018-01-01");

    assert_eq!(r.projects[0].name, "Ledger Sim");
    assert_eq!(r.projects[0].link, "github.com/mgarcia/ledger-sim");

    assert_eq!(r.skills[0].skills, vec!["Rust", "Go", "PostgreSQL", "Kafka"]);
    assert_eq!(r.languages, vec!["English", "Spanish (native)"]);
    assert_eq!(r.certifications[0].name, "AWS Certified Developer");
    assert_eq!(r.certifications[0].issuer, "Amazon");
}

#[test]
fn test_reimport_keeps_other_skill_groups() {
    let prior = ResumeRecord {
        skills: vec![
            SkillGroup {
                title: "Languages & Tools".to_string(),
                skills: vec!["Java".to_string()],
            },
            SkillGroup {
                title: "Soft Skills".to_string(),
                skills: vec!["Mentoring".to_string()],
            },
        ],
        ..Default::default()
    };
    let r = extract_resume_data_at(FULL_RESUME, &prior, YEAR);
    assert_eq!(r.skills[0].title, "Languages & Tools");
    assert_eq!(r.skills[0].skills, vec!["Rust", "Go", "PostgreSQL", "Kafka"]);
    assert_eq!(r.skills[1], prior.skills[1]);
}

#[test]
fn test_markdown_upload_end_to_end() {
    let md = "# Maria Garcia\n**Backend Developer**\n\n## Skills\n- Rust, Go\n";
    let Decoded::Text(text) = decode_upload(FileKind::Markdown, md.as_bytes()).unwrap() else {
        panic!("markdown decodes to text");
    };
    let r = extract_resume_data_at(&text, &ResumeRecord::default(), YEAR);
    assert_eq!(r.name, "MARIA GARCIA");
    assert_eq!(r.skills[0].skills, vec!["Rust", "Go"]);
}

#[test]
fn test_extracted_record_fits_one_page() {
    let report = analyze_page_fit(&record(), &PageConfig::default());
    assert!(!report.exceeds_one_page);
    assert_ne!(report.verdict, PageFitVerdict::MajorOverflow);
    assert!(report.sections.iter().any(|s| s.section == "workExperience"));
}
