//! Schema Normalizer: merges extracted fields into the prior `ResumeRecord`.
//!
//! Every `Found` value overwrites the matching field; `NotFound` keeps whatever the
//! record already held. List fields are replaced wholesale, after capping.

use super::Extracted;
use crate::models::{
    Certification, EducationEntry, ProjectEntry, ResumeRecord, SkillGroup, SocialLink,
    WorkExperienceEntry,
};

pub const MAX_WORK_EXPERIENCE: usize = 3;
pub const MAX_EDUCATION: usize = 2;
pub const MAX_PROJECTS: usize = 3;
pub const MAX_CERTIFICATIONS: usize = 5;

const DEFAULT_SKILL_GROUP_TITLE: &str = "Technical Skills";

/// Everything one extraction pass found, field by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialResume {
    pub name: Extracted<String>,
    pub position: Extracted<String>,
    pub email: Extracted<String>,
    pub phone: Extracted<String>,
    pub address: Extracted<String>,
    pub social_media: Vec<SocialLink>,
    pub summary: Extracted<String>,
    pub education: Extracted<Vec<EducationEntry>>,
    pub work_experience: Extracted<Vec<WorkExperienceEntry>>,
    pub projects: Extracted<Vec<ProjectEntry>>,
    pub skills: Extracted<Vec<String>>,
    pub languages: Extracted<Vec<String>>,
    pub certifications: Extracted<Vec<Certification>>,
}

impl Default for PartialResume {
    fn default() -> Self {
        Self {
            name: Extracted::NotFound,
            position: Extracted::NotFound,
            email: Extracted::NotFound,
            phone: Extracted::NotFound,
            address: Extracted::NotFound,
            social_media: Vec::new(),
            summary: Extracted::NotFound,
            education: Extracted::NotFound,
            work_experience: Extracted::NotFound,
            projects: Extracted::NotFound,
            skills: Extracted::NotFound,
            languages: Extracted::NotFound,
            certifications: Extracted::NotFound,
        }
    }
}

impl PartialResume {
    /// Lifts a complete record into a partial: non-empty fields become `Found`.
    ///
    /// Used for records produced outside the heuristic pipeline (LLM replies) so they
    /// merge into the session the same way.
    pub fn from_record(record: ResumeRecord) -> Self {
        let skills = record
            .skills
            .into_iter()
            .next()
            .map(|group| group.skills)
            .unwrap_or_default();

        Self {
            name: non_empty(record.name),
            position: non_empty(record.position),
            email: non_empty(record.email),
            phone: non_empty(record.contact_information),
            address: non_empty(record.address),
            social_media: record
                .social_media
                .into_iter()
                .filter(|link| !link.platform.trim().is_empty() && !link.link.trim().is_empty())
                .collect(),
            summary: non_empty(record.summary),
            education: record.education.into(),
            work_experience: record.work_experience.into(),
            projects: record.projects.into(),
            skills: skills.into(),
            languages: record.languages.into(),
            certifications: record.certifications.into(),
        }
    }
}

/// Produces a new record: `prior` with every found field applied.
pub fn normalize(prior: &ResumeRecord, partial: PartialResume) -> ResumeRecord {
    let mut record = prior.clone();

    merge_text(&mut record.name, partial.name);
    merge_text(&mut record.position, partial.position);
    merge_text(&mut record.email, partial.email);
    merge_text(&mut record.contact_information, partial.phone);
    merge_text(&mut record.address, partial.address);
    merge_text(&mut record.summary, partial.summary);

    for link in partial.social_media {
        SocialLink::upsert(&mut record.social_media, link);
    }

    merge_list(&mut record.work_experience, partial.work_experience, MAX_WORK_EXPERIENCE);
    merge_list(&mut record.education, partial.education, MAX_EDUCATION);
    merge_list(&mut record.projects, partial.projects, MAX_PROJECTS);
    merge_list(&mut record.certifications, partial.certifications, MAX_CERTIFICATIONS);
    merge_list(&mut record.languages, partial.languages, usize::MAX);

    if let Extracted::Found(skills) = partial.skills {
        if !skills.is_empty() {
            match record.skills.first_mut() {
                Some(group) => group.skills = skills,
                None => record.skills.push(SkillGroup {
                    title: DEFAULT_SKILL_GROUP_TITLE.to_string(),
                    skills,
                }),
            }
        }
    }

    record
}

fn merge_text(field: &mut String, value: Extracted<String>) {
    if let Extracted::Found(value) = value {
        let value = value.trim();
        if !value.is_empty() {
            *field = value.to_string();
        }
    }
}

fn merge_list<T>(field: &mut Vec<T>, value: Extracted<Vec<T>>, cap: usize) {
    if let Extracted::Found(mut items) = value {
        if !items.is_empty() {
            items.truncate(cap);
            *field = items;
        }
    }
}

fn non_empty(value: String) -> Extracted<String> {
    if value.trim().is_empty() {
        Extracted::NotFound
    } else {
        Extracted::Found(value)
    }
}
