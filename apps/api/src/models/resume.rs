//! Canonical resume schema shared by the form editor, preview templates and import.

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::AppError;

/// Deserializes `null` the same way as a missing field: into `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialLink {
    #[serde(deserialize_with = "null_as_default")]
    pub platform: String,
    #[serde(deserialize_with = "null_as_default")]
    pub link: String,
}

impl SocialLink {
    pub fn new(platform: &str, link: impl Into<String>) -> Self {
        Self {
            platform: platform.to_string(),
            link: link.into(),
        }
    }

    /// Overwrites the link of an existing platform (case-insensitive) or appends a new one.
    pub fn upsert(links: &mut Vec<SocialLink>, incoming: SocialLink) {
        match links
            .iter_mut()
            .find(|l| l.platform.eq_ignore_ascii_case(&incoming.platform))
        {
            Some(existing) => existing.link = incoming.link,
            None => links.push(incoming),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub school: String,
    #[serde(deserialize_with = "null_as_default")]
    pub degree: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_year: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperienceEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(deserialize_with = "null_as_default")]
    pub position: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub key_achievements: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_year: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub key_achievements: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_year: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_year: String,
    #[serde(deserialize_with = "null_as_default")]
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillGroup {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub issuer: String,
    #[serde(deserialize_with = "null_as_default")]
    pub link: String,
}

/// The structured resume. Also the live editing state of a session.
///
/// Every list field defaults to an empty vector; JSON input may omit any field or send
/// `null` and still produce a complete record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub position: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    /// Phone number.
    #[serde(deserialize_with = "null_as_default")]
    pub contact_information: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub social_media: Vec<SocialLink>,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub education: Vec<EducationEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub work_experience: Vec<WorkExperienceEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub projects: Vec<ProjectEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Vec<SkillGroup>,
    #[serde(deserialize_with = "null_as_default")]
    pub languages: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub certifications: Vec<Certification>,
}

impl ResumeRecord {
    /// Validates an uploaded `.json` resume and fills every missing list with its default.
    ///
    /// The payload must be a JSON object; `null`, arrays and scalars are rejected.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, AppError> {
        let value: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|e| AppError::InvalidJson(e.to_string()))?;

        if !value.is_object() {
            return Err(AppError::InvalidJson(
                "top-level value must be an object".to_string(),
            ));
        }

        serde_json::from_value(value).map_err(|e| AppError::InvalidJson(e.to_string()))
    }
}
