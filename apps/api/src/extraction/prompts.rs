// Prompts for LLM-backed resume parsing.

use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, NO_INVENTION_INSTRUCTION};

/// Longest document excerpt sent to the model, in characters.
pub const MAX_DOCUMENT_CHARS: usize = 20_000;

pub fn resume_parse_system() -> String {
    format!("{JSON_ONLY_SYSTEM}\n\n{NO_INVENTION_INSTRUCTION}")
}

const RESUME_SCHEMA: &str = r#"{
  "name": "string",
  "position": "string (current or most recent job title)",
  "email": "string",
  "contactInformation": "string (phone number)",
  "address": "string",
  "socialMedia": [{ "platform": "LinkedIn | GitHub | Website | ...", "link": "string without https:// or www." }],
  "summary": "string (at most 500 characters)",
  "education": [{ "school": "string", "degree": "string", "startYear": "YYYY-MM-DD", "endYear": "YYYY-MM-DD" }],
  "workExperience": [{ "company": "string", "position": "string", "description": "string", "keyAchievements": "newline separated string", "startYear": "YYYY-MM-DD", "endYear": "YYYY-MM-DD" }],
  "projects": [{ "name": "string", "description": "string", "keyAchievements": "newline separated string", "startYear": "YYYY-MM-DD", "endYear": "YYYY-MM-DD", "link": "string" }],
  "skills": [{ "title": "string", "skills": ["string"] }],
  "languages": ["string"],
  "certifications": [{ "name": "string", "issuer": "string", "link": "string" }]
}"#;

pub fn build_resume_parse_prompt(text: &str, current_year: i32) -> String {
    let excerpt: String = text.chars().take(MAX_DOCUMENT_CHARS).collect();
    format!(
        "Extract the resume below into a JSON object with exactly this shape:\n\
         {RESUME_SCHEMA}\n\n\
         Rules:\n\
         - Dates use YYYY-MM-DD with month and day defaulting to 01.\n\
         - An ongoing role (\"Present\", \"Current\") ends in {current_year}-01-01.\n\
         - Return at most 3 workExperience entries, 2 education entries and 3 projects, most recent first.\n\
         - Put every skill into a single group in `skills`.\n\n\
         RESUME:\n{excerpt}"
    )
}
