//! Resume import and extraction service.
//!
//! Decodes uploaded resumes (PDF, DOCX, TXT, Markdown, XML, JSON) and turns their text
//! into a structured `ResumeRecord` with line heuristics, with an optional LLM backend
//! and an A4 page-fit estimate for the result.

pub mod config;
pub mod errors;
pub mod extraction;
pub mod layout;
pub mod llm_client;
pub mod models;
pub mod routes;
pub mod state;
pub mod upload;

pub use extraction::{extract_resume_data, extract_resume_data_at, Extracted, ResumeParser};
pub use models::ResumeRecord;
