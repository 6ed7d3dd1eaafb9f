pub mod resume;

pub use resume::{
    Certification, EducationEntry, ProjectEntry, ResumeRecord, SkillGroup, SocialLink,
    WorkExperienceEntry,
};
