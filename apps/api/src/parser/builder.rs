//! Profile builder — composes the entity and section extractors into a
//! `CandidateProfile`.

use crate::models::profile::{CandidateProfile, PersonalInfo};
use crate::parser::entities::{extract_email, extract_links, extract_phone, extract_skills};
use crate::parser::sections::{
    extract_education, extract_experience, extract_projects, extract_summary,
};

/// Derives a structured profile from raw resume text.
///
/// Total function: extractors that find nothing contribute empty defaults,
/// so any input — including the "Parsing failed" fallback sentinel from the
/// upload path — yields a well-formed, possibly mostly-empty profile.
/// `name` and `location` are left unset; the upload handler fills the name
/// from the account, never from the text.
pub fn build_profile(raw_text: &str) -> CandidateProfile {
    CandidateProfile {
        personal_info: PersonalInfo {
            name: None,
            email: extract_email(raw_text),
            phone: extract_phone(raw_text),
            location: None,
            links: extract_links(raw_text),
        },
        summary: extract_summary(raw_text),
        skills: extract_skills(raw_text),
        experience: extract_experience(raw_text),
        education: extract_education(raw_text),
        projects: extract_projects(raw_text),
    }
}
