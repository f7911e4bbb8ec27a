//! Entity extractors — single-valued and list-valued facts pulled from raw
//! resume text by pattern matching.

use regex::Regex;

use crate::models::profile::SkillGroup;

const EMAIL_PATTERN: &str = r"[A-Za-z0-9._-]+@[A-Za-z0-9._-]+\.[A-Za-z0-9._-]+";
const PHONE_PATTERN: &str = r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}";
const LINK_PATTERN: &str = r"https?://\S+";

const MAX_LINKS: usize = 3;

/// Category label applied to every matched skill group.
pub const DETECTED_CATEGORY: &str = "Detected";

/// Technology and skill names probed for by [`extract_skills`]. Matching is
/// case-insensitive and whole-word; output order is the order given here,
/// not order of appearance in the text.
pub const SKILL_VOCABULARY: &[&str] = &[
    "JavaScript",
    "TypeScript",
    "Python",
    "Java",
    "C++",
    "C#",
    "Go",
    "Rust",
    "Ruby",
    "PHP",
    "React",
    "Angular",
    "Vue",
    "Next.js",
    "Node.js",
    "Express",
    "Django",
    "Flask",
    "Spring",
    "SQL",
    "MySQL",
    "PostgreSQL",
    "MongoDB",
    "Redis",
    "AWS",
    "Azure",
    "GCP",
    "Docker",
    "Kubernetes",
    "Git",
    "CI/CD",
    "Agile",
    "Scrum",
    "HTML",
    "CSS",
    "Tailwind",
    "SASS",
    "GraphQL",
    "REST API",
    "Machine Learning",
    "AI",
    "Data Analysis",
    "Project Management",
];

/// First email-shaped substring in the text, if any.
pub fn extract_email(text: &str) -> Option<String> {
    find_first(EMAIL_PATTERN, text)
}

/// First phone-shaped substring in the text, if any. The shape is loose:
/// optional `+` country code, then 3-3-4 digit groups with optional
/// space/hyphen/dot separators and optional parentheses.
pub fn extract_phone(text: &str) -> Option<String> {
    find_first(PHONE_PATTERN, text)
}

/// Up to the first three http(s) URLs, in order of appearance.
pub fn extract_links(text: &str) -> Vec<String> {
    match Regex::new(LINK_PATTERN) {
        Ok(re) => re
            .find_iter(text)
            .take(MAX_LINKS)
            .map(|m| m.as_str().to_string())
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Scans the text for every vocabulary skill and wraps each hit in its own
/// single-item `"Detected"` group. Vocabulary entries are unique, so the
/// result is deduplicated by construction regardless of how often a skill
/// appears in the text.
pub fn extract_skills(text: &str) -> Vec<SkillGroup> {
    let mut groups = Vec::new();
    for skill in SKILL_VOCABULARY {
        let pattern = format!(r"(?i)\b{}\b", regex::escape(skill));
        let matched = match Regex::new(&pattern) {
            Ok(re) => re.is_match(text),
            Err(_) => false,
        };
        if matched {
            groups.push(SkillGroup {
                category: DETECTED_CATEGORY.to_string(),
                items: vec![skill.to_string()],
            });
        }
    }
    groups
}

fn find_first(pattern: &str, text: &str) -> Option<String> {
    Regex::new(pattern)
        .ok()?
        .find(text)
        .map(|m| m.as_str().to_string())
}
