//! Section segmenter — locates a labeled resume section bounded by the next
//! recognized header, plus the per-section extractors that synthesize
//! profile entries from the captured lines.
//!
//! Parsing rules live in keyword tables so adding a section is a table entry
//! and a synthesis rule, not new control flow.

use regex::Regex;

use crate::models::profile::{EducationEntry, ExperienceEntry, ProjectEntry};

/// Master set of headers. A line matching any of these (anchored at line
/// start) closes whatever section is currently open.
pub const SECTION_HEADERS: &[&str] = &[
    "Experience",
    "Education",
    "Skills",
    "Projects",
    "Summary",
    "Certifications",
    "Interests",
    "References",
];

pub const EXPERIENCE_KEYWORDS: &[&str] = &["Experience", "Work History", "Employment"];
pub const EDUCATION_KEYWORDS: &[&str] = &["Education", "Academic Background"];
pub const SUMMARY_KEYWORDS: &[&str] = &["Summary", "Profile", "Professional Summary", "About Me"];
pub const PROJECT_KEYWORDS: &[&str] = &[
    "Projects",
    "Personal Projects",
    "Technical Projects",
    "Key Projects",
];

/// The synthesized experience description keeps at most this many lines.
const EXPERIENCE_DESCRIPTION_LINES: usize = 10;
/// Project descriptions join captured lines 2..=6.
const PROJECT_DESCRIPTION_LINES: usize = 5;

const EXPERIENCE_COMPANY: &str = "Extracted from Resume";
const EXPERIENCE_ROLE: &str = "See details";

fn header_regex(keywords: &[&str]) -> Option<Regex> {
    let alternation = keywords
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)^\s*({alternation})")).ok()
}

/// Captures the trimmed, non-blank lines of the first section opened by any
/// of `start_keywords`. The section closes at the first line matching a
/// master header that is not itself one of the start keywords; a reappearing
/// header never reopens it.
pub fn extract_section(text: &str, start_keywords: &[&str]) -> Vec<String> {
    let start = match header_regex(start_keywords) {
        Some(re) => re,
        None => return Vec::new(),
    };
    let stop = match header_regex(SECTION_HEADERS) {
        Some(re) => re,
        None => return Vec::new(),
    };

    let mut capturing = false;
    let mut content = Vec::new();

    for line in text.lines() {
        // Header lines themselves are never captured. A start keyword seen
        // mid-section is skipped rather than treated as a terminator.
        if start.is_match(line) {
            capturing = true;
            continue;
        }

        if capturing && stop.is_match(line) && !start.is_match(line) {
            break;
        }

        if capturing {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                content.push(trimmed.to_string());
            }
        }
    }

    content
}

/// Experience lines collapse into a single synthetic entry; real
/// company/role/date recognition is a non-goal of this heuristic pass.
pub fn extract_experience(text: &str) -> Vec<ExperienceEntry> {
    let lines = extract_section(text, EXPERIENCE_KEYWORDS);
    if lines.is_empty() {
        return Vec::new();
    }
    vec![ExperienceEntry {
        company: EXPERIENCE_COMPANY.to_string(),
        role: EXPERIENCE_ROLE.to_string(),
        start_date: None,
        end_date: None,
        description: Some(
            lines
                .iter()
                .take(EXPERIENCE_DESCRIPTION_LINES)
                .cloned()
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        achievements: Vec::new(),
    }]
}

pub fn extract_education(text: &str) -> Vec<EducationEntry> {
    let lines = extract_section(text, EDUCATION_KEYWORDS);
    if lines.is_empty() {
        return Vec::new();
    }
    vec![EducationEntry {
        school: lines
            .first()
            .cloned()
            .unwrap_or_else(|| "Unknown School".to_string()),
        degree: lines
            .get(1)
            .cloned()
            .unwrap_or_else(|| "Degree N/A".to_string()),
        field: String::new(),
        graduation_date: None,
    }]
}

/// All captured summary lines joined into one paragraph. Empty capture
/// yields an empty string.
pub fn extract_summary(text: &str) -> String {
    extract_section(text, SUMMARY_KEYWORDS).join(" ")
}

pub fn extract_projects(text: &str) -> Vec<ProjectEntry> {
    let lines = extract_section(text, PROJECT_KEYWORDS);
    if lines.is_empty() {
        return Vec::new();
    }
    vec![ProjectEntry {
        name: lines
            .first()
            .cloned()
            .unwrap_or_else(|| "Project".to_string()),
        description: lines
            .iter()
            .skip(1)
            .take(PROJECT_DESCRIPTION_LINES)
            .cloned()
            .collect::<Vec<_>>()
            .join(" "),
        technologies: Vec::new(),
        link: String::new(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_bounded_by_next_header() {
        let text = "Experience\nbuilt things\nshipped things\nmaintained things\nEducation\nMIT";
        let lines = extract_section(text, EXPERIENCE_KEYWORDS);
        assert_eq!(
            lines,
            vec!["built things", "shipped things", "maintained things"]
        );
    }

    #[test]
    fn test_blank_lines_dropped_not_terminating() {
        let text = "Experience\nfirst\n\n   \nsecond\nSkills\nPython";
        let lines = extract_section(text, EXPERIENCE_KEYWORDS);
        assert_eq!(lines, vec!["first", "second"]);
    }

    #[test]
    fn test_header_match_is_anchored() {
        // "My Experience" mentions the keyword but not at line start, so no
        // section ever opens.
        let text = "My Experience has been great\nbuilt things";
        assert!(extract_section(text, EXPERIENCE_KEYWORDS).is_empty());
    }

    #[test]
    fn test_header_match_is_case_insensitive() {
        let text = "EXPERIENCE\nbuilt things";
        assert_eq!(
            extract_section(text, EXPERIENCE_KEYWORDS),
            vec!["built things"]
        );
    }

    #[test]
    fn test_leading_whitespace_before_header_allowed() {
        let text = "   Experience\nbuilt things";
        assert_eq!(
            extract_section(text, EXPERIENCE_KEYWORDS),
            vec!["built things"]
        );
    }

    #[test]
    fn test_own_keyword_does_not_terminate() {
        // "Work History" is a start keyword but not a master header; a second
        // start-keyword line is skipped, and capture continues until a real
        // terminator.
        let text = "Experience\nfirst\nWork History\nsecond\nEducation\nMIT";
        let lines = extract_section(text, EXPERIENCE_KEYWORDS);
        assert_eq!(lines, vec!["first", "second"]);
    }

    #[test]
    fn test_section_not_reopened_after_close() {
        let text = "Experience\nfirst\nEducation\nMIT\nExperience\nsecond";
        let lines = extract_section(text, EXPERIENCE_KEYWORDS);
        assert_eq!(lines, vec!["first"]);
    }

    #[test]
    fn test_no_header_yields_empty() {
        assert!(extract_section("just a paragraph of text", EXPERIENCE_KEYWORDS).is_empty());
    }

    #[test]
    fn test_experience_synthesizes_single_entry() {
        let text = "Experience\nBuilt a web app at Acme\nLed a team of 3";
        let entries = extract_experience(text);
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.company, "Extracted from Resume");
        assert_eq!(entry.role, "See details");
        assert_eq!(
            entry.description.as_deref(),
            Some("Built a web app at Acme\nLed a team of 3")
        );
        assert!(entry.achievements.is_empty());
        assert!(entry.start_date.is_none());
        assert!(entry.end_date.is_none());
    }

    #[test]
    fn test_experience_description_capped_at_ten_lines() {
        let mut text = String::from("Experience\n");
        for i in 0..15 {
            text.push_str(&format!("line {i}\n"));
        }
        let entries = extract_experience(&text);
        let description = entries[0].description.as_deref().unwrap_or_default();
        assert_eq!(description.lines().count(), 10);
        assert!(description.ends_with("line 9"));
    }

    #[test]
    fn test_experience_empty_when_no_section() {
        assert!(extract_experience("nothing labeled here").is_empty());
    }

    #[test]
    fn test_education_first_two_lines() {
        let text = "Education\nMIT\nBS Computer Science\nGPA 4.0";
        let entries = extract_education(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].school, "MIT");
        assert_eq!(entries[0].degree, "BS Computer Science");
        assert_eq!(entries[0].field, "");
        assert!(entries[0].graduation_date.is_none());
    }

    #[test]
    fn test_education_degree_placeholder_when_single_line() {
        let text = "Education\nMIT";
        let entries = extract_education(text);
        assert_eq!(entries[0].school, "MIT");
        assert_eq!(entries[0].degree, "Degree N/A");
    }

    #[test]
    fn test_summary_lines_joined_with_spaces() {
        let text = "Summary\nSeasoned engineer.\nShips on time.\nExperience\nAcme";
        assert_eq!(extract_summary(text), "Seasoned engineer. Ships on time.");
    }

    #[test]
    fn test_summary_empty_without_section() {
        assert_eq!(extract_summary("no headers at all"), "");
    }

    #[test]
    fn test_projects_name_and_capped_description() {
        let text = "Projects\nWidget Engine\na\nb\nc\nd\ne\nf\ng";
        let entries = extract_projects(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Widget Engine");
        // Lines 2..=6 only.
        assert_eq!(entries[0].description, "a b c d e");
        assert_eq!(entries[0].technologies, Vec::<String>::new());
        assert_eq!(entries[0].link, "");
    }

    #[test]
    fn test_projects_single_line_has_empty_description() {
        let entries = extract_projects("Projects\nWidget Engine");
        assert_eq!(entries[0].name, "Widget Engine");
        assert_eq!(entries[0].description, "");
    }
}
