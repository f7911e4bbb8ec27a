//! Context formatter — renders a stored candidate profile plus raw resume
//! text into the deterministic context block injected into LLM prompts.
//!
//! Operates on the JSONB value as it comes back from storage. Field access
//! is defensive throughout: rows written by older schema versions, or with
//! malformed sub-structures, must degrade to placeholders or omissions,
//! never panic a chat turn.

use serde_json::Value;

/// Hard cap on raw resume text embedded in the context block, in characters.
/// Keeps the downstream prompt inside model token limits.
pub const RAW_TEXT_LIMIT: usize = 4000;
/// Experience descriptions are previewed to this many characters.
const DESCRIPTION_PREVIEW: usize = 150;

/// Serializes a parsed profile and the document raw text into a single
/// context string. Deterministic given its inputs; assembly order is fixed.
pub fn format_context(parsed: &Value, raw_text: &str) -> String {
    let name = parsed
        .get("personal_info")
        .and_then(|p| p.get("name"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or("Unknown");
    let mut context = format!("Candidate Name: {name}\n");

    if let Some(skills) = non_empty_array(parsed, "skills") {
        // Entries without a proper `items` array are skipped, not an error.
        let all_skills: Vec<String> = skills
            .iter()
            .filter_map(|group| group.get("items").and_then(Value::as_array))
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .collect();
        context.push_str(&format!("Skills: {}\n", all_skills.join(", ")));
    }

    if let Some(entries) = non_empty_array(parsed, "experience") {
        context.push_str("Experience:\n");
        for exp in entries {
            if exp.is_null() {
                continue;
            }
            let role = str_or(exp, "role", "Role");
            let company = str_or(exp, "company", "Company");
            let start = str_or(exp, "start_date", "");
            let end = str_or(exp, "end_date", "Present");
            context.push_str(&format!("- {role} at {company} ({start} - {end})\n"));
            if let Some(description) = exp
                .get("description")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
            {
                // Preview cut is unconditional: short descriptions still get
                // the ellipsis marker.
                let preview: String = description.chars().take(DESCRIPTION_PREVIEW).collect();
                context.push_str(&format!("  {preview}...\n"));
            }
        }
    }

    if let Some(entries) = non_empty_array(parsed, "projects") {
        context.push_str("Projects:\n");
        for project in entries {
            if project.is_null() {
                continue;
            }
            let name = str_or(project, "name", "Project");
            let description = str_or(project, "description", "");
            context.push_str(&format!("- {name}: {description}\n"));
        }
    }

    if let Some(entries) = non_empty_array(parsed, "education") {
        context.push_str("Education:\n");
        for edu in entries {
            if edu.is_null() {
                continue;
            }
            let degree = str_or(edu, "degree", "Degree");
            let field = str_or(edu, "field", "Field");
            let school = str_or(edu, "school", "School");
            context.push_str(&format!("- {degree} in {field} from {school}\n"));
        }
    }

    if !raw_text.is_empty() {
        let truncated: String = raw_text.chars().take(RAW_TEXT_LIMIT).collect();
        context.push_str(&format!(
            "\n--- Full Resume Content ---\n{truncated}\n---------------------------\n"
        ));
    }

    context
}

fn non_empty_array<'a>(parsed: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    parsed
        .get(key)
        .and_then(Value::as_array)
        .filter(|entries| !entries.is_empty())
}

/// String field lookup where null, missing, and empty all take the fallback
/// placeholder.
fn str_or<'a>(entry: &'a Value, key: &str, fallback: &'a str) -> &'a str {
    entry
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback)
}
