// Assistant prompt templates. All prompts for the chat and interview
// surfaces are defined here.

const NO_CONTEXT: &str = "No specific context provided.";

pub const ASSISTANT_SYSTEM_TEMPLATE: &str = "\
You are a helpful, expert technical assistant for software developers. \
Your goal is to help with coding questions, debugging, software architecture, \
and career preparation. Be concise, accurate, and provide code examples where \
appropriate.

Context provided by user (Resume/Background):
{context}";

/// Builds the chat system prompt, embedding the candidate context block when
/// one is available.
pub fn assistant_system(context: Option<&str>) -> String {
    ASSISTANT_SYSTEM_TEMPLATE.replace("{context}", context.unwrap_or(NO_CONTEXT))
}

pub const INTERVIEW_QUESTION_SYSTEM: &str = "\
You are an experienced technical interviewer. \
You MUST respond with valid JSON only — no markdown fences, no explanations. \
Ground questions in the candidate context when one is provided; otherwise ask \
a generally applicable question for the target role.";

pub const INTERVIEW_QUESTION_TEMPLATE: &str = r#"Generate one interview question.

Target role: {target_role}
Difficulty: {difficulty}

Candidate context:
{context}

OUTPUT SCHEMA (return exactly this structure):
{
  "question": "string",
  "category": "technical" | "behavioral" | "system-design",
  "hint": "string" | null
}

Return ONLY the JSON object — nothing else, no code fences."#;
