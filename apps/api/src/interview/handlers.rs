use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::context::provider::get_context;
use crate::errors::AppError;
use crate::llm_client::prompts::{INTERVIEW_QUESTION_SYSTEM, INTERVIEW_QUESTION_TEMPLATE};
use crate::state::AppState;

const DEFAULT_TARGET_ROLE: &str = "software engineer";
const DEFAULT_DIFFICULTY: &str = "mid";

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub user_id: Uuid,
    pub target_role: Option<String>,
    pub difficulty: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub question: String,
    pub category: String,
    pub hint: Option<String>,
}

/// POST /api/v1/interview/question
/// Generates one interview question grounded in the candidate context when
/// one is available. Stateless: sessions and answer history live client-side.
pub async fn handle_generate_question(
    State(state): State<AppState>,
    Json(req): Json<QuestionRequest>,
) -> Result<Json<InterviewQuestion>, AppError> {
    let context = get_context(state.documents.as_ref(), req.user_id).await;

    let prompt = INTERVIEW_QUESTION_TEMPLATE
        .replace(
            "{target_role}",
            req.target_role.as_deref().unwrap_or(DEFAULT_TARGET_ROLE),
        )
        .replace(
            "{difficulty}",
            req.difficulty.as_deref().unwrap_or(DEFAULT_DIFFICULTY),
        )
        .replace(
            "{context}",
            context.as_deref().unwrap_or("No candidate context available."),
        );

    let question = state
        .llm
        .call_json::<InterviewQuestion>(&prompt, INTERVIEW_QUESTION_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Interview question generation failed: {e}")))?;

    Ok(Json(question))
}
