use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::context::provider::get_context;
use crate::errors::AppError;
use crate::llm_client::ChatTurn;
use crate::state::AppState;

/// The full message history, latest user turn included, comes from the
/// client on every request; nothing is persisted server-side.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub user_id: Uuid,
    pub messages: Vec<ChatTurn>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    /// Whether candidate context was attached to this turn.
    pub context_attached: bool,
}

/// POST /api/v1/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let ends_with_user_turn = req
        .messages
        .last()
        .map(|turn| turn.role == "user" && !turn.content.is_empty())
        .unwrap_or(false);
    if !ends_with_user_turn {
        return Err(AppError::Validation(
            "Message content is required".to_string(),
        ));
    }

    // Context is best-effort: a missing or unreadable profile must not fail
    // the turn.
    let context = get_context(state.documents.as_ref(), req.user_id).await;
    let context_attached = context.is_some();

    let reply = state
        .llm
        .generate_reply(&req.messages, context.as_deref())
        .await;

    Ok(Json(ChatResponse {
        reply,
        context_attached,
    }))
}
