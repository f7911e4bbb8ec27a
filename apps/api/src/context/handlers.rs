use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::context::provider::get_context;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Serialize)]
pub struct ContextResponse {
    pub context: Option<String>,
}

/// GET /api/v1/context
/// `context: null` is a normal response — callers proceed without candidate
/// context rather than treating it as an error.
pub async fn handle_get_context(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Json<ContextResponse> {
    let context = get_context(state.documents.as_ref(), params.user_id).await;
    Json(ContextResponse { context })
}
