pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::chat;
use crate::context;
use crate::documents;
use crate::interview;
use crate::state::AppState;

/// Resume uploads are small; anything larger is rejected at the body layer.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document API
        .route("/api/v1/documents", post(documents::handlers::handle_upload))
        .route(
            "/api/v1/documents/latest",
            get(documents::handlers::handle_latest),
        )
        // Context API
        .route("/api/v1/context", get(context::handlers::handle_get_context))
        // Chat API
        .route("/api/v1/chat", post(chat::handlers::handle_chat))
        // Interview API
        .route(
            "/api/v1/interview/question",
            post(interview::handlers::handle_generate_question),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
