use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::context::handlers::UserIdQuery;
use crate::documents::extract::extract_raw_text;
use crate::documents::store::NewDocument;
use crate::errors::AppError;
use crate::models::document::DocumentRow;
use crate::models::profile::CandidateProfile;
use crate::parser::builder::build_profile;
use crate::state::AppState;

const DEFAULT_FILENAME: &str = "resume";
const DEFAULT_MIME: &str = "text/plain";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub document_id: Uuid,
    pub profile: CandidateProfile,
}

/// POST /api/v1/documents
/// Multipart fields: `user_id` (UUID), `name` (candidate display name,
/// optional), `file` (the resume document).
///
/// The whole pipeline runs at upload time: decode bytes → raw text →
/// profile → store both. Undecodable files still produce a stored document
/// with a mostly-empty profile; only a missing file or user_id rejects the
/// request.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut user_id: Option<Uuid> = None;
    let mut display_name: Option<String> = None;
    let mut file: Option<(String, String, bytes::Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        match field.name() {
            Some("user_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable user_id field: {e}")))?;
                let parsed = Uuid::parse_str(text.trim())
                    .map_err(|_| AppError::Validation("user_id must be a UUID".to_string()))?;
                user_id = Some(parsed);
            }
            Some("name") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable name field: {e}")))?;
                display_name = Some(text).filter(|name| !name.is_empty());
            }
            Some("file") => {
                let filename = field.file_name().unwrap_or(DEFAULT_FILENAME).to_string();
                let mime_type = field.content_type().unwrap_or(DEFAULT_MIME).to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable file field: {e}")))?;
                file = Some((filename, mime_type, data));
            }
            _ => {}
        }
    }

    let user_id = user_id.ok_or_else(|| AppError::Validation("user_id is required".to_string()))?;
    let (filename, mime_type, data) =
        file.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    let raw_text = extract_raw_text(&data, &mime_type);
    let mut profile = build_profile(&raw_text);
    // The name comes from the account, never from the text.
    profile.personal_info.name = display_name;

    let parsed = serde_json::to_value(&profile).map_err(|e| AppError::Internal(e.into()))?;
    let row = state
        .documents
        .insert(NewDocument {
            user_id,
            filename,
            mime_type,
            size_bytes: data.len() as i64,
            raw_text,
            parsed: Some(parsed),
        })
        .await
        .map_err(AppError::Internal)?;

    info!("Stored document {} for user {}", row.id, user_id);

    Ok(Json(UploadResponse {
        document_id: row.id,
        profile,
    }))
}

/// GET /api/v1/documents/latest
pub async fn handle_latest(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<DocumentRow>, AppError> {
    let document = state
        .documents
        .fetch_latest(params.user_id)
        .await
        .map_err(AppError::Internal)?;

    document
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No documents for user {}", params.user_id)))
}
