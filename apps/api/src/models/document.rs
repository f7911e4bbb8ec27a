use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DocumentRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub filename: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub raw_text: String,
    /// Profile derived at upload time. NULL for documents that predate the
    /// parser; the context provider treats those as "no context".
    pub parsed: Option<Value>,
    pub uploaded_at: DateTime<Utc>,
}
