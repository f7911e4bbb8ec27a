//! Document storage — the seam between the upload/context pipeline and
//! Postgres.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::document::DocumentRow;

/// Storage interface for uploaded documents.
///
/// Carried in `AppState` as `Arc<dyn DocumentStore>` so the context provider
/// can be exercised against an in-memory double in tests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Most recently uploaded document for the user, or `None`.
    async fn fetch_latest(&self, user_id: Uuid) -> Result<Option<DocumentRow>>;

    async fn insert(&self, document: NewDocument) -> Result<DocumentRow>;
}

#[derive(Debug, Clone)]
pub struct NewDocument {
    pub user_id: Uuid,
    pub filename: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub raw_text: String,
    pub parsed: Option<Value>,
}

pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn fetch_latest(&self, user_id: Uuid) -> Result<Option<DocumentRow>> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT * FROM documents WHERE user_id = $1 ORDER BY uploaded_at DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert(&self, document: NewDocument) -> Result<DocumentRow> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            INSERT INTO documents (user_id, filename, mime_type, size_bytes, raw_text, parsed)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(document.user_id)
        .bind(&document.filename)
        .bind(&document.mime_type)
        .bind(document.size_bytes)
        .bind(&document.raw_text)
        .bind(&document.parsed)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
