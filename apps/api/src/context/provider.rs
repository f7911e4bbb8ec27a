//! Context provider — fetches the latest parsed document for a user and
//! renders the prompt context string.

use tracing::warn;
use uuid::Uuid;

use crate::context::formatter::format_context;
use crate::documents::store::DocumentStore;

/// Best-effort context lookup for one user.
///
/// `None` means "no context available" and is a normal outcome: the user has
/// no document yet, their latest document never parsed, or storage failed.
/// Storage failures are logged and absorbed here — a chat turn must keep
/// working without context.
pub async fn get_context(store: &dyn DocumentStore, user_id: Uuid) -> Option<String> {
    let document = match store.fetch_latest(user_id).await {
        Ok(document) => document,
        Err(e) => {
            warn!("Context lookup failed for user {user_id}: {e:#}");
            return None;
        }
    };

    let document = document?;
    let parsed = document.parsed.as_ref()?;
    Some(format_context(parsed, &document.raw_text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use chrono::Utc;
    use serde_json::json;

    use crate::documents::store::NewDocument;
    use crate::models::document::DocumentRow;

    struct FixedStore {
        document: Option<DocumentRow>,
    }

    #[async_trait]
    impl DocumentStore for FixedStore {
        async fn fetch_latest(&self, _user_id: Uuid) -> Result<Option<DocumentRow>> {
            Ok(self.document.clone())
        }

        async fn insert(&self, _document: NewDocument) -> Result<DocumentRow> {
            Err(anyhow!("insert not supported by this test double"))
        }
    }

    struct FailingStore;

    #[async_trait]
    impl DocumentStore for FailingStore {
        async fn fetch_latest(&self, _user_id: Uuid) -> Result<Option<DocumentRow>> {
            Err(anyhow!("connection refused"))
        }

        async fn insert(&self, _document: NewDocument) -> Result<DocumentRow> {
            Err(anyhow!("connection refused"))
        }
    }

    fn make_document(parsed: Option<serde_json::Value>, raw_text: &str) -> DocumentRow {
        DocumentRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            filename: "resume.txt".to_string(),
            mime_type: "text/plain".to_string(),
            size_bytes: raw_text.len() as i64,
            raw_text: raw_text.to_string(),
            parsed,
            uploaded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_no_document_yields_none() {
        let store = FixedStore { document: None };
        assert_eq!(get_context(&store, Uuid::new_v4()).await, None);
    }

    #[tokio::test]
    async fn test_unparsed_document_yields_none() {
        let store = FixedStore {
            document: Some(make_document(None, "some raw text")),
        };
        assert_eq!(get_context(&store, Uuid::new_v4()).await, None);
    }

    #[tokio::test]
    async fn test_storage_error_absorbed_as_none() {
        assert_eq!(get_context(&FailingStore, Uuid::new_v4()).await, None);
    }

    #[tokio::test]
    async fn test_parsed_document_renders_context() {
        let parsed = json!({ "personal_info": { "name": "Jane" } });
        let store = FixedStore {
            document: Some(make_document(Some(parsed), "resume body")),
        };
        let context = get_context(&store, Uuid::new_v4()).await.expect("context");
        assert!(context.starts_with("Candidate Name: Jane\n"));
        assert!(context.contains("resume body"));
    }
}
