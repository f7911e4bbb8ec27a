use std::sync::Arc;

use crate::documents::store::DocumentStore;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum
/// extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Document storage seam. Pg-backed in production; swapped for an
    /// in-memory double in tests.
    pub documents: Arc<dyn DocumentStore>,
}
