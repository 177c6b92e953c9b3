use std::sync::Arc;

use crate::extraction::fetch::DocumentFetcher;
use crate::llm_client::CompletionClient;
use crate::storage::{Archive, ConfigLookup};

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds only stateless clients; requests never share mutable data.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn DocumentFetcher>,
    pub lookup: Arc<dyn ConfigLookup>,
    pub archive: Arc<dyn Archive>,
    pub llm: CompletionClient,
}
