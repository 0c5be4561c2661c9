use std::sync::Arc;

use crate::llm_client::TextGenerator;
use crate::resume::ocr::OcrClient;
use crate::store::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Free-text generator for long-answer fields. Default: LlmClient.
    pub generator: Arc<dyn TextGenerator>,
    pub ocr: OcrClient,
    pub profiles: ProfileStore,
}
