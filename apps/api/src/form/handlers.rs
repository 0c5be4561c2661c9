//! Axum route handlers for the fill and generate messages.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::errors::AppError;
use crate::form::document::FormPage;
use crate::form::orchestrator::{fill_with_profile, FilledField, GENERATION_FAILED};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct FillRequest {
    /// Markup of the page (or the form) to fill.
    pub html: String,
}

#[derive(Debug, Serialize)]
pub struct FillResponse {
    pub status: String,
    pub filled: usize,
    pub fields: Vec<FilledField>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub result: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/fill
///
/// Reads the stored profile once, runs a fill pass over the submitted markup
/// and returns the values written. `filled` counts structured fills only.
pub async fn handle_fill(
    State(state): State<AppState>,
    Json(request): Json<FillRequest>,
) -> Result<Json<FillResponse>, AppError> {
    let profile = state.profiles.load().await?;
    let mut page = FormPage::parse(&request.html);
    if page.is_empty() {
        debug!("No fillable controls in submitted markup");
    } else {
        info!("Fill requested for {} candidate controls", page.len());
    }

    let report = fill_with_profile(&mut page, &profile, state.generator.as_ref()).await;

    Ok(Json(FillResponse {
        status: "done".to_string(),
        filled: report.filled,
        fields: report.fields,
    }))
}

/// POST /api/v1/generate
///
/// Wraps the text generator. Failures come back as a readable `result`, never as an error status.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    if request.prompt.trim().is_empty() {
        return Err(AppError::Validation("prompt cannot be empty".to_string()));
    }

    let result = match state.generator.generate_text(&request.prompt).await {
        Ok(text) => text,
        Err(e) => {
            error!("Generation relay failed: {e:?}");
            GENERATION_FAILED.to_string()
        }
    };

    Ok(Json(GenerateResponse { result }))
}
