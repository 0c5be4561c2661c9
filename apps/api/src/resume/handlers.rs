//! Axum route handlers for the résumé importer.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::Profile;
use crate::resume::ocr::{OcrError, ResumeUpload};
use crate::resume::parser::parse_resume_text;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub profile: Profile,
    pub text_length: usize,
}

/// POST /api/v1/resume/extract
///
/// Accepts a multipart `file` (PDF, ≤ 1 MB), runs OCR and returns the parsed
/// profile for review. Nothing is stored.
pub async fn handle_extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    let mut upload: Option<ResumeUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
        let content_type = field.content_type().map(String::from);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        upload = Some(ResumeUpload {
            file_name,
            content_type,
            bytes,
        });
    }

    let upload = upload.ok_or(OcrError::MissingFile)?;
    let text = state.ocr.extract_text(&upload).await?;
    let profile = parse_resume_text(&text);
    info!("Extracted profile from '{}'", upload.file_name);

    Ok(Json(ExtractResponse {
        profile,
        text_length: text.len(),
    }))
}

/// POST /api/v1/resume/save
///
/// Stores a reviewed extraction as the profile. An empty extraction is rejected.
pub async fn handle_save(
    State(state): State<AppState>,
    Json(profile): Json<Profile>,
) -> Result<StatusCode, AppError> {
    if profile.is_empty() {
        return Err(AppError::Validation("No extracted data to save.".to_string()));
    }
    state.profiles.save(&profile).await?;
    info!("Profile updated from resume");
    Ok(StatusCode::NO_CONTENT)
}
