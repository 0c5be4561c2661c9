//! Settings-surface handlers for the stored profile.

use axum::{extract::State, http::StatusCode, Json};

use crate::errors::AppError;
use crate::models::profile::Profile;
use crate::state::AppState;

/// GET /api/v1/profile
pub async fn handle_get_profile(State(state): State<AppState>) -> Result<Json<Profile>, AppError> {
    Ok(Json(state.profiles.load().await?))
}

/// PUT /api/v1/profile
///
/// Saves the profile with every attribute trimmed and returns what was stored.
pub async fn handle_save_profile(
    State(state): State<AppState>,
    Json(profile): Json<Profile>,
) -> Result<Json<Profile>, AppError> {
    let profile = profile.trimmed();
    state.profiles.save(&profile).await?;
    Ok(Json(profile))
}

/// DELETE /api/v1/profile
pub async fn handle_clear_profile(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.profiles.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}
