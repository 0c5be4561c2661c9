pub mod health;
pub mod profile;

use axum::{
    routing::{get, post},
    Router,
};

use crate::form::handlers as form_handlers;
use crate::resume::handlers as resume_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Fill engine
        .route("/api/v1/fill", post(form_handlers::handle_fill))
        .route("/api/v1/generate", post(form_handlers::handle_generate))
        // Profile settings
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile)
                .put(profile::handle_save_profile)
                .delete(profile::handle_clear_profile),
        )
        // Résumé importer
        .route(
            "/api/v1/resume/extract",
            post(resume_handlers::handle_extract),
        )
        .route("/api/v1/resume/save", post(resume_handlers::handle_save))
        .with_state(state)
}
