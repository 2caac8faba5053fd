pub mod auth;
pub mod export;
pub mod middleware;
pub mod papers;
pub mod protocol;
pub mod rest;
pub mod state;
pub mod upload;

#[cfg(test)]
mod testing;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use paper_core::ports::PortError;
use std::sync::Arc;
use tracing::error;

use crate::web::middleware::{require_session, require_upload_identity};
use crate::web::state::AppState;

const BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Builds the API router. CORS and Swagger UI are layered on by the binary.
pub fn router(state: Arc<AppState>) -> Router {
    // Public routes (no identity required)
    let public_routes = Router::new()
        .route("/health", get(rest::health_handler))
        .route("/export/html", post(export::export_html_handler))
        .route("/auth/oauth/{provider}", get(auth::oauth_start_handler))
        .route("/auth/callback", get(auth::oauth_callback_handler));

    // Called by the function runtime, which asserts the user id header
    let upload_routes = Router::new()
        .route("/upload", post(upload::upload_handler))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_upload_identity,
        ));

    // Protected routes (session JWT required)
    let protected_routes = Router::new()
        .route(
            "/papers",
            get(papers::list_papers_handler).post(papers::create_paper_handler),
        )
        .route(
            "/papers/{id}",
            get(papers::get_paper_handler)
                .patch(papers::update_paper_handler)
                .delete(papers::delete_paper_handler),
        )
        .route("/export/png", post(export::export_png_handler))
        .route("/auth/me", get(auth::me_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .merge(public_routes)
        .merge(upload_routes)
        .merge(protected_routes)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(state)
}

/// Maps a port failure onto the status and message a handler returns.
pub fn port_failure(e: PortError, action: &str) -> (StatusCode, String) {
    match e {
        PortError::NotFound(_) => (StatusCode::NOT_FOUND, "Paper not found".to_string()),
        PortError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
        PortError::Invalid(message) => (StatusCode::BAD_REQUEST, message),
        PortError::Unexpected(message) => {
            error!("Failed to {}: {}", action, message);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Failed to {}", action))
        }
    }
}
