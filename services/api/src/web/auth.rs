//! services/api/src/web/auth.rs
//!
//! Hand-off to the managed OAuth flow plus session inspection and logout.
//! Credentials never pass through this service; it only relays tokens.

use crate::web::port_failure;
use crate::web::protocol::{OAuthCallbackQuery, SessionResponse, UserResponse};
use crate::web::state::{AppState, Identity};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Extension, Json,
};
use std::sync::Arc;
use tracing::{error, info};

type HandlerError = (StatusCode, String);

fn session_jwt(identity: &Identity) -> Result<&str, HandlerError> {
    identity
        .jwt
        .as_deref()
        .ok_or((StatusCode::UNAUTHORIZED, "A session token is required".to_string()))
}

/// GET /auth/oauth/{provider} - Start the provider's OAuth flow
#[utoipa::path(
    get,
    path = "/auth/oauth/{provider}",
    params(("provider" = String, Path, description = "OAuth provider, e.g. google")),
    responses(
        (status = 307, description = "Redirect to the OAuth provider"),
        (status = 400, description = "Unsupported provider")
    )
)]
pub async fn oauth_start_handler(
    State(state): State<Arc<AppState>>,
    Path(provider): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let success = format!("{}/auth/callback", state.config.public_url);
    let failure = format!("{}/error", success);
    let url = state
        .identity
        .oauth_redirect_url(&provider, &success, &failure)
        .map_err(|e| port_failure(e, "start login"))?;
    Ok(Redirect::temporary(&url))
}

/// GET /auth/callback - Exchange the OAuth token for a session JWT
#[utoipa::path(
    get,
    path = "/auth/callback",
    params(
        ("userId" = String, Query, description = "User id issued by the OAuth flow"),
        ("secret" = String, Query, description = "One-time token secret")
    ),
    responses(
        (status = 200, description = "Session established", body = SessionResponse),
        (status = 401, description = "Token rejected")
    )
)]
pub async fn oauth_callback_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<OAuthCallbackQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let jwt = state
        .identity
        .exchange_oauth_token(&query.user_id, &query.secret)
        .await
        .map_err(|e| {
            error!("Failed to exchange OAuth token: {}", e);
            port_failure(e, "complete login")
        })?;
    info!("Session established for user {}", query.user_id);
    Ok(Json(SessionResponse {
        user_id: query.user_id,
        jwt,
    }))
}

/// GET /auth/me - The user behind the current session
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "No active session")
    )
)]
pub async fn me_handler(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, HandlerError> {
    let jwt = session_jwt(&identity)?;
    let user = state
        .identity
        .current_user(jwt)
        .await
        .map_err(|e| port_failure(e, "load account"))?;
    Ok(Json(UserResponse::from(user)))
}

/// POST /auth/logout - End the current session
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 204, description = "Logout successful"),
        (status = 401, description = "No active session")
    )
)]
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, HandlerError> {
    let jwt = session_jwt(&identity)?;
    state.identity.end_session(jwt).await.map_err(|e| {
        error!("Logout failed: {}", e);
        port_failure(e, "logout")
    })?;
    Ok(StatusCode::NO_CONTENT)
}
