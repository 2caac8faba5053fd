//! services/api/src/web/middleware.rs
//!
//! Authentication middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::warn;

use crate::web::protocol::UploadResponse;
use crate::web::state::{AppState, Identity};

/// Header the function runtime sets to the id of the calling user.
pub const USER_ID_HEADER: &str = "x-appwrite-user-id";

fn asserted_user_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(UploadResponse::failure("Unauthorized")),
    )
        .into_response()
}

async fn session_identity(state: &AppState, jwt: Option<String>) -> Result<Identity, Response> {
    let Some(token) = jwt else {
        return Err(unauthorized());
    };
    match state.identity.current_user(&token).await {
        Ok(user) => Ok(Identity {
            user_id: user.id,
            jwt: Some(token),
        }),
        Err(e) => {
            warn!("Rejected session token: {}", e);
            Err(unauthorized())
        }
    }
}

/// Middleware for routes called by signed-in browsers and the CLI.
///
/// The caller must present a bearer JWT, which is resolved through the account
/// API. The `x-appwrite-user-id` header carries no weight here.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let jwt = bearer_token(req.headers());
    match session_identity(&state, jwt).await {
        Ok(identity) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        Err(response) => response,
    }
}

/// Middleware for the upload route, which the function runtime invokes.
///
/// The runtime asserts the caller through `x-appwrite-user-id`, which is
/// trusted as is. Without it a bearer JWT is required.
pub async fn require_upload_identity(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let jwt = bearer_token(req.headers());
    let identity = match asserted_user_id(req.headers()) {
        Some(user_id) => Identity { user_id, jwt },
        None => match session_identity(&state, jwt).await {
            Ok(identity) => identity,
            Err(response) => return response,
        },
    };
    req.extensions_mut().insert(identity);
    next.run(req).await
}
