//! services/api/src/web/papers.rs
//!
//! CRUD handlers for the caller's papers. Rows owned by someone else are
//! reported as missing.

use crate::web::protocol::{CreatePaperRequest, PaperResponse, UpdatePaperRequest};
use crate::web::state::{AppState, Identity};
use crate::web::port_failure;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use paper_core::domain::Paper;
use std::sync::Arc;
use tracing::info;

type HandlerError = (StatusCode, String);

async fn load_owned(state: &AppState, paper_id: &str, user_id: &str) -> Result<Paper, HandlerError> {
    let paper = state
        .papers
        .get_paper(paper_id)
        .await
        .map_err(|e| port_failure(e, "load paper"))?;
    if paper.user_id != user_id {
        return Err((StatusCode::NOT_FOUND, "Paper not found".to_string()));
    }
    Ok(paper)
}

/// List the caller's papers, newest first.
#[utoipa::path(
    get,
    path = "/papers",
    responses(
        (status = 200, description = "The caller's papers", body = [PaperResponse]),
        (status = 401, description = "No caller identity")
    )
)]
pub async fn list_papers_handler(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, HandlerError> {
    let papers = state
        .papers
        .list_papers_for_user(&identity.user_id)
        .await
        .map_err(|e| port_failure(e, "load papers"))?;
    let body: Vec<PaperResponse> = papers.into_iter().map(PaperResponse::from).collect();
    Ok(Json(body))
}

/// Save a new paper. New papers are drafts unless a status is given.
#[utoipa::path(
    post,
    path = "/papers",
    request_body = CreatePaperRequest,
    responses(
        (status = 201, description = "Paper created", body = PaperResponse),
        (status = 400, description = "Invalid status"),
        (status = 401, description = "No caller identity")
    )
)]
pub async fn create_paper_handler(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<CreatePaperRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let fields = req
        .into_fields(&identity.user_id)
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;
    let paper = state
        .papers
        .create_paper(fields)
        .await
        .map_err(|e| port_failure(e, "create paper"))?;
    info!("Created paper {} for user {}", paper.id, identity.user_id);
    Ok((StatusCode::CREATED, Json(PaperResponse::from(paper))))
}

#[utoipa::path(
    get,
    path = "/papers/{id}",
    params(("id" = String, Path, description = "Paper id")),
    responses(
        (status = 200, description = "The paper", body = PaperResponse),
        (status = 404, description = "No such paper for this user")
    )
)]
pub async fn get_paper_handler(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(paper_id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let paper = load_owned(&state, &paper_id, &identity.user_id).await?;
    Ok(Json(PaperResponse::from(paper)))
}

/// Apply a partial update to one of the caller's papers.
#[utoipa::path(
    patch,
    path = "/papers/{id}",
    params(("id" = String, Path, description = "Paper id")),
    request_body = UpdatePaperRequest,
    responses(
        (status = 200, description = "Updated paper", body = PaperResponse),
        (status = 400, description = "Invalid status"),
        (status = 404, description = "No such paper for this user")
    )
)]
pub async fn update_paper_handler(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(paper_id): Path<String>,
    Json(req): Json<UpdatePaperRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let patch = req.into_patch().map_err(|e| (StatusCode::BAD_REQUEST, e))?;
    let current = load_owned(&state, &paper_id, &identity.user_id).await?;
    if patch.is_empty() {
        return Ok(Json(PaperResponse::from(current)));
    }
    let paper = state
        .papers
        .update_paper(&paper_id, patch)
        .await
        .map_err(|e| port_failure(e, "update paper"))?;
    Ok(Json(PaperResponse::from(paper)))
}

#[utoipa::path(
    delete,
    path = "/papers/{id}",
    params(("id" = String, Path, description = "Paper id")),
    responses(
        (status = 204, description = "Paper deleted"),
        (status = 404, description = "No such paper for this user")
    )
)]
pub async fn delete_paper_handler(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(paper_id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    load_owned(&state, &paper_id, &identity.user_id).await?;
    state
        .papers
        .delete_paper(&paper_id)
        .await
        .map_err(|e| port_failure(e, "delete paper"))?;
    info!("Deleted paper {} for user {}", paper_id, identity.user_id);
    Ok(StatusCode::NO_CONTENT)
}
