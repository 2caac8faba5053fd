//! services/api/src/web/upload.rs
//!
//! The publish endpoint: pins the rendered HTML on IPFS and records the CID
//! against the caller's paper row.

use crate::web::protocol::{UploadRequest, UploadResponse};
use crate::web::state::{AppState, Identity};
use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use paper_core::domain::{gateway_url, PublishReceipt};
use paper_core::ports::PortError;
use std::sync::Arc;
use tracing::{error, info};

type UploadResult = (StatusCode, Json<UploadResponse>);

fn reject(status: StatusCode, message: impl Into<String>) -> UploadResult {
    (status, Json(UploadResponse::failure(message)))
}

/// Publish a paper to IPFS.
///
/// The body is read raw so that an empty body behaves like `{}`.
#[utoipa::path(
    post,
    path = "/upload",
    request_body(content = UploadRequest, content_type = "application/json"),
    responses(
        (status = 200, description = "Paper published", body = UploadResponse),
        (status = 400, description = "Missing html or title", body = UploadResponse),
        (status = 401, description = "No caller identity", body = UploadResponse),
        (status = 404, description = "paperId does not name one of the caller's papers", body = UploadResponse),
        (status = 500, description = "Pinning or storage failure", body = UploadResponse)
    ),
    params(
        ("x-appwrite-user-id" = Option<String>, Header, description = "User id asserted by the function runtime.")
    )
)]
pub async fn upload_handler(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    body: String,
) -> UploadResult {
    let payload: UploadRequest = if body.trim().is_empty() {
        UploadRequest::default()
    } else {
        match serde_json::from_str(&body) {
            Ok(payload) => payload,
            Err(e) => return reject(StatusCode::BAD_REQUEST, format!("Invalid JSON body: {}", e)),
        }
    };

    let request = payload.into_domain();
    if !request.has_required_fields() {
        return reject(StatusCode::BAD_REQUEST, "Missing required fields");
    }
    let user_id = identity.user_id;

    // An update may only target one of the caller's own rows.
    if let Some(paper_id) = request.paper_id.as_deref() {
        match state.papers.get_paper(paper_id).await {
            Ok(existing) if existing.user_id == user_id => {}
            Ok(_) | Err(PortError::NotFound(_)) => {
                return reject(StatusCode::NOT_FOUND, "Paper not found");
            }
            Err(e) => {
                error!("Upload error: failed to load paper {}: {}", paper_id, e);
                return reject(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
            }
        }
    }

    info!("Uploading to IPFS for user {}", user_id);
    let pinned = match state
        .pinning
        .pin_html(&request.file_name(), &request.html, &user_id)
        .await
    {
        Ok(pinned) => pinned,
        Err(e) => {
            error!("Upload error: {}", e);
            return reject(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
        }
    };
    let gateway = gateway_url(&state.config.pinata.gateway, &pinned.cid);
    info!("Successfully uploaded to IPFS: {}", pinned.cid);

    let paper_id = request.paper_id.clone();
    let fields = request.into_fields(&user_id, &pinned.cid, &gateway);
    let saved = match paper_id {
        Some(id) => {
            info!("Updating paper {}", id);
            state.papers.update_paper(&id, fields.into()).await
        }
        None => {
            info!("Creating new paper");
            state.papers.create_paper(fields).await
        }
    };

    match saved {
        Ok(paper) => {
            info!("Paper saved with ID: {}", paper.id);
            let receipt = PublishReceipt {
                cid: pinned.cid,
                gateway,
                paper_id: paper.id,
            };
            (StatusCode::OK, Json(UploadResponse::published(receipt)))
        }
        Err(e) => {
            error!("Upload error: {}", e);
            reject(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
