//! services/api/src/web/rest.rs
//!
//! The master definition for the OpenAPI specification, plus the handlers
//! that do not belong to a feature module.

use crate::web::protocol::{
    CreatePaperRequest, ExportRequest, HealthResponse, PaperResponse, SessionResponse,
    UpdatePaperRequest, UploadRequest, UploadResponse, UserResponse,
};
use crate::web::{auth, export, papers, upload};
use axum::response::Json;
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        upload::upload_handler,
        papers::list_papers_handler,
        papers::create_paper_handler,
        papers::get_paper_handler,
        papers::update_paper_handler,
        papers::delete_paper_handler,
        export::export_html_handler,
        export::export_png_handler,
        auth::oauth_start_handler,
        auth::oauth_callback_handler,
        auth::me_handler,
        auth::logout_handler,
    ),
    components(
        schemas(
            UploadRequest,
            UploadResponse,
            PaperResponse,
            CreatePaperRequest,
            UpdatePaperRequest,
            ExportRequest,
            UserResponse,
            SessionResponse,
            HealthResponse
        )
    ),
    tags(
        (name = "Paper API", description = "Publishing, storage and export for paper documents.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/upload",
            "/papers",
            "/papers/{id}",
            "/export/html",
            "/export/png",
            "/auth/oauth/{provider}",
            "/auth/callback",
            "/auth/me",
            "/auth/logout",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[tokio::test]
    async fn health_reports_crate_version() {
        let Json(body) = health_handler().await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    }
}
