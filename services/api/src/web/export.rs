//! services/api/src/web/export.rs
//!
//! Download endpoints: the standalone HTML document and its PNG rendering.

use crate::web::port_failure;
use crate::web::protocol::ExportRequest;
use crate::web::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use paper_core::domain::{DEFAULT_FONT_ID, DEFAULT_THEME_ID};
use paper_core::export::{export_html, html_file_name, png_file_name, raster_html, DocumentMeta};
use paper_core::themes::{theme_or_default, Theme};
use std::sync::Arc;

/// `Content-Disposition` value with characters that would break the header removed.
fn attachment(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .filter(|c| !c.is_control() && *c != '"' && *c != '\\')
        .collect();
    format!("attachment; filename=\"{}\"", safe)
}

fn render_settings(req: &ExportRequest) -> (&'static Theme, &str) {
    let theme = theme_or_default(req.theme.as_deref().unwrap_or(DEFAULT_THEME_ID));
    let font = req.font.as_deref().unwrap_or(DEFAULT_FONT_ID);
    (theme, font)
}

/// Export editor content as a self-contained HTML document.
#[utoipa::path(
    post,
    path = "/export/html",
    request_body = ExportRequest,
    responses(
        (status = 200, description = "HTML document", content_type = "text/html")
    )
)]
pub async fn export_html_handler(Json(req): Json<ExportRequest>) -> impl IntoResponse {
    let (theme, font) = render_settings(&req);
    let document = export_html(&req.content, font, theme);
    let title = req
        .title
        .clone()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DocumentMeta::from_content(&req.content).title);

    (
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, attachment(&html_file_name(&title))),
        ],
        document,
    )
}

/// Render editor content to a PNG image.
#[utoipa::path(
    post,
    path = "/export/png",
    request_body = ExportRequest,
    responses(
        (status = 200, description = "PNG image", content_type = "image/png"),
        (status = 401, description = "No caller identity"),
        (status = 500, description = "Rendering failed")
    )
)]
pub async fn export_png_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExportRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let (theme, font) = render_settings(&req);
    let document = raster_html(&req.content, font, theme);
    let png = state
        .rasterizer
        .rasterize(&document)
        .await
        .map_err(|e| port_failure(e, "render image"))?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_DISPOSITION, attachment(&png_file_name(Utc::now()))),
        ],
        png,
    ))
}
