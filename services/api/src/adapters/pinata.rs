//! services/api/src/adapters/pinata.rs
//!
//! This module contains the adapter for the Pinata pinning service.
//! It implements the `PinningService` port from the `core` crate.

use async_trait::async_trait;
use paper_core::domain::PinnedFile;
use paper_core::ports::{PinningService, PortError, PortResult};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::json;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `PinningService` port using Pinata's v3 file API.
#[derive(Clone)]
pub struct PinataAdapter {
    http: reqwest::Client,
    jwt: String,
    upload_url: String,
}

impl PinataAdapter {
    /// `upload_url` is the upload host, e.g. `https://uploads.pinata.cloud`.
    pub fn new(http: reqwest::Client, jwt: &str, upload_url: &str) -> Self {
        Self {
            http,
            jwt: jwt.to_string(),
            upload_url: upload_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Deserialize)]
struct UploadEnvelope {
    data: UploadedFile,
}

#[derive(Deserialize)]
struct UploadedFile {
    cid: String,
    name: String,
}

fn upload_form(file_name: &str, html: &str, user_id: &str) -> PortResult<Form> {
    let file = Part::bytes(html.as_bytes().to_vec())
        .file_name(file_name.to_string())
        .mime_str("text/html")
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

    Ok(Form::new()
        .text("network", "public")
        .text("name", file_name.to_string())
        .text("keyvalues", json!({ "userId": user_id }).to_string())
        .part("file", file))
}

//=========================================================================================
// `PinningService` Trait Implementation
//=========================================================================================

#[async_trait]
impl PinningService for PinataAdapter {
    async fn pin_html(&self, file_name: &str, html: &str, user_id: &str) -> PortResult<PinnedFile> {
        let response = self
            .http
            .post(format!("{}/v3/files", self.upload_url))
            .bearer_auth(&self.jwt)
            .multipart(upload_form(file_name, html, user_id)?)
            .send()
            .await
            .map_err(|e| PortError::Unexpected(format!("Pinata request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => PortError::Unauthorized,
                _ => PortError::Unexpected(format!("Pinata returned {}: {}", status, detail)),
            });
        }

        let envelope: UploadEnvelope = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(format!("Unexpected Pinata response: {}", e)))?;

        Ok(PinnedFile {
            cid: envelope.data.cid,
            name: envelope.data.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_response_exposes_cid() {
        let raw = r#"{"data":{"id":"0190","name":"Notes.html","cid":"bafkreid","size":120,"number_of_files":1,"mime_type":"text/html","group_id":null}}"#;
        let envelope: UploadEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.data.cid, "bafkreid");
        assert_eq!(envelope.data.name, "Notes.html");
    }

    #[test]
    fn form_builds_for_html_files() {
        assert!(upload_form("Notes.html", "<p>x</p>", "user-1").is_ok());
    }
}
