//! services/api/src/web/protocol.rs
//!
//! Defines the JSON payloads exchanged with browser and CLI clients. The upload
//! contract is camelCase to match the editor's field names.

use chrono::{DateTime, Utc};
use paper_core::domain::{Paper, PaperFields, PaperPatch, PaperStatus, PublishReceipt, PublishRequest, User};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

//=========================================================================================
// Upload (publish) Contract
//=========================================================================================

/// Body of `POST /upload`. Every field is optional on the wire; `html` and
/// `title` are checked by the handler.
#[derive(Serialize, Deserialize, Debug, Default, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UploadRequest {
    pub html: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub theme: Option<String>,
    pub font: Option<String>,
    pub watermark: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_id: Option<String>,
}

impl UploadRequest {
    pub fn into_domain(self) -> PublishRequest {
        PublishRequest {
            html: self.html.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            content: self.content,
            theme: self.theme,
            font: self.font,
            watermark: self.watermark,
            paper_id: self.paper_id.filter(|id| !id.is_empty()),
        }
    }
}

impl From<PublishRequest> for UploadRequest {
    fn from(request: PublishRequest) -> Self {
        UploadRequest {
            html: Some(request.html),
            title: Some(request.title),
            content: request.content,
            theme: request.theme,
            font: request.font,
            watermark: request.watermark,
            paper_id: request.paper_id,
        }
    }
}

/// Response of `POST /upload`, both on success and on failure.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper_id: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl UploadResponse {
    pub fn published(receipt: PublishReceipt) -> Self {
        Self {
            success: true,
            cid: Some(receipt.cid),
            gateway: Some(receipt.gateway),
            paper_id: Some(receipt.paper_id),
            message: "Paper published successfully".to_string(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            cid: None,
            gateway: None,
            paper_id: None,
            message: message.into(),
        }
    }

    /// The receipt carried by a successful response.
    pub fn into_receipt(self) -> Option<PublishReceipt> {
        if !self.success {
            return None;
        }
        Some(PublishReceipt {
            cid: self.cid?,
            gateway: self.gateway?,
            paper_id: self.paper_id?,
        })
    }
}

//=========================================================================================
// Paper CRUD
//=========================================================================================

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaperResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub html_content: String,
    pub theme: String,
    pub font: String,
    pub watermark: bool,
    pub status: String,
    pub ipfs_cid: Option<String>,
    pub ipfs_gateway: Option<String>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Paper> for PaperResponse {
    fn from(paper: Paper) -> Self {
        PaperResponse {
            id: paper.id,
            title: paper.title,
            content: paper.content,
            html_content: paper.html_content,
            theme: paper.theme,
            font: paper.font,
            watermark: paper.watermark,
            status: paper.status.to_string(),
            ipfs_cid: paper.ipfs_cid,
            ipfs_gateway: paper.ipfs_gateway,
            user_id: paper.user_id,
            created_at: paper.created_at,
            updated_at: paper.updated_at,
        }
    }
}

fn parse_status(status: Option<String>) -> Result<Option<PaperStatus>, String> {
    status.map(|s| s.parse::<PaperStatus>()).transpose()
}

/// Body of `POST /papers`.
#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaperRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub html_content: String,
    pub theme: Option<String>,
    pub font: Option<String>,
    pub watermark: Option<bool>,
    pub status: Option<String>,
}

impl CreatePaperRequest {
    pub fn into_fields(self, user_id: &str) -> Result<PaperFields, String> {
        Ok(PaperFields {
            title: self.title,
            content: self.content,
            html_content: self.html_content,
            theme: self.theme.unwrap_or_else(|| paper_core::domain::DEFAULT_THEME_ID.to_string()),
            font: self.font.unwrap_or_else(|| paper_core::domain::DEFAULT_FONT_ID.to_string()),
            watermark: self.watermark.unwrap_or(true),
            status: parse_status(self.status)?.unwrap_or_default(),
            ipfs_cid: None,
            ipfs_gateway: None,
            user_id: user_id.to_string(),
        })
    }
}

/// Body of `PATCH /papers/{id}`. Absent fields are left unchanged.
#[derive(Deserialize, Debug, Default, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdatePaperRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub html_content: Option<String>,
    pub theme: Option<String>,
    pub font: Option<String>,
    pub watermark: Option<bool>,
    pub status: Option<String>,
}

impl UpdatePaperRequest {
    pub fn into_patch(self) -> Result<PaperPatch, String> {
        Ok(PaperPatch {
            title: self.title,
            content: self.content,
            html_content: self.html_content,
            theme: self.theme,
            font: self.font,
            watermark: self.watermark,
            status: parse_status(self.status)?,
            ipfs_cid: None,
            ipfs_gateway: None,
        })
    }
}

//=========================================================================================
// Export, Auth and Service Payloads
//=========================================================================================

/// Body of the export endpoints: editor content plus render settings.
#[derive(Deserialize, Debug, ToSchema)]
pub struct ExportRequest {
    pub content: String,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub font: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Query parameters the OAuth provider appends to the success redirect.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OAuthCallbackQuery {
    pub user_id: String,
    pub secret: String,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user_id: String,
    pub jwt: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_request_reads_camel_case_and_drops_empty_paper_id() {
        let request: UploadRequest =
            serde_json::from_str(r#"{"html":"<p>x</p>","title":"T","paperId":"","watermark":false}"#).unwrap();
        let domain = request.into_domain();
        assert_eq!(domain.paper_id, None);
        assert_eq!(domain.watermark, Some(false));
        assert_eq!(domain.title, "T");
    }

    #[test]
    fn failure_responses_omit_publish_fields() {
        let value = serde_json::to_value(UploadResponse::failure("Unauthorized")).unwrap();
        assert_eq!(value, serde_json::json!({ "success": false, "message": "Unauthorized" }));
    }

    #[test]
    fn receipt_requires_success_and_all_fields() {
        let ok: UploadResponse = serde_json::from_str(
            r#"{"success":true,"cid":"bafy","gateway":"https://gw/ipfs/bafy","paperId":"p1","message":"ok"}"#,
        )
        .unwrap();
        assert_eq!(ok.into_receipt().map(|r| r.paper_id), Some("p1".to_string()));

        let partial: UploadResponse = serde_json::from_str(r#"{"success":true,"cid":"bafy"}"#).unwrap();
        assert!(partial.into_receipt().is_none());
    }

    #[test]
    fn invalid_status_is_reported() {
        let request = UpdatePaperRequest {
            status: Some("archived".to_string()),
            ..Default::default()
        };
        assert!(request.into_patch().is_err());
    }
}
