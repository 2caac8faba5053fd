//! crates/paper_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any backend or serialization format.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_THEME_ID: &str = "paper";
pub const DEFAULT_FONT_ID: &str = "serif";

/// Publication state of a paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaperStatus {
    #[default]
    Draft,
    Published,
}

impl PaperStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaperStatus::Draft => "draft",
            PaperStatus::Published => "published",
        }
    }
}

impl fmt::Display for PaperStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaperStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PaperStatus::Draft),
            "published" => Ok(PaperStatus::Published),
            other => Err(format!("unknown paper status '{}'", other)),
        }
    }
}

/// A document owned by exactly one user, stored as a row in the hosted table.
#[derive(Debug, Clone, PartialEq)]
pub struct Paper {
    pub id: String,
    pub title: String,
    pub content: String,
    pub html_content: String,
    pub theme: String,
    pub font: String,
    pub watermark: bool,
    pub status: PaperStatus,
    pub ipfs_cid: Option<String>,
    pub ipfs_gateway: Option<String>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Every writable column of a paper row. Used for creation and full upserts.
#[derive(Debug, Clone, PartialEq)]
pub struct PaperFields {
    pub title: String,
    pub content: String,
    pub html_content: String,
    pub theme: String,
    pub font: String,
    pub watermark: bool,
    pub status: PaperStatus,
    pub ipfs_cid: Option<String>,
    pub ipfs_gateway: Option<String>,
    pub user_id: String,
}

/// A partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaperPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub html_content: Option<String>,
    pub theme: Option<String>,
    pub font: Option<String>,
    pub watermark: Option<bool>,
    pub status: Option<PaperStatus>,
    pub ipfs_cid: Option<String>,
    pub ipfs_gateway: Option<String>,
}

impl PaperPatch {
    pub fn is_empty(&self) -> bool {
        *self == PaperPatch::default()
    }
}

impl From<PaperFields> for PaperPatch {
    fn from(fields: PaperFields) -> Self {
        PaperPatch {
            title: Some(fields.title),
            content: Some(fields.content),
            html_content: Some(fields.html_content),
            theme: Some(fields.theme),
            font: Some(fields.font),
            watermark: Some(fields.watermark),
            status: Some(fields.status),
            ipfs_cid: fields.ipfs_cid,
            ipfs_gateway: fields.ipfs_gateway,
        }
    }
}

/// The identity behind a session, as reported by the managed auth service.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// A file stored by the pinning service.
#[derive(Debug, Clone, PartialEq)]
pub struct PinnedFile {
    pub cid: String,
    pub name: String,
}

/// Everything the editor sends when publishing a paper.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublishRequest {
    pub html: String,
    pub title: String,
    pub content: Option<String>,
    pub theme: Option<String>,
    pub font: Option<String>,
    pub watermark: Option<bool>,
    pub paper_id: Option<String>,
}

impl PublishRequest {
    /// Both the rendered document and a title are needed to publish.
    pub fn has_required_fields(&self) -> bool {
        !self.html.is_empty() && !self.title.is_empty()
    }

    /// Name of the file handed to the pinning service.
    pub fn file_name(&self) -> String {
        format!("{}.html", self.title)
    }

    /// Builds the row written after a successful pin, filling in editor defaults.
    pub fn into_fields(self, user_id: &str, cid: &str, gateway: &str) -> PaperFields {
        PaperFields {
            title: self.title,
            content: self.content.unwrap_or_default(),
            html_content: self.html,
            theme: non_empty_or(self.theme, DEFAULT_THEME_ID),
            font: non_empty_or(self.font, DEFAULT_FONT_ID),
            watermark: self.watermark.unwrap_or(true),
            status: PaperStatus::Published,
            ipfs_cid: Some(cid.to_string()),
            ipfs_gateway: Some(gateway.to_string()),
            user_id: user_id.to_string(),
        }
    }
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => default.to_string(),
    }
}

/// What the caller gets back after a publish.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishReceipt {
    pub cid: String,
    pub gateway: String,
    pub paper_id: String,
}

/// Public address of a pinned file on the configured gateway.
pub fn gateway_url(gateway_base: &str, cid: &str) -> String {
    format!("{}/ipfs/{}", gateway_base.trim_end_matches('/'), cid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_defaults_fill_missing_editor_settings() {
        let request = PublishRequest {
            html: "<p>hi</p>".to_string(),
            title: "Notes".to_string(),
            theme: Some(String::new()),
            ..Default::default()
        };

        let fields = request.into_fields("user-1", "bafy123", "https://gw/ipfs/bafy123");
        assert_eq!(fields.theme, "paper");
        assert_eq!(fields.font, "serif");
        assert!(fields.watermark);
        assert_eq!(fields.content, "");
        assert_eq!(fields.status, PaperStatus::Published);
        assert_eq!(fields.ipfs_cid.as_deref(), Some("bafy123"));
        assert_eq!(fields.user_id, "user-1");
    }

    #[test]
    fn explicit_watermark_false_is_kept() {
        let request = PublishRequest {
            html: "<p>hi</p>".to_string(),
            title: "Notes".to_string(),
            font: Some("lora".to_string()),
            watermark: Some(false),
            ..Default::default()
        };

        let fields = request.into_fields("u", "cid", "gw");
        assert!(!fields.watermark);
        assert_eq!(fields.font, "lora");
    }

    #[test]
    fn required_fields_reject_empty_strings() {
        let mut request = PublishRequest {
            html: "<p>x</p>".to_string(),
            ..Default::default()
        };
        assert!(!request.has_required_fields());
        request.title = "T".to_string();
        assert!(request.has_required_fields());
        request.html.clear();
        assert!(!request.has_required_fields());
    }

    #[test]
    fn status_parses_known_values_only() {
        assert_eq!("draft".parse::<PaperStatus>(), Ok(PaperStatus::Draft));
        assert_eq!("published".parse::<PaperStatus>(), Ok(PaperStatus::Published));
        assert!("archived".parse::<PaperStatus>().is_err());
    }

    #[test]
    fn gateway_url_tolerates_trailing_slash() {
        assert_eq!(
            gateway_url("https://example.mypinata.cloud/", "bafy"),
            "https://example.mypinata.cloud/ipfs/bafy"
        );
    }
}
