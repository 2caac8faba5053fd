//! services/api/src/adapters/tables.rs
//!
//! The concrete implementation of the `PaperRepository` port on top of the
//! managed backend's TablesDB row API.

use crate::adapters::appwrite::{send_empty, send_json, AppwriteClient};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use paper_core::domain::{Paper, PaperFields, PaperPatch, PaperStatus};
use paper_core::ports::{PaperRepository, PortError, PortResult, LIST_LIMIT};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

#[derive(Clone)]
pub struct AppwriteTablesAdapter {
    client: AppwriteClient,
    database_id: String,
    table_id: String,
}

impl AppwriteTablesAdapter {
    pub fn new(client: AppwriteClient, database_id: &str, table_id: &str) -> Self {
        Self {
            client,
            database_id: database_id.to_string(),
            table_id: table_id.to_string(),
        }
    }

    fn rows_path(&self) -> String {
        format!("/tablesdb/{}/tables/{}/rows", self.database_id, self.table_id)
    }

    fn row_path(&self, row_id: &str) -> PortResult<String> {
        if !is_row_id(row_id) {
            return Err(PortError::NotFound(format!("Paper {} not found", row_id)));
        }
        Ok(format!("{}/{}", self.rows_path(), row_id))
    }
}

/// Row ids are at most 36 of `[A-Za-z0-9._-]` and start alphanumeric, so a
/// valid id is always a single literal path segment.
fn is_row_id(id: &str) -> bool {
    id.len() <= 36
        && id.chars().next().is_some_and(|c| c.is_ascii_alphanumeric())
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

//=========================================================================================
// Row Records
//=========================================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaperRow {
    #[serde(rename = "$id")]
    id: String,
    #[serde(rename = "$createdAt")]
    created_at: DateTime<Utc>,
    #[serde(rename = "$updatedAt")]
    updated_at: DateTime<Utc>,
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    html_content: String,
    theme: String,
    font: String,
    watermark: bool,
    status: String,
    ipfs_cid: Option<String>,
    ipfs_gateway: Option<String>,
    user_id: String,
}

impl PaperRow {
    fn to_domain(self) -> PortResult<Paper> {
        let status: PaperStatus = self
            .status
            .parse()
            .map_err(|e: String| PortError::Unexpected(format!("Row {}: {}", self.id, e)))?;
        Ok(Paper {
            id: self.id,
            title: self.title,
            content: self.content,
            html_content: self.html_content,
            theme: self.theme,
            font: self.font,
            watermark: self.watermark,
            status,
            ipfs_cid: self.ipfs_cid,
            ipfs_gateway: self.ipfs_gateway,
            user_id: self.user_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Deserialize)]
struct RowList {
    rows: Vec<PaperRow>,
}

/// Column values sent on create/update. Absent columns are left untouched.
#[derive(Serialize, Default)]
#[serde(rename_all = "camelCase")]
struct PaperData {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    html_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    watermark: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ipfs_cid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ipfs_gateway: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
}

impl From<PaperPatch> for PaperData {
    fn from(patch: PaperPatch) -> Self {
        PaperData {
            title: patch.title,
            content: patch.content,
            html_content: patch.html_content,
            theme: patch.theme,
            font: patch.font,
            watermark: patch.watermark,
            status: patch.status.map(|s| s.as_str()),
            ipfs_cid: patch.ipfs_cid,
            ipfs_gateway: patch.ipfs_gateway,
            user_id: None,
        }
    }
}

impl From<PaperFields> for PaperData {
    fn from(fields: PaperFields) -> Self {
        let user_id = fields.user_id.clone();
        PaperData {
            user_id: Some(user_id),
            ..PaperData::from(PaperPatch::from(fields))
        }
    }
}

/// Query strings selecting one owner's papers, newest first.
fn owner_queries(user_id: &str) -> Vec<(&'static str, String)> {
    vec![
        ("queries[]", json!({ "method": "equal", "attribute": "userId", "values": [user_id] }).to_string()),
        ("queries[]", json!({ "method": "orderDesc", "attribute": "$createdAt" }).to_string()),
        ("queries[]", json!({ "method": "limit", "values": [LIST_LIMIT] }).to_string()),
    ]
}

//=========================================================================================
// `PaperRepository` Trait Implementation
//=========================================================================================

#[async_trait]
impl PaperRepository for AppwriteTablesAdapter {
    async fn create_paper(&self, fields: PaperFields) -> PortResult<Paper> {
        let body = json!({
            "rowId": Uuid::new_v4().simple().to_string(),
            "data": PaperData::from(fields),
        });
        let row: PaperRow = send_json(self.client.server(Method::POST, &self.rows_path()).json(&body)).await?;
        row.to_domain()
    }

    async fn update_paper(&self, paper_id: &str, patch: PaperPatch) -> PortResult<Paper> {
        let body = json!({ "data": PaperData::from(patch) });
        let row: PaperRow =
            send_json(self.client.server(Method::PATCH, &self.row_path(paper_id)?).json(&body)).await?;
        row.to_domain()
    }

    async fn get_paper(&self, paper_id: &str) -> PortResult<Paper> {
        let row: PaperRow = send_json(self.client.server(Method::GET, &self.row_path(paper_id)?))
            .await
            .map_err(|e| match e {
                PortError::NotFound(_) => PortError::NotFound(format!("Paper {} not found", paper_id)),
                other => other,
            })?;
        row.to_domain()
    }

    async fn delete_paper(&self, paper_id: &str) -> PortResult<()> {
        send_empty(self.client.server(Method::DELETE, &self.row_path(paper_id)?)).await
    }

    async fn list_papers_for_user(&self, user_id: &str) -> PortResult<Vec<Paper>> {
        let request = self
            .client
            .server(Method::GET, &self.rows_path())
            .query(&owner_queries(user_id));
        let list: RowList = send_json(request).await?;
        list.rows.into_iter().map(PaperRow::to_domain).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_decode_into_domain_papers() {
        let raw = r#"{
            "$id": "abc123",
            "$createdAt": "2025-01-02T03:04:05.000+00:00",
            "$updatedAt": "2025-01-03T03:04:05.000+00:00",
            "$tableId": "papers",
            "title": "Notes",
            "content": "plain",
            "htmlContent": "<p>plain</p>",
            "theme": "nord",
            "font": "lora",
            "watermark": false,
            "status": "published",
            "ipfsCid": "bafy",
            "ipfsGateway": "https://gw/ipfs/bafy",
            "userId": "user-1"
        }"#;
        let paper = serde_json::from_str::<PaperRow>(raw).unwrap().to_domain().unwrap();
        assert_eq!(paper.id, "abc123");
        assert_eq!(paper.status, PaperStatus::Published);
        assert_eq!(paper.html_content, "<p>plain</p>");
        assert_eq!(paper.ipfs_cid.as_deref(), Some("bafy"));
        assert!(paper.updated_at > paper.created_at);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let raw = r#"{"$id":"a","$createdAt":"2025-01-02T03:04:05.000+00:00","$updatedAt":"2025-01-02T03:04:05.000+00:00",
            "title":"t","theme":"paper","font":"serif","watermark":true,"status":"archived","userId":"u"}"#;
        let row = serde_json::from_str::<PaperRow>(raw).unwrap();
        assert!(matches!(row.to_domain(), Err(PortError::Unexpected(_))));
    }

    #[test]
    fn patches_only_send_changed_columns() {
        let patch = PaperPatch {
            title: Some("New".to_string()),
            status: Some(PaperStatus::Draft),
            ..Default::default()
        };
        let value = serde_json::to_value(PaperData::from(patch)).unwrap();
        assert_eq!(value, json!({ "title": "New", "status": "draft" }));
    }

    #[test]
    fn created_rows_carry_the_owner() {
        let fields = PaperFields {
            title: "T".to_string(),
            content: String::new(),
            html_content: "<p>x</p>".to_string(),
            theme: "paper".to_string(),
            font: "serif".to_string(),
            watermark: true,
            status: PaperStatus::Draft,
            ipfs_cid: None,
            ipfs_gateway: None,
            user_id: "user-9".to_string(),
        };
        let value = serde_json::to_value(PaperData::from(fields)).unwrap();
        assert_eq!(value["userId"], "user-9");
        assert_eq!(value["htmlContent"], "<p>x</p>");
        assert!(value.get("ipfsCid").is_none());
    }

    #[test]
    fn row_ids_must_be_single_path_segments() {
        let adapter = AppwriteTablesAdapter::new(
            AppwriteClient::new(reqwest::Client::new(), "https://cloud.appwrite.io/v1", "proj"),
            "db",
            "papers",
        );
        assert_eq!(
            adapter.row_path("a1b2c3d4").unwrap(),
            "/tablesdb/db/tables/papers/rows/a1b2c3d4"
        );
        let too_long = "x".repeat(37);
        for id in ["a/../b", "..", "", "-leading", "a?b=c", "a%2Fb", too_long.as_str()] {
            assert!(
                matches!(adapter.row_path(id), Err(PortError::NotFound(_))),
                "{:?}",
                id
            );
        }
    }

    #[test]
    fn owner_queries_filter_sort_and_limit() {
        let queries = owner_queries("user-1");
        assert_eq!(queries.len(), 3);
        assert!(queries.iter().all(|(k, _)| *k == "queries[]"));
        let equal: serde_json::Value = serde_json::from_str(&queries[0].1).unwrap();
        assert_eq!(equal, json!({ "method": "equal", "attribute": "userId", "values": ["user-1"] }));
        assert!(queries[1].1.contains("orderDesc"));
        assert!(queries[2].1.contains("100"));
    }
}
