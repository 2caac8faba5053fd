//! services/api/src/adapters/functions.rs
//!
//! Client side of publishing: implements the `PublishService` port by executing
//! the deployed upload function on the user's behalf.

use crate::adapters::appwrite::{send_json, AppwriteClient};
use crate::web::middleware::USER_ID_HEADER;
use crate::web::protocol::{UploadRequest, UploadResponse};
use async_trait::async_trait;
use paper_core::domain::{PublishReceipt, PublishRequest};
use paper_core::ports::{PortError, PortResult, PublishService};
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

pub const DEFAULT_FUNCTION_ID: &str = "tsbin-paper-upload-to-ipfs";
pub const UPLOAD_PATH: &str = "/upload";

#[derive(Clone)]
pub struct AppwriteFunctionsAdapter {
    client: AppwriteClient,
    function_id: String,
}

impl AppwriteFunctionsAdapter {
    pub fn new(client: AppwriteClient, function_id: &str) -> Self {
        Self {
            client,
            function_id: function_id.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExecutionRecord {
    #[serde(rename = "$id")]
    id: String,
    status: String,
    #[serde(default)]
    response_status_code: u16,
    #[serde(default)]
    response_body: String,
}

/// Interprets a finished execution as a publish outcome.
fn receipt_from_execution(execution: ExecutionRecord) -> PortResult<PublishReceipt> {
    if execution.status == "failed" {
        return Err(PortError::Unexpected("Failed to call upload function".to_string()));
    }
    let outcome: UploadResponse = serde_json::from_str(&execution.response_body).map_err(|e| {
        PortError::Unexpected(format!("Execution {} returned an unreadable body: {}", execution.id, e))
    })?;
    if !outcome.success {
        return Err(match execution.response_status_code {
            401 => PortError::Unauthorized,
            400 => PortError::Invalid(outcome.message),
            404 => PortError::NotFound(outcome.message),
            _ => PortError::Unexpected(outcome.message),
        });
    }
    outcome
        .into_receipt()
        .ok_or_else(|| PortError::Unexpected("Upload function returned an incomplete receipt".to_string()))
}

#[async_trait]
impl PublishService for AppwriteFunctionsAdapter {
    async fn publish(&self, jwt: &str, user_id: &str, request: PublishRequest) -> PortResult<PublishReceipt> {
        let payload = serde_json::to_string(&UploadRequest::from(request))
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        let body = json!({
            "body": payload,
            "async": false,
            "path": UPLOAD_PATH,
            "method": "POST",
            "headers": {
                USER_ID_HEADER: user_id,
                "content-type": "application/json",
            },
        });

        info!("Executing function {} for user {}", self.function_id, user_id);
        let path = format!("/functions/{}/executions", self.function_id);
        let execution: ExecutionRecord = send_json(self.client.user(Method::POST, &path, jwt).json(&body)).await?;
        receipt_from_execution(execution)
    }
}
